//! tname - C++ type-name specialization generator
//!
//! Commands:
//! - (none): Emit specializations to stdout
//! - list: Show the effective type list
//! - splice <HEADER>: Regenerate the marked region of a header

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tname::{splice_file, Config, EmitOptions, Emitter, Template, TypeList};
use tname_core::Paths;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tname")]
#[command(about = "Generate tname<T>() specializations for C++ headers")]
#[command(version)]
#[command(after_help = r#"DEFAULT TYPES:
    short int char wchar_t float double long std::string std::wstring "long long"

TEMPLATE PLACEHOLDERS:
    {{TYPE}}        Type name as written (bare token)
    {{LITERAL}}     Type name as a quoted, escaped string literal

CONFIG:
    ~/.config/tname/config.toml (or --config PATH)
    types = ["int", "long long"]
    indent = 8
    markers = true
    template = "stanza.tpl"

EXAMPLES:
    tname > tname.inc                     # Emit the default list
    tname --type int --type "long long"   # Emit a custom list
    tname --indent 8 --markers            # Ready to paste into a namespace
    tname splice prettyprint.hpp          # Regenerate the header in place
    tname splice prettyprint.hpp --check  # Fail if the header is stale
"#)]
struct Cli {
    #[command(flatten)]
    opts: GenOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GenOpts {
    /// Config file (default: ~/.config/tname/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stanza template file
    #[arg(long, global = true, value_name = "PATH")]
    template: Option<PathBuf>,

    /// Type to emit (repeatable, replaces the configured list)
    #[arg(long = "type", global = true, value_name = "NAME")]
    types: Vec<String>,

    /// Spaces prefixed to every generated line
    #[arg(long, global = true)]
    indent: Option<usize>,

    /// Wrap output in begin/end generated markers
    #[arg(long)]
    markers: bool,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective type list
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Regenerate the generated region of a header in place
    Splice {
        /// Header containing --begin generated-- / --end generated-- lines
        header: PathBuf,

        /// Don't write; fail if the header is out of date
        #[arg(long)]
        check: bool,
    },
}

/// Config file values with command-line overrides applied
struct Settings {
    types: TypeList,
    template: Template,
    options: EmitOptions,
    /// Indent came from the command line or the config file
    indent_set: bool,
}

impl Settings {
    fn resolve(opts: &GenOpts) -> Result<Self> {
        let config = Config::load(&Paths::new(), opts.config.as_deref())?;

        let types = if opts.types.is_empty() {
            config.type_list()
        } else {
            opts.types.iter().map(String::as_str).collect()
        };

        let template = match &opts.template {
            Some(path) => tname::config::load_template_file(path)?,
            None => config.load_template()?,
        };

        let indent_set = opts.indent.is_some() || config.indent.is_some();
        let mut options = config.emit_options();
        if let Some(indent) = opts.indent {
            options.indent = indent;
        }
        options.markers |= opts.markers;

        Ok(Self {
            types,
            template,
            options,
            indent_set,
        })
    }
}

fn main() -> Result<()> {
    // stdout carries generated code, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(&cli.opts)?;

    match cli.command {
        None => cmd_emit(&settings, cli.opts.output.as_deref()),
        Some(Commands::List { json }) => cmd_list(&settings, json),
        Some(Commands::Splice { header, check }) => cmd_splice(&settings, &header, check),
    }
}

/// Emit specializations to stdout or a file
fn cmd_emit(settings: &Settings, output: Option<&Path>) -> Result<()> {
    let emitter = Emitter::new(settings.template.clone(), settings.options);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output: {}", path.display()))?;
            let mut out = BufWriter::new(file);
            emitter
                .emit(&settings.types, &mut out)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            info!(path = %path.display(), types = settings.types.len(), "wrote specializations");
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            emitter
                .emit(&settings.types, &mut out)
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Print the effective type list
fn cmd_list(settings: &Settings, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&settings.types)?)?;
        return Ok(());
    }

    for name in &settings.types {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}

/// Rewrite the generated region of a header
fn cmd_splice(settings: &Settings, header: &Path, check: bool) -> Result<()> {
    let render = |marker_indent: usize| {
        let options = EmitOptions {
            indent: if settings.indent_set {
                settings.options.indent
            } else {
                marker_indent
            },
            markers: false,
        };
        Emitter::new(settings.template.clone(), options).render(&settings.types)
    };

    let changed = splice_file(header, check, render)
        .with_context(|| format!("Failed to splice: {}", header.display()))?;

    if check && changed {
        bail!("{} is out of date, run: tname splice {}", header.display(), header.display());
    }

    if changed {
        eprintln!("success: Regenerated {}", header.display());
    } else {
        eprintln!("info: {} already up to date", header.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parsing() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_repeated_types() {
        let cli = Cli::try_parse_from(["tname", "--type", "int", "--type", "long long"]).unwrap();
        assert_eq!(cli.opts.types, vec!["int".to_string(), "long long".to_string()]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_splice_subcommand() {
        let cli = Cli::try_parse_from(["tname", "splice", "pp.hpp", "--check", "--indent", "8"])
            .unwrap();
        assert_eq!(cli.opts.indent, Some(8));
        match cli.command {
            Some(Commands::Splice { header, check }) => {
                assert_eq!(header, PathBuf::from("pp.hpp"));
                assert!(check);
            }
            _ => panic!("expected splice"),
        }
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("tname.toml");
        std::fs::write(&config, "types = [\"float\"]\nindent = 8\n").unwrap();

        let cli = Cli::try_parse_from([
            "tname",
            "--config",
            config.to_str().unwrap(),
            "--indent",
            "2",
            "--markers",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli.opts).unwrap();

        assert_eq!(settings.types.len(), 1);
        assert_eq!(settings.options.indent, 2);
        assert!(settings.options.markers);
        assert!(settings.indent_set);
    }

    const INDENTED_HEADER: &str = "\
namespace pretty {
        /* --begin generated-- (see gen.rb) */
        stale
        /* --end generated-- */
}
";

    fn int_settings(indent: Option<usize>) -> Settings {
        Settings {
            types: ["int"].into_iter().collect(),
            template: Template::default(),
            options: EmitOptions {
                indent: indent.unwrap_or(0),
                markers: false,
            },
            indent_set: indent.is_some(),
        }
    }

    #[test]
    fn test_splice_follows_marker_indent() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("prettyprint.hpp");
        std::fs::write(&header, INDENTED_HEADER).unwrap();

        cmd_splice(&int_settings(None), &header, false).unwrap();

        assert_eq!(
            std::fs::read_to_string(&header).unwrap(),
            "\
namespace pretty {
        /* --begin generated-- (see gen.rb) */
        template<>
        std::string tname<int>()
        {
            return \"int\";
        }

        /* --end generated-- */
}
"
        );

        // Already current: check passes without touching the file
        cmd_splice(&int_settings(None), &header, true).unwrap();
    }

    #[test]
    fn test_splice_explicit_indent_wins() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("prettyprint.hpp");
        std::fs::write(&header, INDENTED_HEADER).unwrap();

        cmd_splice(&int_settings(Some(2)), &header, false).unwrap();

        let text = std::fs::read_to_string(&header).unwrap();
        assert!(text.contains("\n  std::string tname<int>()\n"));
        assert!(text.contains("\n      return \"int\";\n"));
    }

    #[test]
    fn test_splice_check_fails_when_stale() {
        let dir = tempfile::tempdir().unwrap();
        let header = dir.path().join("prettyprint.hpp");
        std::fs::write(&header, INDENTED_HEADER).unwrap();

        assert!(cmd_splice(&int_settings(None), &header, true).is_err());
        assert_eq!(std::fs::read_to_string(&header).unwrap(), INDENTED_HEADER);
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("tname.inc");
        let settings = Settings {
            types: ["int"].into_iter().collect(),
            template: Template::default(),
            options: EmitOptions::default(),
            indent_set: false,
        };

        cmd_emit(&settings, Some(&out)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "template<>\nstd::string tname<int>()\n{\n    return \"int\";\n}\n\n"
        );
    }
}
