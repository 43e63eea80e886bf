//! Configuration loading for tname

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tname_core::Paths;
use tracing::{debug, warn};

use crate::emitter::EmitOptions;
use crate::template::Template;
use crate::types::TypeList;

/// tname configuration. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Replaces the built-in type list
    #[serde(default)]
    pub types: Option<TypeList>,

    /// Spaces prefixed to every generated line
    #[serde(default)]
    pub indent: Option<usize>,

    /// Wrap output in begin/end marker comments
    #[serde(default)]
    pub markers: Option<bool>,

    /// Custom stanza template, relative to the config file's directory
    #[serde(default)]
    pub template: Option<PathBuf>,

    /// File this config was read from
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the default config file is
    /// used when present and built-in defaults when not.
    pub fn load(paths: &Paths, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Self::load_from(path)
            }
            None => {
                let path = paths.config_file();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))?;
        config.source = Some(path.to_path_buf());

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Configured type list, or the built-in one
    pub fn type_list(&self) -> TypeList {
        self.types.clone().unwrap_or_else(TypeList::builtin)
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            indent: self.indent.unwrap_or(0),
            markers: self.markers.unwrap_or(false),
        }
    }

    /// Where the configured template lives, if one is configured
    pub fn template_path(&self) -> Option<PathBuf> {
        let template = self.template.as_ref()?;
        let base = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .map(Paths::with_config_dir)
            .unwrap_or_default();
        Some(base.resolve(template))
    }

    /// Load the configured template, or the default stanza
    pub fn load_template(&self) -> Result<Template> {
        match self.template_path() {
            Some(path) => load_template_file(&path),
            None => Ok(Template::default()),
        }
    }
}

/// Read a stanza template from disk
pub fn load_template_file(path: &Path) -> Result<Template> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read template from {:?}", path))?;
    let template = Template::new(text);

    for slot in template.missing_slots() {
        warn!(path = %path.display(), slot, "template never uses {{{{{}}}}}", slot);
    }
    Ok(template)
}
