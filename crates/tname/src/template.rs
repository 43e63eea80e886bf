//! Stanza template handling
//!
//! A stanza is the text emitted for one type name. It has two slots:
//! `{{TYPE}}` takes the name as a bare C++ token and `{{LITERAL}}` takes
//! it as a quoted string literal. Any other `{{PLACEHOLDER}}` is left as-is.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::types::TypeName;

/// Slot filled with the raw type name
pub const TYPE_SLOT: &str = "TYPE";
/// Slot filled with the quoted, escaped type name
pub const LITERAL_SLOT: &str = "LITERAL";

/// The stanza used by the generated header
pub const DEFAULT_TEMPLATE: &str = "\
template<>
std::string tname<{{TYPE}}>()
{
    return {{LITERAL}};
}
";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").expect("placeholder pattern is valid")
});

/// A stanza template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Default for Template {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl Template {
    /// Wrap template text. A trailing newline is added if missing so
    /// every rendered stanza ends on its own line.
    pub fn new(text: impl Into<String>) -> Self {
        let mut template = Self { text: text.into() };
        if !template.text.ends_with('\n') {
            let eol = template.line_ending();
            template.text.push_str(eol);
        }
        template
    }

    /// `\r\n` if the template text uses CRLF line endings, `\n` otherwise
    pub fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Fill both slots with `name`
    pub fn render(&self, name: &TypeName) -> String {
        PLACEHOLDER
            .replace_all(&self.text, |caps: &Captures| match &caps[1] {
                TYPE_SLOT => name.as_str().to_string(),
                LITERAL_SLOT => quote_literal(name.as_str()),
                other => format!("{{{{{}}}}}", other),
            })
            .into_owned()
    }

    /// Slots this template never mentions
    pub fn missing_slots(&self) -> Vec<&'static str> {
        let used = self.placeholders();
        [TYPE_SLOT, LITERAL_SLOT]
            .into_iter()
            .filter(|slot| !used.iter().any(|u| u == slot))
            .collect()
    }

    /// Placeholders referenced by this template, sorted and deduplicated
    fn placeholders(&self) -> Vec<String> {
        let mut found: Vec<String> = PLACEHOLDER
            .captures_iter(&self.text)
            .map(|cap| cap[1].to_string())
            .collect();

        found.sort();
        found.dedup();
        found
    }
}

/// Render `raw` as a C++ narrow string literal, quotes included.
///
/// Non-ASCII text passes through unchanged as UTF-8. Control characters
/// without a short escape use three-digit octal so a following digit can
/// never extend the escape.
pub fn quote_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');

    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }

    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default() {
        let out = Template::default().render(&TypeName::from("int"));
        assert_eq!(
            out,
            "template<>\nstd::string tname<int>()\n{\n    return \"int\";\n}\n"
        );
    }

    #[test]
    fn test_render_multi_word_name() {
        let out = Template::default().render(&TypeName::from("long long"));
        assert!(out.contains("tname<long long>()"));
        assert!(out.contains("return \"long long\";"));
    }

    #[test]
    fn test_unknown_placeholder_left_alone() {
        let tpl = Template::new("{{TYPE}} {{OTHER}}");
        assert_eq!(tpl.render(&TypeName::from("char")), "char {{OTHER}}\n");
    }

    #[test]
    fn test_name_is_not_rescanned() {
        let out = Template::new("{{TYPE}}").render(&TypeName::from("{{LITERAL}}"));
        assert_eq!(out, "{{LITERAL}}\n");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            Template::default().placeholders(),
            vec!["LITERAL".to_string(), "TYPE".to_string()]
        );
    }

    #[test]
    fn test_missing_slots() {
        assert!(Template::default().missing_slots().is_empty());
        assert_eq!(Template::new("{{TYPE}} only").missing_slots(), vec![LITERAL_SLOT]);
        assert_eq!(
            Template::new("{{OTHER}}").missing_slots(),
            vec![TYPE_SLOT, LITERAL_SLOT]
        );
    }

    #[test]
    fn test_line_ending() {
        assert_eq!(Template::default().line_ending(), "\n");

        let crlf = Template::new("a\r\nb");
        assert_eq!(crlf.line_ending(), "\r\n");
        assert_eq!(crlf.render(&TypeName::from("int")), "a\r\nb\r\n");
    }

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote_literal("std::wstring"), "\"std::wstring\"");
        assert_eq!(quote_literal(""), "\"\"");
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote_literal(r"a\b"), r#""a\\b""#);
        assert_eq!(quote_literal("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(quote_literal("a\tb\nc\r"), r#""a\tb\nc\r""#);
        assert_eq!(quote_literal("\u{1}7"), r#""\0017""#);
        assert_eq!(quote_literal("\u{7f}"), r#""\177""#);
    }

    #[test]
    fn test_quote_keeps_unicode() {
        assert_eq!(quote_literal("größe"), "\"größe\"");
    }
}
