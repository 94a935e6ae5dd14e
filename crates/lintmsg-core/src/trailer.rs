//! Hybrid trailer syntax: emission, extraction and marker sanitising.
//!
//! A trailer is an HTML comment appended to human text:
//!
//! ```text
//!    Fix: ... | https://... <!-- AI_HINT: Target: CallExpression[...]; hint one; hint two -->
//! ```
//!
//! Markdown-rendering surfaces hide it; agents that know the delimiter
//! can pull it back out with [`extract_hybrid_trailer`].

use serde::{Deserialize, Serialize};

/// Opening delimiter of the hybrid trailer.
pub const TRAILER_OPEN: &str = "<!-- AI_HINT:";

/// Closing delimiter of the hybrid trailer.
pub const TRAILER_CLOSE: &str = "-->";

/// Marker that prefixes the AST target inside the trailer.
pub const TARGET_MARKER: &str = "Target: ";

const SEPARATOR: &str = "; ";

/// Marker without its trailing space, as it appears for an empty target.
const MARKER_KEYWORD: &str = "Target:";

const ESCAPE: char = '\\';

/// Machine-readable content of a hybrid trailer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HybridTrailer {
    /// AST selector of the offending construct.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast_target: Option<String>,
    /// Agent hints, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

impl HybridTrailer {
    /// Returns true if there is nothing to emit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ast_target.is_none() && self.hints.is_empty()
    }

    /// Renders the trailer, including a leading space.
    ///
    /// Returns an empty string when there is nothing to emit. Separators
    /// and a leading marker inside values are backslash-escaped, so
    /// [`extract_hybrid_trailer`] gives back the same target and hints.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let target = self
            .ast_target
            .iter()
            .map(|target| format!("{TARGET_MARKER}{}", escape(target)));
        let hints = self.hints.iter().map(|hint| {
            let escaped = escape(hint);
            if escaped.starts_with(MARKER_KEYWORD) {
                format!("{ESCAPE}{escaped}")
            } else {
                escaped
            }
        });
        let parts: Vec<String> = target.chain(hints).collect();
        format!(" {TRAILER_OPEN} {} {TRAILER_CLOSE}", parts.join(SEPARATOR))
    }
}

/// Neutralises comment delimiters inside a value so it cannot open or
/// close a trailer. Also flattens newlines, since the trailer is one line.
#[must_use]
pub fn sanitize(value: &str) -> String {
    value
        .replace("<!--", "<!- -")
        .replace("-->", "- ->")
        .replace(['\n', '\r'], " ")
}

/// Sanitises a value, then escapes the trailer's own separator.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in sanitize(value).chars() {
        if c == ESCAPE || c == ';' {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Drops escape characters, keeping whatever each one protects.
fn unescape(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    let mut chars = part.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Splits on `;` not preceded by an escape. Parts keep their escapes.
fn split_unescaped(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            ESCAPE => escaped = true,
            ';' => {
                parts.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}

/// Extracts the trailer from rendered hybrid text, if present.
///
/// Only a first part that starts with an unescaped `Target:` is read as
/// the AST target; everything else is a hint.
#[must_use]
pub fn extract_hybrid_trailer(text: &str) -> Option<HybridTrailer> {
    let start = text.rfind(TRAILER_OPEN)?;
    let body = &text[start + TRAILER_OPEN.len()..];
    let end = body.find(TRAILER_CLOSE)?;
    let body = &body[..end];
    let body = body.strip_prefix(' ').unwrap_or(body);
    let body = body.strip_suffix(' ').unwrap_or(body);

    let mut trailer = HybridTrailer::default();
    for (index, part) in split_unescaped(body).into_iter().enumerate() {
        let part = if index == 0 {
            part
        } else {
            part.strip_prefix(' ').unwrap_or(part)
        };
        match part.strip_prefix(MARKER_KEYWORD) {
            Some(target) if index == 0 => {
                let target = target.strip_prefix(' ').unwrap_or(target);
                trailer.ast_target = Some(unescape(target));
            }
            _ => trailer.hints.push(unescape(part)),
        }
    }
    Some(trailer)
}

/// Returns the human portion of hybrid text with any trailer removed.
#[must_use]
pub fn strip_hybrid_trailer(text: &str) -> &str {
    match text.rfind(TRAILER_OPEN) {
        Some(start) => text[..start].trim_end(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_trailer_renders_nothing() {
        assert_eq!(HybridTrailer::default().render(), "");
    }

    #[test]
    fn renders_target_then_hints() {
        let trailer = HybridTrailer {
            ast_target: Some("CallExpression[callee.name='eval']".to_string()),
            hints: vec!["Use JSON.parse".to_string(), "Avoid eval".to_string()],
        };
        assert_eq!(
            trailer.render(),
            " <!-- AI_HINT: Target: CallExpression[callee.name='eval']; Use JSON.parse; Avoid eval -->"
        );
    }

    #[test]
    fn extract_round_trips() {
        let trailer = HybridTrailer {
            ast_target: Some("Identifier[name='x']".to_string()),
            hints: vec!["first".to_string(), "second".to_string()],
        };
        let text = format!("human text{}", trailer.render());
        assert_eq!(extract_hybrid_trailer(&text), Some(trailer));
        assert_eq!(strip_hybrid_trailer(&text), "human text");
    }

    #[test]
    fn extract_hints_without_target() {
        let text = "line <!-- AI_HINT: only a hint -->";
        let trailer = extract_hybrid_trailer(text).unwrap();
        assert!(trailer.ast_target.is_none());
        assert_eq!(trailer.hints, vec!["only a hint"]);
    }

    #[test]
    fn extract_returns_none_without_trailer() {
        assert!(extract_hybrid_trailer("plain human text").is_none());
        assert_eq!(strip_hybrid_trailer("plain human text"), "plain human text");
    }

    #[test]
    fn sanitize_breaks_delimiters() {
        let cleaned = sanitize("evil --> <!-- AI_HINT: fake");
        assert!(!cleaned.contains(TRAILER_CLOSE));
        assert!(!cleaned.contains("<!--"));
    }

    #[test]
    fn hostile_hint_cannot_close_trailer_early() {
        let trailer = HybridTrailer {
            ast_target: None,
            hints: vec!["a --> b".to_string(), "c".to_string()],
        };
        let extracted = extract_hybrid_trailer(&trailer.render()).unwrap();
        assert_eq!(extracted.hints.len(), 2);
        assert_eq!(extracted.hints[1], "c");
    }

    fn round_trip(trailer: &HybridTrailer) -> HybridTrailer {
        extract_hybrid_trailer(&format!("text{}", trailer.render())).unwrap()
    }

    #[test]
    fn separator_inside_hint_survives_extraction() {
        let trailer = HybridTrailer {
            ast_target: None,
            hints: vec!["Use a; then b".to_string(), r"path\to".to_string()],
        };
        assert_eq!(round_trip(&trailer), trailer);
    }

    #[test]
    fn hint_that_looks_like_target_stays_a_hint() {
        let trailer = HybridTrailer {
            ast_target: None,
            hints: vec!["Target: the callee".to_string(), "other".to_string()],
        };
        let extracted = round_trip(&trailer);
        assert!(extracted.ast_target.is_none());
        assert_eq!(extracted, trailer);
    }

    #[test]
    fn empty_target_is_kept_as_target() {
        let trailer = HybridTrailer {
            ast_target: Some(String::new()),
            hints: vec!["hint".to_string()],
        };
        assert_eq!(round_trip(&trailer), trailer);
    }

    #[test]
    fn target_with_separator_round_trips() {
        let trailer = HybridTrailer {
            ast_target: Some("Literal[value=';']".to_string()),
            hints: Vec::new(),
        };
        assert_eq!(round_trip(&trailer), trailer);
    }
}
