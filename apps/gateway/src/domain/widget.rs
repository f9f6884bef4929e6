use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A widget as returned by the downstream listing service.
///
/// Only `type` is required. `id` is carried in whatever JSON shape the
/// upstream uses, and `created` is only needed once a date clause asks for it.
/// Fields beyond these are kept in `extra` and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub id: Value,
    #[serde(rename = "type")]
    pub kind: String,
    /// Creation time exactly as the upstream sent it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Widget {
    pub fn new(id: impl Into<Value>, kind: impl Into<String>, created: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            created: Some(created.into()),
            type_label: None,
            extra: Map::new(),
        }
    }

    /// Attach the display label derived from `type`.
    pub fn labelled(mut self) -> Self {
        self.type_label = Some(type_label(&self.kind));
        self
    }
}

/// Display label for a widget type: hyphens become spaces, then the result is
/// title-cased.
///
/// A cased character (one with an upper/lower distinction) directly after
/// another cased character is lower-cased; any other cased character is
/// title-cased. Uncased characters such as digits or CJK ideographs break
/// words without being changed.
pub fn type_label(kind: &str) -> String {
    let mut label = String::with_capacity(kind.len());
    let mut after_cased = false;

    for ch in kind.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if after_cased {
            label.extend(ch.to_lowercase());
        } else {
            push_titlecase(&mut label, ch);
        }
        after_cased = is_cased(ch);
    }

    label
}

fn is_cased(ch: char) -> bool {
    ch.is_lowercase() || ch.is_uppercase() || is_titlecase_letter(ch)
}

// General category Lt: the Latin digraphs and the Greek letters with prosgegrammeni.
fn is_titlecase_letter(ch: char) -> bool {
    matches!(
        ch,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

fn push_titlecase(out: &mut String, ch: char) {
    // Digraphs have a dedicated titlecase form distinct from their uppercase.
    let digraph = match ch {
        '\u{01C4}'..='\u{01C6}' => Some('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => Some('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => Some('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => Some('\u{01F2}'),
        _ => None,
    };
    if let Some(title) = digraph {
        out.push(title);
        return;
    }

    // Expanding mappings (`ß` -> `SS`, `ﬁ` -> `FI`) keep only the first
    // letter upper-case.
    let mut upper = ch.to_uppercase();
    if let Some(first) = upper.next() {
        out.push(first);
    }
    for rest in upper {
        if ch == '\u{0149}' {
            out.push(rest);
        } else {
            out.extend(rest.to_lowercase());
        }
    }
}
