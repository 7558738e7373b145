use serde::{Deserialize, Serialize};

/// Completion entry kinds, matching the host service's element kind strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Property,
    Method,
    Function,
    Variable,
    Class,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionEntry {
    pub name: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
}

impl CompletionEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        CompletionEntry {
            name: name.into(),
            kind,
            sort_text: None,
            insert_text: None,
        }
    }

    pub fn with_insert_text(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = Some(insert_text.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionList {
    pub entries: Vec<CompletionEntry>,
}

impl CompletionList {
    pub fn new(entries: Vec<CompletionEntry>) -> Self {
        CompletionList { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One segment of a rendered symbol display, tsserver style: the `kind` is a
/// display classification ("punctuation", "text", "keyword", "space", ...),
/// not a symbol kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDisplayPart {
    pub text: String,
    pub kind: String,
}

impl SymbolDisplayPart {
    pub fn new(text: impl Into<String>, kind: impl Into<String>) -> Self {
        SymbolDisplayPart {
            text: text.into(),
            kind: kind.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, "text")
    }

    pub fn punctuation(text: impl Into<String>) -> Self {
        Self::new(text, "punctuation")
    }

    pub fn space() -> Self {
        Self::new(" ", "space")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionDetail {
    pub name: String,
    pub kind: EntryKind,
    #[serde(default)]
    pub kind_modifiers: String,
    #[serde(default)]
    pub display_parts: Vec<SymbolDisplayPart>,
    #[serde(default)]
    pub documentation: Vec<SymbolDisplayPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub length: usize,
}

impl TextSpan {
    pub fn new(start: usize, length: usize) -> Self {
        TextSpan { start, length }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickInfo {
    pub kind: EntryKind,
    pub text_span: TextSpan,
    #[serde(default)]
    pub display_parts: Vec<SymbolDisplayPart>,
    #[serde(default)]
    pub documentation: Vec<SymbolDisplayPart>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub file: String,
    pub text_span: TextSpan,
    pub is_write_access: bool,
    pub is_definition: bool,
    #[serde(default)]
    pub is_in_string: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameLocation {
    pub file: String,
    pub text_span: TextSpan,
}
