use tree_sitter::Node;

use crate::analysis::extract::{BUILTIN_METHODS, ComponentMeta, decorator_name_and_args};
use crate::analysis::tree::{ancestors, find_node_at};
use crate::model::{CompletionEntry, CompletionList, EntryKind};
use crate::rank::{category_of, sort_key};

/// Decorators whose options object gets argument completion.
const OPTION_DECORATORS: &[&str] = &["Component", "Prop"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    Str,
    Bool,
}

const PROP_OPTIONS: &[(&str, OptionKind)] = &[
    ("attribute", OptionKind::Str),
    ("connect", OptionKind::Str),
    ("context", OptionKind::Str),
    ("mutable", OptionKind::Bool),
    ("reflect", OptionKind::Bool),
    ("reflectToAttr", OptionKind::Bool),
];

const COMPONENT_OPTIONS: &[(&str, OptionKind)] = &[
    ("tag", OptionKind::Str),
    ("styleUrl", OptionKind::Str),
    ("assetsDir", OptionKind::Str),
    ("shadow", OptionKind::Bool),
    ("scoped", OptionKind::Bool),
];

/// Tag-style names offered inside markup text. Entries with an internal or
/// test prefix never reach the completion list.
const MARKUP_TAGS: &[&str] = &[
    "host",
    "slot",
    "slot-fallback",
    "context-consumer",
    "internal-anchor",
    "internal-router",
    "test-sibling",
];

/// Attribute names offered inside a host-data object literal.
const HOST_DATA_ATTRIBUTES: &[&str] = &[
    "class",
    "style",
    "id",
    "role",
    "slot",
    "tabindex",
    "title",
    "hidden",
    "aria-label",
    "aria-hidden",
];

const HOST_DATA_METHOD: &str = "hostData";

/// Completion contexts recognized structurally rather than by member
/// category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside the argument list of a recognized decorator.
    DecoratorArgs(String),
    /// Inside an object literal under the host-data method.
    HostData,
    /// Inside a markup text region.
    MarkupText,
}

pub fn completion_context(
    root: Node<'_>,
    source: &str,
    position: usize,
) -> Option<CompletionContext> {
    let node = find_node_at(root, position)?;
    for ancestor in ancestors(node) {
        match ancestor.kind() {
            "jsx_text" => return Some(CompletionContext::MarkupText),
            "decorator" => {
                let (name, _) = decorator_name_and_args(ancestor, source)?;
                if !OPTION_DECORATORS.contains(&name.as_str()) {
                    return None;
                }
                if !within_arguments(ancestor, position) {
                    return None;
                }
                return Some(CompletionContext::DecoratorArgs(name));
            }
            "object" => {
                if enclosing_method_name(ancestor, source).as_deref() == Some(HOST_DATA_METHOD) {
                    return Some(CompletionContext::HostData);
                }
            }
            _ => {}
        }
    }
    None
}

fn within_arguments(decorator: Node<'_>, position: usize) -> bool {
    let mut cursor = decorator.walk();
    for child in decorator.named_children(&mut cursor) {
        if child.kind() != "call_expression" {
            continue;
        }
        if let Some(args) = child.child_by_field_name("arguments") {
            return args.start_byte() <= position && position < args.end_byte();
        }
    }
    false
}

fn enclosing_method_name(node: Node<'_>, source: &str) -> Option<String> {
    for ancestor in ancestors(node) {
        if ancestor.kind() != "method_definition" {
            continue;
        }
        let name_node = ancestor.child_by_field_name("name")?;
        return Some(crate::analysis::tree::node_text(name_node, source));
    }
    None
}

/// Drop builtin-named method entries and attach sort keys to every entry the
/// metadata can categorize; uncategorized entries keep their original hint.
pub fn adjust_completions(meta: &ComponentMeta, list: CompletionList) -> CompletionList {
    let entries = list
        .entries
        .into_iter()
        .filter(|entry| {
            !(entry.kind == EntryKind::Method && BUILTIN_METHODS.contains(&entry.name.as_str()))
        })
        .map(|mut entry| {
            if let Some(category) = category_of(meta, &entry.name) {
                entry.sort_text = Some(sort_key(category, &entry.name));
            }
            entry
        })
        .collect();
    CompletionList::new(entries)
}

/// Canned option-name completions for a recognized decorator's argument
/// object. String-valued options insert `name: `, boolean-valued options
/// insert `name: true`.
pub fn decorator_argument_completions(decorator: &str) -> Option<CompletionList> {
    let options = match decorator {
        "Prop" => PROP_OPTIONS,
        "Component" => COMPONENT_OPTIONS,
        _ => return None,
    };
    let entries = options
        .iter()
        .map(|(name, kind)| {
            let insert = match kind {
                OptionKind::Str => format!("{name}: "),
                OptionKind::Bool => format!("{name}: true"),
            };
            CompletionEntry::new(*name, EntryKind::Property).with_insert_text(insert)
        })
        .collect();
    Some(CompletionList::new(entries))
}

/// Tag names offered in markup text, with internal and test tags filtered
/// out. Only used when the host has no answer of its own.
pub fn markup_tag_completions() -> CompletionList {
    let entries = MARKUP_TAGS
        .iter()
        .filter(|tag| !tag.starts_with("internal-") && !tag.starts_with("test-"))
        .map(|tag| CompletionEntry::new(*tag, EntryKind::Keyword))
        .collect();
    CompletionList::new(entries)
}

/// Attribute names offered inside a host-data object literal. Hyphenated
/// names insert quoted keys.
pub fn host_data_completions() -> CompletionList {
    let entries = HOST_DATA_ATTRIBUTES
        .iter()
        .map(|name| {
            let insert = if name.contains('-') {
                format!("'{name}': ")
            } else {
                format!("{name}: ")
            };
            CompletionEntry::new(*name, EntryKind::Property).with_insert_text(insert)
        })
        .collect();
    CompletionList::new(entries)
}
