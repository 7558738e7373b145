use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use tree_sitter::{Node, Parser, Tree};

use crate::analysis::tree::node_text;
use crate::analysis::types::Ty;
use crate::util;

pub const COMPONENT_DECORATOR: &str = "Component";

/// Framework-reserved method names, never surfaced as members.
pub const BUILTIN_METHODS: &[&str] = &["render", "hostData"];

/// Recognized lifecycle method names in canonical phase order.
pub const LIFECYCLE_METHODS: &[&str] = &[
    "componentWillLoad",
    "componentDidLoad",
    "componentWillUpdate",
    "componentDidUpdate",
    "componentDidUnload",
];

/// Role decorators in placement priority order. A member carrying several of
/// these lands in the bucket of the first match only.
const ROLE_DECORATORS: &[&str] = &["Element", "State", "Prop", "Event", "Method"];

const WATCH_DECORATOR: &str = "Watch";
const LISTEN_DECORATOR: &str = "Listen";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMeta {
    pub property: String,
    pub handler: String,
    /// Byte offset of the handler's name in the source, kept for the rename
    /// augmenter which runs after the tree is gone.
    pub handler_name_start: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenerMeta {
    pub event_names: Vec<String>,
    pub handler: String,
}

/// Categorized member model for one analyzed file. Built fresh per request,
/// never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMeta {
    pub class_name: Option<String>,
    pub internal_properties: Vec<String>,
    pub internal_methods: Vec<String>,
    pub elements: Vec<String>,
    pub states: Vec<String>,
    pub props_connect: Vec<String>,
    pub props_context: Vec<String>,
    pub props: Vec<String>,
    pub events: Vec<String>,
    pub methods: Vec<String>,
    pub watched: Vec<WatchedMeta>,
    pub listeners: Vec<ListenerMeta>,
    pub lifecycle: Vec<String>,
    pub member_types: BTreeMap<String, Ty>,
}

impl ComponentMeta {
    pub fn is_component(&self) -> bool {
        self.class_name.is_some()
    }
}

pub struct ComponentExtractor {
    parser: Parser,
}

impl ComponentExtractor {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_typescript::LANGUAGE_TSX;
        parser.set_language(&language.into())?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Option<Tree> {
        self.parser.parse(source, None)
    }

    pub fn extract(&mut self, source: &str) -> ComponentMeta {
        match self.parse(source) {
            Some(tree) => extract_component_meta(tree.root_node(), source),
            None => ComponentMeta::default(),
        }
    }
}

/// Walk the tree and build the member model for the first class carrying the
/// component decorator. Other top-level trees are traversed but contribute
/// nothing.
pub fn extract_component_meta(root: Node<'_>, source: &str) -> ComponentMeta {
    let mut meta = ComponentMeta::default();
    let mut seen = false;
    walk(root, source, &mut meta, &mut seen);
    meta
}

fn walk(node: Node<'_>, source: &str, meta: &mut ComponentMeta, seen: &mut bool) {
    if matches!(node.kind(), "class_declaration" | "abstract_class_declaration")
        && !*seen
        && has_component_decorator(node, source)
    {
        *seen = true;
        process_component_class(node, source, meta);
        return;
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        walk(child, source, meta, seen);
    }
}

fn has_component_decorator(node: Node<'_>, source: &str) -> bool {
    let mut decorators = decorator_nodes(node);
    // `@Component() export class Foo` attaches the decorator to the export
    // statement, not the class.
    if let Some(parent) = node.parent() {
        if parent.kind() == "export_statement" {
            decorators.extend(decorator_nodes(parent));
        }
    }
    decorators.iter().any(|decorator| {
        decorator_name_and_args(*decorator, source)
            .map(|(name, _)| name == COMPONENT_DECORATOR)
            .unwrap_or(false)
    })
}

fn process_component_class(node: Node<'_>, source: &str, meta: &mut ComponentMeta) {
    if let Some(name_node) = node.child_by_field_name("name") {
        let name = node_text(name_node, source);
        if !name.is_empty() {
            meta.class_name = Some(name);
        }
    }
    let Some(body) = node.child_by_field_name("body") else {
        return;
    };
    let mut cursor = body.walk();
    for member in body.named_children(&mut cursor) {
        process_member(member, source, meta);
    }
}

fn process_member(node: Node<'_>, source: &str, meta: &mut ComponentMeta) {
    let is_method = match node.kind() {
        "method_definition" => true,
        "public_field_definition" | "field_definition" => false,
        _ => return,
    };
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    if name_node.kind() == "computed_property_name" {
        return;
    }
    let name = node_text(name_node, source);
    if name.is_empty() {
        return;
    }

    let decorators = decorator_nodes(node);
    if decorators.is_empty() {
        if BUILTIN_METHODS.contains(&name.as_str()) {
            return;
        }
        if is_method {
            if LIFECYCLE_METHODS.contains(&name.as_str()) {
                meta.lifecycle.push(name);
            } else {
                meta.internal_methods.push(name);
            }
        } else {
            meta.internal_properties.push(name);
        }
        return;
    }

    let decorated: Vec<(String, Vec<Node<'_>>)> = decorators
        .iter()
        .filter_map(|decorator| decorator_name_and_args(*decorator, source))
        .collect();

    if !is_method {
        if let Some(ty) = field_ty(node, source) {
            meta.member_types.insert(name.clone(), ty);
        }
    }

    for role in ROLE_DECORATORS {
        let Some((_, args)) = decorated.iter().find(|(dec, _)| dec == role) else {
            continue;
        };
        match *role {
            "Element" => meta.elements.push(name.clone()),
            "State" => meta.states.push(name.clone()),
            "Prop" => match prop_variant(args, source) {
                PropVariant::Connect => meta.props_connect.push(name.clone()),
                PropVariant::Context => meta.props_context.push(name.clone()),
                PropVariant::Plain => meta.props.push(name.clone()),
            },
            "Event" => meta.events.push(name.clone()),
            "Method" => meta.methods.push(name.clone()),
            _ => {}
        }
        break;
    }

    for (dec, args) in &decorated {
        if dec != WATCH_DECORATOR {
            continue;
        }
        let Some(property) = args.first().and_then(|arg| string_argument(*arg, source)) else {
            continue;
        };
        meta.watched.push(WatchedMeta {
            property,
            handler: name.clone(),
            handler_name_start: name_node.start_byte(),
        });
    }

    let mut event_names = Vec::new();
    for (dec, args) in &decorated {
        if dec != LISTEN_DECORATOR {
            continue;
        }
        if let Some(event) = args.first().and_then(|arg| string_argument(*arg, source)) {
            event_names.push(event);
        }
    }
    if !event_names.is_empty() {
        meta.listeners.push(ListenerMeta {
            event_names,
            handler: name,
        });
    }
}

enum PropVariant {
    Connect,
    Context,
    Plain,
}

fn prop_variant(args: &[Node<'_>], source: &str) -> PropVariant {
    let Some(options) = args.first().filter(|node| node.kind() == "object") else {
        return PropVariant::Plain;
    };
    let mut has_context = false;
    let mut cursor = options.walk();
    for pair in options.named_children(&mut cursor) {
        if pair.kind() != "pair" {
            continue;
        }
        let Some(key_node) = pair.child_by_field_name("key") else {
            continue;
        };
        let raw = node_text(key_node, source);
        let key = util::unquote_string_literal(&raw).unwrap_or(raw);
        match key.as_str() {
            "connect" => return PropVariant::Connect,
            "context" => has_context = true,
            _ => {}
        }
    }
    if has_context {
        PropVariant::Context
    } else {
        PropVariant::Plain
    }
}

fn field_ty(node: Node<'_>, source: &str) -> Option<Ty> {
    let annotation = node.child_by_field_name("type")?;
    let ty_node = annotation.named_child(0)?;
    Some(Ty::from_type_node(ty_node, source))
}

pub fn decorator_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "decorator" {
            out.push(child);
        }
    }
    out
}

pub fn decorator_name_and_args<'a>(node: Node<'a>, source: &str) -> Option<(String, Vec<Node<'a>>)> {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "call_expression" {
            let Some(target) = child.child_by_field_name("function") else {
                continue;
            };
            let raw = node_text(target, source);
            let name = raw.split('.').next_back().unwrap_or(raw.as_str()).to_string();
            return Some((name, call_arguments(child)));
        }
    }
    let raw = node_text(node, source);
    let name = raw
        .trim_start_matches('@')
        .split('.')
        .next_back()
        .unwrap_or(raw.as_str())
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some((name, Vec::new()))
    }
}

fn call_arguments(node: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let Some(args) = node.child_by_field_name("arguments") else {
        return out;
    };
    let mut cursor = args.walk();
    for child in args.named_children(&mut cursor) {
        out.push(child);
    }
    out
}

fn string_argument(node: Node<'_>, source: &str) -> Option<String> {
    if node.kind() == "template_string" {
        return None;
    }
    let raw = node_text(node, source);
    util::unquote_string_literal(&raw)
}
