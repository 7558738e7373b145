use serde::Serialize;
use tree_sitter::Node;

use crate::analysis::tree::node_text;

/// Primitive-likeness of a declared type annotation. Only the shapes the
/// transformer cares about are distinguished; everything else is `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ty {
    Boolean,
    BooleanLiteral,
    Number,
    NumberLiteral,
    String,
    StringLiteral,
    Union(Vec<Ty>),
    Other,
}

impl Ty {
    /// Classify a tree-sitter type node (the child of a `type_annotation`).
    pub fn from_type_node(node: Node<'_>, source: &str) -> Ty {
        match node.kind() {
            "predefined_type" => match node_text(node, source).as_str() {
                "boolean" => Ty::Boolean,
                "number" => Ty::Number,
                "string" => Ty::String,
                _ => Ty::Other,
            },
            "literal_type" => {
                let Some(inner) = node.named_child(0) else {
                    return Ty::Other;
                };
                match inner.kind() {
                    "true" | "false" => Ty::BooleanLiteral,
                    "number" | "unary_expression" => Ty::NumberLiteral,
                    "string" => Ty::StringLiteral,
                    _ => Ty::Other,
                }
            }
            "union_type" => {
                let mut members = Vec::new();
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    members.push(Ty::from_type_node(child, source));
                }
                Ty::Union(members)
            }
            "parenthesized_type" => match node.named_child(0) {
                Some(inner) => Ty::from_type_node(inner, source),
                None => Ty::Other,
            },
            _ => Ty::Other,
        }
    }
}

/// Apply `predicate` to `ty`, unwrapping unions with any-of semantics: a
/// union matches as soon as one member matches.
pub fn check_type<F>(ty: &Ty, predicate: F) -> bool
where
    F: Fn(&Ty) -> bool,
{
    match ty {
        Ty::Union(members) => members.iter().any(|member| check_flat(member, &predicate)),
        other => check_flat(other, &predicate),
    }
}

fn check_flat<F>(ty: &Ty, predicate: &F) -> bool
where
    F: Fn(&Ty) -> bool,
{
    match ty {
        Ty::Union(members) => members.iter().any(|member| check_flat(member, predicate)),
        other => predicate(other),
    }
}

pub fn is_boolean(ty: Option<&Ty>) -> bool {
    match ty {
        None => false,
        Some(ty) => check_type(ty, |t| matches!(t, Ty::Boolean | Ty::BooleanLiteral)),
    }
}

pub fn is_number(ty: Option<&Ty>) -> bool {
    match ty {
        None => false,
        Some(ty) => check_type(ty, |t| matches!(t, Ty::Number | Ty::NumberLiteral)),
    }
}

pub fn is_string(ty: Option<&Ty>) -> bool {
    match ty {
        None => false,
        Some(ty) => check_type(ty, |t| matches!(t, Ty::String | Ty::StringLiteral)),
    }
}
