use crate::analysis::extract::ComponentMeta;
use crate::analysis::types::{Ty, is_boolean, is_number, is_string};
use crate::model::{CompletionDetail, EntryKind, QuickInfo, SymbolDisplayPart};
use crate::rank::{MemberCategory, category_of};

/// Fixed documentation for the lifecycle methods, in canonical phase order.
pub const LIFECYCLE_DOCS: &[(&str, &str)] = &[
    (
        "componentWillLoad",
        "Called once just before the component is first rendered.",
    ),
    (
        "componentDidLoad",
        "Called once just after the component is fully loaded and the first render occurs.",
    ),
    (
        "componentWillUpdate",
        "Called just before the component re-renders.",
    ),
    (
        "componentDidUpdate",
        "Called just after the component re-renders.",
    ),
    (
        "componentDidUnload",
        "Called once just after the component is removed from the DOM.",
    ),
];

/// Fixed documentation for the framework-reserved methods.
pub const BUILTIN_DOCS: &[(&str, &str)] = &[
    (
        "render",
        "Returns the virtual DOM representation of the component.",
    ),
    (
        "hostData",
        "Returns the attributes applied to the host element.",
    ),
];

/// Decorate a raw detail result according to the member's category. Only
/// property and method entries are touched; unmatched names pass through
/// unchanged.
pub fn adjust_detail(meta: &ComponentMeta, detail: CompletionDetail) -> CompletionDetail {
    if !matches!(detail.kind, EntryKind::Property | EntryKind::Method) {
        return detail;
    }
    let Some(category) = category_of(meta, &detail.name) else {
        return detail;
    };
    let mut detail = detail;
    match category {
        MemberCategory::Watch => {
            detail.display_parts = replace_role_segment(detail.display_parts, badge("watch"));
            for watch in meta.watched.iter().filter(|w| w.handler == detail.name) {
                push_doc_line(
                    &mut detail.documentation,
                    format!("@Watch('{}')", watch.property),
                );
            }
        }
        MemberCategory::Listen => {
            let mut badges = Vec::new();
            if let Some(listener) = meta
                .listeners
                .iter()
                .find(|listener| listener.handler == detail.name)
            {
                for event in &listener.event_names {
                    if !badges.is_empty() {
                        badges.push(SymbolDisplayPart::space());
                    }
                    badges.extend(badge(&format!("listen: {event}")));
                }
            }
            detail.display_parts = replace_role_segment(detail.display_parts, badges);
        }
        MemberCategory::Lifecycle => {
            if let Some((_, doc)) = LIFECYCLE_DOCS
                .iter()
                .find(|(method, _)| *method == detail.name)
            {
                push_doc_line(&mut detail.documentation, (*doc).to_string());
            }
        }
        other => {
            detail.display_parts = replace_role_segment(detail.display_parts, badge(other.label()));
            if let Some(primitive) = primitive_name(meta.member_types.get(&detail.name)) {
                push_doc_line(&mut detail.documentation, format!("Type: {primitive}"));
            }
        }
    }
    detail
}

/// Quick-info documentation injection, restricted to the lifecycle and
/// builtin tables.
pub fn inject_quick_info_docs(info: QuickInfo, name: &str) -> QuickInfo {
    let doc = LIFECYCLE_DOCS
        .iter()
        .chain(BUILTIN_DOCS)
        .find(|(entry, _)| *entry == name)
        .map(|(_, doc)| *doc);
    let Some(doc) = doc else {
        return info;
    };
    let mut info = info;
    push_doc_line(&mut info.documentation, doc.to_string());
    info
}

fn primitive_name(ty: Option<&Ty>) -> Option<&'static str> {
    if is_boolean(ty) {
        Some("boolean")
    } else if is_number(ty) {
        Some("number")
    } else if is_string(ty) {
        Some("string")
    } else {
        None
    }
}

fn badge(label: &str) -> Vec<SymbolDisplayPart> {
    vec![
        SymbolDisplayPart::punctuation("("),
        SymbolDisplayPart::text(label.to_string()),
        SymbolDisplayPart::punctuation(")"),
    ]
}

/// Replace the leading parenthesized role segment of a display with badge
/// parts; displays without one get the badges prepended.
fn replace_role_segment(
    parts: Vec<SymbolDisplayPart>,
    badges: Vec<SymbolDisplayPart>,
) -> Vec<SymbolDisplayPart> {
    let mut out = badges;
    let leading_paren = parts
        .first()
        .map(|part| part.kind == "punctuation" && part.text == "(")
        .unwrap_or(false);
    if leading_paren {
        if let Some(close) = parts
            .iter()
            .position(|part| part.kind == "punctuation" && part.text == ")")
        {
            out.extend(parts.into_iter().skip(close + 1));
            return out;
        }
    }
    if !parts.is_empty() {
        if !out.is_empty() {
            out.push(SymbolDisplayPart::space());
        }
        out.extend(parts);
    }
    out
}

fn push_doc_line(documentation: &mut Vec<SymbolDisplayPart>, text: String) {
    if !documentation.is_empty() {
        documentation.push(SymbolDisplayPart::new("\n", "lineBreak"));
    }
    documentation.push(SymbolDisplayPart::text(text));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property_display(role: &str, name: &str) -> Vec<SymbolDisplayPart> {
        vec![
            SymbolDisplayPart::punctuation("("),
            SymbolDisplayPart::text(role.to_string()),
            SymbolDisplayPart::punctuation(")"),
            SymbolDisplayPart::space(),
            SymbolDisplayPart::new(name.to_string(), "propertyName"),
        ]
    }

    #[test]
    fn badge_replaces_leading_segment_only() {
        let parts = property_display("property", "count");
        let replaced = replace_role_segment(parts, badge("state"));
        let rendered: String = replaced.iter().map(|part| part.text.as_str()).collect();
        assert_eq!(rendered, "(state) count");
    }

    #[test]
    fn display_without_segment_keeps_original_parts() {
        let parts = vec![SymbolDisplayPart::new("count", "propertyName")];
        let replaced = replace_role_segment(parts, badge("state"));
        let rendered: String = replaced.iter().map(|part| part.text.as_str()).collect();
        assert_eq!(rendered, "(state) count");
    }

    #[test]
    fn lifecycle_doc_lookup_covers_all_phases() {
        for (method, _) in LIFECYCLE_DOCS {
            let info = QuickInfo {
                kind: EntryKind::Method,
                text_span: crate::model::TextSpan::new(0, method.len()),
                display_parts: Vec::new(),
                documentation: Vec::new(),
            };
            let injected = inject_quick_info_docs(info, method);
            assert_eq!(injected.documentation.len(), 1);
        }
    }

    #[test]
    fn unknown_name_passes_quick_info_through() {
        let info = QuickInfo {
            kind: EntryKind::Method,
            text_span: crate::model::TextSpan::new(0, 4),
            display_parts: Vec::new(),
            documentation: Vec::new(),
        };
        let injected = inject_quick_info_docs(info.clone(), "helper");
        assert_eq!(injected, info);
    }
}
