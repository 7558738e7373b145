use serde::Serialize;

use crate::analysis::extract::{ComponentMeta, LIFECYCLE_METHODS};

/// Member role categories in canonical presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberCategory {
    OwnProperty,
    Element,
    State,
    PropConnect,
    PropContext,
    Prop,
    Watch,
    Event,
    Lifecycle,
    Listen,
    Method,
    LocalMethod,
}

/// Canonical order, first to last. Sort keys derive their category letter
/// from a position in this table.
pub const CATEGORY_ORDER: &[MemberCategory] = &[
    MemberCategory::OwnProperty,
    MemberCategory::Element,
    MemberCategory::State,
    MemberCategory::PropConnect,
    MemberCategory::PropContext,
    MemberCategory::Prop,
    MemberCategory::Watch,
    MemberCategory::Event,
    MemberCategory::Lifecycle,
    MemberCategory::Listen,
    MemberCategory::Method,
    MemberCategory::LocalMethod,
];

impl MemberCategory {
    pub fn label(self) -> &'static str {
        match self {
            MemberCategory::OwnProperty => "own-property",
            MemberCategory::Element => "element",
            MemberCategory::State => "state",
            MemberCategory::PropConnect => "prop:connect",
            MemberCategory::PropContext => "prop:context",
            MemberCategory::Prop => "prop",
            MemberCategory::Watch => "watch",
            MemberCategory::Event => "event",
            MemberCategory::Lifecycle => "lifecycle",
            MemberCategory::Listen => "listen",
            MemberCategory::Method => "method",
            MemberCategory::LocalMethod => "local-method",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        CATEGORY_ORDER
            .iter()
            .copied()
            .find(|category| category.label() == label)
    }
}

fn category_letter(category: MemberCategory) -> char {
    let index = CATEGORY_ORDER
        .iter()
        .position(|entry| *entry == category)
        .unwrap_or(25);
    (b'a' + index as u8) as char
}

/// Opaque sort key: lexicographic order reproduces the canonical category
/// order, then name order within a category. Lifecycle members carry a second
/// letter ranking them by canonical phase instead of name.
pub fn sort_key(category: MemberCategory, name: &str) -> String {
    let letter = category_letter(category);
    if category == MemberCategory::Lifecycle {
        let phase = LIFECYCLE_METHODS
            .iter()
            .position(|method| *method == name)
            .unwrap_or(LIFECYCLE_METHODS.len());
        let phase_letter = (b'a' + phase as u8) as char;
        format!("{letter}{phase_letter}-{name}")
    } else {
        format!("{letter}-{name}")
    }
}

/// Sort key for a raw category label; unrecognized labels rank last.
pub fn sort_key_for_label(label: &str, name: &str) -> String {
    match MemberCategory::from_label(label) {
        Some(category) => sort_key(category, name),
        None => format!("z-{name}"),
    }
}

/// First bucket containing `name`, tested in canonical order. Watch and
/// listen entries match on their handler name.
pub fn category_of(meta: &ComponentMeta, name: &str) -> Option<MemberCategory> {
    for category in CATEGORY_ORDER.iter().copied() {
        let found = match category {
            MemberCategory::OwnProperty => contains(&meta.internal_properties, name),
            MemberCategory::Element => contains(&meta.elements, name),
            MemberCategory::State => contains(&meta.states, name),
            MemberCategory::PropConnect => contains(&meta.props_connect, name),
            MemberCategory::PropContext => contains(&meta.props_context, name),
            MemberCategory::Prop => contains(&meta.props, name),
            MemberCategory::Watch => meta.watched.iter().any(|watch| watch.handler == name),
            MemberCategory::Event => contains(&meta.events, name),
            MemberCategory::Lifecycle => contains(&meta.lifecycle, name),
            MemberCategory::Listen => meta.listeners.iter().any(|listener| listener.handler == name),
            MemberCategory::Method => contains(&meta.methods, name),
            MemberCategory::LocalMethod => contains(&meta.internal_methods, name),
        };
        if found {
            return Some(category);
        }
    }
    None
}

fn contains(bucket: &[String], name: &str) -> bool {
    bucket.iter().any(|entry| entry == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_rank_in_canonical_order() {
        let keys: Vec<String> = CATEGORY_ORDER
            .iter()
            .map(|category| sort_key(*category, "same"))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn names_rank_alphabetically_within_category() {
        let alpha = sort_key(MemberCategory::Prop, "alpha");
        let beta = sort_key(MemberCategory::Prop, "beta");
        assert!(alpha < beta);
    }

    #[test]
    fn lifecycle_ranks_by_phase_not_name() {
        let keys: Vec<String> = LIFECYCLE_METHODS
            .iter()
            .map(|method| sort_key(MemberCategory::Lifecycle, method))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        // Alphabetical order would put componentDidLoad first.
        assert!(
            sort_key(MemberCategory::Lifecycle, "componentWillLoad")
                < sort_key(MemberCategory::Lifecycle, "componentDidLoad")
        );
    }

    #[test]
    fn unrecognized_label_ranks_last() {
        let unknown = sort_key_for_label("mystery", "name");
        assert!(unknown.starts_with('z'));
        for category in CATEGORY_ORDER {
            assert!(sort_key(*category, "name") < unknown);
        }
    }

    #[test]
    fn labels_round_trip() {
        for category in CATEGORY_ORDER.iter().copied() {
            assert_eq!(MemberCategory::from_label(category.label()), Some(category));
        }
    }
}
