use tracing::debug;

use crate::analysis::extract::{ComponentMeta, WatchedMeta};
use crate::model::{ReferenceEntry, RenameLocation, TextSpan};
use crate::util;

/// Watched entry observing `property`, if any.
pub fn watched_entry_for<'meta>(
    meta: &'meta ComponentMeta,
    property: &str,
) -> Option<&'meta WatchedMeta> {
    meta.watched.iter().find(|watch| watch.property == property)
}

/// Append a string-literal reference for a watched property name. The symbol
/// reference mechanism misses the quoted occurrence inside the watch
/// annotation, so the first one found in the raw source is reported as a
/// non-definition write access.
pub fn augment_references(
    meta: &ComponentMeta,
    source: &str,
    file: &str,
    name: &str,
    mut references: Vec<ReferenceEntry>,
) -> Vec<ReferenceEntry> {
    if watched_entry_for(meta, name).is_none() {
        return references;
    }
    let Some(offset) = find_quoted_occurrence(source, name) else {
        return references;
    };
    let (line, column) = util::line_and_char(source, offset);
    debug!(file, line, column, "appending string-literal reference");
    references.push(ReferenceEntry {
        file: file.to_string(),
        text_span: TextSpan::new(offset, name.len()),
        is_write_access: true,
        is_definition: false,
        is_in_string: true,
    });
    references
}

/// Append a rename location covering the property-name substring inside the
/// watch handler's name, so renaming a watched property also renames the
/// conventional handler. Handlers that do not embed the property name are
/// left alone.
pub fn augment_rename_locations(
    watch: &WatchedMeta,
    file: &str,
    name: &str,
    mut locations: Vec<RenameLocation>,
) -> Vec<RenameLocation> {
    let Some(relative) = substring_offset(&watch.handler, name) else {
        return locations;
    };
    locations.push(RenameLocation {
        file: file.to_string(),
        text_span: TextSpan::new(watch.handler_name_start + relative, name.len()),
    });
    locations
}

/// Byte offset of the first occurrence of `name` wrapped in either quoting
/// style; the earlier occurrence wins when both appear.
fn find_quoted_occurrence(source: &str, name: &str) -> Option<usize> {
    let single = format!("'{name}'");
    let double = format!("\"{name}\"");
    let hit = match (source.find(&single), source.find(&double)) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some(hit + 1)
}

/// Case-sensitive match first; handler naming conventions capitalize the
/// embedded property name, so fall back to an ASCII case-insensitive scan.
fn substring_offset(handler: &str, name: &str) -> Option<usize> {
    if let Some(offset) = handler.find(name) {
        return Some(offset);
    }
    if name.is_empty() {
        return None;
    }
    let handler_lower = handler.to_ascii_lowercase();
    let name_lower = name.to_ascii_lowercase();
    handler_lower.find(&name_lower)
}
