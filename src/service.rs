use anyhow::Result;
use tracing::{debug, trace};
use tree_sitter::Node;

use crate::analysis::extract::{ComponentExtractor, ComponentMeta, extract_component_meta};
use crate::analysis::tree::{find_node_at, node_text};
use crate::cache::{DetailCache, QuickInfoCache};
use crate::complete::{
    CompletionContext, adjust_completions, completion_context, decorator_argument_completions,
    host_data_completions, markup_tag_completions,
};
use crate::config::Options;
use crate::detail::{adjust_detail, inject_quick_info_docs};
use crate::model::{CompletionDetail, CompletionList, QuickInfo, ReferenceEntry, RenameLocation};
use crate::refs::{augment_references, augment_rename_locations, watched_entry_for};

/// The external collaborator: the underlying language service whose raw
/// answers get adjusted. Implementations own the sources; this crate never
/// holds onto them past one request.
pub trait LanguageHost {
    fn source_text(&mut self, file: &str) -> Option<String>;
    fn completions(&mut self, file: &str, position: usize) -> Option<CompletionList>;
    fn completion_detail(
        &mut self,
        file: &str,
        position: usize,
        name: &str,
    ) -> Option<CompletionDetail>;
    fn quick_info(&mut self, file: &str, position: usize) -> Option<QuickInfo>;
    fn references(&mut self, file: &str, position: usize) -> Option<Vec<ReferenceEntry>>;
    fn rename_locations(
        &mut self,
        file: &str,
        position: usize,
        include_strings: bool,
        include_comments: bool,
    ) -> Option<Vec<RenameLocation>>;
}

/// Wraps a host and rewrites its answers using per-request component
/// metadata. Single-threaded request/response: every operation runs to
/// completion before the next one is accepted.
pub struct Enhancer<H> {
    host: H,
    options: Options,
    extractor: ComponentExtractor,
    quick_info_cache: QuickInfoCache,
    detail_cache: DetailCache,
}

impl<H: LanguageHost> Enhancer<H> {
    pub fn new(host: H) -> Result<Self> {
        Self::with_options(host, Options::default())
    }

    pub fn with_options(host: H, options: Options) -> Result<Self> {
        let extractor = ComponentExtractor::new()?;
        let quick_info_cache = QuickInfoCache::new(options.quick_info_cache_capacity);
        Ok(Enhancer {
            host,
            options,
            extractor,
            quick_info_cache,
            detail_cache: DetailCache::new(),
        })
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Categorized member metadata for a file, built fresh from the current
    /// source snapshot.
    pub fn metadata(&mut self, file: &str) -> Option<ComponentMeta> {
        let source = self.host.source_text(file)?;
        Some(self.extractor.extract(&source))
    }

    pub fn completions(&mut self, file: &str, position: usize) -> Option<CompletionList> {
        if !self.options.completions {
            return self.host.completions(file, position);
        }
        let Some(source) = self.host.source_text(file) else {
            return self.host.completions(file, position);
        };
        let Some(tree) = self.extractor.parse(&source) else {
            return self.host.completions(file, position);
        };
        let root = tree.root_node();
        let meta = extract_component_meta(root, &source);
        if !meta.is_component() {
            return self.host.completions(file, position);
        }

        match completion_context(root, &source, position) {
            Some(CompletionContext::DecoratorArgs(decorator)) => {
                trace!(file, position, decorator = decorator.as_str(), "decorator argument completion");
                if let Some(list) = decorator_argument_completions(&decorator) {
                    return Some(list);
                }
            }
            Some(CompletionContext::HostData) => {
                trace!(file, position, "host data completion");
                return Some(host_data_completions());
            }
            Some(CompletionContext::MarkupText) => {
                // Injected tags only fill the gap when the host has nothing
                // to say about the position.
                return match self.host.completions(file, position) {
                    Some(list) if !list.is_empty() => Some(adjust_completions(&meta, list)),
                    _ => Some(markup_tag_completions()),
                };
            }
            None => {}
        }

        let raw = self.host.completions(file, position)?;
        let adjusted = adjust_completions(&meta, raw);
        debug!(file, position, entries = adjusted.entries.len(), "adjusted completions");
        Some(adjusted)
    }

    pub fn completion_detail(
        &mut self,
        file: &str,
        position: usize,
        name: &str,
    ) -> Option<CompletionDetail> {
        if !self.options.documentation {
            return self.host.completion_detail(file, position, name);
        }
        if let Some(cached) = self.detail_cache.get(file, position, name) {
            trace!(file, position, name, "detail cache hit");
            return Some(cached.clone());
        }
        let raw = self.host.completion_detail(file, position, name)?;
        let adjusted = match self.metadata(file) {
            Some(meta) if meta.is_component() => adjust_detail(&meta, raw),
            _ => return Some(raw),
        };
        self.detail_cache.insert(file, position, name, adjusted.clone());
        Some(adjusted)
    }

    pub fn quick_info(&mut self, file: &str, position: usize) -> Option<QuickInfo> {
        if !self.options.documentation {
            return self.host.quick_info(file, position);
        }
        let Some(source) = self.host.source_text(file) else {
            return self.host.quick_info(file, position);
        };
        let Some(tree) = self.extractor.parse(&source) else {
            return self.host.quick_info(file, position);
        };
        let root = tree.root_node();
        let Some(node) = find_node_at(root, position) else {
            return self.host.quick_info(file, position);
        };
        if !extract_component_meta(root, &source).is_component() {
            return self.host.quick_info(file, position);
        }
        let (start, end) = (node.start_byte(), node.end_byte());
        if let Some(cached) = self.quick_info_cache.get(file, start, end) {
            trace!(file, start, end, "quick-info cache hit");
            return Some(cached);
        }
        let raw = self.host.quick_info(file, position)?;
        let info = match identifier_text(node, &source) {
            Some(name) => inject_quick_info_docs(raw, &name),
            None => raw,
        };
        self.quick_info_cache.insert(file, start, end, info.clone());
        Some(info)
    }

    pub fn references(&mut self, file: &str, position: usize) -> Option<Vec<ReferenceEntry>> {
        let raw = self.host.references(file, position)?;
        if !self.options.references {
            return Some(raw);
        }
        let Some(source) = self.host.source_text(file) else {
            return Some(raw);
        };
        let Some(tree) = self.extractor.parse(&source) else {
            return Some(raw);
        };
        let root = tree.root_node();
        let Some(name) = find_node_at(root, position).and_then(|node| identifier_text(node, &source))
        else {
            return Some(raw);
        };
        let meta = extract_component_meta(root, &source);
        Some(augment_references(&meta, &source, file, &name, raw))
    }

    pub fn rename_locations(
        &mut self,
        file: &str,
        position: usize,
        include_strings: bool,
        include_comments: bool,
    ) -> Option<Vec<RenameLocation>> {
        if !self.options.references {
            return self
                .host
                .rename_locations(file, position, include_strings, include_comments);
        }
        let watched = self.watched_at(file, position);
        // String-literal occurrences must be part of the rename set for a
        // watched property, whatever the host was asked for.
        let include_strings = include_strings || watched.is_some();
        let locations =
            self.host
                .rename_locations(file, position, include_strings, include_comments)?;
        match watched {
            Some((watch, name)) => {
                debug!(file, position, handler = watch.handler.as_str(), "augmenting rename");
                Some(augment_rename_locations(&watch, file, &name, locations))
            }
            None => Some(locations),
        }
    }

    fn watched_at(
        &mut self,
        file: &str,
        position: usize,
    ) -> Option<(crate::analysis::extract::WatchedMeta, String)> {
        let source = self.host.source_text(file)?;
        let tree = self.extractor.parse(&source)?;
        let root = tree.root_node();
        let name = find_node_at(root, position).and_then(|node| identifier_text(node, &source))?;
        let meta = extract_component_meta(root, &source);
        let watch = watched_entry_for(&meta, &name)?.clone();
        Some((watch, name))
    }
}

fn identifier_text(node: Node<'_>, source: &str) -> Option<String> {
    if !matches!(
        node.kind(),
        "identifier" | "property_identifier" | "private_property_identifier"
    ) {
        return None;
    }
    let text = node_text(node, source);
    if text.is_empty() { None } else { Some(text) }
}
