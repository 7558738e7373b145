//! Component metadata analysis and language-service result shaping for
//! decorator-annotated web-component classes.
//!
//! The core walks a TSX declaration tree, buckets every class member into a
//! role category, and uses that model to reorder completion lists, inject
//! role documentation into detail and hover results, and widen
//! reference/rename answers with string-literal occurrences of watched
//! property names. The underlying language service stays in charge of the
//! raw answers; this crate only adds, removes, reorders, or annotates.

pub mod analysis;
pub mod cache;
pub mod complete;
pub mod config;
pub mod detail;
pub mod model;
pub mod rank;
pub mod refs;
pub mod service;
pub mod util;

pub use analysis::extract::{ComponentExtractor, ComponentMeta, ListenerMeta, WatchedMeta};
pub use config::Options;
pub use rank::MemberCategory;
pub use service::{Enhancer, LanguageHost};
