//! Core module - fundamental types and utilities

pub mod chain;
pub mod config;
pub mod flag;
pub mod index;
pub mod pipeline;
pub mod record;
pub mod source;

pub use chain::{lineage, resolve_ancestors, AncestorSet, BaseRef, ChainStep};
pub use config::Config;
pub use index::{CatalogueIndex, NameCollision, Row};
pub use pipeline::{apply, Filter, Query};
pub use record::{Grade, Record, SortKey};
pub use source::{CatalogueSource, SourceError};
