//! Directory index and call-log enrichment.
//!
//! Everything here works on rows that were already fetched in bulk. A rebuild
//! produces a new `DirectoryIndex` value; nothing in this module mutates an index
//! after construction.

pub mod calllog;
pub mod index;
pub mod number;
pub mod source;

pub use calllog::{enrich, enrich_for_number};
pub use index::{build_index, DirectoryIndex};
pub use source::{load_call_log, load_index, DirectoryError, DirectorySource};
