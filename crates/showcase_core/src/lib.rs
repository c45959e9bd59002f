//! Showcase core: pure domain state for the admin console.
//!
//! Catalog snapshots, the canonical exclusion set, the name-keyed
//! reconciliation join and session token encoding. No I/O lives here.
mod catalog;
mod exclusions;
mod message;
mod session;

pub use catalog::{annotate, AnnotatedEntry, CatalogEntry};
pub use exclusions::Exclusions;
pub use message::ContactMessage;
pub use session::Session;
