//! bz content - identity for interactive course content
//!
//! Keeps form controls embedded in authored HTML uniquely identified across
//! loading, editing, copy/paste and re-serialization:
//!
//! - [`ids`]: prefixed random ids, names and values
//! - [`retained`]: sequential `retained_<pageId>_<n>` ids per page
//! - [`clipboard`]: rewriting identifiers in paste payloads
//! - [`filter`]: the attribute whitelist at the document boundary
//! - [`session`]: one open document tying the above together

pub mod builders;
pub mod clipboard;
pub mod config;
mod error;
pub mod filter;
pub mod ids;
pub mod retained;
pub mod session;
pub mod shape;

pub use builders::ElementBuilder;
pub use clipboard::{ClipboardRewriter, RewriteReport};
pub use config::SessionConfig;
pub use error::{ContentError, Result};
pub use filter::{AllowedAttribute, AttributeFilter};
pub use ids::{
    new_element_id, new_element_name, new_element_value, IdGenerator, IdNamespace,
    SequentialGenerator, UuidGenerator,
};
pub use retained::{RetainedAllocator, RETAINED_ATTR};
pub use session::EditingSession;
pub use shape::{ElementShape, RADIO_GROUP_ATTR};
