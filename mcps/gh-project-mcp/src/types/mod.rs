//! Type definitions for Projects v2 entities
//!
//! Tool-facing structs are serialized as tool output; the crate-private
//! `Raw*` structs mirror GraphQL responses and convert into them.

pub mod common;
pub mod field;
pub mod input;
pub mod item;
pub mod project;

pub use field::{FieldDataType, ProjectField};
pub use input::{ContentType, LinkedKind, NewItem};
pub use item::{DeletedItem, FieldValue, ItemContent, ItemType, ProjectItem};
pub use project::{OwnerKind, Project, ProjectOwner};
