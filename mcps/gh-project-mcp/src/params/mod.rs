//! Parameter types for Projects v2 tools
//!
//! Organized by domain: project, item

mod item;
mod project;

pub use item::*;
pub use project::*;
