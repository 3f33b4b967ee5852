//! Collaborators injected into the controller
//!
//! The key-value store persists the username, the picker chooses what a
//! completion looks like.

pub mod picker;
pub mod store;

// Re-export main types
pub use picker::*;
pub use store::*;
