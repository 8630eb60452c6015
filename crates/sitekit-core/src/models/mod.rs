//! Wire models for the content-management API
//!
//! JSON:API request envelopes, response-extraction helpers, and the typed
//! three-step upload sequence.

mod item;
mod response;
mod upload;

// Re-export all models for convenient imports
pub use item::*;
pub use response::*;
pub use upload::*;
