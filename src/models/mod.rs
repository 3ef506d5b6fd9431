//! Record models cached by the demo service
//!
//! Plain data records that callers store in an [`LruCache`](crate::LruCache).

pub mod user;

// Re-export commonly used types
pub use user::User;
