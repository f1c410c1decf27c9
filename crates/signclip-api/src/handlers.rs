//! HTTP handlers.

pub mod health;
pub mod speech;
pub mod videos;

pub use health::{health, ready};
