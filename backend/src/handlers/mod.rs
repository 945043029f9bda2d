//! HTTP handlers for the AgriNova API

pub mod advisor;
pub mod crop_event;
pub mod health;
pub mod location;
pub mod notification;
pub mod pest;
pub mod store;

pub use advisor::*;
pub use crop_event::*;
pub use health::*;
pub use location::*;
pub use notification::*;
pub use pest::*;
pub use store::*;
