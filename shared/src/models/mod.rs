//! Domain models for the AgriNova advisory platform

mod advisory;
mod crop_event;
mod notification;
mod pest;
mod product;

pub use advisory::*;
pub use crop_event::*;
pub use notification::*;
pub use pest::*;
pub use product::*;
