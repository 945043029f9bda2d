//! Business logic services for the AgriNova advisory platform

pub mod advisor;
pub mod crop_event;
pub mod notification;
pub mod pest_history;
pub mod prompt;
pub mod store;

pub use advisor::AdvisorService;
pub use crop_event::CropEventService;
pub use notification::NotificationService;
pub use pest_history::PestHistoryService;
pub use store::StoreService;
