pub mod api;
pub mod background_tasks;

pub use api::*;
pub use background_tasks::*;
