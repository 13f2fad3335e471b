pub mod message_renderer;
pub mod sidebar;

pub use message_renderer::*;
pub use sidebar::*;
