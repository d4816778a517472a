pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod layout;
pub mod physics;
pub mod rendering;
pub mod session;
pub mod tally;

// Curated re-exports
pub use app::game::{GamePlugin, TallyCorePlugin};
pub use crate::core::config::{TallyConfig, WindowConfig};
pub use crate::core::components::{Chip, ChipRadius, SessionMember, ZoneSensor};
pub use session::session::{GameSession, SessionSlot};
