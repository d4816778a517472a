//! Session lifecycle: the pure `GameSession` and its ECS plumbing.

pub mod events;
pub mod plugin;
pub mod report;
pub mod session;

pub use events::{
    ConfigureSession, OverlapTransition, RecomputeTally, SessionNotice, SessionStarted,
    TeardownSession,
};
pub use plugin::{SessionPlugin, SessionRng};
pub use report::SessionReport;
pub use session::{
    sanitize, ChipSpawn, GameSession, SessionRequest, SessionSettings, SessionSlot, ZoneReport,
};
