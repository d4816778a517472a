pub mod input;
pub mod session;

pub use input::input_interaction::InputInteractionPlugin;
pub use session::config_hot_reload::{ConfigHotReloadPlugin, ConfigReloadSettings};
pub use session::controls::{AutoStart, PendingSetup, SessionControlsPlugin};
