pub mod config;

pub use config::{
    log_config_warnings, BoardConfig, ChipConfig, ConfigWarnings, DragConfig, PlayerLimits, StackConfig, TallyConfig, WindowConfig,
    ZoneLayoutConfig,
};
