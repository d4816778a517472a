pub mod config_hot_reload;
pub mod controls;
