#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
#[derive(Resource, Debug)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
    /// Draw zone rectangles and chip centers with gizmos.
    pub outlines: bool,
    pub last_audit_ok: bool,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 5.0,
            time_accum: 0.0,
            frame_counter: 0,
            outlines: false,
            last_audit_ok: true,
        }
    }
}
