use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse RON {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// A caller-supplied session setting that was out of range or malformed and
/// got replaced, or a setup the board cannot lay out cleanly. Recovered at the
/// session boundary, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationNotice {
    #[error("player count {requested} exceeds the maximum of {max}; using {max}")]
    TooManyPlayers { requested: i64, max: u32 },
    #[error("player count {requested} is below the minimum of {min}; using {min}")]
    TooFewPlayers { requested: i64, min: u32 },
    #[error("stack total {requested} adjusted to {applied}")]
    TotalAdjusted { requested: i64, applied: u32 },
    #[error("stack total was not a number; using {applied}")]
    TotalMalformed { applied: u32 },
    #[error("{area} fits {capacity} chips but starts with {chips}; chips spilling past its edge are not counted there")]
    CrowdedZone {
        area: String,
        chips: u32,
        capacity: u32,
    },
}
