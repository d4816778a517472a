pub mod spawn;

pub use spawn::spawn::ChipSpawnPlugin;
