pub mod rapier;
pub mod sensors;

pub use rapier::rapier_physics::PhysicsSetupPlugin;
pub use sensors::SensorForwardPlugin;
