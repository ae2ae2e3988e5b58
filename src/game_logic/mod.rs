pub mod constants;
pub mod components;
pub mod track;
pub mod nearest;
pub mod physics;
pub mod lap_system;

pub use constants::*;
pub use components::*;
pub use track::*;
pub use physics::*;
pub use lap_system::*;
