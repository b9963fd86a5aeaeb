#![allow(non_snake_case)]

use types::Float;
pub extern crate nalgebra as na;

pub mod dynamics;
pub mod energy;
pub mod error;
pub mod integrators;
pub mod kinematics;
pub mod params;
pub mod plot;
pub mod simulate;
pub mod state;
pub mod trajectory;
pub mod types;
pub mod util;

// Wasm bindings
pub mod interface;

pub use error::SimulationError;
pub use params::{LinkParameters, PhysicalParameters, SimulationConfig};
pub use simulate::{simulate, Simulator, SimulatorStatus, TorqueSource};
pub use state::{JointState, TorqueInput};
pub use trajectory::Trajectory;

pub const GRAVITY: Float = 9.8;

pub const PI: Float = std::f64::consts::PI;
pub const TWO_PI: Float = 2.0 * PI;
