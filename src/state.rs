use na::{vector, Vector2};

use crate::types::Float;

/// Joint angles and angular velocities of the arm.
///
/// `q[0]` is measured from the base x-axis, `q[1]` is link 2 relative to
/// link 1. Angles are not wrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointState {
    pub q: Vector2<Float>, // joint angles
    pub v: Vector2<Float>, // joint angular velocities
}

impl JointState {
    pub fn new(q1: Float, q2: Float, q1dot: Float, q2dot: Float) -> Self {
        JointState {
            q: vector![q1, q2],
            v: vector![q1dot, q2dot],
        }
    }

    /// State at the given angles with the arm at rest.
    pub fn at_rest(q1: Float, q2: Float) -> Self {
        JointState::new(q1, q2, 0.0, 0.0)
    }

    pub fn angles(&self) -> (Float, Float) {
        (self.q[0], self.q[1])
    }
}

/// Torques applied at the two joints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorqueInput(pub Vector2<Float>);

impl TorqueInput {
    pub fn new(tau1: Float, tau2: Float) -> Self {
        TorqueInput(vector![tau1, tau2])
    }

    pub fn zero() -> Self {
        TorqueInput(Vector2::zeros())
    }
}

impl Default for TorqueInput {
    fn default() -> Self {
        TorqueInput::zero()
    }
}
