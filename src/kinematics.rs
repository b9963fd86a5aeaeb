use na::{vector, Vector2};

use crate::{params::PhysicalParameters, state::JointState, types::Float};

/// Position of the elbow joint in the base frame.
pub fn elbow_position(params: &PhysicalParameters, state: &JointState) -> Vector2<Float> {
    let l1 = params.link1.length;
    let q1 = state.q[0];
    vector![l1 * q1.cos(), l1 * q1.sin()]
}

/// Position of the arm tip in the base frame.
pub fn tip_position(params: &PhysicalParameters, state: &JointState) -> Vector2<Float> {
    let l2 = params.link2.length;
    let q12 = state.q[0] + state.q[1];
    elbow_position(params, state) + vector![l2 * q12.cos(), l2 * q12.sin()]
}

/// Elbow and tip positions, in that order.
pub fn link_endpoints(
    params: &PhysicalParameters,
    state: &JointState,
) -> (Vector2<Float>, Vector2<Float>) {
    (elbow_position(params, state), tip_position(params, state))
}
