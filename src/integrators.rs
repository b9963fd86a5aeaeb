use na::Vector2;

use crate::types::Float;

/// Semi-implicit Euler step: velocity from the current acceleration first,
/// then position from the updated velocity.
///
///    v(k+1) = v(k) + dt * vdot(k)
///    q(k+1) = q(k) + dt * v(k+1)
///
/// Unlike explicit Euler this keeps the energy error of a free pendulum
/// bounded instead of growing every swing.
/// Ref: Drake Doc, https://drake.mit.edu/doxygen_cxx/classdrake_1_1systems_1_1_semi_explicit_euler_integrator.html
pub fn semi_implicit_euler_step(
    q: &Vector2<Float>,
    v: &Vector2<Float>,
    vdot: &Vector2<Float>,
    dt: Float,
) -> (Vector2<Float>, Vector2<Float>) {
    let new_v = v + vdot * dt;
    let new_q = compute_new_q(q, &new_v, dt);
    (new_q, new_v)
}

/// Compute the next q from current q and updated v
///    q(k+1) = q(k) + dt * v(k+1)
pub fn compute_new_q(current_q: &Vector2<Float>, new_v: &Vector2<Float>, dt: Float) -> Vector2<Float> {
    current_q + new_v * dt
}
