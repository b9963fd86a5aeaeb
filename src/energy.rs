use crate::{
    dynamics::ManipulatorEquation, params::PhysicalParameters, state::JointState, types::Float,
};

/// Kinetic energy of the arm, 1/2 q̇ᵀ M(q) q̇
pub fn kinetic_energy(params: &PhysicalParameters, state: &JointState) -> Float {
    let M = *ManipulatorEquation::new(params, state).mass_matrix();
    0.5 * state.v.dot(&(M * state.v))
}

/// Gravitational potential energy, zero with both links horizontal.
pub fn potential_energy(params: &PhysicalParameters, state: &JointState) -> Float {
    let g = params.gravity;
    let (link1, link2) = (&params.link1, &params.link2);
    let (q1, q2) = state.angles();

    let h1 = link1.com_distance * q1.sin();
    let h2 = link1.length * q1.sin() + link2.com_distance * (q1 + q2).sin();
    g * (link1.mass * h1 + link2.mass * h2)
}

/// Total mechanical energy of the arm
pub fn total_energy(params: &PhysicalParameters, state: &JointState) -> Float {
    kinetic_energy(params, state) + potential_energy(params, state)
}
