use na::{vector, Matrix2, Vector2};
use tracing::warn;

use crate::{
    error::SimulationError,
    params::PhysicalParameters,
    state::{JointState, TorqueInput},
    types::Float,
};

/// Manipulator equation of the two-link arm, written out by hand in
/// Lagrangian form:
///
///    M(q) q̈ = τ - Ṁ(q, q̇) q̇ + ∂K/∂q - ∂U/∂q
///
/// Angles are measured from the horizontal, gravity points along -y.
/// Ref: https://underactuated.csail.mit.edu/multibody.html#manipulator
pub struct ManipulatorEquation {
    M: Matrix2<Float>,
    M_dot: Matrix2<Float>,
    dKdq: Vector2<Float>,
    dUdq: Vector2<Float>,
    v: Vector2<Float>,
}

impl ManipulatorEquation {
    #[rustfmt::skip]
    pub fn new(params: &PhysicalParameters, state: &JointState) -> Self {
        let g = params.gravity;
        let (l1, lg1, m1, i1) = (params.link1.length, params.link1.com_distance, params.link1.mass, params.link1.inertia);
        let (lg2, m2, i2) = (params.link2.com_distance, params.link2.mass, params.link2.inertia);
        let (q1, q2) = state.angles();
        let (q1dot, q2dot) = (state.v[0], state.v[1]);

        let a = m2*l1*lg2*q2.cos();
        let b = m2*lg2*lg2 + i2; // link 2 inertia about its own joint
        let c = m2*l1*lg2*q2dot*q2.sin();
        let d = m2*g*lg2*(q1 + q2).cos();
        let e = m2*l1*lg2*q1dot*q2.sin();

        let m12 = a + b;
        let M = Matrix2::new(
            m1*lg1*lg1 + m2*l1*l1 + i1 + 2.*a + b, m12,
            m12                                  , b
        );
        assert_eq!(M[(0, 1)].to_bits(), M[(1, 0)].to_bits(), "inertia matrix must be symmetric");

        let M_dot = Matrix2::new(
            -2.*c, -c,
            -c   , 0.
        );
        let dKdq = vector![0., -e*(q1dot + q2dot)];
        let dUdq = vector![m1*g*lg1*q1.cos() + m2*g*l1*q1.cos() + d, d];

        ManipulatorEquation { M, M_dot, dKdq, dUdq, v: state.v }
    }

    pub fn mass_matrix(&self) -> &Matrix2<Float> {
        &self.M
    }

    pub fn mass_matrix_derivative(&self) -> &Matrix2<Float> {
        &self.M_dot
    }

    pub fn kinetic_gradient(&self) -> &Vector2<Float> {
        &self.dKdq
    }

    pub fn potential_gradient(&self) -> &Vector2<Float> {
        &self.dUdq
    }

    /// Right-hand side of the manipulator equation for the given torque.
    pub fn generalized_force(&self, torque: &TorqueInput) -> Vector2<Float> {
        torque.0 - self.M_dot * self.v + self.dKdq - self.dUdq
    }

    /// Solve M(q) q̈ = f for the joint accelerations q̈.
    pub fn accelerations(&self, torque: &TorqueInput) -> Result<Vector2<Float>, SimulationError> {
        let f = self.generalized_force(torque);
        match self.M.lu().solve(&f) {
            Some(vdot) if vdot.iter().all(|x| x.is_finite()) => Ok(vdot),
            _ => {
                warn!(mass_matrix = ?self.M, force = ?f, "failed to solve for joint accelerations");
                Err(SimulationError::SingularMatrix {
                    matrix: [
                        [self.M[(0, 0)], self.M[(0, 1)]],
                        [self.M[(1, 0)], self.M[(1, 1)]],
                    ],
                })
            }
        }
    }
}

/// Forward dynamics: joint accelerations of the arm at `state` under
/// `torque`.
///
/// Parameters are not validated here; run [`PhysicalParameters::validate`]
/// first. With valid parameters M is positive-definite and the solve
/// always succeeds.
pub fn forward_dynamics(
    params: &PhysicalParameters,
    state: &JointState,
    torque: &TorqueInput,
) -> Result<Vector2<Float>, SimulationError> {
    ManipulatorEquation::new(params, state).accelerations(torque)
}

#[cfg(test)]
mod dynamics_tests {
    use rand::Rng;

    use crate::{
        assert_close, assert_vec_close,
        params::LinkParameters,
        PI,
    };

    use super::*;

    fn reference_state() -> JointState {
        JointState::at_rest(2.0 * PI / 3.0, PI / 3.0)
    }

    #[test]
    fn reference_arm_at_rest() {
        // Arrange
        let params = PhysicalParameters::default();
        let state = reference_state();

        // Act
        let vdot = forward_dynamics(&params, &state, &TorqueInput::zero()).unwrap();

        // Assert
        assert_vec_close!(&vdot, &vector![3.802985074626864, 4.973134328358212], 1e-9);
    }

    #[test]
    fn point_mass_double_pendulum() {
        // Arrange
        // Point masses at the link ends. The reference values measure q1 from
        // the downward vertical, hence the -π/2 offset.
        let params = PhysicalParameters::new(
            LinkParameters::new(2.0, 2.0, 1.0, 0.0),
            LinkParameters::new(4.0, 4.0, 3.0, 0.0),
            9.81,
        );
        let state = JointState::new(1.0 - PI / 2.0, 2.0, 3.0, 4.0);

        // Act
        let vdot = forward_dynamics(&params, &state, &TorqueInput::zero()).unwrap();

        // Assert
        assert_vec_close!(&vdot, &vector![68.8824, -58.9877], 1e-4); // reference values from RigidBodyDynamics.jl
    }

    #[test]
    fn horizontal_arm_falls() {
        let params = PhysicalParameters::default();
        let state = JointState::at_rest(0.0, 0.0);

        let vdot = forward_dynamics(&params, &state, &TorqueInput::zero()).unwrap();

        assert_close!(vdot[0], -9.8, 1e-9);
        assert_close!(vdot[1], 9.8, 1e-9);
    }

    #[test]
    fn torque_without_gravity() {
        // Arrange
        let mut params = PhysicalParameters::default();
        params.gravity = 0.0;
        let state = JointState::at_rest(0.3, 0.4);
        let torque = TorqueInput::new(1.0, 0.0);

        // Act
        let eq = ManipulatorEquation::new(&params, &state);
        let vdot = eq.accelerations(&torque).unwrap();

        // Assert
        assert_vec_close!(&vdot, &vector![0.6541537602792281, -1.3236154410275736], 1e-9);
        assert_vec_close!(eq.mass_matrix() * vdot, torque.0, 1e-12);
    }

    #[test]
    fn deterministic() {
        let params = PhysicalParameters::default();
        let state = JointState::new(0.0, 0.0, 0.0, 0.0);

        let first = forward_dynamics(&params, &state, &TorqueInput::zero()).unwrap();
        let second = forward_dynamics(&params, &state, &TorqueInput::zero()).unwrap();

        assert_eq!(first[0].to_bits(), second[0].to_bits());
        assert_eq!(first[1].to_bits(), second[1].to_bits());
    }

    #[test]
    fn mass_matrix_symmetric_positive_definite() {
        let mut rng = rand::rng();
        let params = PhysicalParameters::default();

        for _ in 0..100 {
            let state = JointState::new(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            );
            let eq = ManipulatorEquation::new(&params, &state);
            let M = eq.mass_matrix();

            assert_eq!(M[(0, 1)], M[(1, 0)]);
            assert!(M[(0, 0)] > 0.0);
            assert!(M.determinant() > 0.0);
            assert!(eq.accelerations(&TorqueInput::zero()).is_ok());
        }
    }

    #[test]
    fn mass_matrix_derivative_matches_finite_difference() {
        // Arrange
        let params = PhysicalParameters::default();
        let state = JointState::new(0.7, -1.2, 0.4, 2.5);
        let h = 1e-6;
        let next = JointState::new(
            state.q[0] + state.v[0] * h,
            state.q[1] + state.v[1] * h,
            state.v[0],
            state.v[1],
        );

        // Act
        let M0 = *ManipulatorEquation::new(&params, &state).mass_matrix();
        let M1 = *ManipulatorEquation::new(&params, &next).mass_matrix();
        let M_dot = *ManipulatorEquation::new(&params, &state).mass_matrix_derivative();

        // Assert
        assert_vec_close!(&((M1 - M0) / h), &M_dot, 1e-4);
    }

    #[test]
    fn nan_state_is_an_error() {
        let params = PhysicalParameters::default();
        let state = JointState::at_rest(Float::NAN, 0.0);

        let result = forward_dynamics(&params, &state, &TorqueInput::zero());

        assert!(matches!(result, Err(SimulationError::SingularMatrix { .. })));
    }

    #[test]
    fn degenerate_link_is_singular() {
        // Massless, inertia-free second link
        let mut params = PhysicalParameters::default();
        params.link2.mass = 0.0;
        params.link2.inertia = 0.0;
        let state = reference_state();

        let result = forward_dynamics(&params, &state, &TorqueInput::zero());

        assert!(matches!(result, Err(SimulationError::SingularMatrix { .. })));
    }
}
