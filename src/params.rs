//! Physical parameters of the arm and time-stepping configuration.

use crate::{error::SimulationError, types::Float, GRAVITY};

/// Geometry and inertia of a single link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkParameters {
    pub length: Float,       // joint to next joint
    pub com_distance: Float, // joint to center of mass
    pub mass: Float,
    pub inertia: Float, // moment of inertia about the center of mass
}

impl LinkParameters {
    pub fn new(length: Float, com_distance: Float, mass: Float, inertia: Float) -> Self {
        LinkParameters {
            length,
            com_distance,
            mass,
            inertia,
        }
    }

    fn validate(&self, names: [&'static str; 4]) -> Result<(), SimulationError> {
        let [length, com_distance, mass, inertia] = names;
        positive(length, self.length)?;
        positive(mass, self.mass)?;
        positive(inertia, self.inertia)?;
        if !self.com_distance.is_finite() || self.com_distance < 0.0 {
            return Err(SimulationError::invalid_parameter(
                com_distance,
                self.com_distance,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: Float) -> Result<(), SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid_parameter(
            name,
            value,
            "must be finite and strictly positive",
        ))
    }
}

/// Fixed physical constants of a two-link arm for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParameters {
    pub link1: LinkParameters,
    pub link2: LinkParameters,
    pub gravity: Float,
}

impl PhysicalParameters {
    pub fn new(link1: LinkParameters, link2: LinkParameters, gravity: Float) -> Self {
        PhysicalParameters {
            link1,
            link2,
            gravity,
        }
    }

    /// Uniform rods: center of mass at mid-length.
    pub fn uniform_rods(
        l1: Float,
        m1: Float,
        i1: Float,
        l2: Float,
        m2: Float,
        i2: Float,
    ) -> Self {
        PhysicalParameters::new(
            LinkParameters::new(l1, l1 / 2.0, m1, i1),
            LinkParameters::new(l2, l2 / 2.0, m2, i2),
            GRAVITY,
        )
    }

    /// Check that every length, mass and inertia is strictly positive.
    pub fn validate(&self) -> Result<(), SimulationError> {
        self.link1.validate([
            "link1.length",
            "link1.com_distance",
            "link1.mass",
            "link1.inertia",
        ])?;
        self.link2.validate([
            "link2.length",
            "link2.com_distance",
            "link2.mass",
            "link2.inertia",
        ])?;
        if !self.gravity.is_finite() {
            return Err(SimulationError::invalid_parameter(
                "gravity",
                self.gravity,
                "must be finite",
            ));
        }
        Ok(())
    }

    /// Maximum distance of the tip from the base joint.
    pub fn reach(&self) -> Float {
        self.link1.length + self.link2.length
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        PhysicalParameters::uniform_rods(1.0, 2.0, 0.5, 1.0, 1.0, 0.2)
    }
}

/// Time horizon and fixed step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub final_time: Float,
    pub dt: Float,
}

/// Ratios this close to an integer are treated as that integer when
/// counting steps, so that e.g. 0.3 / 0.1 gives 3 steps and not 4.
const STEP_COUNT_RTOL: Float = 1e-9;

/// Upper bound on the number of steps of a single run. Every step is
/// recorded, so this also bounds the trajectory size.
pub const MAX_STEPS: usize = 100_000_000;

impl SimulationConfig {
    pub fn new(final_time: Float, dt: Float) -> Self {
        SimulationConfig { final_time, dt }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let (final_time, dt) = (self.final_time, self.dt);
        let reason = if !final_time.is_finite() || !dt.is_finite() {
            "final_time and dt must be finite"
        } else if dt <= 0.0 {
            "dt must be positive"
        } else if final_time <= 0.0 {
            "final_time must be positive"
        } else if dt > final_time {
            "dt must not exceed final_time"
        } else if !(final_time / dt <= MAX_STEPS as Float) {
            "final_time / dt exceeds the step limit"
        } else {
            return Ok(());
        };
        Err(SimulationError::invalid_config(final_time, dt, reason))
    }

    /// Number of integration steps, ceil(final_time / dt).
    ///
    /// Counting steps up front instead of accumulating `t += dt` keeps the
    /// count from drifting by one with rounding error.
    pub fn num_steps(&self) -> Result<usize, SimulationError> {
        self.validate()?;
        let ratio = self.final_time / self.dt;
        let nearest = ratio.round();
        let steps = if (ratio - nearest).abs() <= STEP_COUNT_RTOL * nearest {
            nearest
        } else {
            ratio.ceil()
        };
        Ok(steps as usize)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::new(5.0, 0.01)
    }
}

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn default_parameters_are_valid() {
        let params = PhysicalParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.link1.com_distance, 0.5);
        assert_eq!(params.link2.com_distance, 0.5);
        assert_eq!(params.gravity, 9.8);
        assert_eq!(params.reach(), 2.0);
    }

    #[test]
    fn zero_mass_is_rejected() {
        // Arrange
        let mut params = PhysicalParameters::default();
        params.link2.mass = 0.0;

        // Act
        let result = params.validate();

        // Assert
        assert!(matches!(
            result,
            Err(SimulationError::InvalidParameters {
                name: "link2.mass",
                ..
            })
        ));
    }

    #[test]
    fn negative_length_and_nan_inertia_are_rejected() {
        let mut params = PhysicalParameters::default();
        params.link1.length = -1.0;
        assert!(params.validate().is_err());

        let mut params = PhysicalParameters::default();
        params.link1.inertia = Float::NAN;
        assert!(params.validate().is_err());

        let mut params = PhysicalParameters::default();
        params.link2.com_distance = -0.1;
        assert!(params.validate().is_err());
    }

    #[test]
    fn config_validation() {
        assert!(SimulationConfig::new(5.0, 0.01).validate().is_ok());
        assert!(SimulationConfig::new(0.01, 0.01).validate().is_ok());

        for (final_time, dt) in [
            (5.0, 0.0),
            (5.0, -0.01),
            (0.0, 0.01),
            (-1.0, 0.01),
            (0.01, 0.02),
            (Float::INFINITY, 0.01),
            (5.0, Float::NAN),
        ] {
            let result = SimulationConfig::new(final_time, dt).validate();
            assert!(
                matches!(result, Err(SimulationError::InvalidConfig { .. })),
                "accepted final_time = {final_time}, dt = {dt}"
            );
        }
    }

    #[test]
    fn step_count_does_not_drift() {
        assert_eq!(SimulationConfig::new(5.0, 0.01).num_steps(), Ok(500));
        assert_eq!(SimulationConfig::new(0.01, 0.01).num_steps(), Ok(1));
        assert_eq!(SimulationConfig::new(0.3, 0.1).num_steps(), Ok(3));
        assert_eq!(SimulationConfig::new(0.7, 0.1).num_steps(), Ok(7));
        assert_eq!(SimulationConfig::new(1.0, 0.3).num_steps(), Ok(4));
    }

    #[test]
    fn step_limit() {
        let at_limit = SimulationConfig::new(MAX_STEPS as Float, 1.0);
        assert_eq!(at_limit.num_steps(), Ok(MAX_STEPS));

        for (final_time, dt) in [(1.0e20, 1.0), (1.0, 1.0e-300), (Float::MAX, 1.0e-10)] {
            let config = SimulationConfig::new(final_time, dt);
            assert!(
                matches!(config.validate(), Err(SimulationError::InvalidConfig { .. })),
                "accepted final_time = {final_time}, dt = {dt}"
            );
            assert!(config.num_steps().is_err());
        }
    }
}
