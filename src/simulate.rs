use tracing::debug;

use crate::{
    dynamics::forward_dynamics,
    error::SimulationError,
    integrators::semi_implicit_euler_step,
    params::{PhysicalParameters, SimulationConfig},
    state::{JointState, TorqueInput},
    trajectory::Trajectory,
    types::Float,
};

/// Supplies the joint torques for each step.
///
/// A plain [`TorqueInput`] is a constant torque. Closures of the form
/// `|state, t| -> TorqueInput` give a time-varying input.
pub trait TorqueSource {
    fn torque(&mut self, state: &JointState, t: Float) -> TorqueInput;
}

impl TorqueSource for TorqueInput {
    fn torque(&mut self, _state: &JointState, _t: Float) -> TorqueInput {
        *self
    }
}

impl<F> TorqueSource for F
where
    F: FnMut(&JointState, Float) -> TorqueInput,
{
    fn torque(&mut self, state: &JointState, t: Float) -> TorqueInput {
        self(state, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorStatus {
    Initialized,
    Running,
    Completed,
}

/// Fixed-step time integration of the two-link arm.
///
/// Each step records the current state, then advances it by one
/// semi-implicit Euler step. The number of steps is fixed up front to
/// ceil(final_time / dt), and time is derived from the step counter.
pub struct Simulator<S: TorqueSource = TorqueInput> {
    params: PhysicalParameters,
    dt: Float,
    num_steps: usize,
    step_index: usize,
    state: JointState,
    status: SimulatorStatus,
    torque_source: S,
    trajectory: Trajectory,
}

impl Simulator<TorqueInput> {
    /// Simulator with a constant joint torque.
    pub fn new(
        params: &PhysicalParameters,
        config: &SimulationConfig,
        initial: &JointState,
        torque: &TorqueInput,
    ) -> Result<Self, SimulationError> {
        Simulator::with_torque_source(params, config, initial, *torque)
    }
}

impl<S: TorqueSource> Simulator<S> {
    pub fn with_torque_source(
        params: &PhysicalParameters,
        config: &SimulationConfig,
        initial: &JointState,
        torque_source: S,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let num_steps = config.num_steps()?;

        Ok(Simulator {
            params: *params,
            dt: config.dt,
            num_steps,
            step_index: 0,
            state: *initial,
            status: SimulatorStatus::Initialized,
            torque_source,
            trajectory: Trajectory::with_capacity(config.dt, *initial, num_steps),
        })
    }

    pub fn status(&self) -> SimulatorStatus {
        self.status
    }

    pub fn state(&self) -> &JointState {
        &self.state
    }

    /// Elapsed simulation time
    pub fn time(&self) -> Float {
        self.step_index as Float * self.dt
    }

    pub fn steps_taken(&self) -> usize {
        self.step_index
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Frames recorded so far.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Record the current state and advance it by one step. Does nothing
    /// once the simulation has completed.
    pub fn step(&mut self) -> Result<SimulatorStatus, SimulationError> {
        match self.status {
            SimulatorStatus::Completed => return Ok(self.status),
            SimulatorStatus::Initialized => {
                debug!(
                    num_steps = self.num_steps,
                    dt = self.dt,
                    q = ?self.state.q,
                    v = ?self.state.v,
                    "starting simulation"
                );
                self.status = SimulatorStatus::Running;
            }
            SimulatorStatus::Running => {}
        }

        let t = self.time();
        let tau = self.torque_source.torque(&self.state, t);
        let vdot = forward_dynamics(&self.params, &self.state, &tau)?;

        self.trajectory.push(self.state);
        let (q, v) = semi_implicit_euler_step(&self.state.q, &self.state.v, &vdot, self.dt);
        self.state = JointState { q, v };
        self.step_index += 1;

        if self.step_index >= self.num_steps {
            self.trajectory.finish(self.state);
            self.status = SimulatorStatus::Completed;
            debug!(
                frames = self.trajectory.frame_count(),
                q = ?self.state.q,
                v = ?self.state.v,
                "simulation completed"
            );
        }
        Ok(self.status)
    }

    /// Step until completion and return the recorded trajectory.
    pub fn run(mut self) -> Result<Trajectory, SimulationError> {
        while self.status != SimulatorStatus::Completed {
            self.step()?;
        }
        Ok(self.trajectory)
    }
}

/// Simulate the arm from `initial` under a constant `torque` for
/// `config.final_time` seconds with a time step of `config.dt`.
/// Returns the joint states at each time step.
pub fn simulate(
    params: &PhysicalParameters,
    config: &SimulationConfig,
    initial: &JointState,
    torque: &TorqueInput,
) -> Result<Trajectory, SimulationError> {
    Simulator::new(params, config, initial, torque)?.run()
}
