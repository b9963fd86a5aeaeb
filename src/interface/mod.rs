use wasm_bindgen::prelude::*;
use web_sys::js_sys::Float64Array;

use crate::{
    kinematics::link_endpoints,
    params::{PhysicalParameters, SimulationConfig},
    simulate::simulate,
    state::{JointState, TorqueInput},
    trajectory::Trajectory,
    types::Float,
    util::console_log,
};

/// WebAssembly interface to a simulated trajectory. The browser side pulls
/// frames by index and draws them at its own pace.
#[wasm_bindgen]
pub struct InterfaceTrajectory {
    inner: Trajectory,
    params: PhysicalParameters,
}

#[wasm_bindgen]
impl InterfaceTrajectory {
    pub fn frameCount(&self) -> usize {
        self.inner.frame_count()
    }

    /// Joint angles `[q1, q2]` of frame `index`
    pub fn frameAt(&self, index: usize) -> Option<Float64Array> {
        frame_angles(&self.inner, index).map(|q| Float64Array::from(q.as_slice()))
    }

    /// Elbow and tip positions `[elbow_x, elbow_y, tip_x, tip_y]` of frame `index`
    pub fn linkEndpoints(&self, index: usize) -> Option<Float64Array> {
        frame_endpoints(&self.params, &self.inner, index).map(|p| Float64Array::from(p.as_slice()))
    }

    pub fn timeAt(&self, index: usize) -> Float {
        self.inner.time_at(index)
    }

    /// Half-width of a square view that always contains the arm
    pub fn viewBound(&self) -> Float {
        self.params.reach() + 1.0
    }
}

/// Simulate the default arm released at rest from (q1, q2) with no torque.
#[wasm_bindgen]
pub fn simulateTwoLinkArm(
    q1: Float,
    q2: Float,
    final_time: Float,
    dt: Float,
) -> Result<InterfaceTrajectory, JsError> {
    let params = PhysicalParameters::default();
    let config = SimulationConfig::new(final_time, dt);
    let trajectory = simulate(
        &params,
        &config,
        &JointState::at_rest(q1, q2),
        &TorqueInput::zero(),
    )?;

    console_log(&format!("simulated {} frames", trajectory.frame_count()));
    Ok(InterfaceTrajectory {
        inner: trajectory,
        params,
    })
}

fn frame_angles(trajectory: &Trajectory, index: usize) -> Option<[Float; 2]> {
    trajectory.frame_at(index).map(|state| [state.q[0], state.q[1]])
}

fn frame_endpoints(
    params: &PhysicalParameters,
    trajectory: &Trajectory,
    index: usize,
) -> Option<[Float; 4]> {
    trajectory.frame_at(index).map(|state| {
        let (elbow, tip) = link_endpoints(params, state);
        [elbow.x, elbow.y, tip.x, tip.y]
    })
}
