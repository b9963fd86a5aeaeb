use crate::{state::JointState, types::Float};

/// Frames reserved up front; longer runs grow the buffer as they go.
const MAX_RESERVED_FRAMES: usize = 1 << 16;

/// Joint states recorded at each integration step.
///
/// Frame `i` is the state at time `i * dt`, recorded before step `i` is
/// applied. The state after the last step is kept separately in
/// [`Trajectory::final_state`] and is not a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    dt: Float,
    frames: Vec<JointState>,
    final_state: JointState,
}

impl Trajectory {
    pub(crate) fn with_capacity(dt: Float, initial: JointState, capacity: usize) -> Self {
        Trajectory {
            dt,
            frames: Vec::with_capacity(capacity.min(MAX_RESERVED_FRAMES)),
            final_state: initial,
        }
    }

    pub(crate) fn push(&mut self, state: JointState) {
        self.frames.push(state);
    }

    pub(crate) fn finish(&mut self, final_state: JointState) {
        self.final_state = final_state;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_at(&self, index: usize) -> Option<&JointState> {
        self.frames.get(index)
    }

    pub fn time_at(&self, index: usize) -> Float {
        index as Float * self.dt
    }

    pub fn dt(&self) -> Float {
        self.dt
    }

    /// Duration covered by the recorded frames plus the final step
    pub fn duration(&self) -> Float {
        self.time_at(self.frame_count())
    }

    pub fn final_state(&self) -> &JointState {
        &self.final_state
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JointState> {
        self.frames.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Joint angle series (q1, q2) for plotting.
    pub fn angle_series(&self) -> (Vec<Float>, Vec<Float>) {
        self.frames.iter().map(|s| s.angles()).unzip()
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a JointState;
    type IntoIter = std::slice::Iter<'a, JointState>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
