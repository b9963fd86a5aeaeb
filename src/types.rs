/// Scalar type used throughout the simulation. Long-run trajectories
/// accumulate integration error, so everything stays in double precision.
pub type Float = f64;
