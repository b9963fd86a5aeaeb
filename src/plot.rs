use std::path::Path;

use itertools::izip;
use plotters::{coord::Shift, prelude::*};
use thiserror::Error;

use crate::{
    kinematics::link_endpoints, params::PhysicalParameters, state::JointState,
    trajectory::Trajectory, types::Float,
};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("trajectory has no frames to draw")]
    EmptyTrajectory,

    #[error("drawing failed: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Render the trajectory as an animated GIF, one frame per recorded state,
/// played back in real time.
pub fn animate<P: AsRef<Path>>(
    trajectory: &Trajectory,
    params: &PhysicalParameters,
    path: P,
) -> Result<(), RenderError> {
    if trajectory.is_empty() {
        return Err(RenderError::EmptyTrajectory);
    }

    let frame_delay = ((trajectory.dt() * 1000.0) as u32).max(1);
    let root = BitMapBackend::gif(path, (640, 640), frame_delay)
        .map_err(drawing)?
        .into_drawing_area();

    for (i, state) in trajectory.iter().enumerate() {
        draw_arm(&root, params, state, trajectory.time_at(i))?;
        root.present().map_err(drawing)?;
    }
    Ok(())
}

/// Draw a single frame of the arm: base joint in green, elbow and tip in
/// red, links in blue.
pub fn draw_arm<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    params: &PhysicalParameters,
    state: &JointState,
    t: Float,
) -> Result<(), RenderError> {
    let bound = params.reach() + 1.0;

    root.fill(&WHITE).map_err(drawing)?;
    let mut chart = ChartBuilder::on(root)
        .caption(format!("2-link robot t={:.3}", t), ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(-bound..bound, -bound..bound)
        .map_err(drawing)?;
    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .draw()
        .map_err(drawing)?;

    let (elbow, tip) = link_endpoints(params, state);
    let base = (0.0, 0.0);
    let elbow = (elbow.x, elbow.y);
    let tip = (tip.x, tip.y);

    chart
        .draw_series(LineSeries::new([base, elbow, tip], &BLUE))
        .map_err(drawing)?;
    chart
        .draw_series(std::iter::once(Circle::new(base, 4, GREEN.filled())))
        .map_err(drawing)?;
    chart
        .draw_series([elbow, tip].into_iter().map(|p| Circle::new(p, 4, RED.filled())))
        .map_err(drawing)?;
    Ok(())
}

/// Plot both joint angles against time.
pub fn plot_angles<P: AsRef<Path>>(trajectory: &Trajectory, path: P) -> Result<(), RenderError> {
    if trajectory.is_empty() {
        return Err(RenderError::EmptyTrajectory);
    }

    let (q1s, q2s) = trajectory.angle_series();
    let times: Vec<Float> = (0..trajectory.frame_count())
        .map(|i| trajectory.time_at(i))
        .collect();
    let (min_y, max_y) = angle_range(&q1s, &q2s);

    let root = BitMapBackend::new(path.as_ref(), (640, 480)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Joint angles vs. Time plot", ("sans-serif", 20))
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..trajectory.duration(), min_y..max_y)
        .map_err(drawing)?;
    chart.configure_mesh().draw().map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            izip!(times.iter(), q1s.iter()).map(|(t, q)| (*t, *q)),
            &BLUE,
        ))
        .map_err(drawing)?
        .label("q1")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
    chart
        .draw_series(LineSeries::new(
            izip!(times.iter(), q2s.iter()).map(|(t, q)| (*t, *q)),
            &RED,
        ))
        .map_err(drawing)?
        .label("q2")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    Ok(())
}

/// y-axis limits covering both angle series, padded when they are flat.
fn angle_range(q1s: &[Float], q2s: &[Float]) -> (Float, Float) {
    let min_y = q1s.iter().chain(q2s).cloned().fold(Float::INFINITY, Float::min);
    let max_y = q1s.iter().chain(q2s).cloned().fold(Float::NEG_INFINITY, Float::max);
    if max_y - min_y < 1e-9 {
        (min_y - 1.0, max_y + 1.0)
    } else {
        (min_y, max_y)
    }
}
