use std::process::ExitCode;

use two_link_arm::{
    energy::total_energy,
    plot::{animate, plot_angles},
    simulate, JointState, PhysicalParameters, SimulationConfig, TorqueInput, PI, TWO_PI,
};

/// Release the arm from rest and render its swing.
///
/// Usage: two_link_arm [final_time] [dt]
pub fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let defaults = SimulationConfig::default();
    let final_time = match args.next().map(|s| s.parse()) {
        None => defaults.final_time,
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            eprintln!("invalid final_time: {err}");
            return ExitCode::FAILURE;
        }
    };
    let dt = match args.next().map(|s| s.parse()) {
        None => defaults.dt,
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            eprintln!("invalid dt: {err}");
            return ExitCode::FAILURE;
        }
    };

    let params = PhysicalParameters::default();
    let config = SimulationConfig::new(final_time, dt);
    let initial = JointState::at_rest(TWO_PI / 3.0, PI / 3.0);

    let trajectory = match simulate(&params, &config, &initial, &TorqueInput::zero()) {
        Ok(trajectory) => trajectory,
        Err(err) => {
            eprintln!("simulation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "{} frames, energy {:.4} -> {:.4}",
        trajectory.frame_count(),
        total_energy(&params, &initial),
        total_energy(&params, trajectory.final_state())
    );

    if let Err(err) = plot_angles(&trajectory, "two_link_arm_angles.png") {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = animate(&trajectory, &params, "two_link_arm.gif") {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    println!("wrote two_link_arm_angles.png and two_link_arm.gif");
    ExitCode::SUCCESS
}
