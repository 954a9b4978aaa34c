//! Couple a prescribed Poiseuille channel flow to a cloud of particles on
//! a background thread and watch the frames arrive.
//!
//! Run with `cargo run -p cfdem-engine --example channel_coupling`.

use std::time::Duration;

use cfdem_core::{GeometrySpec, Vec3, FLOW_PARTICLES, WALL_PARTICLES};
use cfdem_drag::ForceLaw;
use cfdem_engine::{frame_channel, CouplingConfig, CouplingSession, CouplingWorker, FrameHandoff};
use cfdem_test_utils::{seeded_particles, wall_row, MockFluidEngine, MockParticleEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CouplingConfig::default();
    config.global.num_iterations = 20;
    config.global.update_frequency = 5;
    config.global.force_law = ForceLaw::Dala;
    config.fluid.geometry = GeometrySpec::new([0.1, 0.01, 0.002], [100, 10, 1]);

    let height = config.fluid.geometry.extent[1];
    let u_max = 0.01;
    let fluid = MockFluidEngine::with_profile(Box::new(move |centre: Vec3, _step: u64| {
        let eta = centre[1] / height;
        [4.0 * u_max * eta * (1.0 - eta), 0.0, 0.0]
    }));

    let flow = seeded_particles(FLOW_PARTICLES, 7, 200, &config.fluid.geometry, 5e-5);
    let wall = wall_row(WALL_PARTICLES, &config.fluid.geometry, 100, 0.0, 5e-4);

    let session = CouplingSession::new(config, fluid, MockParticleEngine::new(), flow, wall)?;
    let (tx, rx) = frame_channel();
    let worker = CouplingWorker::spawn(
        session,
        FrameHandoff::channel(tx).with_timeout(Duration::from_secs(2)),
    )?;

    for delivery in rx.iter() {
        let mean_fx = delivery
            .frame
            .flow
            .iter_particles()
            .map(|p| p.force[0])
            .sum::<f64>()
            / delivery.frame.flow.len().max(1) as f64;
        println!(
            "frame {:>3}/{} ({:>5.1}%): {} particles, mean drag x = {mean_fx:.3e} N",
            delivery.iteration + 1,
            delivery.total,
            delivery.frame.progress_percent(delivery.total),
            delivery.frame.particle_count(),
        );
        delivery.ack();
    }

    let report = worker.join()?;
    println!(
        "done: {} iterations, {} frames, fluid {} us, drag {} us",
        report.metrics.iterations_completed,
        report.metrics.frames_published,
        report.metrics.fluid_us,
        report.metrics.drag_us,
    );
    report.outcome?;
    Ok(())
}
