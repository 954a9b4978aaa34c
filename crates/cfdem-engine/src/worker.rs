//! Background coupling thread.
//!
//! [`CouplingWorker`] moves a ready session and its handoff into a named
//! thread that owns both engines until the run ends. The calling thread
//! stays free to consume frames.

use std::error::Error;
use std::fmt;
use std::thread::{self, JoinHandle};

use cfdem_core::{FluidEngine, ParticleEngine};

use crate::config::ConfigError;
use crate::error::CouplingError;
use crate::frame::Frame;
use crate::handoff::FrameHandoff;
use crate::metrics::RunMetrics;
use crate::session::{CouplingSession, RunOutcome};

/// What a finished worker hands back.
#[derive(Debug)]
pub struct RunReport {
    /// How the run ended.
    pub outcome: Result<RunOutcome, CouplingError>,
    /// Metrics at the point the run ended.
    pub metrics: RunMetrics,
}

impl RunReport {
    /// The final frame, `None` if the consumer stalled, or the run error.
    pub fn into_frame(self) -> Result<Option<Frame>, CouplingError> {
        self.outcome.map(RunOutcome::into_frame)
    }
}

/// The worker thread did not return normally.
#[derive(Debug, PartialEq, Eq)]
pub enum WorkerError {
    /// The worker thread panicked.
    Panicked {
        /// Panic payload, if it was a string.
        message: Option<String>,
    },
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panicked {
                message: Some(message),
            } => write!(f, "coupling worker panicked: {message}"),
            Self::Panicked { message: None } => write!(f, "coupling worker panicked"),
        }
    }
}

impl Error for WorkerError {}

/// Handle to a coupling run on its own thread.
#[derive(Debug)]
pub struct CouplingWorker {
    handle: JoinHandle<RunReport>,
}

impl CouplingWorker {
    /// Start `session` on a thread named `cfdem-coupling`.
    pub fn spawn<F, P>(
        mut session: CouplingSession<F, P>,
        mut handoff: FrameHandoff,
    ) -> Result<Self, ConfigError>
    where
        F: FluidEngine + 'static,
        P: ParticleEngine + 'static,
    {
        let handle = thread::Builder::new()
            .name("cfdem-coupling".into())
            .spawn(move || {
                let outcome = session.run(&mut handoff);
                RunReport {
                    outcome,
                    metrics: session.metrics().clone(),
                }
            })
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        Ok(Self { handle })
    }

    /// Whether the run has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run to end.
    pub fn join(self) -> Result<RunReport, WorkerError> {
        self.handle.join().map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned());
            WorkerError::Panicked { message }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CouplingConfig;
    use crate::handoff::{frame_channel, SendOutcome};
    use cfdem_core::{GeometrySpec, ParticleCollection, WALL_PARTICLES};
    use cfdem_test_utils::{two_particle_flow, MockFluidEngine, MockParticleEngine};
    use std::time::Duration;

    fn session(iterations: u64) -> CouplingSession<MockFluidEngine, MockParticleEngine> {
        let mut config = CouplingConfig::default();
        config.global.num_iterations = iterations;
        config.fluid.geometry = GeometrySpec::new([1.0, 1.0, 1.0], [10, 10, 1]);
        CouplingSession::new(
            config,
            MockFluidEngine::with_uniform_velocity([0.2, 0.0, 0.0]),
            MockParticleEngine::new(),
            two_particle_flow(),
            ParticleCollection::new(WALL_PARTICLES),
        )
        .unwrap()
    }

    #[test]
    fn worker_delivers_every_frame_over_channel() {
        let (tx, rx) = frame_channel();
        let handoff = FrameHandoff::channel(tx).with_timeout(Duration::from_secs(10));
        let worker = CouplingWorker::spawn(session(4), handoff).unwrap();

        let mut seen = Vec::new();
        for delivery in rx.iter() {
            seen.push(delivery.iteration);
            delivery.ack();
        }
        let report = worker.join().unwrap();
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(report.metrics.frames_acknowledged, 4);
        let frame = report.into_frame().unwrap().unwrap();
        assert_eq!(frame.iteration, 3);
    }

    #[test]
    fn stalled_consumer_aborts_worker() {
        let (tx, rx) = frame_channel();
        let handoff = FrameHandoff::channel(tx).with_timeout(Duration::from_millis(20));
        let worker = CouplingWorker::spawn(session(5), handoff).unwrap();
        let report = worker.join().unwrap();
        assert_eq!(
            report.outcome,
            Ok(RunOutcome::Aborted {
                iteration: 0,
                outcome: SendOutcome::TimedOut
            })
        );
        assert_eq!(report.metrics.frames_published, 1);
        assert_eq!(report.metrics.iterations_completed, 1);
        drop(rx);
    }

    #[test]
    fn panic_message_is_reported() {
        let err = WorkerError::Panicked {
            message: Some("boom".into()),
        };
        assert_eq!(err.to_string(), "coupling worker panicked: boom");
    }
}
