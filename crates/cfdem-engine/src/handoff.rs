//! Single-slot frame delivery with a bounded acknowledgement wait.
//!
//! At most one frame is ever in flight. After handing a frame over, the
//! producer blocks until the consumer acknowledges it or the timeout runs
//! out. A timeout means the consumer has stalled: the run is abandoned
//! rather than buffering frames without bound.
//!
//! Two routes are available. The callback route calls a [`FrameConsumer`]
//! on the producer thread and then, if an [`AckToken`] is configured, waits
//! on it. The channel route passes frames through a capacity-1 crossbeam
//! channel created by [`frame_channel()`]; the consumer acknowledges each
//! [`Delivery`] explicitly.

use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, SendTimeoutError, Sender};

use crate::config::HandoffConfig;
use crate::frame::Frame;

pub use crossbeam_channel::{RecvError, RecvTimeoutError, TryRecvError};

// ── SendOutcome ────────────────────────────────────────────────────

/// Result of handing one frame to the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SendOutcome {
    /// The consumer acknowledged the frame in time.
    Acked,
    /// The frame was handed over and no acknowledgement was requested.
    Delivered,
    /// The consumer did not acknowledge within the timeout.
    TimedOut,
    /// The consumer is gone.
    Disconnected,
}

impl SendOutcome {
    /// Whether the run must stop because the consumer stalled.
    pub fn is_stall(self) -> bool {
        matches!(self, Self::TimedOut | Self::Disconnected)
    }
}

// ── AckToken ───────────────────────────────────────────────────────

/// The consumer's "I have copied what I need" signal.
pub trait AckToken: Send {
    /// Block until the signal is raised or `timeout` elapses. Returns
    /// whether the signal was raised.
    fn wait(&self, timeout: Duration) -> bool;

    /// Reset the signal for the next frame.
    fn clear(&self);
}

/// Consumer half of an acknowledgement pair.
#[derive(Clone, Debug)]
pub struct AckSignal {
    tx: Sender<()>,
}

impl AckSignal {
    /// Raise the signal. Raising an already raised signal is a no-op.
    pub fn set(&self) {
        let _ = self.tx.try_send(());
    }
}

/// Producer half of an acknowledgement pair.
#[derive(Debug)]
pub struct AckWaiter {
    rx: Receiver<()>,
}

impl AckToken for AckWaiter {
    fn wait(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }

    fn clear(&self) {
        while self.rx.try_recv().is_ok() {}
    }
}

/// Create a connected acknowledgement pair.
///
/// Once every [`AckSignal`] is dropped, [`AckWaiter::wait`] returns
/// `false` immediately.
pub fn ack_pair() -> (AckSignal, AckWaiter) {
    let (tx, rx) = bounded(1);
    (AckSignal { tx }, AckWaiter { rx })
}

// ── FrameConsumer ──────────────────────────────────────────────────

/// Receives frames on the callback route.
///
/// Any `FnMut(Frame, u64, u64) + Send` closure is a consumer. The
/// arguments are the frame, its 0-based iteration, and the total number
/// of iterations in the run.
pub trait FrameConsumer: Send {
    /// Take ownership of one frame.
    fn on_frame(&mut self, frame: Frame, iteration: u64, total: u64);
}

impl<F> FrameConsumer for F
where
    F: FnMut(Frame, u64, u64) + Send,
{
    fn on_frame(&mut self, frame: Frame, iteration: u64, total: u64) {
        self(frame, iteration, total)
    }
}

// ── Channel route ──────────────────────────────────────────────────

/// A frame received on the channel route.
#[derive(Debug)]
pub struct Delivery {
    /// The delivered frame.
    pub frame: Frame,
    /// 0-based iteration of the frame.
    pub iteration: u64,
    /// Total iterations in the run.
    pub total: u64,
    ack: Sender<()>,
}

impl Delivery {
    /// Tell the producer this frame has been taken care of.
    ///
    /// Dropping a delivery without acknowledging it tells the producer
    /// the consumer is gone.
    pub fn ack(&self) {
        let _ = self.ack.try_send(());
    }
}

/// Producer end of a frame channel.
#[derive(Debug)]
pub struct FrameSender {
    frames: Sender<Delivery>,
}

/// Consumer end of a frame channel.
#[derive(Debug)]
pub struct FrameReceiver {
    frames: Receiver<Delivery>,
}

/// Create a capacity-1 frame channel.
///
/// Each [`Delivery`] carries its own one-shot acknowledgement channel, so
/// a late ack can only ever answer the frame it came with.
pub fn frame_channel() -> (FrameSender, FrameReceiver) {
    let (frame_tx, frame_rx) = bounded(1);
    (
        FrameSender { frames: frame_tx },
        FrameReceiver { frames: frame_rx },
    )
}

impl FrameSender {
    /// Send `frame` and wait for its acknowledgement.
    ///
    /// `timeout` bounds the whole exchange, slot wait included. Returns
    /// [`SendOutcome::Disconnected`] as soon as the delivery is dropped
    /// unacknowledged, whether or not the consumer received it.
    pub fn send_with_ack(
        &self,
        frame: Frame,
        iteration: u64,
        total: u64,
        timeout: Duration,
    ) -> SendOutcome {
        let deadline = Instant::now() + timeout;
        let (ack_tx, ack_rx) = bounded(1);
        let delivery = Delivery {
            frame,
            iteration,
            total,
            ack: ack_tx,
        };
        match self.frames.send_timeout(delivery, timeout) {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(_)) => return SendOutcome::TimedOut,
            Err(SendTimeoutError::Disconnected(_)) => return SendOutcome::Disconnected,
        }

        let remaining = deadline.saturating_duration_since(Instant::now());
        match ack_rx.recv_timeout(remaining) {
            Ok(()) => SendOutcome::Acked,
            Err(RecvTimeoutError::Timeout) => SendOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => SendOutcome::Disconnected,
        }
    }
}

impl FrameReceiver {
    /// Block until the next frame arrives or the producer is gone.
    pub fn recv(&self) -> Result<Delivery, RecvError> {
        self.frames.recv()
    }

    /// Like [`recv`](Self::recv) but gives up after `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Delivery, RecvTimeoutError> {
        self.frames.recv_timeout(timeout)
    }

    /// Take a frame if one is waiting.
    pub fn try_recv(&self) -> Result<Delivery, TryRecvError> {
        self.frames.try_recv()
    }

    /// Blocking iterator over deliveries, ending when the producer is gone.
    pub fn iter(&self) -> impl Iterator<Item = Delivery> + '_ {
        self.frames.iter()
    }
}

// ── FrameHandoff ───────────────────────────────────────────────────

enum Route {
    Discard,
    Callback {
        consumer: Box<dyn FrameConsumer>,
        ack: Option<Box<dyn AckToken>>,
    },
    Channel(FrameSender),
}

/// Where the coupling loop sends its frames.
pub struct FrameHandoff {
    route: Route,
    timeout: Duration,
}

impl FrameHandoff {
    /// Drop every frame. For batch runs with no observer.
    pub fn discard() -> Self {
        Self::with_route(Route::Discard)
    }

    /// Call `consumer` for each frame without waiting for an acknowledgement.
    pub fn callback(consumer: impl FrameConsumer + 'static) -> Self {
        Self::with_route(Route::Callback {
            consumer: Box::new(consumer),
            ack: None,
        })
    }

    /// Call `consumer` for each frame, then wait on `ack`.
    pub fn callback_with_ack(
        consumer: impl FrameConsumer + 'static,
        ack: impl AckToken + 'static,
    ) -> Self {
        Self::with_route(Route::Callback {
            consumer: Box::new(consumer),
            ack: Some(Box::new(ack)),
        })
    }

    /// Send frames through a capacity-1 channel.
    pub fn channel(sender: FrameSender) -> Self {
        Self::with_route(Route::Channel(sender))
    }

    fn with_route(route: Route) -> Self {
        Self {
            route,
            timeout: HandoffConfig::default().ack_timeout,
        }
    }

    /// Replace the acknowledgement timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the acknowledgement timeout in place.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Acknowledgement timeout. Defaults to the [`HandoffConfig`] default.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether publishing waits for the consumer.
    pub fn waits_for_ack(&self) -> bool {
        match &self.route {
            Route::Discard => false,
            Route::Callback { ack, .. } => ack.is_some(),
            Route::Channel(_) => true,
        }
    }

    /// Hand `frame` to the consumer.
    pub fn publish(&mut self, frame: Frame, iteration: u64, total: u64) -> SendOutcome {
        match &mut self.route {
            Route::Discard => SendOutcome::Delivered,
            Route::Callback { consumer, ack } => {
                consumer.on_frame(frame, iteration, total);
                match ack {
                    None => SendOutcome::Delivered,
                    Some(token) => {
                        if token.wait(self.timeout) {
                            token.clear();
                            SendOutcome::Acked
                        } else {
                            SendOutcome::TimedOut
                        }
                    }
                }
            }
            Route::Channel(sender) => sender.send_with_ack(frame, iteration, total, self.timeout),
        }
    }
}

impl std::fmt::Debug for FrameHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let route = match &self.route {
            Route::Discard => "discard",
            Route::Callback { ack: None, .. } => "callback",
            Route::Callback { ack: Some(_), .. } => "callback+ack",
            Route::Channel(_) => "channel",
        };
        f.debug_struct("FrameHandoff")
            .field("route", &route)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfdem_core::{Mesh, ParticleCollection, FLOW_PARTICLES, WALL_PARTICLES};
    use std::sync::{Arc, Mutex};
    use std::thread;

    fn frame(iteration: u64) -> Frame {
        Frame {
            iteration,
            mesh: Mesh::new("mesh"),
            flow: ParticleCollection::new(FLOW_PARTICLES),
            wall: ParticleCollection::new(WALL_PARTICLES),
        }
    }

    struct NeverAck;

    impl AckToken for NeverAck {
        fn wait(&self, _timeout: Duration) -> bool {
            false
        }
        fn clear(&self) {}
    }

    #[test]
    fn ack_pair_wait_and_clear() {
        let (signal, waiter) = ack_pair();
        assert!(!waiter.wait(Duration::from_millis(1)));
        signal.set();
        signal.set();
        assert!(waiter.wait(Duration::from_millis(1)));
        waiter.clear();
        assert!(!waiter.wait(Duration::from_millis(1)));
    }

    #[test]
    fn dropped_signal_fails_fast() {
        let (signal, waiter) = ack_pair();
        drop(signal);
        let start = Instant::now();
        assert!(!waiter.wait(Duration::from_secs(5)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn callback_without_ack_is_fire_and_forget() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut handoff = FrameHandoff::callback(move |f: Frame, i: u64, total: u64| {
            sink.lock().unwrap().push((f.iteration, i, total));
        });
        assert!(!handoff.waits_for_ack());
        assert_eq!(handoff.publish(frame(2), 2, 5), SendOutcome::Delivered);
        assert_eq!(*seen.lock().unwrap(), vec![(2, 2, 5)]);
    }

    #[test]
    fn callback_ack_from_inside_consumer() {
        let (signal, waiter) = ack_pair();
        let mut handoff = FrameHandoff::callback_with_ack(
            move |_f: Frame, _i: u64, _t: u64| signal.set(),
            waiter,
        );
        assert_eq!(handoff.publish(frame(0), 0, 2), SendOutcome::Acked);
        assert_eq!(handoff.publish(frame(1), 1, 2), SendOutcome::Acked);
    }

    #[test]
    fn callback_never_acked_times_out() {
        let mut handoff =
            FrameHandoff::callback_with_ack(|_f: Frame, _i: u64, _t: u64| {}, NeverAck);
        let outcome = handoff.publish(frame(0), 0, 1);
        assert_eq!(outcome, SendOutcome::TimedOut);
        assert!(outcome.is_stall());
    }

    #[test]
    fn channel_acked() {
        let (tx, rx) = frame_channel();
        let consumer = thread::spawn(move || {
            let d = rx.recv().unwrap();
            d.ack();
            d.frame.iteration
        });
        let outcome = tx.send_with_ack(frame(4), 4, 10, Duration::from_secs(5));
        assert_eq!(outcome, SendOutcome::Acked);
        assert_eq!(consumer.join().unwrap(), 4);
    }

    #[test]
    fn channel_unacked_times_out() {
        let (tx, rx) = frame_channel();
        let outcome = tx.send_with_ack(frame(0), 0, 1, Duration::from_millis(20));
        assert_eq!(outcome, SendOutcome::TimedOut);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn channel_dropped_receiver_disconnects() {
        let (tx, rx) = frame_channel();
        drop(rx);
        let outcome = tx.send_with_ack(frame(0), 0, 1, Duration::from_secs(5));
        assert_eq!(outcome, SendOutcome::Disconnected);
    }

    #[test]
    fn channel_frames_arrive_in_order() {
        let (tx, rx) = frame_channel();
        let consumer = thread::spawn(move || {
            let mut order = Vec::new();
            for d in rx.iter() {
                order.push(d.iteration);
                d.ack();
            }
            order
        });
        let mut handoff = FrameHandoff::channel(tx).with_timeout(Duration::from_secs(5));
        for i in 0..5 {
            assert_eq!(handoff.publish(frame(i), i, 5), SendOutcome::Acked);
        }
        drop(handoff);
        assert_eq!(consumer.join().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn delivery_dropped_unacked_disconnects_without_waiting() {
        let (tx, rx) = frame_channel();
        let consumer = thread::spawn(move || {
            let d = rx.recv().unwrap();
            drop(d);
            drop(rx);
        });
        let start = Instant::now();
        let outcome = tx.send_with_ack(frame(0), 0, 1, Duration::from_secs(10));
        assert_eq!(outcome, SendOutcome::Disconnected);
        assert!(start.elapsed() < Duration::from_secs(5));
        consumer.join().unwrap();
    }

    #[test]
    fn ack_then_drop_still_counts() {
        let (tx, rx) = frame_channel();
        let consumer = thread::spawn(move || {
            rx.recv().unwrap().ack();
        });
        let outcome = tx.send_with_ack(frame(0), 0, 1, Duration::from_secs(5));
        assert_eq!(outcome, SendOutcome::Acked);
        consumer.join().unwrap();
    }

    #[test]
    fn stale_ack_is_ignored() {
        let (tx, rx) = frame_channel();
        let consumer = thread::spawn(move || {
            let first = rx.recv().unwrap();
            let second = rx.recv().unwrap();
            first.ack();
            second.ack();
        });
        // First send times out before its ack; the late ack must not
        // satisfy the second send.
        let first = tx.send_with_ack(frame(0), 0, 2, Duration::from_millis(10));
        assert_eq!(first, SendOutcome::TimedOut);
        let second = tx.send_with_ack(frame(1), 1, 2, Duration::from_secs(5));
        assert_eq!(second, SendOutcome::Acked);
        consumer.join().unwrap();
    }

    #[test]
    fn discard_never_blocks() {
        let mut handoff = FrameHandoff::discard();
        assert_eq!(handoff.publish(frame(0), 0, 1), SendOutcome::Delivered);
        assert!(format!("{handoff:?}").contains("discard"));
    }
}
