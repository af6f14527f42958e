//! Read-only per-step notification of simulation state.
//!
//! Observers are called synchronously at the end of every
//! [`Simulation::step`](crate::Simulation::step), in registration order.
//! A slow observer slows the whole simulation; [`ChannelObserver`] hands
//! an owned copy to another thread instead.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, warn};
use quark_core::{Particle, StepId};
use quark_space::BorderPolicy;

use crate::metrics::StepMetrics;

// ── SimulationView ─────────────────────────────────────────────────

/// Borrowed view of the simulation between two steps.
///
/// Exposes every particle, including absorbed ones (check
/// [`is_excluded`](Self::is_excluded)).
#[derive(Clone, Copy, Debug)]
pub struct SimulationView<'a, const D: usize> {
    pub(crate) particles: &'a [Particle<D>],
    pub(crate) excluded: &'a [bool],
    pub(crate) step: StepId,
    pub(crate) elapsed: f64,
    pub(crate) border: BorderPolicy,
    pub(crate) metrics: &'a StepMetrics,
}

impl<'a, const D: usize> SimulationView<'a, D> {
    /// All particles, indexed as at construction.
    pub fn particles(&self) -> &'a [Particle<D>] {
        self.particles
    }

    /// Whether particle `index` has left the grid (absorbed or lost).
    pub fn is_excluded(&self, index: usize) -> bool {
        self.excluded.get(index).copied().unwrap_or(false)
    }

    /// Particles still on the grid.
    pub fn active(&self) -> impl Iterator<Item = &'a Particle<D>> + 'a {
        self.particles
            .iter()
            .zip(self.excluded)
            .filter(|&(_, &out)| !out)
            .map(|(p, _)| p)
    }

    /// Number of completed steps.
    pub fn step(&self) -> StepId {
        self.step
    }

    /// Simulated time elapsed since construction.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Border policy in effect.
    pub fn border_policy(&self) -> BorderPolicy {
        self.border
    }

    /// Metrics of the step that just completed.
    pub fn metrics(&self) -> &'a StepMetrics {
        self.metrics
    }

    /// Copy the view into an [`OwnedSnapshot`].
    pub fn to_snapshot(&self) -> OwnedSnapshot<D> {
        OwnedSnapshot {
            step: self.step,
            elapsed: self.elapsed,
            border: self.border,
            particles: self.particles.to_vec(),
            excluded: self.excluded.to_vec(),
            metrics: *self.metrics,
        }
    }
}

// ── OwnedSnapshot ──────────────────────────────────────────────────

/// An owned copy of a [`SimulationView`], safe to send across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedSnapshot<const D: usize> {
    /// Number of completed steps.
    pub step: StepId,
    /// Simulated time elapsed since construction.
    pub elapsed: f64,
    /// Border policy in effect.
    pub border: BorderPolicy,
    /// All particles, indexed as at construction.
    pub particles: Vec<Particle<D>>,
    /// Per-particle exclusion flags.
    pub excluded: Vec<bool>,
    /// Metrics of the step.
    pub metrics: StepMetrics,
}

// ── Observer ───────────────────────────────────────────────────────

/// A sink notified once per step.
///
/// The view is only valid for the duration of the call.
pub trait Observer<const D: usize>: Send + 'static {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Inspect the state after a step.
    fn observe(&mut self, view: &SimulationView<'_, D>);
}

/// An [`Observer`] backed by a closure.
pub struct FnObserver<F> {
    name: String,
    f: F,
}

impl<F> FnObserver<F> {
    /// Wrap `f` under `name`.
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<const D: usize, F> Observer<D> for FnObserver<F>
where
    F: FnMut(&SimulationView<'_, D>) + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn observe(&mut self, view: &SimulationView<'_, D>) {
        (self.f)(view)
    }
}

/// Sends an [`OwnedSnapshot`] per step over a channel.
///
/// A full bounded channel drops the snapshot and counts it. Once the
/// receiver is gone the observer logs once and stops copying state.
pub struct ChannelObserver<const D: usize> {
    sender: Sender<OwnedSnapshot<D>>,
    connected: bool,
    dropped: u64,
}

impl<const D: usize> ChannelObserver<D> {
    /// Observe into an existing sender.
    pub fn new(sender: Sender<OwnedSnapshot<D>>) -> Self {
        Self {
            sender,
            connected: true,
            dropped: 0,
        }
    }

    /// An observer and the receiving end of a channel holding at most
    /// `capacity` snapshots.
    pub fn bounded(capacity: usize) -> (Self, Receiver<OwnedSnapshot<D>>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::new(tx), rx)
    }

    /// An observer and the receiving end of an unbounded channel.
    pub fn unbounded() -> (Self, Receiver<OwnedSnapshot<D>>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    /// Whether the receiver is still alive as of the last send.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Snapshots discarded because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl<const D: usize> Observer<D> for ChannelObserver<D> {
    fn name(&self) -> &str {
        "channel"
    }

    fn observe(&mut self, view: &SimulationView<'_, D>) {
        if !self.connected {
            return;
        }
        match self.sender.try_send(view.to_snapshot()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                debug!("channel observer full, dropped snapshot {}", view.step());
            }
            Err(TrySendError::Disconnected(_)) => {
                self.connected = false;
                warn!(
                    "channel observer receiver disconnected at step {}, no further snapshots",
                    view.step()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quark_core::{InitialCondition, ParticleFactory, Vector};
    use std::sync::{Arc, Mutex};

    fn particles() -> Vec<Particle<2>> {
        let mut f = ParticleFactory::new();
        (0..3)
            .map(|i| {
                f.create(InitialCondition::at_rest(Vector::new([i as f64, 0.0]), 1.0))
                    .unwrap()
            })
            .collect()
    }

    fn view<'a>(
        particles: &'a [Particle<2>],
        excluded: &'a [bool],
        metrics: &'a StepMetrics,
    ) -> SimulationView<'a, 2> {
        SimulationView {
            particles,
            excluded,
            step: StepId(4),
            elapsed: 0.4,
            border: BorderPolicy::Periodic,
            metrics,
        }
    }

    #[test]
    fn active_skips_excluded() {
        let ps = particles();
        let metrics = StepMetrics::default();
        let v = view(&ps, &[false, true, false], &metrics);
        let ids: Vec<u64> = v.active().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(v.is_excluded(1));
        assert!(!v.is_excluded(99));
    }

    #[test]
    fn fn_observer_sees_view() {
        let ps = particles();
        let metrics = StepMetrics::default();
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut obs = FnObserver::new("probe", move |v: &SimulationView<'_, 2>| {
            *sink.lock().unwrap() = Some((v.step(), v.particles().len()));
        });
        assert_eq!(Observer::<2>::name(&obs), "probe");
        obs.observe(&view(&ps, &[false; 3], &metrics));
        assert_eq!(*seen.lock().unwrap(), Some((StepId(4), 3)));
    }

    #[test]
    fn channel_observer_delivers_snapshot() {
        let ps = particles();
        let metrics = StepMetrics {
            pair_evaluations: 2,
            ..StepMetrics::default()
        };
        let (mut obs, rx) = ChannelObserver::unbounded();
        obs.observe(&view(&ps, &[false; 3], &metrics));
        let snap = rx.try_recv().unwrap();
        assert_eq!(snap.step, StepId(4));
        assert_eq!(snap.particles, ps);
        assert_eq!(snap.border, BorderPolicy::Periodic);
        assert_eq!(snap.metrics.pair_evaluations, 2);
    }

    #[test]
    fn channel_observer_counts_full_drops() {
        let ps = particles();
        let metrics = StepMetrics::default();
        let (mut obs, rx) = ChannelObserver::bounded(1);
        obs.observe(&view(&ps, &[false; 3], &metrics));
        obs.observe(&view(&ps, &[false; 3], &metrics));
        assert_eq!(obs.dropped(), 1);
        assert_eq!(rx.len(), 1);
        assert!(obs.is_connected());
    }

    #[test]
    fn channel_observer_goes_quiet_after_disconnect() {
        let ps = particles();
        let metrics = StepMetrics::default();
        let (mut obs, rx) = ChannelObserver::<2>::bounded(4);
        drop(rx);
        obs.observe(&view(&ps, &[false; 3], &metrics));
        assert!(!obs.is_connected());
        obs.observe(&view(&ps, &[false; 3], &metrics));
        assert!(!obs.is_connected());
    }
}
