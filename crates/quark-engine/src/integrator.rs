//! The two half-updates of the velocity-Verlet step.
//!
//! Excluded particles (absorbed or lost) are skipped by both passes.

use quark_core::{Particle, Vector};

/// Position update: `x += (v + F/(2m)·dt)·dt`.
///
/// The force each particle carried into the step is saved into `previous`
/// for [`kick`]. `previous` is resized to match `particles`, so one buffer
/// can be reused across steps.
pub(crate) fn drift<const D: usize>(
    particles: &mut [Particle<D>],
    excluded: &[bool],
    previous: &mut Vec<Vector<D>>,
    dt: f64,
) {
    previous.clear();
    previous.extend(particles.iter().map(Particle::force));
    for (p, &out) in particles.iter_mut().zip(excluded) {
        if out {
            continue;
        }
        let half_accel = p.force() * (0.5 / p.mass());
        p.displace((p.velocity() + half_accel * dt) * dt);
    }
}

/// Velocity update: `v += (F + F_prev)/(2m)·dt`, using the freshly
/// recomputed force and the one saved by [`drift`].
pub(crate) fn kick<const D: usize>(
    particles: &mut [Particle<D>],
    excluded: &[bool],
    previous: &[Vector<D>],
    dt: f64,
) {
    for ((p, &out), &prev) in particles.iter_mut().zip(excluded).zip(previous) {
        if out {
            continue;
        }
        let avg = (p.force() + prev) * (0.5 / p.mass());
        p.accelerate(avg * dt);
    }
}
