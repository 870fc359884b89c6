//! Intercept timing for constant-speed projectiles.
//!
//! The target keeps a constant velocity relative to the shooter and the
//! projectile flies a straight line at a constant speed, so the intercept
//! time `t` solves `|p + v * t| = speed * t`, i.e.
//!
//! ```text
//! (|v|^2 - speed^2) * t^2 + 2 * dot(p, v) * t + |p|^2 = 0
//! ```
use nalgebra::Vector2;

/// Relative size below which the quadratic term is treated as zero.
pub const EPSILON: f64 = 1e-9;

/// Returns how long a projectile travelling at `speed` takes to reach a target
/// at relative position `p` moving with relative velocity `v`, or `None` if it
/// can never catch it. The earliest non-negative solution wins.
pub fn rendezvous_time(p: Vector2<f64>, v: Vector2<f64>, speed: f64) -> Option<f64> {
    let a = v.dot(&v) - speed * speed;
    let b = 2.0 * p.dot(&v);
    let c = p.dot(&p);

    if c == 0.0 {
        return Some(0.0);
    }

    // Projectile speed matches the target's speed: the equation is linear and
    // only a closing target can be caught.
    if a.abs() <= EPSILON * (v.dot(&v) + speed * speed) {
        return if b < 0.0 { Some(-c / b) } else { None };
    }

    let discriminant = b * b - 4.0 * a * c;
    if !(discriminant >= 0.0) {
        return None;
    }

    // Citardauq form keeps the root near -c/b accurate when a is tiny.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let r1 = q / a;
    let r2 = c / q;
    match (r1 >= 0.0, r2 >= 0.0) {
        (true, true) => Some(r1.min(r2)),
        (true, false) => Some(r1),
        (false, true) => Some(r2),
        (false, false) => None,
    }
}
