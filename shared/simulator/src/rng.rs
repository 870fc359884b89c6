use rand::Rng;
use rand_distr::{Distribution, Triangular};

pub use rand_chacha::ChaCha8Rng as SeededRng;

pub fn new_rng(seed: u32) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}

/// Samples an aim error in `(-inaccuracy, inaccuracy)`, peaked at zero.
pub fn spread(rng: &mut SeededRng, inaccuracy: f64) -> f64 {
    if inaccuracy <= 0.0 {
        return 0.0;
    }
    match Triangular::new(-inaccuracy, inaccuracy, 0.0) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0.0,
    }
}

/// Rolls an integer in `[0, strength)`, or zero for non-positive strengths.
pub fn roll(rng: &mut SeededRng, strength: i32) -> i32 {
    if strength <= 0 {
        0
    } else {
        rng.gen_range(0..strength)
    }
}
