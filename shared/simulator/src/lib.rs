pub mod armament;
pub mod effect;
pub mod error;
pub mod geometry;
pub mod mount;
pub mod projectile;
pub mod rendezvous;
pub mod rng;
pub mod ship;
pub mod weapon;
