use crate::weapon::Weapon;
use nalgebra::Vector2;
use std::sync::Arc;

/// A freshly discharged projectile. Motion and collision belong to whoever
/// owns the projectile list.
#[derive(Clone, Debug)]
pub struct Projectile {
    pub weapon: Arc<Weapon>,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub lifetime: f64,
}

impl Projectile {
    pub fn new(
        weapon: Arc<Weapon>,
        position: Vector2<f64>,
        velocity: Vector2<f64>,
        heading: f64,
    ) -> Projectile {
        let lifetime = weapon.lifetime;
        Projectile {
            weapon,
            position,
            velocity,
            heading,
            lifetime,
        }
    }

    pub fn damage(&self) -> f64 {
        self.weapon.damage
    }

    pub fn missile_strength(&self) -> i32 {
        self.weapon.missile_strength
    }

    /// Position after `ticks` of straight-line flight.
    pub fn predict(&self, ticks: f64) -> Vector2<f64> {
        self.position + self.velocity * ticks
    }
}
