use crate::rng::{new_rng, SeededRng};
use crate::weapon::Weapon;
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};
use smartstring::alias::CompactString;
use std::collections::BTreeMap;

/// What a ship knows about the ship it is shooting at.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Target {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
}

/// The owning ship as seen by its weapons.
pub trait Ship {
    fn position(&self) -> Vector2<f64>;
    fn velocity(&self) -> Vector2<f64>;
    fn heading(&self) -> f64;
    /// Current target for turrets to lead, if any.
    fn target(&self) -> Option<Target>;
    /// Whether the ship holds the ammunition for one shot of `weapon`.
    fn can_fire(&self, weapon: &Weapon) -> bool;
    fn expend_ammo(&mut self, weapon: &Weapon);
    fn apply_force(&mut self, force: Vector2<f64>);
    /// Deterministic source for weapon spread and intercept rolls.
    fn rng(&mut self) -> &mut SeededRng;
}

#[derive(Clone, Debug)]
pub struct ShipData {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub target: Option<Target>,
    pub ammo: BTreeMap<CompactString, i64>,
    /// Recoil accumulated since the last `take_force`.
    pub force: Vector2<f64>,
    pub rng: SeededRng,
}

impl Default for ShipData {
    fn default() -> ShipData {
        ShipData {
            position: vector![0.0, 0.0],
            velocity: vector![0.0, 0.0],
            heading: 0.0,
            target: None,
            ammo: BTreeMap::new(),
            force: vector![0.0, 0.0],
            rng: new_rng(0),
        }
    }
}

impl ShipData {
    pub fn ammo(&self, name: &str) -> i64 {
        self.ammo.get(name).copied().unwrap_or(0)
    }

    pub fn add_ammo(&mut self, name: &str, count: i64) {
        *self.ammo.entry(name.into()).or_insert(0) += count;
    }

    pub fn take_force(&mut self) -> Vector2<f64> {
        std::mem::replace(&mut self.force, vector![0.0, 0.0])
    }
}

impl Ship for ShipData {
    fn position(&self) -> Vector2<f64> {
        self.position
    }

    fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    fn heading(&self) -> f64 {
        self.heading
    }

    fn target(&self) -> Option<Target> {
        self.target
    }

    fn can_fire(&self, weapon: &Weapon) -> bool {
        match &weapon.ammo {
            Some(name) => self.ammo(name) > 0,
            None => true,
        }
    }

    fn expend_ammo(&mut self, weapon: &Weapon) {
        if let Some(name) = &weapon.ammo {
            if let Some(count) = self.ammo.get_mut(name) {
                *count = (*count - 1).max(0);
            }
        }
    }

    fn apply_force(&mut self, force: Vector2<f64>) {
        self.force += force;
    }

    fn rng(&mut self) -> &mut SeededRng {
        &mut self.rng
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::weapon::{blaster, missile_launcher};
    use test_log::test;

    #[test]
    fn test_ammo() {
        let mut ship = ShipData::default();
        let launcher = missile_launcher();
        assert!(!ship.can_fire(&launcher));
        assert!(ship.can_fire(&blaster()));

        ship.add_ammo("Missile", 2);
        assert!(ship.can_fire(&launcher));
        ship.expend_ammo(&launcher);
        ship.expend_ammo(&launcher);
        assert_eq!(ship.ammo("Missile"), 0);
        assert!(!ship.can_fire(&launcher));
        ship.expend_ammo(&launcher);
        assert_eq!(ship.ammo("Missile"), 0);
    }

    #[test]
    fn test_force() {
        let mut ship = ShipData::default();
        ship.apply_force(vector![1.0, 0.0]);
        ship.apply_force(vector![0.0, 2.0]);
        assert_eq!(ship.take_force(), vector![1.0, 2.0]);
        assert_eq!(ship.take_force(), vector![0.0, 0.0]);
    }
}
