use serde::{Deserialize, Serialize};
use smartstring::alias::CompactString;
use std::f64::consts::TAU;

/// Which kind of hardpoint a weapon fits in.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug, Default)]
pub enum Mounting {
    #[default]
    Gun,
    Turret,
}

impl Mounting {
    pub fn name(&self) -> &'static str {
        match self {
            Mounting::Gun => "gun",
            Mounting::Turret => "turret",
        }
    }
}

/// Spawns `count` copies of the named effect.
#[derive(Clone, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct EffectSpawn {
    pub name: CompactString,
    pub count: u32,
}

impl EffectSpawn {
    pub fn new(name: &str, count: u32) -> EffectSpawn {
        EffectSpawn {
            name: name.into(),
            count,
        }
    }
}

/// Catalog entry for a weapon outfit.
///
/// Times are in ticks and speeds in distance per tick. Entries are immutable
/// once loaded and are shared between mounts as `Arc<Weapon>`; `name` is the
/// weapon's identity and must be unique within a catalog.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Weapon {
    pub name: CompactString,
    pub mounting: Mounting,
    /// Delay between consecutive shots.
    pub reload: f64,
    /// Shots fired before the full burst reload applies.
    pub burst_count: i32,
    /// Time for a spent burst to refill.
    pub burst_reload: f64,
    pub speed: f64,
    pub lifetime: f64,
    /// Maximum aim error in radians.
    pub inaccuracy: f64,
    pub damage: f64,
    /// Recoil pushed back onto the firing ship.
    pub firing_force: f64,
    /// Ammunition consumed per shot, if any.
    pub ammo: Option<CompactString>,
    /// Projectiles steer toward their target after launch.
    pub homing: bool,
    /// Intercept strength. Non-zero makes this an anti-missile system.
    pub anti_missile: i32,
    /// How hard this weapon's projectiles are to intercept. Non-zero means
    /// they can be shot down at all.
    pub missile_strength: i32,
    /// Full angular width a gun-mounted anti-missile can engage in.
    pub arc: f64,
    pub fire_effects: Vec<EffectSpawn>,
    pub hit_effects: Vec<EffectSpawn>,
    pub die_effects: Vec<EffectSpawn>,
}

impl Default for Weapon {
    fn default() -> Weapon {
        Weapon {
            name: CompactString::new(),
            mounting: Mounting::Gun,
            reload: 1.0,
            burst_count: 1,
            burst_reload: 0.0,
            speed: 10.0,
            lifetime: 60.0,
            inaccuracy: 0.0,
            damage: 1.0,
            firing_force: 0.0,
            ammo: None,
            homing: false,
            anti_missile: 0,
            missile_strength: 0,
            arc: TAU,
            fire_effects: vec![],
            hit_effects: vec![],
            die_effects: vec![],
        }
    }
}

impl Weapon {
    pub fn is_turret(&self) -> bool {
        self.mounting == Mounting::Turret
    }

    pub fn is_anti_missile(&self) -> bool {
        self.anti_missile > 0
    }

    pub fn is_homing(&self) -> bool {
        self.homing
    }

    /// Stream weapons share one fire timer with other copies of themselves.
    /// Weapons whose projectiles can be intercepted fire together in
    /// clusters instead, and anti-missile systems each react on their own.
    pub fn is_streamed(&self) -> bool {
        self.missile_strength <= 0 && !self.is_anti_missile()
    }

    pub fn range(&self) -> f64 {
        self.speed * self.lifetime
    }

    pub fn burst_count(&self) -> i32 {
        self.burst_count.max(1)
    }

    /// Full cycle time after a burst is spent.
    pub fn burst_reload(&self) -> f64 {
        self.burst_reload.max(self.reload)
    }
}

pub fn blaster() -> Weapon {
    Weapon {
        name: "Blaster".into(),
        reload: 10.0,
        speed: 12.0,
        lifetime: 40.0,
        damage: 4.0,
        fire_effects: vec![EffectSpawn::new("blaster fire", 1)],
        hit_effects: vec![EffectSpawn::new("blaster impact", 1)],
        ..Default::default()
    }
}

pub fn heavy_laser() -> Weapon {
    Weapon {
        name: "Heavy Laser".into(),
        reload: 1.0,
        speed: 600.0,
        lifetime: 1.0,
        damage: 1.5,
        hit_effects: vec![EffectSpawn::new("laser impact", 1)],
        ..Default::default()
    }
}

pub fn pulse_turret() -> Weapon {
    Weapon {
        name: "Pulse Turret".into(),
        mounting: Mounting::Turret,
        reload: 4.0,
        burst_count: 3,
        burst_reload: 30.0,
        speed: 15.0,
        lifetime: 35.0,
        inaccuracy: 0.02,
        damage: 6.0,
        fire_effects: vec![EffectSpawn::new("pulse fire", 2)],
        ..Default::default()
    }
}

pub fn missile_launcher() -> Weapon {
    Weapon {
        name: "Missile Launcher".into(),
        reload: 60.0,
        speed: 8.0,
        lifetime: 150.0,
        damage: 40.0,
        firing_force: 2.0,
        ammo: Some("Missile".into()),
        homing: true,
        missile_strength: 10,
        fire_effects: vec![EffectSpawn::new("missile launch", 1)],
        die_effects: vec![EffectSpawn::new("missile death", 3)],
        ..Default::default()
    }
}

pub fn anti_missile_turret() -> Weapon {
    Weapon {
        name: "Anti-Missile Turret".into(),
        mounting: Mounting::Turret,
        reload: 20.0,
        speed: 250.0,
        lifetime: 1.0,
        damage: 0.0,
        anti_missile: 20,
        hit_effects: vec![EffectSpawn::new("anti-missile flare", 1)],
        ..Default::default()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_presets() {
        for weapon in [
            blaster(),
            heavy_laser(),
            pulse_turret(),
            missile_launcher(),
            anti_missile_turret(),
        ] {
            assert!(!weapon.name.is_empty());
            assert!(weapon.reload > 0.0);
            assert!(weapon.burst_reload() >= weapon.reload);
        }
        assert!(pulse_turret().is_turret());
        assert!(!blaster().is_turret());
        assert!(blaster().is_streamed());
        assert!(!missile_launcher().is_streamed());
        assert!(anti_missile_turret().is_anti_missile());
        assert!(!anti_missile_turret().is_streamed());
        assert!(missile_launcher().is_homing());
        assert!(!blaster().is_homing());
        assert_eq!(anti_missile_turret().range(), 250.0);
    }

    #[test]
    fn test_burst_defaults() {
        let weapon = Weapon {
            reload: 5.0,
            burst_count: 0,
            ..Default::default()
        };
        assert_eq!(weapon.burst_count(), 1);
        assert_eq!(weapon.burst_reload(), 5.0);
    }
}
