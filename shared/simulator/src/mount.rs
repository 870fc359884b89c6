use crate::effect::{self, Effect};
use crate::geometry::{angle_diff, heading, rotate, unit};
use crate::projectile::Projectile;
use crate::rendezvous::rendezvous_time;
use crate::rng;
use crate::ship::Ship;
use crate::weapon::Weapon;
use nalgebra::Vector2;
use std::f64::consts::TAU;
use std::sync::Arc;

/// Outcome of asking a weapon to fire.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub enum FireStatus {
    Fired,
    /// Nothing is installed.
    Empty,
    /// Still reloading.
    NotReady,
    /// Ready, but another copy of the same weapon fired too recently.
    Vetoed,
    /// The ship is out of ammunition for this weapon.
    NoAmmo,
}

impl FireStatus {
    pub fn fired(self) -> bool {
        self == FireStatus::Fired
    }
}

/// Outcome of an anti-missile shot.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub enum Intercept {
    /// Nothing happened: not ready, out of reach, or no ammunition.
    Ignored,
    /// The shot went off but the projectile survived.
    Missed,
    Destroyed,
}

impl Intercept {
    pub fn destroyed(self) -> bool {
        self == Intercept::Destroyed
    }

    pub fn discharged(self) -> bool {
        self != Intercept::Ignored
    }
}

#[derive(Clone, Debug)]
pub struct Loaded {
    weapon: Arc<Weapon>,
    reload: f64,
    burst_reload: f64,
    burst_remaining: i32,
    is_firing: bool,
    was_firing: bool,
}

impl Loaded {
    fn new(weapon: Arc<Weapon>) -> Loaded {
        let burst_remaining = weapon.burst_count();
        Loaded {
            weapon,
            reload: 0.0,
            burst_reload: 0.0,
            burst_remaining,
            is_firing: false,
            was_firing: false,
        }
    }

    pub fn weapon(&self) -> &Arc<Weapon> {
        &self.weapon
    }
}

/// Contents of a hardpoint. Timers only exist while a weapon is installed.
#[derive(Clone, Debug, Default)]
pub enum Slot {
    #[default]
    Empty,
    Loaded(Loaded),
}

/// A single gun port or turret hardpoint.
#[derive(Clone, Debug)]
pub struct Mount {
    point: Vector2<f64>,
    is_turret: bool,
    angle: f64,
    slot: Slot,
}

impl Mount {
    pub fn new(point: Vector2<f64>, is_turret: bool) -> Mount {
        Mount {
            point,
            is_turret,
            angle: 0.0,
            slot: Slot::Empty,
        }
    }

    /// Where projectiles originate, in ship-local coordinates.
    pub fn point(&self) -> Vector2<f64> {
        self.point
    }

    pub fn is_turret(&self) -> bool {
        self.is_turret
    }

    /// Convergence adjustment relative to the ship's heading.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn weapon(&self) -> Option<&Arc<Weapon>> {
        match &self.slot {
            Slot::Empty => None,
            Slot::Loaded(loaded) => Some(&loaded.weapon),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.slot, Slot::Empty)
    }

    pub fn is_anti_missile(&self) -> bool {
        self.weapon().map_or(false, |w| w.is_anti_missile())
    }

    pub fn is_homing(&self) -> bool {
        self.weapon().map_or(false, |w| w.is_homing())
    }

    /// Whether `weapon` fits this kind of hardpoint.
    pub fn accepts(&self, weapon: &Weapon) -> bool {
        weapon.is_turret() == self.is_turret
    }

    pub fn is_ready(&self) -> bool {
        match &self.slot {
            Slot::Empty => false,
            Slot::Loaded(loaded) => loaded.reload <= 0.0,
        }
    }

    pub fn is_firing(&self) -> bool {
        matches!(&self.slot, Slot::Loaded(loaded) if loaded.is_firing)
    }

    pub fn was_firing(&self) -> bool {
        matches!(&self.slot, Slot::Loaded(loaded) if loaded.was_firing)
    }

    pub fn burst_remaining(&self) -> i32 {
        match &self.slot {
            Slot::Empty => 0,
            Slot::Loaded(loaded) => loaded.burst_remaining,
        }
    }

    /// True between the first and last shot of a burst.
    pub fn is_mid_burst(&self) -> bool {
        match &self.slot {
            Slot::Empty => false,
            Slot::Loaded(loaded) => loaded.burst_remaining < loaded.weapon.burst_count(),
        }
    }

    pub fn reload_remaining(&self) -> f64 {
        match &self.slot {
            Slot::Empty => 0.0,
            Slot::Loaded(loaded) => loaded.reload,
        }
    }

    pub fn burst_reload_remaining(&self) -> f64 {
        match &self.slot {
            Slot::Empty => 0.0,
            Slot::Loaded(loaded) => loaded.burst_reload,
        }
    }

    /// Advances the timers by one tick.
    pub fn step(&mut self) {
        if let Slot::Loaded(loaded) = &mut self.slot {
            loaded.was_firing = loaded.is_firing;
            loaded.is_firing = false;
            loaded.reload = (loaded.reload - 1.0).max(0.0);
            loaded.burst_reload = (loaded.burst_reload - 1.0).max(0.0);
            if loaded.burst_reload <= 0.0 {
                loaded.burst_remaining = loaded.weapon.burst_count();
            }
        }
    }

    /// Installs `weapon` if this mount is empty and of the right kind.
    pub fn install(&mut self, weapon: Arc<Weapon>) -> bool {
        if !self.is_empty() || !self.accepts(&weapon) {
            return false;
        }
        self.slot = Slot::Loaded(Loaded::new(weapon));
        self.converge();
        true
    }

    pub fn uninstall(&mut self) -> Option<Arc<Weapon>> {
        self.angle = 0.0;
        match std::mem::take(&mut self.slot) {
            Slot::Empty => None,
            Slot::Loaded(loaded) => Some(loaded.weapon),
        }
    }

    /// Fresh timers and a full burst for the current weapon.
    pub(crate) fn reset(&mut self) {
        if let Slot::Loaded(loaded) = &mut self.slot {
            *loaded = Loaded::new(loaded.weapon.clone());
        }
        self.converge();
    }

    pub(crate) fn set_reload(&mut self, reload: f64) {
        if let Slot::Loaded(loaded) = &mut self.slot {
            loaded.reload = reload.max(0.0);
        }
    }

    /// Exchanges weapons and timers with `other`. Each mount keeps its own
    /// point and recomputes its own convergence.
    pub(crate) fn swap_slot(&mut self, other: &mut Mount) {
        std::mem::swap(&mut self.slot, &mut other.slot);
        self.converge();
        other.converge();
    }

    /// Points fixed guns slightly inward so that shots from an offset gun
    /// cross the centerline at the weapon's range.
    fn converge(&mut self) {
        let range = self.weapon().map_or(0.0, |w| w.range());
        self.angle = if self.is_turret || self.point.y == 0.0 || range <= 0.0 {
            0.0
        } else {
            -(self.point.y / range).clamp(-1.0, 1.0).asin()
        };
    }

    /// World position of this hardpoint.
    pub fn origin<S: Ship + ?Sized>(&self, ship: &S) -> Vector2<f64> {
        ship.position() + rotate(self.point, ship.heading())
    }

    /// World heading this mount would fire at, before spread.
    pub fn aim<S: Ship + ?Sized>(&self, ship: &S) -> f64 {
        let weapon = match self.weapon() {
            Some(weapon) if self.is_turret => weapon,
            _ => return (ship.heading() + self.angle).rem_euclid(TAU),
        };
        let target = match ship.target() {
            Some(target) => target,
            None => return ship.heading(),
        };
        // Projectiles inherit the ship's velocity, so lead in its frame.
        let p = target.position - self.origin(ship);
        let v = target.velocity - ship.velocity();
        match rendezvous_time(p, v, weapon.speed) {
            Some(t) => {
                let lead = p + v * t.min(weapon.lifetime);
                if lead.norm_squared() > 0.0 {
                    heading(lead)
                } else {
                    ship.heading()
                }
            }
            None => ship.heading(),
        }
    }

    pub fn fire<S: Ship + ?Sized>(
        &mut self,
        ship: &mut S,
        projectiles: &mut Vec<Projectile>,
        effects: &mut Vec<Effect>,
    ) -> FireStatus {
        let weapon = match &self.slot {
            Slot::Empty => return FireStatus::Empty,
            Slot::Loaded(loaded) if loaded.reload > 0.0 => return FireStatus::NotReady,
            Slot::Loaded(loaded) => loaded.weapon.clone(),
        };
        if !ship.can_fire(&weapon) {
            return FireStatus::NoAmmo;
        }

        let start = self.origin(&*ship);
        let aim = (self.aim(&*ship) + rng::spread(ship.rng(), weapon.inaccuracy)).rem_euclid(TAU);
        let direction = unit(aim);
        ship.expend_ammo(&weapon);
        projectiles.push(Projectile::new(
            weapon.clone(),
            start,
            ship.velocity() + direction * weapon.speed,
            aim,
        ));
        effect::place(
            effects,
            &weapon.fire_effects,
            start,
            ship.velocity(),
            aim,
        );
        if weapon.firing_force != 0.0 {
            ship.apply_force(-direction * weapon.firing_force);
        }
        self.discharge();
        log::trace!("fired {} at heading {:.3}", weapon.name, aim);
        FireStatus::Fired
    }

    /// Tries to shoot down `projectile`. The caller removes the projectile
    /// when this reports `Destroyed`.
    pub fn fire_anti_missile<S: Ship + ?Sized>(
        &mut self,
        ship: &mut S,
        projectile: &Projectile,
        effects: &mut Vec<Effect>,
    ) -> Intercept {
        let weapon = match &self.slot {
            Slot::Loaded(loaded) if loaded.reload <= 0.0 && loaded.weapon.is_anti_missile() => {
                loaded.weapon.clone()
            }
            _ => return Intercept::Ignored,
        };

        let start = self.origin(&*ship);
        let offset = projectile.position - start;
        if !(offset.norm() <= weapon.range()) {
            return Intercept::Ignored;
        }
        let aim = heading(offset);
        if !self.is_turret && angle_diff(self.aim(&*ship), aim).abs() > weapon.arc / 2.0 {
            return Intercept::Ignored;
        }
        if !ship.can_fire(&weapon) {
            return Intercept::Ignored;
        }

        ship.expend_ammo(&weapon);
        effect::place(
            effects,
            &weapon.hit_effects,
            start + offset * 0.5,
            ship.velocity(),
            aim,
        );
        effect::place(
            effects,
            &projectile.weapon.die_effects,
            projectile.position,
            projectile.velocity,
            aim,
        );
        self.discharge();

        let strength = rng::roll(ship.rng(), weapon.anti_missile);
        let resistance = rng::roll(ship.rng(), projectile.missile_strength());
        log::trace!(
            "{} engaged {} ({} vs {})",
            weapon.name,
            projectile.weapon.name,
            strength,
            resistance
        );
        if strength >= resistance {
            Intercept::Destroyed
        } else {
            Intercept::Missed
        }
    }

    /// Reload and burst bookkeeping for one shot.
    fn discharge(&mut self) {
        if let Slot::Loaded(loaded) = &mut self.slot {
            let weapon = &loaded.weapon;
            loaded.burst_remaining -= 1;
            loaded.burst_reload = weapon.burst_reload();
            if loaded.burst_remaining <= 0 {
                loaded.burst_remaining = weapon.burst_count();
                loaded.reload = weapon.burst_reload();
            } else {
                loaded.reload = weapon.reload;
            }
            loaded.is_firing = true;
        }
    }
}
