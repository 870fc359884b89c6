use crate::effect::Effect;
use crate::error::ArmamentError;
use crate::mount::{FireStatus, Mount};
use crate::projectile::Projectile;
use crate::rendezvous;
use crate::ship::Ship;
use crate::weapon::Weapon;
use nalgebra::Vector2;
use smartstring::alias::CompactString;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared timer for every mount holding one stream weapon.
#[derive(Clone, Debug, Default)]
struct Stream {
    /// Ticks until the next mount of this type may open fire.
    reload: f64,
    /// Number of mounts holding this type.
    count: usize,
    /// Set once a mount of this type has fired this tick.
    fired: bool,
}

/// All hardpoints of one ship.
///
/// Call `step` once per tick before any firing. Stream weapons installed on
/// several mounts share one timer so that a ship with n copies fires n times
/// as often, evenly spaced, and never two copies in the same tick. Whichever
/// ready copy is asked first gets the shot. Cluster weapons (those whose
/// projectiles can be shot down) fire together whenever they are ready.
#[derive(Clone, Debug, Default)]
pub struct Armament {
    mounts: Vec<Mount>,
    streams: BTreeMap<CompactString, Stream>,
}

impl Armament {
    pub fn new() -> Armament {
        Default::default()
    }

    pub fn add_gun_port(&mut self, point: Vector2<f64>, weapon: Option<Arc<Weapon>>) {
        self.add_mount(point, false, weapon);
    }

    pub fn add_turret(&mut self, point: Vector2<f64>, weapon: Option<Arc<Weapon>>) {
        self.add_mount(point, true, weapon);
    }

    fn add_mount(&mut self, point: Vector2<f64>, is_turret: bool, weapon: Option<Arc<Weapon>>) {
        let mut mount = Mount::new(point, is_turret);
        if let Some(weapon) = weapon {
            if !mount.install(weapon.clone()) {
                log::warn!(
                    "{} does not fit a {} mount at {:?}",
                    weapon.name,
                    if is_turret { "turret" } else { "gun" },
                    point
                );
            }
        }
        self.mounts.push(mount);
    }

    /// Installs `count` copies of `weapon` into empty compatible mounts in
    /// index order, or removes copies when `count` is negative. Returns the
    /// signed number actually installed or removed.
    pub fn add(&mut self, weapon: &Arc<Weapon>, count: i32) -> i32 {
        let mut changed = 0;
        if count > 0 {
            for mount in self.mounts.iter_mut() {
                if changed == count {
                    break;
                }
                if mount.install(weapon.clone()) {
                    changed += 1;
                }
            }
            if changed < count {
                log::warn!(
                    "dropped {} of {} {}: no free {} mounts",
                    count - changed,
                    count,
                    weapon.name,
                    weapon.mounting.name()
                );
            }
        } else if count < 0 {
            for mount in self.mounts.iter_mut() {
                if changed == -count {
                    break;
                }
                if holds(mount, &weapon.name) {
                    mount.uninstall();
                    changed += 1;
                }
            }
            changed = -changed;
        }
        if changed != 0 {
            log::debug!("{:+} {}", changed, weapon.name);
            self.refresh_stream(weapon);
        }
        changed
    }

    fn refresh_stream(&mut self, weapon: &Weapon) {
        let count = self
            .mounts
            .iter()
            .filter(|mount| holds(mount, &weapon.name))
            .count();
        if weapon.is_streamed() && count > 0 {
            self.streams.entry(weapon.name.clone()).or_default().count = count;
        } else {
            self.streams.remove(weapon.name.as_str());
        }
    }

    /// Resets every mount and sets up the shared stream timers. Call once after the
    /// initial loadout is in place.
    pub fn finish_loading(&mut self) {
        for mount in self.mounts.iter_mut() {
            mount.reset();
        }

        let mut ranks: BTreeMap<CompactString, Vec<usize>> = BTreeMap::new();
        for (index, mount) in self.mounts.iter().enumerate() {
            if let Some(weapon) = mount.weapon() {
                if weapon.is_streamed() {
                    ranks.entry(weapon.name.clone()).or_default().push(index);
                }
            }
        }

        self.streams.clear();
        for (name, indices) in ranks {
            let n = indices.len();
            // Spread the copies evenly over one reload cycle.
            for (k, &index) in indices.iter().enumerate() {
                let mount = &mut self.mounts[index];
                if let Some(reload) = mount.weapon().map(|w| w.reload) {
                    mount.set_reload(reload * k as f64 / n as f64);
                }
            }
            log::debug!("{} streams across {} mounts", name, n);
            self.streams.insert(
                name,
                Stream {
                    reload: 0.0,
                    count: n,
                    fired: false,
                },
            );
        }
    }

    /// Exchanges the weapons and timers of two mounts. Returns `Ok(false)`
    /// without changing anything if either weapon would end up on the wrong
    /// kind of mount.
    pub fn swap(&mut self, first: usize, second: usize) -> Result<bool, ArmamentError> {
        self.check_index(first)?;
        self.check_index(second)?;
        if first == second {
            return Ok(false);
        }
        let fits = |mount: &Mount, other: &Mount| other.weapon().map_or(true, |w| mount.accepts(w));
        if !fits(&self.mounts[first], &self.mounts[second])
            || !fits(&self.mounts[second], &self.mounts[first])
        {
            log::debug!("refused to swap mounts {} and {}", first, second);
            return Ok(false);
        }
        let (lo, hi) = (first.min(second), first.max(second));
        let (left, right) = self.mounts.split_at_mut(hi);
        left[lo].swap_slot(&mut right[0]);
        log::debug!("swapped mounts {} and {}", first, second);
        Ok(true)
    }

    pub fn get(&self) -> &[Mount] {
        &self.mounts
    }

    pub fn mount(&self, index: usize) -> Option<&Mount> {
        self.mounts.get(index)
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    pub fn gun_count(&self) -> usize {
        self.mounts.iter().filter(|m| !m.is_turret()).count()
    }

    pub fn turret_count(&self) -> usize {
        self.mounts.iter().filter(|m| m.is_turret()).count()
    }

    /// Whether mount `index` is ready and not held back by another copy of
    /// its weapon. A mount in the middle of a burst ignores the shared timer
    /// but still yields if a copy already fired this tick.
    pub fn is_eligible(&self, index: usize) -> bool {
        let mount = match self.mounts.get(index) {
            Some(mount) if mount.is_ready() => mount,
            _ => return false,
        };
        let weapon = match mount.weapon() {
            Some(weapon) => weapon,
            None => return false,
        };
        match self.streams.get(weapon.name.as_str()) {
            None => true,
            Some(stream) => {
                !stream.fired && (mount.is_mid_burst() || stream.reload <= 0.0)
            }
        }
    }

    pub fn fire<S: Ship + ?Sized>(
        &mut self,
        index: usize,
        ship: &mut S,
        projectiles: &mut Vec<Projectile>,
        effects: &mut Vec<Effect>,
    ) -> Result<FireStatus, ArmamentError> {
        self.check_index(index)?;
        let mount = &self.mounts[index];
        let weapon = match mount.weapon() {
            Some(weapon) => weapon.clone(),
            None => return Ok(FireStatus::Empty),
        };
        if !mount.is_ready() {
            return Ok(FireStatus::NotReady);
        }
        if !self.is_eligible(index) {
            return Ok(FireStatus::Vetoed);
        }
        let burst = mount.burst_remaining();
        let mid_burst = mount.is_mid_burst();
        let status = self.mounts[index].fire(ship, projectiles, effects);
        if status.fired() {
            self.charge_stream(&weapon, burst, mid_burst);
        }
        Ok(status)
    }

    /// Returns whether `projectile` was destroyed. The caller removes it.
    pub fn fire_anti_missile<S: Ship + ?Sized>(
        &mut self,
        index: usize,
        ship: &mut S,
        projectile: &Projectile,
        effects: &mut Vec<Effect>,
    ) -> Result<bool, ArmamentError> {
        self.check_index(index)?;
        let mount = &self.mounts[index];
        let weapon = match mount.weapon() {
            Some(weapon) if weapon.is_anti_missile() => weapon.clone(),
            _ => return Ok(false),
        };
        if !self.is_eligible(index) {
            return Ok(false);
        }
        let burst = mount.burst_remaining();
        let mid_burst = mount.is_mid_burst();
        let result = self.mounts[index].fire_anti_missile(ship, projectile, effects);
        if result.discharged() {
            self.charge_stream(&weapon, burst, mid_burst);
        }
        Ok(result.destroyed())
    }

    /// Starting a burst books the whole burst against the shared timer.
    fn charge_stream(&mut self, weapon: &Weapon, burst: i32, mid_burst: bool) {
        if let Some(stream) = self.streams.get_mut(weapon.name.as_str()) {
            if !mid_burst {
                stream.reload += weapon.reload * burst as f64;
            }
            stream.fired = true;
        }
    }

    /// Fires every eligible mount except anti-missile systems. Returns the
    /// number of shots.
    pub fn fire_all<S: Ship + ?Sized>(
        &mut self,
        ship: &mut S,
        projectiles: &mut Vec<Projectile>,
        effects: &mut Vec<Effect>,
    ) -> usize {
        let mut shots = 0;
        for index in 0..self.mounts.len() {
            if self.mounts[index].is_anti_missile() {
                continue;
            }
            if let Ok(FireStatus::Fired) = self.fire(index, ship, projectiles, effects) {
                shots += 1;
            }
        }
        shots
    }

    /// Tries each anti-missile mount in turn until one destroys `projectile`.
    pub fn intercept<S: Ship + ?Sized>(
        &mut self,
        ship: &mut S,
        projectile: &Projectile,
        effects: &mut Vec<Effect>,
    ) -> bool {
        for index in 0..self.mounts.len() {
            if !self.mounts[index].is_anti_missile() {
                continue;
            }
            if let Ok(true) = self.fire_anti_missile(index, ship, projectile, effects) {
                return true;
            }
        }
        false
    }

    pub fn step(&mut self) {
        for mount in self.mounts.iter_mut() {
            mount.step();
        }
        for stream in self.streams.values_mut() {
            let drain = stream.count as f64;
            stream.reload = (stream.reload - drain).max(1.0 - drain);
            stream.fired = false;
        }
    }

    pub fn rendezvous_time(p: Vector2<f64>, v: Vector2<f64>, speed: f64) -> Option<f64> {
        rendezvous::rendezvous_time(p, v, speed)
    }

    fn check_index(&self, index: usize) -> Result<(), ArmamentError> {
        if index < self.mounts.len() {
            Ok(())
        } else {
            Err(ArmamentError::IndexOutOfRange {
                index,
                len: self.mounts.len(),
            })
        }
    }
}

fn holds(mount: &Mount, name: &str) -> bool {
    mount.weapon().map_or(false, |w| w.name.as_str() == name)
}
