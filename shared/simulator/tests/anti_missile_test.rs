use hardpoint_simulator::armament::Armament;
use hardpoint_simulator::projectile::Projectile;
use hardpoint_simulator::ship::ShipData;
use hardpoint_simulator::weapon::{self, Weapon};
use nalgebra::{vector, Vector2};
use std::f64::consts::PI;
use std::sync::Arc;
use test_log::test;

fn point_defense(points: &[Vector2<f64>]) -> Armament {
    let mut armament = Armament::new();
    for &point in points {
        armament.add_turret(point, Some(Arc::new(weapon::anti_missile_turret())));
    }
    armament.finish_loading();
    armament.step();
    armament
}

fn incoming(weapon: Weapon, position: Vector2<f64>) -> Projectile {
    Projectile::new(Arc::new(weapon), position, vector![-8.0, 0.0], PI)
}

#[test]
fn test_out_of_range() {
    let mut armament = point_defense(&[vector![0.0, 0.0]]);
    let mut ship = ShipData::default();
    let mut effects = vec![];
    let missile = incoming(weapon::missile_launcher(), vector![1000.0, 0.0]);
    assert_eq!(
        armament.fire_anti_missile(0, &mut ship, &missile, &mut effects),
        Ok(false)
    );
    let mount = armament.mount(0).unwrap();
    assert!(mount.is_ready());
    assert_eq!(mount.reload_remaining(), 0.0);
    assert!(effects.is_empty());
}

#[test]
fn test_destroys_in_range() {
    let mut armament = point_defense(&[vector![0.0, 0.0]]);
    let mut ship = ShipData::default();
    let mut effects = vec![];
    // Ordinary bullets cannot resist an intercept.
    let shot = incoming(weapon::blaster(), vector![100.0, 0.0]);
    assert_eq!(
        armament.fire_anti_missile(0, &mut ship, &shot, &mut effects),
        Ok(true)
    );
    assert_eq!(armament.mount(0).unwrap().reload_remaining(), 20.0);
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].name.as_str(), "anti-missile flare");

    assert_eq!(
        armament.fire_anti_missile(0, &mut ship, &shot, &mut effects),
        Ok(false)
    );
}

#[test]
fn test_intercept_tries_each_mount() {
    let mut armament = point_defense(&[vector![-300.0, 0.0], vector![0.0, 0.0]]);
    let mut ship = ShipData::default();
    let mut effects = vec![];
    let missile = incoming(
        Weapon {
            missile_strength: 0,
            ..weapon::missile_launcher()
        },
        vector![100.0, 0.0],
    );
    assert!(armament.intercept(&mut ship, &missile, &mut effects));
    assert!(armament.mount(0).unwrap().is_ready());
    assert!(!armament.mount(1).unwrap().is_ready());
    // The flare plus the missile's own death effects.
    assert_eq!(effects.len(), 4);

    assert!(!armament.intercept(&mut ship, &missile, &mut effects));
    assert_eq!(effects.len(), 4);
}

#[test]
fn test_intercept_skips_guns() {
    let mut armament = Armament::new();
    armament.add_gun_port(vector![0.0, 0.0], Some(Arc::new(weapon::blaster())));
    armament.finish_loading();
    armament.step();
    let mut ship = ShipData::default();
    let missile = incoming(weapon::missile_launcher(), vector![10.0, 0.0]);
    assert!(!armament.intercept(&mut ship, &missile, &mut vec![]));
    assert!(armament.mount(0).unwrap().is_ready());
    assert_eq!(
        armament.fire_anti_missile(0, &mut ship, &missile, &mut vec![]),
        Ok(false)
    );
}

#[test]
fn test_fire_all_skips_anti_missile() {
    let mut armament = point_defense(&[vector![0.0, 0.0]]);
    let mut ship = ShipData::default();
    let mut projectiles = vec![];
    assert_eq!(
        armament.fire_all(&mut ship, &mut projectiles, &mut vec![]),
        0
    );
    assert!(projectiles.is_empty());
}

#[test]
fn test_strong_missiles_resist() {
    let template = point_defense(&[vector![0.0, 0.0]]);
    let mut ship = ShipData::default();
    let missile = incoming(
        Weapon {
            missile_strength: 1000,
            ..weapon::missile_launcher()
        },
        vector![100.0, 0.0],
    );
    let mut destroyed = 0;
    for _ in 0..500 {
        let mut armament = template.clone();
        if armament
            .fire_anti_missile(0, &mut ship, &missile, &mut vec![])
            .unwrap()
        {
            destroyed += 1;
        }
        // A miss still costs a reload.
        assert!(!armament.mount(0).unwrap().is_ready());
    }
    assert!(destroyed < 50, "destroyed {}", destroyed);
}
