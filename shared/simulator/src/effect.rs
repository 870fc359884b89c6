use crate::weapon::EffectSpawn;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use smartstring::alias::CompactString;

/// A visual or audio cue to be played by the renderer.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Effect {
    pub name: CompactString,
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
}

/// Appends every effect in `spawns`, all placed at the same spot.
pub fn place(
    effects: &mut Vec<Effect>,
    spawns: &[EffectSpawn],
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    heading: f64,
) {
    for spawn in spawns {
        for _ in 0..spawn.count {
            effects.push(Effect {
                name: spawn.name.clone(),
                position,
                velocity,
                heading,
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::vector;
    use test_log::test;

    #[test]
    fn test_place() {
        let mut effects = vec![];
        place(
            &mut effects,
            &[EffectSpawn::new("spark", 2), EffectSpawn::new("smoke", 1)],
            vector![1.0, 2.0],
            vector![0.0, 0.0],
            0.5,
        );
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0].name.as_str(), "spark");
        assert_eq!(effects[2].name.as_str(), "smoke");
        assert_eq!(effects[2].position, vector![1.0, 2.0]);
    }
}
