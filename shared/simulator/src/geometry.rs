use nalgebra::{vector, UnitComplex, Vector2};
use std::f64::consts::{PI, TAU};

/// Returns the heading of `v` in `[0, TAU)`. The zero vector has heading 0.
pub fn heading(v: Vector2<f64>) -> f64 {
    v.y.atan2(v.x).rem_euclid(TAU)
}

/// Returns the unit vector pointing along `heading`.
pub fn unit(heading: f64) -> Vector2<f64> {
    vector![heading.cos(), heading.sin()]
}

/// Rotates a ship-local offset into world orientation.
pub fn rotate(v: Vector2<f64>, heading: f64) -> Vector2<f64> {
    UnitComplex::new(heading).transform_vector(&v)
}

/// Signed shortest rotation from `a` to `b`, in `[-PI, PI)`.
pub fn angle_diff(a: f64, b: f64) -> f64 {
    (b - a + PI).rem_euclid(TAU) - PI
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_log::test;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_heading() {
        assert_abs_diff_eq!(heading(vector![1.0, 0.0]), 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(heading(vector![0.0, 1.0]), PI / 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(heading(vector![-1.0, 0.0]), PI, epsilon = EPSILON);
        assert_abs_diff_eq!(heading(vector![0.0, -1.0]), 1.5 * PI, epsilon = EPSILON);
        assert_eq!(heading(vector![0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_rotate() {
        let v = rotate(vector![10.0, 0.0], PI / 2.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(v.y, 10.0, epsilon = EPSILON);
        assert_abs_diff_eq!(unit(PI).x, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_angle_diff() {
        assert_abs_diff_eq!(angle_diff(0.0, 0.5), 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(angle_diff(0.5, 0.0), -0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(angle_diff(TAU - 0.1, 0.1), 0.2, epsilon = EPSILON);
        assert_abs_diff_eq!(angle_diff(0.1, TAU - 0.1), -0.2, epsilon = EPSILON);
    }
}
