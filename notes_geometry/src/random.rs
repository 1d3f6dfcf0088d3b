//! Random placement helpers for scattering lights, spheres, particles and instances.

use cgmath::{InnerSpace, Vector3};
use rand::Rng;

/// A point drawn uniformly from the inside of a ball of `radius` centred on the origin.
pub fn ball_rand<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vector3<f32> {
    loop {
        let candidate: Vector3<f32> = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );

        if candidate.magnitude2() <= 1.0 {
            return candidate * radius;
        }
    }
}

/// A point drawn uniformly from the surface of a sphere of `radius` centred on the origin.
pub fn spherical_rand<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vector3<f32> {
    let z: f32 = rng.gen_range(-1.0..=1.0);
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::PI * 2.0);
    let r = (1.0 - z * z).max(0.0).sqrt();

    Vector3::new(r * angle.cos(), r * angle.sin(), z) * radius
}

/// Every component drawn independently between the matching components of `a` and `b`.
/// The bounds may be given in either order.
pub fn linear_rand<R: Rng + ?Sized>(rng: &mut R, a: Vector3<f32>, b: Vector3<f32>) -> Vector3<f32> {
    let mut component = |a: f32, b: f32| {
        if a == b { a } else { rng.gen_range(a.min(b)..=a.max(b)) }
    };

    Vector3::new(component(a.x, b.x), component(a.y, b.y), component(a.z, b.z))
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn ball_samples_stay_inside_the_ball() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            assert!(ball_rand(&mut rng, 200.0).magnitude() <= 200.0 + 1e-3);
        }
    }

    #[test]
    fn spherical_samples_lie_on_the_sphere() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..1000 {
            let p = spherical_rand(&mut rng, 10.0);
            assert!((p.magnitude() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn linear_samples_respect_bounds_given_in_any_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = Vector3::new(-100.0, -40.0, -30.0);
        let b = Vector3::new(100.0, 40.0, -200.0);

        for _ in 0..1000 {
            let p = linear_rand(&mut rng, a, b);
            assert!(p.x >= -100.0 && p.x <= 100.0);
            assert!(p.y >= -40.0 && p.y <= 40.0);
            assert!(p.z >= -200.0 && p.z <= -30.0);
        }
    }

    #[test]
    fn equal_bounds_collapse_to_a_constant() {
        let mut rng = StdRng::seed_from_u64(5);
        let one = Vector3::new(1.0, 1.0, 1.0);

        assert_eq!(linear_rand(&mut rng, one, one), one);
    }
}
