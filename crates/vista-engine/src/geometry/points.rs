use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ensure_positive, StageError};

use super::{Geometry, Topology};

/// `count` points uniformly distributed in a cube of edge `spread` centered on
/// the origin. Deterministic for a given `seed`.
pub fn random_spread(count: usize, spread: f32, seed: u64) -> Result<Vec<Vec3>, StageError> {
    let spread = ensure_positive("spread", spread)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut axis = || spread * (0.5 - rng.r#gen::<f32>());
    Ok((0..count).map(|_| Vec3::new(axis(), axis(), axis())).collect())
}

pub fn point_cloud(positions: Vec<Vec3>) -> Geometry {
    Geometry::new(Topology::Points, positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_stay_inside_the_spread() {
        let pts = random_spread(10_000, 5.0, 7).unwrap();
        assert_eq!(pts.len(), 10_000);
        assert!(pts.iter().all(|p| p.abs().max_element() <= 2.5));
    }

    #[test]
    fn same_seed_same_cloud() {
        assert_eq!(random_spread(32, 1.0, 42).unwrap(), random_spread(32, 1.0, 42).unwrap());
    }

    #[test]
    fn rejects_non_positive_spread() {
        assert!(random_spread(1, 0.0, 0).is_err());
    }
}
