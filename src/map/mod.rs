//! Seam to the mapping subsystem.
//!
//! Map storage lives outside this crate. The visualization only needs two
//! things from it: lightweight handles identifying which map point a
//! keypoint is associated with, and aggregate counts for the status band.

/// Unique identifier for a MapPoint (a 3D landmark) within the map.
///
/// MapPointIds serve as lightweight handles for cross-referencing without
/// needing Arc/Rc, which simplifies ownership and avoids cyclic references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapPointId(pub u64);

impl MapPointId {
    /// Create a new MapPointId with the given value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for MapPointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MP{}", self.0)
    }
}

/// Aggregate map statistics shown in the status band.
///
/// Implemented by the map storage. Both accessors are read-only and are
/// queried once per drawn frame while tracking is `Ok`, never cached.
pub trait MapStats {
    /// Number of keyframes currently in the map.
    fn keyframes_in_map(&self) -> usize;

    /// Number of map points currently in the map.
    fn map_points_in_map(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_point_id_display() {
        let id = MapPointId::new(123);
        assert_eq!(format!("{}", id), "MP123");
    }
}
