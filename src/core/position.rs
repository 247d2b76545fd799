use serde::{Deserialize, Serialize};

/// A position in the host engine's space.
///
/// The map lies on the `x`/`z` plane: `x` grows east, `z` grows north and
/// `y` is height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalPosition {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Position on the map plane at zero height
    pub fn on_plane(x: f64, z: f64) -> Self {
        Self::new(x, 0.0, z)
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn add(&self, other: &LocalPosition) -> LocalPosition {
        LocalPosition::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn subtract(&self, other: &LocalPosition) -> LocalPosition {
        LocalPosition::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn multiply(&self, scalar: f64) -> LocalPosition {
        LocalPosition::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    pub fn distance_to(&self, other: &LocalPosition) -> f64 {
        let d = self.subtract(other);
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }

    /// Distance ignoring height
    pub fn planar_distance_to(&self, other: &LocalPosition) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

impl Default for LocalPosition {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(feature = "nalgebra")]
impl From<LocalPosition> for nalgebra::Point3<f64> {
    fn from(position: LocalPosition) -> Self {
        nalgebra::Point3::new(position.x, position.y, position.z)
    }
}

#[cfg(feature = "nalgebra")]
impl From<nalgebra::Point3<f64>> for LocalPosition {
    fn from(point: nalgebra::Point3<f64>) -> Self {
        LocalPosition::new(point.x, point.y, point.z)
    }
}
