use std::ops::{Add, Sub};

/// A point or direction in patient coordinates (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3(pub [f64; 3]);

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [x, y, z, ..] => Some(Self::new(*x, *y, *z)),
            _ => None,
        }
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = other.0;
        Vector3::new(a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0)
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    /// ∑ vᵢ²
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = rhs.0;
        Vector3::new(a0 + b0, a1 + b1, a2 + b2)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        let [a0, a1, a2] = self.0;
        let [b0, b1, b2] = rhs.0;
        Vector3::new(a0 - b0, a1 - b1, a2 - b2)
    }
}

/// In-plane axes of an image. The plane normal is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub row: Vector3,
    pub column: Vector3,
}

impl Orientation {
    pub const fn new(row: Vector3, column: Vector3) -> Self {
        Self { row, column }
    }

    pub fn normal(&self) -> Vector3 {
        self.row.cross(&self.column)
    }
}

/// ∑ (aᵢ - bᵢ)²
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_of_axial_plane_points_up() {
        let axial = Orientation::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(axial.normal(), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn cross_is_anticommutative() {
        let a = Vector3::new(0.3, -1.2, 2.0);
        let b = Vector3::new(1.5, 0.25, -0.75);
        let ab = a.cross(&b);
        let ba = b.cross(&a);
        assert_eq!(ab + ba, Vector3::default());
        assert!(ab.dot(&a).abs() < 1e-12);
    }

    #[test]
    fn squared_distance_sums_components() {
        assert_eq!(squared_distance(&[1.0, 1.0], &[0.5, 2.0]), 1.25);
        assert_eq!(Vector3::new(1.0, 2.0, 2.0).norm_squared(), 9.0);
    }

    #[test]
    fn from_slice_requires_three_components() {
        assert_eq!(Vector3::from_slice(&[1.0, 2.0]), None);
        assert_eq!(
            Vector3::from_slice(&[1.0, 2.0, 3.0]),
            Some(Vector3::new(1.0, 2.0, 3.0))
        );
    }
}
