use crate::angle::normalize_full;
use crate::error::HomingError;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Plain 2-D vector in world units.
///
/// Value type: every operation returns a new vector. Internally backed by
/// `nalgebra::Vector2<f64>` so norms and arithmetic stay in one place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanarVector {
    pub x: f64,
    pub y: f64,
}

impl PlanarVector {
    pub const ZERO: PlanarVector = PlanarVector { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of `length` pointing along `angle` (radians, CCW from +x).
    #[inline]
    pub fn from_polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    #[inline]
    pub fn as_nalgebra(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean norm.
    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.as_nalgebra().norm()
    }

    /// Direction angle in [0, 2π). The zero vector reports 0.
    #[inline]
    pub fn direction(&self) -> f64 {
        let direction = self.y.atan2(self.x);
        if direction < 0.0 {
            normalize_full(direction)
        } else {
            direction
        }
    }

    /// Unit vector with the same direction, or the zero vector when the
    /// magnitude is zero.
    pub fn normalize(&self) -> Self {
        self.as_nalgebra()
            .try_normalize(0.0)
            .map(Self::from)
            .unwrap_or(Self::ZERO)
    }

    /// Normalizes, then scales to `length`.
    #[inline]
    pub fn scaled_to(&self, length: f64) -> Self {
        self.normalize() * length
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<Vector2<f64>> for PlanarVector {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<PlanarVector> for Vector2<f64> {
    #[inline]
    fn from(v: PlanarVector) -> Self {
        v.as_nalgebra()
    }
}

impl Add for PlanarVector {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        (self.as_nalgebra() + other.as_nalgebra()).into()
    }
}

impl AddAssign for PlanarVector {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for PlanarVector {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        (self.as_nalgebra() - other.as_nalgebra()).into()
    }
}

impl Neg for PlanarVector {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for PlanarVector {
    type Output = Self;

    #[inline]
    fn mul(self, scale: f64) -> Self {
        (self.as_nalgebra() * scale).into()
    }
}

/// Circular landmark (disk) in the plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Landmark {
    center: PlanarVector,
    diameter: f64,
}

impl Landmark {
    /// Creates a landmark, rejecting non-positive or non-finite diameters.
    pub fn new(center: PlanarVector, diameter: f64) -> Result<Self, HomingError> {
        if !(diameter.is_finite() && diameter > 0.0) {
            return Err(HomingError::InvalidDiameter { diameter });
        }
        Ok(Self { center, diameter })
    }

    #[inline]
    pub fn center(&self) -> PlanarVector {
        self.center
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Whether `point` lies strictly inside the landmark's disk.
    #[inline]
    pub fn contains(&self, point: PlanarVector) -> bool {
        (self.center - point).magnitude() < self.radius()
    }
}
