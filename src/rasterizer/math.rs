//! Vector math for 3D rendering
//!
//! `Point3` doubles as point and direction vector. Its magnitude is cached
//! and refreshed by every mutating operation, so `norm()` never recomputes.

use std::ops::{Add, Sub, Mul};

/// 3D point/vector with cached magnitude
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    norm: f64,
}

impl Point3 {
    pub const ORIGIN: Point3 = Point3 { x: 0.0, y: 0.0, z: 0.0, norm: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let mut p = Self { x, y, z, norm: 0.0 };
        p.update_norm();
        p
    }

    /// Cached magnitude, consistent with the current coordinates
    pub fn norm(&self) -> f64 {
        self.norm
    }

    fn update_norm(&mut self) {
        self.norm = (self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.x += x;
        self.y += y;
        self.z += z;
        self.update_norm();
    }

    /// Rotate about the line through `center` along `direction`, by `angle`
    /// radians, using Rodrigues' rotation formula.
    ///
    /// `direction` must have nonzero length; the axis is normalized here and
    /// a zero direction divides by zero.
    pub fn rotate(&mut self, center: Point3, direction: Point3, angle: f64) {
        let x = self.x - center.x;
        let y = self.y - center.y;
        let z = self.z - center.z;
        let dnorm = direction.norm();
        let e1 = direction.x / dnorm;
        let e2 = direction.y / dnorm;
        let e3 = direction.z / dnorm;
        let c = angle.cos();
        let s = angle.sin();
        let d = (1.0 - c) * (e1 * x + e2 * y + e3 * z);
        self.x = c * x + s * (e2 * z - e3 * y) + d * e1 + center.x;
        self.y = c * y + s * (e3 * x - e1 * z) + d * e2 + center.y;
        self.z = c * z + s * (e1 * y - e2 * x) + d * e3 + center.z;
        self.update_norm();
    }

    pub fn dot(self, other: Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(self, s: f64) -> Point3 {
        Point3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Add for Point3 {
    type Output = Point3;
    fn add(self, other: Point3) -> Point3 {
        Point3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point3 {
    type Output = Point3;
    fn sub(self, other: Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Point3 {
    type Output = Point3;
    fn mul(self, s: f64) -> Point3 {
        self.scale(s)
    }
}

/// 2D point on the image plane
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
