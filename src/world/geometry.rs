//! Mesh geometry: polygons and polygon objects
//!
//! Polygons keep their vertex loop in boundary order and cache a unit normal.
//! Transforms mutate in place; only rotation invalidates the normal.

use crate::rasterizer::{Color, Point3};

/// Error type for polygon construction
#[derive(Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer than three vertices cannot form a polygon
    TooFewVertices(usize),
    /// Every consecutive vertex triple is collinear
    DegeneratePolygon,
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::TooFewVertices(n) => {
                write!(f, "polygon needs at least 3 vertices, got {}", n)
            }
            GeometryError::DegeneratePolygon => {
                write!(f, "degenerate polygon: no vertex triple yields a normal")
            }
        }
    }
}

/// A planar polygon in 3D space
#[derive(Debug, Clone)]
pub struct Polygon3 {
    /// Vertex loop in boundary-traversal order
    pub points: Vec<Point3>,
    pub color: Color,
    normal: Point3,
}

impl Polygon3 {
    /// Build a polygon and compute its cached unit normal.
    ///
    /// Vertex order is significant: it fixes the boundary orientation and
    /// with it the normal's sign.
    pub fn new(points: Vec<Point3>, color: Color) -> Result<Self, GeometryError> {
        let normal = Self::compute_normal(&points)?;
        Ok(Self { points, color, normal })
    }

    /// Cached unit-length normal
    pub fn normal(&self) -> Point3 {
        self.normal
    }

    /// Scan consecutive vertex triples from index 1 and normalize the first
    /// nonzero cross product. The search is bounded: a loop where every
    /// triple is collinear is rejected rather than scanned forever.
    fn compute_normal(points: &[Point3]) -> Result<Point3, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewVertices(points.len()));
        }
        for i in 1..points.len() - 1 {
            let v1 = points[i + 1] - points[i];
            let v2 = points[i - 1] - points[i];
            let n = v1.cross(v2);
            if n.norm() != 0.0 {
                return Ok(n * (1.0 / n.norm()));
            }
        }
        Err(GeometryError::DegeneratePolygon)
    }

    /// Rigid shift; the normal is unchanged
    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for point in &mut self.points {
            point.translate(x, y, z);
        }
    }

    /// Rotate every vertex about the given axis, then refresh the normal.
    pub fn rotate(&mut self, center: Point3, direction: Point3, angle: f64) {
        for point in &mut self.points {
            point.rotate(center, direction, angle);
        }
        // A rigid motion cannot make an established loop degenerate.
        if let Ok(normal) = Self::compute_normal(&self.points) {
            self.normal = normal;
        }
    }

    /// Arithmetic mean of the vertices, used for depth sorting
    pub fn center(&self) -> Point3 {
        let mut sx = 0.0;
        let mut sy = 0.0;
        let mut sz = 0.0;
        let n = self.points.len() as f64;
        for point in &self.points {
            sx += point.x;
            sy += point.y;
            sz += point.z;
        }
        Point3::new(sx / n, sy / n, sz / n)
    }

    /// Planar shoelace area
    pub fn area(&self) -> f64 {
        let origin = self.points[0];
        let mut sum = Point3::ORIGIN;
        for i in 1..self.points.len() - 1 {
            sum = sum + (self.points[i] - origin).cross(self.points[i + 1] - origin);
        }
        sum.norm() * 0.5
    }
}

/// A mesh: a collection of polygons plus a reference center point.
///
/// The center is caller-supplied (not necessarily the centroid) and follows
/// the mesh through every transform so it stays a valid pose anchor.
#[derive(Debug, Clone)]
pub struct Object {
    pub polygons: Vec<Polygon3>,
    pub center: Point3,
}

impl Object {
    pub fn new(polygons: Vec<Polygon3>, center: Point3) -> Self {
        Self { polygons, center }
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        for polygon in &mut self.polygons {
            polygon.translate(x, y, z);
        }
        self.center.translate(x, y, z);
    }

    pub fn rotate(&mut self, center: Point3, direction: Point3, angle: f64) {
        for polygon in &mut self.polygons {
            polygon.rotate(center, direction, angle);
        }
        self.center.rotate(center, direction, angle);
    }
}

/// Build an axis-aligned cube of six quad faces around `center`.
pub fn create_cube(size: f64, center: Point3, facecolor: Color) -> Result<Object, GeometryError> {
    let (xc, yc, zc) = (center.x, center.y, center.z);
    let half = size / 2.0;
    let p1 = Point3::new(xc + half, yc + half, zc + half);
    let p2 = Point3::new(xc - half, yc + half, zc + half);
    let p3 = Point3::new(xc - half, yc - half, zc + half);
    let p4 = Point3::new(xc + half, yc - half, zc + half);
    let p5 = Point3::new(xc + half, yc + half, zc - half);
    let p6 = Point3::new(xc - half, yc + half, zc - half);
    let p7 = Point3::new(xc - half, yc - half, zc - half);
    let p8 = Point3::new(xc + half, yc - half, zc - half);

    let faces = [
        vec![p1, p2, p3, p4],
        vec![p5, p6, p2, p1],
        vec![p6, p7, p3, p2],
        vec![p7, p8, p4, p3],
        vec![p8, p5, p1, p4],
        vec![p8, p7, p6, p5],
    ];

    let mut polygons = Vec::with_capacity(faces.len());
    for face in faces {
        polygons.push(Polygon3::new(face, facecolor)?);
    }
    Ok(Object::new(polygons, center))
}
