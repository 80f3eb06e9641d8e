//! Core rendering functions
//!
//! Projection, back-to-front visibility ordering and scanline polygon
//! filling. Polygons are drawn in depth order instead of using a Z-buffer.

use std::collections::BTreeSet;

use super::math::{Point2, Point3};
use super::types::{Canvas, Color};
use crate::config::RenderConfig;
use crate::world::{Object, Polygon3};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    pub width: usize,
    pub height: usize,
    draw_color: Color,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
            draw_color: Color::WHITE,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Read a pixel back
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = (y * self.width + x) * 4;
        Color {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }
}

impl Canvas for Framebuffer {
    fn set_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn draw_pixel(&mut self, x: i32, y: i32) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 4;
            let bytes = self.draw_color.to_bytes();
            self.pixels[idx..idx + 4].copy_from_slice(&bytes);
        }
    }
}

/// Draw a line in the current color using Bresenham's algorithm
pub fn draw_line(canvas: &mut dyn Canvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.draw_pixel(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Painter's-algorithm ordering: the polygon whose center lies farthest from
/// the coordinate origin comes first, so nearer polygons paint over farther
/// ones. Distance is measured from the origin, not the camera; this is a
/// known approximation of true occlusion order. The sort is stable, so
/// equal-distance polygons keep their insertion order.
pub fn depth_sorted(polygons: &[Polygon3]) -> Vec<&Polygon3> {
    let mut ordered: Vec<&Polygon3> = polygons.iter().collect();
    ordered.sort_by(|a, b| b.center().norm().partial_cmp(&a.center().norm()).unwrap());
    ordered
}

/// Flat shading: map the angle between a unit normal and the light
/// direction to an 8-bit intensity
pub fn shade_intensity(normal: Point3, lighting: Point3) -> u8 {
    let n = -normal.dot(lighting);
    (255.0 * (n * 0.4 + 0.6)).clamp(0.0, 255.0) as u8
}

/// An edge of a projected polygon in pixel space, low-y endpoint first
struct Edge {
    x_low: i32,
    y_low: i32,
    x_high: i32,
    y_high: i32,
}

fn interpolate_x(edge: &Edge, y: i32) -> i32 {
    (edge.x_low as f64
        + (y - edge.y_low) as f64 * (edge.x_high - edge.x_low) as f64
            / (edge.y_high - edge.y_low) as f64) as i32
}

/// Orchestrates projection, visibility ordering and scanline filling.
///
/// Holds only immutable configuration, so one instance renders any number
/// of frames against a mutating scene.
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Perspective projection onto the near plane.
    ///
    /// The point must lie in the camera's forward half-space (z > 0); scene
    /// setup guarantees it, the projector does not check.
    pub fn project_point(&self, p: Point3) -> Point2 {
        Point2::new(
            p.x / p.z * self.config.near_plane,
            p.y / p.z * self.config.near_plane,
        )
    }

    pub fn project_polygon(&self, polygon: &Polygon3) -> Vec<Point2> {
        polygon.points.iter().map(|p| self.project_point(*p)).collect()
    }

    /// Image-plane coordinates to pixel coordinates. Both axes are centered
    /// with the screen-height term, matching the reference camera framing.
    fn to_pixel(&self, p: Point2) -> (i32, i32) {
        let scale = self.config.scale as f64;
        let offset = self.config.screen_height * scale / 2.0;
        ((p.x * scale + offset) as i32, (p.y * scale + offset) as i32)
    }

    /// Scanline fill of a projected polygon.
    ///
    /// Per row, the x-crossings of all active edges are collected into an
    /// ordered set: crossings that land on the same integer column collapse
    /// into one entry, which is what keeps shared vertices from being
    /// counted twice. An odd crossing count (a tangent vertex) paints the
    /// rightmost crossing as a single pixel. The remaining crossings pair
    /// into half-open spans, clamped to the image.
    pub fn fill_polygon(&self, canvas: &mut dyn Canvas, polygon: &[Point2], color: Color) {
        canvas.set_color(color);

        let n = polygon.len();
        let mut sides = Vec::with_capacity(n);
        let mut ymax = i32::MIN;
        for i in 0..n {
            let j = if i == 0 { n - 1 } else { i - 1 };
            let (x1, y1) = self.to_pixel(polygon[i]);
            let (x2, y2) = self.to_pixel(polygon[j]);
            ymax = ymax.max(y1);
            if y1 < y2 {
                sides.push(Edge { x_low: x1, y_low: y1, x_high: x2, y_high: y2 });
            } else {
                sides.push(Edge { x_low: x2, y_low: y2, x_high: x1, y_high: y1 });
            }
        }
        let ymax = ymax.min(self.config.image_height);

        // Rows above the polygon are visited too; they cross no edges.
        for y in 0..ymax {
            let mut crossings = BTreeSet::new();
            for side in &sides {
                if side.y_low <= y && y < side.y_high {
                    if side.y_low != side.y_high {
                        crossings.insert(interpolate_x(side, y));
                    } else {
                        crossings.insert(side.x_low);
                        crossings.insert(side.x_high);
                    }
                }
            }

            let mut crossings: Vec<i32> = crossings.into_iter().collect();
            if crossings.len() % 2 == 1 {
                if let Some(x) = crossings.pop() {
                    canvas.draw_pixel(x, y);
                }
            }
            for pair in crossings.chunks_exact(2) {
                let x1 = pair[0].max(0);
                let x2 = pair[1].min(self.config.image_width);
                for x in x1..x2 {
                    canvas.draw_pixel(x, y);
                }
            }
        }
    }

    /// Draw one frame of an object: order polygons back to front, project
    /// each, shade flat from its normal and fill.
    pub fn render(&self, canvas: &mut dyn Canvas, object: &Object, lighting: Point3) {
        for polygon in depth_sorted(&object.polygons) {
            let projected = self.project_polygon(polygon);
            let intensity = shade_intensity(polygon.normal(), lighting);
            self.fill_polygon(canvas, &projected, Color::greyscale(intensity));
        }
    }

    /// Draw only the projected polygon boundaries, in each polygon's color
    pub fn render_wireframe(&self, canvas: &mut dyn Canvas, object: &Object) {
        for polygon in &object.polygons {
            canvas.set_color(polygon.color);
            let projected = self.project_polygon(polygon);
            for i in 0..projected.len() {
                let j = if i == 0 { projected.len() - 1 } else { i - 1 };
                let (x0, y0) = self.to_pixel(projected[j]);
                let (x1, y1) = self.to_pixel(projected[i]);
                draw_line(canvas, x0, y0, x1, y1);
            }
        }
    }
}
