//! Shape generation for 2D primitives
//!
//! Builders append triangles to a shared vertex list; one draw call renders
//! the whole frame.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Filled circle as a triangle fan
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    out.reserve((segments * 3) as usize);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

/// Hollow circle band between two radii
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) {
    out.reserve((segments * 6) as usize);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        let inner1 = center + Vec2::new(theta1.cos(), theta1.sin()) * inner_radius;
        let outer1 = center + Vec2::new(theta1.cos(), theta1.sin()) * outer_radius;
        let inner2 = center + Vec2::new(theta2.cos(), theta2.sin()) * inner_radius;
        let outer2 = center + Vec2::new(theta2.cos(), theta2.sin()) * outer_radius;

        out.push(Vertex::new(inner1.x, inner1.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(inner2.x, inner2.y, color));

        out.push(Vertex::new(inner2.x, inner2.y, color));
        out.push(Vertex::new(outer1.x, outer1.y, color));
        out.push(Vertex::new(outer2.x, outer2.y, color));
    }
}

/// Axis-aligned filled rectangle
pub fn rect(out: &mut Vec<Vertex>, min: Vec2, size: Vec2, color: [f32; 4]) {
    let max = min + size;
    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));

    out.push(Vertex::new(min.x, min.y, color));
    out.push(Vertex::new(max.x, max.y, color));
    out.push(Vertex::new(min.x, max.y, color));
}

/// Rectangle border of the given thickness, drawn inside the bounds
pub fn rect_outline(
    out: &mut Vec<Vertex>,
    min: Vec2,
    size: Vec2,
    thickness: f32,
    color: [f32; 4],
) {
    let t = thickness.min(size.x / 2.0).min(size.y / 2.0);
    // Top, bottom, left, right strips
    rect(out, min, Vec2::new(size.x, t), color);
    rect(out, Vec2::new(min.x, min.y + size.y - t), Vec2::new(size.x, t), color);
    rect(out, Vec2::new(min.x, min.y + t), Vec2::new(t, size.y - 2.0 * t), color);
    rect(
        out,
        Vec2::new(min.x + size.x - t, min.y + t),
        Vec2::new(t, size.y - 2.0 * t),
        color,
    );
}

/// Line segment as a quad of the given width
pub fn line(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, width: f32, color: [f32; 4]) {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let v1 = a + perp;
    let v2 = a - perp;
    let v3 = b + perp;
    let v4 = b - perp;

    out.push(Vertex::new(v1.x, v1.y, color));
    out.push(Vertex::new(v2.x, v2.y, color));
    out.push(Vertex::new(v3.x, v3.y, color));

    out.push(Vertex::new(v3.x, v3.y, color));
    out.push(Vertex::new(v2.x, v2.y, color));
    out.push(Vertex::new(v4.x, v4.y, color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let mut out = Vec::new();
        circle(&mut out, Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 16);
        assert_eq!(out.len(), 16 * 3);
    }

    #[test]
    fn test_rect_corners() {
        let mut out = Vec::new();
        rect(&mut out, Vec2::new(2.0, 3.0), Vec2::new(4.0, 5.0), [1.0; 4]);
        assert_eq!(out.len(), 6);
        let xs: Vec<f32> = out.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = out.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 6.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 3.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 8.0);
    }

    #[test]
    fn test_ring_stays_between_radii() {
        let mut out = Vec::new();
        let center = Vec2::new(100.0, 100.0);
        ring(&mut out, center, 8.0, 12.0, [1.0; 4], 24);
        for v in &out {
            let d = Vec2::new(v.position[0], v.position[1]).distance(center);
            assert!(d >= 8.0 - 1e-3 && d <= 12.0 + 1e-3);
        }
    }
}
