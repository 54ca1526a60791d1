//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::ArcSector;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        quad(
            &mut vertices,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * inner_radius,
            center + dir2 * outer_radius,
            color,
        );
    }

    vertices
}

/// Generate vertices for a straight line of the given width
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let Some(dir) = (to - from).try_normalize() else {
        return Vec::new();
    };
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        from + perp,
        from - perp,
        to + perp,
        to - perp,
        color,
    );
    vertices
}

/// Generate vertices for a filled pie-slice sector around `origin`
pub fn sector(origin: Vec2, arc: &ArcSector, color: [f32; 4], segments_per_radian: f32) -> Vec<Vertex> {
    let edge = arc.sample_edge(origin, edge_points(arc, segments_per_radian));
    let mut vertices = Vec::with_capacity(edge.len() * 3);

    for pair in edge.windows(2) {
        vertices.push(Vertex::new(origin.x, origin.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Generate vertices for a sector outline (curved edge plus both sides)
pub fn sector_outline(
    origin: Vec2,
    arc: &ArcSector,
    width: f32,
    color: [f32; 4],
    segments_per_radian: f32,
) -> Vec<Vertex> {
    let edge = arc.sample_edge(origin, edge_points(arc, segments_per_radian));
    let mut vertices = Vec::with_capacity(edge.len() * 6 + 12);

    for pair in edge.windows(2) {
        vertices.extend(line(pair[0], pair[1], width, color));
    }
    if let (Some(first), Some(last)) = (edge.first(), edge.last()) {
        vertices.extend(line(origin, *first, width, color));
        vertices.extend(line(origin, *last, width, color));
    }

    vertices
}

fn edge_points(arc: &ArcSector, segments_per_radian: f32) -> usize {
    let span = arc.half_width * 2.0;
    ((span * segments_per_radian) as usize).max(4) + 1
}

/// Two triangles covering a quad (a1, a2 on one side, b1, b2 on the other)
fn quad(vertices: &mut Vec<Vertex>, a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2, color: [f32; 4]) {
    vertices.push(Vertex::new(a1.x, a1.y, color));
    vertices.push(Vertex::new(a2.x, a2.y, color));
    vertices.push(Vertex::new(b1.x, b1.y, color));

    vertices.push(Vertex::new(b1.x, b1.y, color));
    vertices.push(Vertex::new(a2.x, a2.y, color));
    vertices.push(Vertex::new(b2.x, b2.y, color));
}
