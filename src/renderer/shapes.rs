//! Tessellation of scene shapes into triangles

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::scene::{Color, Scene, Shape};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

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

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(center: Vec2, width: f32, height: f32, color: Color) -> Vec<Vertex> {
    let half = Vec2::new(width, height) / 2.0;
    let min = center - half;
    let max = center + half;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

/// Triangles for every filled shape in the scene, in draw order
///
/// Text is left to the host's text overlay.
pub fn scene_vertices(scene: &Scene, circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for (pos, shape) in scene.flatten() {
        match shape {
            Shape::Circle { radius, color } => {
                vertices.extend(circle(pos, *radius, *color, circle_segments));
            }
            Shape::Rect {
                width,
                height,
                color,
            } => vertices.extend(rect(pos, *width, *height, *color)),
            Shape::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Palette, render};
    use crate::sim::GameState;

    #[test]
    fn test_circle_vertices_on_radius() {
        let center = Vec2::new(10.0, -5.0);
        let verts = circle(center, 7.5, [1.0; 4], 16);
        assert_eq!(verts.len(), 48);
        for tri in verts.chunks(3) {
            assert_eq!(tri[0].position, [10.0, -5.0]);
            let edge = Vec2::from(tri[1].position) - center;
            assert!((edge.length() - 7.5).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rect_bounds() {
        let verts = rect(Vec2::new(-280.0, 0.0), 10.0, 40.0, [1.0; 4]);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -285.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), -275.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 20.0);
    }

    #[test]
    fn test_scene_vertices_skip_text() {
        let scene = render(&GameState::new(), &Palette::classic());
        let verts = scene_vertices(&scene, 12);
        // Field + two paddles as quads, ball as a fan
        assert_eq!(verts.len(), 3 * 6 + 12 * 3);
        assert_eq!(verts[0].color, Palette::classic().field);
    }
}
