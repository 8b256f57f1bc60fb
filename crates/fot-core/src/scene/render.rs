// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

//! Software projection of the scene for 2D canvases.

use super::math::{Mat4, Vec3};
use super::mesh::Color;
use super::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y_deg: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 12.0),
            target: Vec3::ZERO,
        }
    }
}

/// A point on the drawing surface, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

impl Camera {
    /// Recomputes the aspect ratio. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Camera space: x right, y up, z distance in front of the camera.
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        let (right, up, forward) = self.basis();
        let d = p - self.position;
        Vec3::new(d.dot(right), d.dot(up), d.dot(forward))
    }

    /// `None` when `p` falls outside the near/far range.
    pub fn project(&self, p: Vec3, width: f32, height: f32) -> Option<ScreenPoint> {
        let v = self.to_view(p);
        if v.z < self.near || v.z > self.far {
            return None;
        }
        let f = 1.0 / (self.fov_y_deg.to_radians() * 0.5).tan();
        let ndc_x = v.x * f / (self.aspect * v.z);
        let ndc_y = v.y * f / v.z;
        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * width,
            y: (1.0 - ndc_y) * 0.5 * height,
            depth: v.z,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    pub points: [ScreenPoint; 3],
    pub color: Color,
}

impl ScreenTriangle {
    pub fn depth(&self) -> f32 {
        (self.points[0].depth + self.points[1].depth + self.points[2].depth) / 3.0
    }
}

/// Shaded, back-face culled triangles of the current model, far to near.
/// Invisible models produce nothing.
pub fn render(scene: &Scene, width: f32, height: f32) -> Vec<ScreenTriangle> {
    let model = scene.model();
    if !model.visible || width <= 0.0 || height <= 0.0 {
        return Vec::new();
    }

    let camera = &scene.camera;
    let world = Mat4::translation(model.position)
        * Mat4::rotation_y(model.rotation_y)
        * Mat4::scale(Vec3::splat(model.scale));
    let positions: Vec<Vec3> = model
        .mesh
        .positions
        .iter()
        .map(|p| world.transform_point(*p))
        .collect();
    let to_light = scene.lights.directional_position.normalize();

    let mut out: Vec<ScreenTriangle> = model
        .mesh
        .triangles
        .iter()
        .filter_map(|t| {
            let [a, b, c] = t.indices.map(|i| positions[i as usize]);
            let normal = (b - a).cross(c - a).normalize();
            if normal.dot(camera.position - a) <= 0.0 {
                return None;
            }

            let points = [
                camera.project(a, width, height)?,
                camera.project(b, width, height)?,
                camera.project(c, width, height)?,
            ];

            let material = model.mesh.materials.get(t.material).copied().unwrap_or_default();
            let lambert = normal.dot(to_light).max(0.0);
            let light = scene
                .lights
                .ambient
                .scale(scene.lights.ambient_intensity)
                .add(
                    scene
                        .lights
                        .directional
                        .scale(scene.lights.directional_intensity * lambert),
                );
            let color = material.color.modulate(light).add(material.emissive).clamped();

            Some(ScreenTriangle { points, color })
        })
        .collect();

    out.sort_by(|x, y| y.depth().total_cmp(&x.depth()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_projects_to_centre() {
        let camera = Camera::default();
        let p = camera.project(Vec3::ZERO, 800.0, 600.0).unwrap();
        assert!((p.x - 400.0).abs() < 1e-3);
        assert!((p.y - 300.0).abs() < 1e-3);
        assert!((p.depth - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_up_is_up_on_screen() {
        let camera = Camera::default();
        let p = camera.project(Vec3::new(1.0, 1.0, 0.0), 800.0, 600.0).unwrap();
        assert!(p.x > 400.0);
        assert!(p.y < 300.0);
    }

    #[test]
    fn test_behind_camera_is_clipped() {
        let camera = Camera::default();
        assert!(camera.project(Vec3::new(0.0, 0.0, 13.0), 800.0, 600.0).is_none());
        assert!(camera.project(Vec3::new(0.0, 0.0, 11.95), 800.0, 600.0).is_none());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::default();
        camera.resize(1000.0, 500.0);
        assert_eq!(camera.aspect, 2.0);
        camera.resize(0.0, 500.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
