// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use super::math::{Bounds, Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// `0xRRGGBB`.
    pub fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        )
    }

    pub fn scale(self, k: f32) -> Color {
        Color::rgb(self.r * k, self.g * k, self.b * k)
    }

    pub fn modulate(self, light: Color) -> Color {
        Color::rgb(self.r * light.r, self.g * light.g, self.b * light.b)
    }

    pub fn add(self, other: Color) -> Color {
        Color::rgb(self.r + other.r, self.g + other.g, self.b + other.b)
    }

    pub fn clamped(self) -> Color {
        Color::rgb(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub emissive: Color,
}

impl Material {
    pub fn new(color: u32, emissive: u32) -> Self {
        Self {
            color: Color::from_hex(color),
            emissive: Color::from_hex(emissive),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0xcccccc, 0x000000)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Counter-clockwise when seen from the front.
    pub indices: [u32; 3],
    pub material: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub triangles: Vec<Triangle>,
    pub materials: Vec<Material>,
}

fn mul_elem(a: Vec3, b: Vec3) -> Vec3 {
    Vec3::new(a.x * b.x, a.y * b.y, a.z * b.z)
}

impl Mesh {
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.positions)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    fn push_vertex(&mut self, transform: &Mat4, p: Vec3) -> u32 {
        self.positions.push(transform.transform_point(p));
        (self.positions.len() - 1) as u32
    }

    fn push_quad(&mut self, corners: [u32; 4], material: usize) {
        let [a, b, c, d] = corners;
        self.triangles.push(Triangle {
            indices: [a, b, c],
            material,
        });
        self.triangles.push(Triangle {
            indices: [a, c, d],
            material,
        });
    }

    /// Axis-aligned box of `size` centred on the origin, then moved by `transform`.
    pub fn push_box(&mut self, size: Vec3, transform: Mat4, material: usize) {
        let half = size * 0.5;
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::Y;
        let z = Vec3::new(0.0, 0.0, 1.0);
        // (normal, u, v) with u x v = normal
        let faces = [
            (x, y, z),
            (-x, z, y),
            (y, z, x),
            (-y, x, z),
            (z, x, y),
            (-z, y, x),
        ];

        for (n, u, v) in faces {
            let center = mul_elem(n, half);
            let u = mul_elem(u, half);
            let v = mul_elem(v, half);
            let corners = [
                self.push_vertex(&transform, center - u - v),
                self.push_vertex(&transform, center + u - v),
                self.push_vertex(&transform, center + u + v),
                self.push_vertex(&transform, center - u + v),
            ];
            self.push_quad(corners, material);
        }
    }

    /// Capped, possibly tapered cylinder along Y, centred on the origin.
    pub fn push_cylinder(
        &mut self,
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        segments: u32,
        transform: Mat4,
        material: usize,
    ) {
        let segments = segments.max(3);
        let half = height * 0.5;

        let ring = |radius: f32, y: f32, i: u32| {
            let theta = i as f32 / segments as f32 * TAU;
            Vec3::new(radius * theta.sin(), y, radius * theta.cos())
        };

        let top: Vec<u32> = (0..segments)
            .map(|i| self.push_vertex(&transform, ring(radius_top, half, i)))
            .collect();
        let bottom: Vec<u32> = (0..segments)
            .map(|i| self.push_vertex(&transform, ring(radius_bottom, -half, i)))
            .collect();
        let top_center = self.push_vertex(&transform, Vec3::new(0.0, half, 0.0));
        let bottom_center = self.push_vertex(&transform, Vec3::new(0.0, -half, 0.0));

        for i in 0..segments as usize {
            let j = (i + 1) % segments as usize;
            self.push_quad([top[i], bottom[i], bottom[j], top[j]], material);
            self.triangles.push(Triangle {
                indices: [top_center, top[i], top[j]],
                material,
            });
            self.triangles.push(Triangle {
                indices: [bottom_center, bottom[j], bottom[i]],
                material,
            });
        }
    }

    /// Keeps every n-th triangle so at most `budget` remain.
    pub fn decimate(&mut self, budget: usize) {
        if budget == 0 || self.triangles.len() <= budget {
            return;
        }
        let stride = self.triangles.len().div_ceil(budget);
        let kept: Vec<Triangle> = self.triangles.iter().step_by(stride).copied().collect();
        log::debug!(
            "Decimated mesh — triangles={} kept={} stride={}",
            self.triangles.len(),
            kept.len(),
            stride
        );
        self.triangles = kept;
    }
}

/// Stand-in airliner shown until the detailed model is available.
pub fn placeholder_airliner() -> Mesh {
    let mut mesh = Mesh::default();
    let body = mesh.add_material(Material::new(0x4a90e2, 0x112244));
    let tail = mesh.add_material(Material::new(0xdc143c, 0x8b0000));

    // Fuselage laid along X.
    mesh.push_cylinder(0.5, 0.8, 6.0, 32, Mat4::rotation_z(FRAC_PI_2), body);
    // Wings
    mesh.push_box(Vec3::new(8.0, 0.2, 2.0), Mat4::IDENTITY, body);
    // Fin
    mesh.push_box(
        Vec3::new(0.3, 2.0, 0.8),
        Mat4::translation(Vec3::new(-1.8, 0.7, 0.0)),
        tail,
    );
    // Stabiliser
    mesh.push_box(
        Vec3::new(1.5, 0.1, 0.3),
        Mat4::translation(Vec3::new(-1.8, 0.5, 0.0)),
        tail,
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &Mesh, t: &Triangle) -> Vec3 {
        let [a, b, c] = t.indices.map(|i| mesh.positions[i as usize]);
        (b - a).cross(c - a)
    }

    #[test]
    fn test_box_faces_point_outwards() {
        let mut mesh = Mesh::default();
        mesh.push_box(Vec3::new(2.0, 4.0, 6.0), Mat4::IDENTITY, 0);
        assert_eq!(mesh.triangle_count(), 12);

        for t in &mesh.triangles {
            let [a, b, c] = t.indices.map(|i| mesh.positions[i as usize]);
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(face_normal(&mesh, t).dot(centroid) > 0.0);
        }

        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.size(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_cylinder_faces_point_outwards() {
        let mut mesh = Mesh::default();
        mesh.push_cylinder(0.5, 0.8, 6.0, 16, Mat4::IDENTITY, 0);
        assert_eq!(mesh.triangle_count(), 16 * 4);

        for t in &mesh.triangles {
            let [a, b, c] = t.indices.map(|i| mesh.positions[i as usize]);
            let centroid = (a + b + c) * (1.0 / 3.0);
            assert!(face_normal(&mesh, t).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_placeholder_dimensions() {
        let mesh = placeholder_airliner();
        assert_eq!(mesh.materials.len(), 2);
        let size = mesh.bounds().unwrap().size();
        // Wings span 8 along X; the fin reaches 1.7 above the origin.
        assert!((size.x - 8.0).abs() < 1e-4);
        assert!((mesh.bounds().unwrap().max.y - 1.7).abs() < 1e-4);
    }

    #[test]
    fn test_decimate() {
        let mut mesh = placeholder_airliner();
        let before = mesh.triangle_count();
        mesh.decimate(10);
        assert!(mesh.triangle_count() <= 10);
        assert!(mesh.triangle_count() > 0);

        let mut untouched = placeholder_airliner();
        untouched.decimate(before);
        assert_eq!(untouched.triangle_count(), before);
    }

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }
}
