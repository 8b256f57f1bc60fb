// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

//! Decorative airliner scene behind the prediction form.
//!
//! A [`Scene`] starts with the placeholder airliner, hidden. The host
//! reveals it after a delay, may swap in a detailed GLB model later, and
//! calls [`Background::frame`] once per redraw.

pub mod glb;
pub mod math;
pub mod mesh;
pub mod render;

use glb::GlbAsset;
use log::{debug, info};
use math::Vec3;
use mesh::{Color, Mesh};
use render::Camera;
use std::time::{Duration, Instant};

/// Rotation added to the model on every frame, in radians.
pub const SPIN_PER_FRAME: f32 = 0.005;
pub const ASSET_INITIAL_SCALE: f32 = 0.003;
/// Scaled assets larger than this are shrunk to [`ASSET_FIT_SIZE`].
pub const ASSET_MAX_SIZE: f32 = 10.0;
pub const ASSET_FIT_SIZE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: Color,
    pub ambient_intensity: f32,
    pub directional: Color,
    pub directional_intensity: f32,
    /// The directional light shines from here towards the origin.
    pub directional_position: Vec3,
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            ambient: Color::WHITE,
            ambient_intensity: 0.6,
            directional: Color::WHITE,
            directional_intensity: 0.8,
            directional_position: Vec3::new(5.0, 5.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Placeholder,
    Asset,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub kind: ModelKind,
    pub mesh: Mesh,
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub radius: f32,
    /// Z of the orbit centre.
    pub depth: f32,
}

impl Default for Orbit {
    fn default() -> Self {
        Self {
            radius: 3.0,
            depth: 0.0,
        }
    }
}

/// Recentres the asset on the origin and picks its display scale.
pub fn normalize_asset(mut mesh: Mesh) -> (Mesh, f32) {
    let Some(bounds) = mesh.bounds() else {
        return (mesh, ASSET_INITIAL_SCALE);
    };

    let center = bounds.center();
    for p in &mut mesh.positions {
        *p = *p - center;
    }

    let mut scale = ASSET_INITIAL_SCALE;
    let largest = (bounds.size() * scale).max_element();
    if largest > ASSET_MAX_SIZE {
        scale *= ASSET_FIT_SIZE / largest;
        debug!("Asset rescaled — largest={:.2} scale={}", largest, scale);
    }
    (mesh, scale)
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub lights: Lights,
    pub camera: Camera,
    pub orbit: Orbit,
    model: Model,
    revealed: bool,
}

impl Scene {
    pub fn new(orbit: Orbit) -> Self {
        let scene = Self {
            lights: Lights::default(),
            camera: Camera::default(),
            orbit,
            model: Model {
                kind: ModelKind::Placeholder,
                mesh: mesh::placeholder_airliner(),
                position: Vec3::ZERO,
                rotation_y: 0.0,
                scale: 1.0,
                visible: false,
            },
            revealed: false,
        };
        debug!(
            "Scene ready with placeholder — triangles={}",
            scene.model.mesh.triangle_count()
        );
        scene
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Makes the surface and the current model visible.
    pub fn reveal(&mut self) {
        self.revealed = true;
        self.model.visible = true;
        info!("Background revealed ({:?} model)", self.model.kind);
    }

    /// Replaces the current model with a loaded asset. The asset is only
    /// visible straight away if the surface was already revealed.
    pub fn install_asset(&mut self, asset: GlbAsset) {
        let (mesh, scale) = normalize_asset(asset.mesh);
        info!(
            "Detailed model installed — triangles={} scale={}",
            mesh.triangle_count(),
            scale
        );
        self.model = Model {
            kind: ModelKind::Asset,
            mesh,
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale,
            visible: self.revealed,
        };
    }

    /// One frame of motion. `elapsed` drives the orbit, the spin is per call.
    pub fn tick(&mut self, elapsed: Duration) {
        let t = elapsed.as_secs_f32();
        self.model.rotation_y += SPIN_PER_FRAME;
        self.model.position.x = t.sin() * self.orbit.radius;
        self.model.position.z = t.cos() * self.orbit.radius + self.orbit.depth;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
        debug!("Surface resized — {}x{}", width, height);
    }
}

/// Something that can cancel a pending background job.
pub trait Abort: Send {
    fn abort(&self);
}

/// Lifecycle around a [`Scene`]: frame loop, render surface, pending asset load.
pub struct Background {
    scene: Scene,
    started: Instant,
    running: bool,
    attached: bool,
    pending_asset: Option<Box<dyn Abort>>,
}

impl Background {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            started: Instant::now(),
            running: true,
            attached: true,
            pending_asset: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn set_pending_asset(&mut self, handle: Box<dyn Abort>) {
        self.pending_asset = Some(handle);
    }

    /// Called when the asset job finished, whatever the outcome.
    pub fn clear_pending_asset(&mut self) {
        self.pending_asset = None;
    }

    pub fn has_pending_asset(&self) -> bool {
        self.pending_asset.is_some()
    }

    /// Advances the scene to `now`. Returns false once torn down.
    pub fn frame(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        self.scene.tick(now.saturating_duration_since(self.started));
        true
    }

    /// Stops the frame loop, cancels the asset job and detaches the surface.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.pending_asset.take() {
            handle.abort();
            debug!("Pending asset load aborted");
        }
        self.running = false;
        self.attached = false;
        info!("Background torn down");
    }
}
