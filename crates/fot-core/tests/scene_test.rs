// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

use fot_core::scene::glb::{load_glb, write_glb, GlbError};
use fot_core::scene::render::render;
use fot_core::scene::{Abort, Background, ModelKind, Orbit, Scene, ASSET_FIT_SIZE};
use simplelog::{Config, LevelFilter, TestLogger};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

struct FlagAbort(Arc<AtomicBool>);

impl Abort for FlagAbort {
    fn abort(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

/// A cube with edge length `size`, offset 1000 units along X like a CAD export.
fn cube_glb(size: f32) -> Vec<u8> {
    let h = size / 2.0;
    let corners: Vec<[f32; 3]> = (0..8)
        .map(|i| {
            [
                if i & 1 == 0 { -h } else { h } + 1000.0,
                if i & 2 == 0 { -h } else { h },
                if i & 4 == 0 { -h } else { h },
            ]
        })
        .collect();
    let indices: [u16; 36] = [
        0, 2, 1, 1, 2, 3, 4, 5, 6, 5, 7, 6, 0, 1, 4, 1, 5, 4, 2, 6, 3, 3, 6, 7, 0, 4, 2, 2, 4, 6,
        1, 3, 5, 3, 7, 5,
    ];

    let mut bin: Vec<u8> = corners
        .iter()
        .flat_map(|c| c.iter().flat_map(|v| v.to_le_bytes()))
        .collect();
    let index_offset = bin.len();
    bin.extend(indices.iter().flat_map(|i| i.to_le_bytes()));

    let json = format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "scenes": [{{"nodes": [0]}}],
            "nodes": [{{"mesh": 0}}],
            "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}, "indices": 1}}]}}],
            "buffers": [{{"byteLength": {total}}}],
            "bufferViews": [
                {{"buffer": 0, "byteLength": {index_offset}}},
                {{"buffer": 0, "byteOffset": {index_offset}, "byteLength": 72}}
            ],
            "accessors": [
                {{"bufferView": 0, "componentType": 5126, "count": 8, "type": "VEC3"}},
                {{"bufferView": 1, "componentType": 5123, "count": 36, "type": "SCALAR"}}
            ]
        }}"#,
        total = bin.len(),
        index_offset = index_offset
    );
    write_glb(&json, &bin)
}

#[test]
fn test_placeholder_hidden_until_reveal() {
    init_logging();
    let mut scene = Scene::new(Orbit::default());
    assert_eq!(scene.model().kind, ModelKind::Placeholder);
    assert!(!scene.model().visible);
    assert!(render(&scene, 1280.0, 720.0).is_empty());

    scene.reveal();
    assert!(scene.is_revealed());
    assert!(!render(&scene, 1280.0, 720.0).is_empty());
}

#[test]
fn test_asset_loaded_before_reveal_stays_hidden() -> anyhow::Result<()> {
    init_logging();
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("a380.glb");
    std::fs::write(&path, cube_glb(500.0))?;

    let mut scene = Scene::new(Orbit::default());
    scene.install_asset(load_glb(&path)?);
    assert_eq!(scene.model().kind, ModelKind::Asset);
    assert!(!scene.model().visible);

    scene.reveal();
    assert!(scene.model().visible);
    assert!(!render(&scene, 800.0, 600.0).is_empty());
    Ok(())
}

#[test]
fn test_asset_after_reveal_is_visible_and_normalised() {
    init_logging();
    let mut scene = Scene::new(Orbit::default());
    scene.reveal();
    scene.install_asset(fot_core::scene::glb::read_glb(&cube_glb(20_000.0)).unwrap());

    let model = scene.model();
    assert!(model.visible);
    let bounds = model.mesh.bounds().unwrap();
    assert!(bounds.center().length() < 1e-2);
    assert!(((bounds.size() * model.scale).max_element() - ASSET_FIT_SIZE).abs() < 1e-2);
}

#[test]
fn test_missing_asset_keeps_placeholder() -> anyhow::Result<()> {
    let temp_dir = tempfile::tempdir()?;
    let result = load_glb(&temp_dir.path().join("missing.glb"));
    assert!(matches!(result, Err(GlbError::Io(_))));

    let scene = Scene::new(Orbit::default());
    assert_eq!(scene.model().kind, ModelKind::Placeholder);
    Ok(())
}

#[test]
fn test_frames_spin_and_orbit() {
    let mut background = Background::new(Scene::new(Orbit::default()));
    let start = Instant::now();
    for i in 0..10 {
        assert!(background.frame(start + Duration::from_millis(16 * i)));
    }
    let model = background.scene().model();
    assert!((model.rotation_y - 0.05).abs() < 1e-5);
    let radius = (model.position.x.powi(2) + model.position.z.powi(2)).sqrt();
    assert!((radius - 3.0).abs() < 1e-4);
}

#[test]
fn test_resize_updates_camera() {
    let mut background = Background::new(Scene::new(Orbit::default()));
    background.scene_mut().resize(1000.0, 250.0);
    assert_eq!(background.scene().camera.aspect, 4.0);
}

#[test]
fn test_teardown_stops_frames_and_aborts_asset() {
    init_logging();
    let aborted = Arc::new(AtomicBool::new(false));
    let mut background = Background::new(Scene::new(Orbit::default()));
    background.set_pending_asset(Box::new(FlagAbort(aborted.clone())));
    assert!(background.has_pending_asset());

    background.teardown();
    assert!(aborted.load(Ordering::SeqCst));
    assert!(!background.is_running());
    assert!(!background.is_attached());
    assert!(!background.has_pending_asset());

    let before = background.scene().model().rotation_y;
    assert!(!background.frame(Instant::now()));
    assert_eq!(background.scene().model().rotation_y, before);
}

#[test]
fn test_finished_asset_job_is_not_aborted() {
    let aborted = Arc::new(AtomicBool::new(false));
    let mut background = Background::new(Scene::new(Orbit::default()));
    background.set_pending_asset(Box::new(FlagAbort(aborted.clone())));
    background.clear_pending_asset();
    background.teardown();
    assert!(!aborted.load(Ordering::SeqCst));
}
