// SPDX-License-Identifier: MIT
// Copyright (c) 2026 FlightOnTime Team

//! Minimal binary glTF (GLB) reader.
//!
//! Only what the background preview needs: triangle positions, indices, the
//! node transforms above them and each primitive's base colour. Textures,
//! normals, skins, morph targets and external buffers are ignored or rejected.

use super::math::{Mat4, Vec3};
use super::mesh::{Color, Material, Mesh, Triangle};
use log::debug;
use nom::bytes::complete::{tag, take};
use nom::number::complete::le_u32;
use nom::IResult;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

const CHUNK_JSON: u32 = 0x4e4f_534a;
const CHUNK_BIN: u32 = 0x004e_4942;

const COMPONENT_U8: u32 = 5121;
const COMPONENT_U16: u32 = 5123;
const COMPONENT_U32: u32 = 5125;
const COMPONENT_F32: u32 = 5126;

const MODE_TRIANGLES: u32 = 4;
const MAX_NODE_DEPTH: usize = 64;

/// Triangles kept for the software preview.
pub const PREVIEW_TRIANGLE_BUDGET: usize = 12_000;

#[derive(Error, Debug)]
pub enum GlbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a binary glTF file")]
    NotGlb,
    #[error("Unsupported glTF container version {0}")]
    UnsupportedVersion(u32),
    #[error("Truncated glTF container")]
    Truncated,
    #[error("Missing {0} chunk")]
    MissingChunk(&'static str),
    #[error("Invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid accessor {index}: {reason}")]
    Accessor { index: usize, reason: String },
    #[error("Model contains no triangle geometry")]
    Empty,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Document {
    #[serde(default)]
    asset: AssetInfo,
    #[serde(default)]
    accessors: Vec<Accessor>,
    #[serde(default)]
    buffer_views: Vec<BufferView>,
    #[serde(default)]
    meshes: Vec<MeshDef>,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    scenes: Vec<SceneDef>,
    scene: Option<usize>,
    #[serde(default)]
    materials: Vec<MaterialDef>,
}

#[derive(Debug, Deserialize, Default)]
struct AssetInfo {
    generator: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: Option<usize>,
    #[serde(default)]
    byte_offset: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    #[serde(default)]
    buffer: usize,
    #[serde(default)]
    byte_offset: usize,
    byte_length: usize,
    byte_stride: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct MeshDef {
    #[serde(default)]
    primitives: Vec<Primitive>,
}

fn default_mode() -> u32 {
    MODE_TRIANGLES
}

#[derive(Debug, Deserialize)]
struct Primitive {
    #[serde(default)]
    attributes: HashMap<String, usize>,
    indices: Option<usize>,
    material: Option<usize>,
    #[serde(default = "default_mode")]
    mode: u32,
}

#[derive(Debug, Deserialize, Default)]
struct Node {
    mesh: Option<usize>,
    #[serde(default)]
    children: Vec<usize>,
    matrix: Option<[f32; 16]>,
    translation: Option<[f32; 3]>,
    rotation: Option<[f32; 4]>,
    scale: Option<[f32; 3]>,
}

impl Node {
    fn local_transform(&self) -> Mat4 {
        if let Some(m) = self.matrix {
            return Mat4(m);
        }
        let t = self.translation.unwrap_or([0.0; 3]);
        let s = self.scale.unwrap_or([1.0; 3]);
        Mat4::from_trs(
            Vec3::new(t[0], t[1], t[2]),
            self.rotation.unwrap_or([0.0, 0.0, 0.0, 1.0]),
            Vec3::new(s[0], s[1], s[2]),
        )
    }
}

#[derive(Debug, Deserialize)]
struct SceneDef {
    #[serde(default)]
    nodes: Vec<usize>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MaterialDef {
    pbr_metallic_roughness: Option<PbrDef>,
    emissive_factor: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PbrDef {
    base_color_factor: Option<[f32; 4]>,
}

impl MaterialDef {
    fn to_material(&self) -> Material {
        let base = self
            .pbr_metallic_roughness
            .as_ref()
            .and_then(|p| p.base_color_factor)
            .unwrap_or([1.0, 1.0, 1.0, 1.0]);
        let emissive = self.emissive_factor.unwrap_or([0.0; 3]);
        Material {
            color: Color::rgb(base[0], base[1], base[2]),
            emissive: Color::rgb(emissive[0], emissive[1], emissive[2]),
        }
    }
}

/// Geometry pulled out of a GLB file.
#[derive(Debug, Clone)]
pub struct GlbAsset {
    pub mesh: Mesh,
    pub generator: Option<String>,
    /// Triangle count before decimation.
    pub source_triangles: usize,
}

struct Chunk<'a> {
    kind: u32,
    data: &'a [u8],
}

fn header(input: &[u8]) -> IResult<&[u8], (u32, u32)> {
    let (input, _) = tag(&b"glTF"[..])(input)?;
    let (input, version) = le_u32(input)?;
    let (input, length) = le_u32(input)?;
    Ok((input, (version, length)))
}

fn chunk(input: &[u8]) -> IResult<&[u8], Chunk<'_>> {
    let (input, length) = le_u32(input)?;
    let (input, kind) = le_u32(input)?;
    let (input, data) = take(length as usize)(input)?;
    Ok((input, Chunk { kind, data }))
}

fn split_container(bytes: &[u8]) -> Result<(&[u8], Option<&[u8]>), GlbError> {
    if bytes.len() < 4 || &bytes[..4] != b"glTF" {
        return Err(GlbError::NotGlb);
    }
    let (_, (version, length)) = header(bytes).map_err(|_| GlbError::Truncated)?;
    if version != 2 {
        return Err(GlbError::UnsupportedVersion(version));
    }
    let length = length as usize;
    if length < 12 || length > bytes.len() {
        return Err(GlbError::Truncated);
    }

    let mut rest = &bytes[12..length];
    let mut json = None;
    let mut bin = None;
    while !rest.is_empty() {
        let (next, c) = chunk(rest).map_err(|_| GlbError::Truncated)?;
        match c.kind {
            CHUNK_JSON if json.is_none() => json = Some(c.data),
            CHUNK_BIN if bin.is_none() => bin = Some(c.data),
            other => debug!("Skipping GLB chunk type {:#010x}", other),
        }
        rest = next;
    }

    let json = json.ok_or(GlbError::MissingChunk("JSON"))?;
    Ok((json, bin))
}

struct Reader<'a> {
    doc: &'a Document,
    bin: Option<&'a [u8]>,
}

impl<'a> Reader<'a> {
    fn fail(index: usize, reason: impl Into<String>) -> GlbError {
        GlbError::Accessor {
            index,
            reason: reason.into(),
        }
    }

    /// Returns the buffer slice starting at the first element, plus the stride.
    fn view(&self, index: usize, element_size: usize) -> Result<(&'a [u8], usize, usize), GlbError> {
        let accessor = self
            .doc
            .accessors
            .get(index)
            .ok_or_else(|| Self::fail(index, "does not exist"))?;
        let view_index = accessor
            .buffer_view
            .ok_or_else(|| Self::fail(index, "sparse or empty accessors are not supported"))?;
        let view = self
            .doc
            .buffer_views
            .get(view_index)
            .ok_or_else(|| Self::fail(index, "missing buffer view"))?;
        if view.buffer != 0 {
            return Err(Self::fail(index, "external buffers are not supported"));
        }
        let bin = self.bin.ok_or(GlbError::MissingChunk("BIN"))?;

        let stride = view.byte_stride.unwrap_or(element_size);
        if stride < element_size {
            return Err(Self::fail(index, "byte stride smaller than element"));
        }
        let view_end = view
            .byte_offset
            .checked_add(view.byte_length)
            .filter(|&end| end <= bin.len())
            .ok_or_else(|| Self::fail(index, "buffer view exceeds BIN chunk"))?;
        let start = view
            .byte_offset
            .checked_add(accessor.byte_offset)
            .filter(|&start| start <= view_end)
            .ok_or_else(|| Self::fail(index, "offset exceeds buffer view"))?;
        if accessor.count > 0 {
            let needed = stride
                .checked_mul(accessor.count - 1)
                .and_then(|n| n.checked_add(element_size))
                .and_then(|n| n.checked_add(start));
            if needed.map_or(true, |n| n > view_end) {
                return Err(Self::fail(index, "data exceeds buffer view"));
            }
        }
        Ok((&bin[start..view_end], stride, accessor.count))
    }

    fn positions(&self, index: usize) -> Result<Vec<Vec3>, GlbError> {
        let accessor = self
            .doc
            .accessors
            .get(index)
            .ok_or_else(|| Self::fail(index, "does not exist"))?;
        if accessor.component_type != COMPONENT_F32 || accessor.kind != "VEC3" {
            return Err(Self::fail(index, "POSITION must be float VEC3"));
        }
        let (data, stride, count) = self.view(index, 12)?;

        let read = |o: usize| f32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
        Ok((0..count)
            .map(|i| {
                let o = i * stride;
                Vec3::new(read(o), read(o + 4), read(o + 8))
            })
            .collect())
    }

    fn indices(&self, index: usize) -> Result<Vec<u32>, GlbError> {
        let accessor = self
            .doc
            .accessors
            .get(index)
            .ok_or_else(|| Self::fail(index, "does not exist"))?;
        if accessor.kind != "SCALAR" {
            return Err(Self::fail(index, "indices must be SCALAR"));
        }
        let size = match accessor.component_type {
            COMPONENT_U8 => 1,
            COMPONENT_U16 => 2,
            COMPONENT_U32 => 4,
            other => return Err(Self::fail(index, format!("unsupported index type {}", other))),
        };
        let (data, stride, count) = self.view(index, size)?;

        Ok((0..count)
            .map(|i| {
                let o = i * stride;
                match size {
                    1 => data[o] as u32,
                    2 => u16::from_le_bytes([data[o], data[o + 1]]) as u32,
                    _ => u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]),
                }
            })
            .collect())
    }

    fn append_mesh(
        &self,
        mesh_index: usize,
        transform: &Mat4,
        out: &mut Mesh,
        materials: &mut HashMap<Option<usize>, usize>,
    ) -> Result<(), GlbError> {
        let Some(def) = self.doc.meshes.get(mesh_index) else {
            debug!("Node references missing mesh {}", mesh_index);
            return Ok(());
        };

        for primitive in &def.primitives {
            if primitive.mode != MODE_TRIANGLES {
                debug!("Skipping primitive with mode {}", primitive.mode);
                continue;
            }
            let Some(&position_index) = primitive.attributes.get("POSITION") else {
                continue;
            };

            let positions = self.positions(position_index)?;
            let indices = match primitive.indices {
                Some(i) => self.indices(i)?,
                None => (0..positions.len() as u32).collect(),
            };
            if let Some(bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
                return Err(Self::fail(
                    primitive.indices.unwrap_or(position_index),
                    format!("index {} out of range", bad),
                ));
            }

            let material = *materials.entry(primitive.material).or_insert_with(|| {
                let m = primitive
                    .material
                    .and_then(|i| self.doc.materials.get(i))
                    .map(MaterialDef::to_material)
                    .unwrap_or_default();
                out.add_material(m)
            });

            let base = out.positions.len() as u32;
            out.positions
                .extend(positions.iter().map(|p| transform.transform_point(*p)));
            out.triangles.extend(indices.chunks_exact(3).map(|t| Triangle {
                indices: [base + t[0], base + t[1], base + t[2]],
                material,
            }));
        }
        Ok(())
    }

    fn collect(&self) -> Result<Mesh, GlbError> {
        let mut mesh = Mesh::default();
        let mut materials = HashMap::new();

        let roots: Vec<usize> = if self.doc.scenes.is_empty() {
            // No scene graph: take every mesh as-is.
            for i in 0..self.doc.meshes.len() {
                self.append_mesh(i, &Mat4::IDENTITY, &mut mesh, &mut materials)?;
            }
            Vec::new()
        } else {
            let scene = self.doc.scene.unwrap_or(0);
            self.doc
                .scenes
                .get(scene)
                .map(|s| s.nodes.clone())
                .unwrap_or_default()
        };

        let mut visited = HashSet::new();
        let mut stack: Vec<(usize, Mat4, usize)> =
            roots.into_iter().map(|n| (n, Mat4::IDENTITY, 0)).collect();
        while let Some((node_index, parent, depth)) = stack.pop() {
            if depth > MAX_NODE_DEPTH || !visited.insert(node_index) {
                continue;
            }
            let Some(node) = self.doc.nodes.get(node_index) else {
                continue;
            };
            let world = parent * node.local_transform();
            if let Some(mesh_index) = node.mesh {
                self.append_mesh(mesh_index, &world, &mut mesh, &mut materials)?;
            }
            stack.extend(node.children.iter().map(|&c| (c, world, depth + 1)));
        }

        Ok(mesh)
    }
}

/// Parses a GLB container held in memory.
pub fn read_glb(bytes: &[u8]) -> Result<GlbAsset, GlbError> {
    let (json, bin) = split_container(bytes)?;
    let doc: Document = serde_json::from_slice(json)?;

    let mut mesh = Reader { doc: &doc, bin }.collect()?;
    if mesh.triangles.is_empty() {
        return Err(GlbError::Empty);
    }

    let source_triangles = mesh.triangle_count();
    mesh.decimate(PREVIEW_TRIANGLE_BUDGET);
    debug!(
        "GLB parsed — vertices={} triangles={} kept={}",
        mesh.positions.len(),
        source_triangles,
        mesh.triangle_count()
    );

    Ok(GlbAsset {
        mesh,
        generator: doc.asset.generator,
        source_triangles,
    })
}

pub fn load_glb(path: &Path) -> Result<GlbAsset, GlbError> {
    let bytes = std::fs::read(path)?;
    read_glb(&bytes)
}

/// Wraps `json` and `bin` into a GLB container, padding chunks to 4 bytes.
pub fn write_glb(json: &str, bin: &[u8]) -> Vec<u8> {
    let mut json_bytes = json.as_bytes().to_vec();
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let mut bin_bytes = bin.to_vec();
    while bin_bytes.len() % 4 != 0 {
        bin_bytes.push(0);
    }

    let mut total = 12 + 8 + json_bytes.len();
    if !bin_bytes.is_empty() {
        total += 8 + bin_bytes.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());
    out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_bytes);
    if !bin_bytes.is_empty() {
        out.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin_bytes);
    }
    out
}
