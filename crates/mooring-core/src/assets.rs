//! glTF/GLB decoding into [`SceneNode`] trees.
//!
//! Fetching is left to the caller: [`buffer_requests`] lists what each buffer
//! needs (the GLB blob, an embedded data URI, or a URL to fetch), and
//! [`build_scene`] turns the document plus resolved buffers into nodes.

use crate::error::AssetError;
use crate::mesh::{MeshData, MeshVertex};
use crate::nodes::{Material, NodeKind, SceneNode};
use base64::Engine as _;
use glam::{Mat4, Vec3};
use gltf::buffer::Source;
use gltf::json::{self, validation};
use gltf::mesh::{Mode, Semantic};
use gltf::Gltf;
use log::{debug, warn};

const DRACO_EXTENSION: &str = "KHR_draco_mesh_compression";

/// How to obtain the bytes of one buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum BufferRequest {
    Ready(Vec<u8>),
    Fetch(String),
}

/// Parse and validate a glTF or GLB document.
///
/// Broken references are rejected here so decoding never indexes past the
/// document. The one tolerated failure is a required extension we cannot
/// decode (Draco); those primitives are skipped later in [`build_scene`].
pub fn parse_document(path: &str, bytes: &[u8]) -> Result<Gltf, AssetError> {
    let parse_error = |source| AssetError::Parse {
        path: path.to_string(),
        source,
    };
    match Gltf::from_slice(bytes) {
        Ok(gltf) => Ok(gltf),
        Err(gltf::Error::Validation(errors)) if only_unsupported_extensions(&errors) => {
            debug!("[assets] {path} requires extensions we cannot decode");
            Gltf::from_slice_without_validation(bytes).map_err(parse_error)
        }
        Err(e) => Err(parse_error(e)),
    }
}

fn only_unsupported_extensions(errors: &[(json::Path, validation::Error)]) -> bool {
    !errors.is_empty()
        && errors.iter().all(|(path, e)| {
            matches!(e, validation::Error::Unsupported)
                && path.as_str().starts_with("extensionsRequired")
        })
}

/// Resolve `uri` relative to the directory of `base`.
pub fn resolve_uri(base: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    let uri = uri.strip_prefix("./").unwrap_or(uri);
    match base.rfind('/') {
        Some(i) => format!("{}/{}", &base[..i], uri),
        None => uri.to_string(),
    }
}

fn decode_data_uri(path: &str, index: usize, uri: &str) -> Result<Vec<u8>, AssetError> {
    let encoded = uri.split_once(',').map(|(_, data)| data).unwrap_or_default();
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|source| AssetError::DataUri {
            path: path.to_string(),
            index,
            source,
        })
}

pub fn buffer_requests(gltf: &Gltf, path: &str) -> Result<Vec<BufferRequest>, AssetError> {
    gltf.buffers()
        .map(|buffer| match buffer.source() {
            Source::Bin => gltf
                .blob
                .clone()
                .map(BufferRequest::Ready)
                .ok_or(AssetError::MissingBuffer {
                    path: path.to_string(),
                    index: buffer.index(),
                }),
            Source::Uri(uri) if uri.starts_with("data:") => {
                decode_data_uri(path, buffer.index(), uri).map(BufferRequest::Ready)
            }
            Source::Uri(uri) => Ok(BufferRequest::Fetch(resolve_uri(path, uri))),
        })
        .collect()
}

/// Decode a self-contained file (GLB or embedded data URIs).
pub fn load_embedded(name: &str, path: &str, bytes: &[u8]) -> Result<SceneNode, AssetError> {
    let gltf = parse_document(path, bytes)?;
    let buffers = buffer_requests(&gltf, path)?
        .into_iter()
        .enumerate()
        .map(|(index, req)| match req {
            BufferRequest::Ready(data) => Ok(data),
            BufferRequest::Fetch(_) => Err(AssetError::MissingBuffer {
                path: path.to_string(),
                index,
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;
    build_scene(&gltf, &buffers, name, path)
}

/// Build the node tree of the default (or first) scene under a group named
/// `name`.
pub fn build_scene(
    gltf: &Gltf,
    buffers: &[Vec<u8>],
    name: &str,
    path: &str,
) -> Result<SceneNode, AssetError> {
    if gltf.extensions_used().any(|e| e == DRACO_EXTENSION) {
        warn!("[assets] {path} uses {DRACO_EXTENSION}; compressed primitives are skipped");
    }
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| AssetError::NoScene {
            path: path.to_string(),
        })?;
    let children = scene.nodes().map(|n| convert_node(&n, buffers)).collect();
    Ok(SceneNode::group(name, Mat4::IDENTITY, children))
}

fn convert_node(node: &gltf::Node, buffers: &[Vec<u8>]) -> SceneNode {
    let transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let kind = if let Some(mesh) = node.mesh() {
        let (data, material) = convert_mesh(&mesh, buffers);
        NodeKind::Mesh {
            mesh: data,
            material,
        }
    } else if node.camera().is_some() {
        NodeKind::Camera
    } else if node.light().is_some() {
        NodeKind::Light
    } else {
        NodeKind::Group
    };
    SceneNode {
        name: node.name().unwrap_or_default().to_string(),
        transform,
        kind,
        children: node.children().map(|c| convert_node(&c, buffers)).collect(),
    }
}

/// Merge all decodable triangle primitives of `mesh`.
fn convert_mesh(mesh: &gltf::Mesh, buffers: &[Vec<u8>]) -> (MeshData, Material) {
    let mut data = MeshData::default();
    let mut material = None;
    for primitive in mesh.primitives() {
        if primitive.mode() != Mode::Triangles {
            debug!("[assets] skipping {:?} primitive", primitive.mode());
            continue;
        }
        // Draco-compressed attributes have no buffer view to read from.
        let Some(positions_accessor) = primitive.get(&Semantic::Positions) else {
            continue;
        };
        if positions_accessor.view().is_none() {
            continue;
        }
        let reader = primitive.reader(|b| buffers.get(b.index()).map(|d| d.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
        let normals: Option<Vec<Vec3>> = reader
            .read_normals()
            .map(|it| it.map(Vec3::from).collect());
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|it| it.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        let mut part = MeshData {
            vertices: positions
                .iter()
                .enumerate()
                .map(|(i, p)| {
                    let n = normals
                        .as_ref()
                        .and_then(|ns| ns.get(i).copied())
                        .unwrap_or(Vec3::ZERO);
                    MeshVertex::new(*p, n)
                })
                .collect(),
            indices: indices
                .chunks_exact(3)
                .filter(|tri| tri.iter().all(|&i| (i as usize) < positions.len()))
                .flatten()
                .copied()
                .collect(),
        };
        if normals.is_none() {
            compute_normals(&mut part);
        }
        data.append_transformed(&part, Mat4::IDENTITY);

        if material.is_none() {
            let pbr = primitive.material().pbr_metallic_roughness();
            let [r, g, b, _] = pbr.base_color_factor();
            material = Some(Material {
                color: rgb_to_hex(r, g, b),
                metalness: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
                unlit: false,
            });
        }
    }
    (data, material.unwrap_or(Material::metal()))
}

/// Area-weighted vertex normals from the triangle list.
pub fn compute_normals(mesh: &mut MeshData) {
    let mut acc = vec![Vec3::ZERO; mesh.vertices.len()];
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let pa = Vec3::from(mesh.vertices[a].position);
        let pb = Vec3::from(mesh.vertices[b].position);
        let pc = Vec3::from(mesh.vertices[c].position);
        let n = (pb - pa).cross(pc - pa);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    for (v, n) in mesh.vertices.iter_mut().zip(acc) {
        v.normal = n.normalize_or_zero().to_array();
    }
}

fn rgb_to_hex(r: f32, g: f32, b: f32) -> u32 {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (q(r) << 16) | (q(g) << 8) | q(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_gltf() -> String {
        let mut bytes = Vec::new();
        for p in [[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
            for c in p {
                bytes.extend_from_slice(&c.to_le_bytes());
            }
        }
        for i in [0u16, 1, 2] {
            bytes.extend_from_slice(&i.to_le_bytes());
        }
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);
        format!(
            r#"{{
  "asset": {{"version": "2.0"}},
  "scene": 0,
  "scenes": [{{"nodes": [0]}}],
  "nodes": [
    {{"name": "hull", "mesh": 0, "translation": [1, 0, 0], "children": [1]}},
    {{"name": "eye", "camera": 0}}
  ],
  "cameras": [{{"type": "perspective", "perspective": {{"yfov": 1.0, "znear": 0.1}}}}],
  "meshes": [{{"primitives": [{{"attributes": {{"POSITION": 0}}, "indices": 1}}]}}],
  "accessors": [
    {{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0]}},
    {{"bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR"}}
  ],
  "bufferViews": [
    {{"buffer": 0, "byteOffset": 0, "byteLength": 36}},
    {{"buffer": 0, "byteOffset": 36, "byteLength": 6}}
  ],
  "buffers": [{{"byteLength": 42, "uri": "data:application/octet-stream;base64,{data}"}}]
}}"#
        )
    }

    #[test]
    fn embedded_triangle_decodes() {
        let json = triangle_gltf();
        let root = load_embedded("model", "./m/tri.gltf", json.as_bytes()).unwrap();
        assert_eq!(root.name, "model");
        assert_eq!(root.mesh_count(), 1);
        let hull = &root.children[0];
        assert_eq!(hull.name, "hull");
        assert!(matches!(hull.children[0].kind, NodeKind::Camera));
        let NodeKind::Mesh { mesh, .. } = &hull.kind else {
            panic!("hull should be a mesh");
        };
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        let b = root.world_bounds(Mat4::IDENTITY).unwrap();
        assert_eq!(b.min, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn external_buffers_are_resolved_against_the_model() {
        assert_eq!(
            resolve_uri("./models/vessels/glTF/annanery.gltf", "annanery.bin"),
            "./models/vessels/glTF/annanery.bin"
        );
        assert_eq!(resolve_uri("a.gltf", "./b.bin"), "b.bin");
        assert_eq!(resolve_uri("a/b.gltf", "https://x/y.bin"), "https://x/y.bin");
    }

    #[test]
    fn dangling_buffer_view_is_a_parse_error() {
        let json = r#"{
  "asset": {"version": "2.0"},
  "scenes": [{"nodes": [0]}],
  "nodes": [{"mesh": 0}],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
  "accessors": [
    {"bufferView": 7, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0]}
  ],
  "bufferViews": [],
  "buffers": []
}"#;
        assert!(matches!(
            load_embedded("m", "m.gltf", json.as_bytes()),
            Err(AssetError::Parse { .. })
        ));
    }

    #[test]
    fn draco_only_document_still_loads() {
        let json = r#"{
  "asset": {"version": "2.0"},
  "extensionsUsed": ["KHR_draco_mesh_compression"],
  "extensionsRequired": ["KHR_draco_mesh_compression"],
  "scenes": [{"nodes": [0]}],
  "nodes": [{"name": "hull", "mesh": 0}],
  "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
  "accessors": [
    {"componentType": 5126, "count": 3, "type": "VEC3", "min": [0, 0, 0], "max": [1, 1, 0]}
  ]
}"#;
        let root = load_embedded("m", "m.gltf", json.as_bytes()).unwrap();
        let NodeKind::Mesh { mesh, .. } = &root.children[0].kind else {
            panic!("hull should stay a mesh node");
        };
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_document("x.gltf", b"not gltf"),
            Err(AssetError::Parse { .. })
        ));
    }
}
