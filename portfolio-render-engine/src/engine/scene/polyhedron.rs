use std::collections::{BTreeSet, HashMap};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};

/// Positions closer than this are welded when extracting edges.
const WELD_PRECISION: f32 = 1e4;

const OCTAHEDRON_VERTICES: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

fn icosahedron_vertices() -> [[f32; 3]; 12] {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
}

/// Flat-shaded mesh from unit-sphere vertices: every face gets its own
/// three vertices so normals stay per-face.
fn flat_polyhedron(vertices: &[[f32; 3]], faces: &[[usize; 3]], radius: f32) -> Mesh {
    let points: Vec<Vec3> = vertices
        .iter()
        .map(|v| Vec3::from_array(*v).normalize() * radius)
        .collect();

    let mut positions = Vec::with_capacity(faces.len() * 3);
    let mut normals = Vec::with_capacity(faces.len() * 3);
    let mut uvs = Vec::with_capacity(faces.len() * 3);

    for [a, b, c] in faces.iter().copied() {
        let (pa, pb, pc) = (points[a], points[b], points[c]);
        let normal = (pb - pa).cross(pc - pa).normalize_or_zero();
        for (point, uv) in [(pa, [0.0, 0.0]), (pb, [1.0, 0.0]), (pc, [0.5, 1.0])] {
            positions.push(point.to_array());
            normals.push(normal.to_array());
            uvs.push(uv);
        }
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
}

pub fn octahedron(radius: f32) -> Mesh {
    flat_polyhedron(&OCTAHEDRON_VERTICES, &OCTAHEDRON_FACES, radius)
}

pub fn icosahedron(radius: f32) -> Mesh {
    flat_polyhedron(&icosahedron_vertices(), &ICOSAHEDRON_FACES, radius)
}

/// Line-list mesh of the unique triangle edges of a triangle-list mesh.
/// Vertices sharing a position are welded first, so split-normal meshes
/// such as Bevy's cuboid still produce a closed outline.
pub fn wireframe_edges(mesh: &Mesh) -> Option<Mesh> {
    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return None;
    };
    let corners: Vec<usize> = match mesh.indices() {
        Some(indices) => indices.iter().collect(),
        None => (0..positions.len()).collect(),
    };

    let mut welded: HashMap<[i32; 3], u32> = HashMap::new();
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut weld = |p: [f32; 3]| -> u32 {
        let key = p.map(|c| (c * WELD_PRECISION).round() as i32);
        *welded.entry(key).or_insert_with(|| {
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    };

    let mut edges = BTreeSet::new();
    for triangle in corners.chunks_exact(3) {
        let ids = [
            weld(positions[triangle[0]]),
            weld(positions[triangle[1]]),
            weld(positions[triangle[2]]),
        ];
        for (a, b) in [(ids[0], ids[1]), (ids[1], ids[2]), (ids[2], ids[0])] {
            // Skip collapsed edges at sphere poles
            if a != b {
                edges.insert((a.min(b), a.max(b)));
            }
        }
    }

    let indices: Vec<u32> = edges.into_iter().flat_map(|(a, b)| [a, b]).collect();
    let mut lines = Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::RENDER_WORLD);
    lines.insert_attribute(Mesh::ATTRIBUTE_POSITION, vertices);
    lines.insert_indices(Indices::U32(indices));
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => {
                values.iter().map(|v| Vec3::from_array(*v)).collect()
            }
            _ => panic!("missing positions"),
        }
    }

    fn normals(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_NORMAL) {
            Some(VertexAttributeValues::Float32x3(values)) => {
                values.iter().map(|v| Vec3::from_array(*v)).collect()
            }
            _ => panic!("missing normals"),
        }
    }

    #[test]
    fn face_counts() {
        assert_eq!(positions(&octahedron(1.0)).len(), 8 * 3);
        assert_eq!(positions(&icosahedron(1.0)).len(), 20 * 3);
    }

    #[test]
    fn vertices_lie_on_radius() {
        for p in positions(&icosahedron(1.5)) {
            assert!((p.length() - 1.5).abs() < 1e-5);
        }
        for p in positions(&octahedron(2.0)) {
            assert!((p.length() - 2.0).abs() < 1e-5);
        }
    }

    fn line_count(mesh: &Mesh) -> usize {
        mesh.indices().map(|i| i.len() / 2).unwrap_or(0)
    }

    #[test]
    fn octahedron_outline_has_twelve_edges() {
        let lines = wireframe_edges(&octahedron(1.0)).unwrap();
        assert_eq!(lines.primitive_topology(), PrimitiveTopology::LineList);
        assert_eq!(positions(&lines).len(), 6);
        assert_eq!(line_count(&lines), 12);
    }

    #[test]
    fn cuboid_outline_welds_split_faces() {
        let cube = Mesh::from(Cuboid::new(1.0, 1.0, 1.0));
        let lines = wireframe_edges(&cube).unwrap();
        assert_eq!(positions(&lines).len(), 8);
        // 12 box edges plus one diagonal per face
        assert_eq!(line_count(&lines), 18);
    }

    #[test]
    fn mesh_without_positions_has_no_outline() {
        let empty = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        assert!(wireframe_edges(&empty).is_none());
    }

    #[test]
    fn normals_point_outward() {
        for mesh in [octahedron(1.0), icosahedron(1.0)] {
            let positions = positions(&mesh);
            let normals = normals(&mesh);
            for (face, normal) in positions.chunks(3).zip(normals.chunks(3)) {
                let centroid = (face[0] + face[1] + face[2]) / 3.0;
                assert!(centroid.dot(normal[0]) > 0.0);
            }
        }
    }
}
