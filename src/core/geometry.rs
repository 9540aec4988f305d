use glam::Vec3;
use std::f32::consts::PI;

// Primitive parameters, matching the shapes the stress test has always used.
pub const BOX_SIZE: f32 = 1.0;
pub const SPHERE_RADIUS: f32 = 0.5;
pub const SPHERE_WIDTH_SEGMENTS: u32 = 16;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 16;
pub const TETRAHEDRON_RADIUS: f32 = 0.5;
pub const TORUS_RADIUS: f32 = 0.5;
pub const TORUS_TUBE: f32 = 0.2;
pub const TORUS_RADIAL_SEGMENTS: u32 = 16;
pub const TORUS_TUBULAR_SEGMENTS: u32 = 32;
pub const OCTAHEDRON_RADIUS: f32 = 0.5;

/// Interleaved vertex as uploaded to the GPU (location 0 = position, 1 = normal).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Box,
    Sphere,
    Tetrahedron,
    Torus,
    Octahedron,
}

impl GeometryKind {
    pub const COUNT: usize = 5;
    pub const ALL: [GeometryKind; Self::COUNT] = [
        GeometryKind::Box,
        GeometryKind::Sphere,
        GeometryKind::Tetrahedron,
        GeometryKind::Torus,
        GeometryKind::Octahedron,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of vertices in the mesh `build` produces for this kind.
    ///
    /// Used on the hot path for triangle accounting, so it is computed from the
    /// shape parameters rather than by building the mesh.
    pub fn vertex_count(self) -> usize {
        match self {
            GeometryKind::Box => 24,
            GeometryKind::Sphere => {
                ((SPHERE_WIDTH_SEGMENTS + 1) * (SPHERE_HEIGHT_SEGMENTS + 1)) as usize
            }
            GeometryKind::Tetrahedron => 4 * 3,
            GeometryKind::Torus => {
                ((TORUS_RADIAL_SEGMENTS + 1) * (TORUS_TUBULAR_SEGMENTS + 1)) as usize
            }
            GeometryKind::Octahedron => 8 * 3,
        }
    }

    pub fn build(self) -> MeshData {
        match self {
            GeometryKind::Box => generate_box(BOX_SIZE),
            GeometryKind::Sphere => generate_sphere(
                SPHERE_RADIUS,
                SPHERE_WIDTH_SEGMENTS,
                SPHERE_HEIGHT_SEGMENTS,
            ),
            GeometryKind::Tetrahedron => generate_tetrahedron(TETRAHEDRON_RADIUS),
            GeometryKind::Torus => generate_torus(
                TORUS_RADIUS,
                TORUS_TUBE,
                TORUS_RADIAL_SEGMENTS,
                TORUS_TUBULAR_SEGMENTS,
            ),
            GeometryKind::Octahedron => generate_octahedron(OCTAHEDRON_RADIUS),
        }
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Line-list indices covering every triangle edge (a-b, b-c, c-a).
    ///
    /// Shared edges are emitted once per triangle, as a wireframe renderer does.
    pub fn wire_indices(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            out.extend_from_slice(&[tri[0], tri[1], tri[1], tri[2], tri[2], tri[0]]);
        }
        out
    }

    fn push(&mut self, position: Vec3, normal: Vec3) -> u32 {
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        (self.vertices.len() - 1) as u32
    }
}

/// Axis-aligned cube centred at the origin, four vertices per face.
pub fn generate_box(size: f32) -> MeshData {
    let h = size * 0.5;
    // (normal, u, v) with u x v == normal so each quad winds counter-clockwise
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let mut mesh = MeshData::default();
    for (n, u, v) in faces {
        let c = n * h;
        let a = mesh.push(c - u * h - v * h, n);
        let b = mesh.push(c + u * h - v * h, n);
        let d = mesh.push(c + u * h + v * h, n);
        let e = mesh.push(c - u * h + v * h, n);
        mesh.indices.extend_from_slice(&[a, b, d, d, e, a]);
    }
    mesh
}

/// UV sphere with `(width + 1) * (height + 1)` vertices; the degenerate pole
/// triangles are skipped.
pub fn generate_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=hs {
        let v = iy as f32 / hs as f32;
        let theta = v * PI;
        for ix in 0..=ws {
            let u = ix as f32 / ws as f32;
            let phi = u * 2.0 * PI;
            let dir = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.push(dir * radius, dir.normalize_or_zero());
        }
    }
    let row = ws + 1;
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

/// Torus in the XY plane with `(radial + 1) * (tubular + 1)` vertices.
pub fn generate_torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let rs = radial_segments.max(3);
    let ts = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=rs {
        let v = j as f32 / rs as f32 * 2.0 * PI;
        for i in 0..=ts {
            let u = i as f32 / ts as f32 * 2.0 * PI;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.push(p, (p - center).normalize_or_zero());
        }
    }
    let row = ts + 1;
    for j in 1..=rs {
        for i in 1..=ts {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

pub fn generate_tetrahedron(radius: f32) -> MeshData {
    let corners = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ];
    let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    flat_polyhedron(&corners, &faces, radius)
}

pub fn generate_octahedron(radius: f32) -> MeshData {
    let corners = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let faces = [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ];
    flat_polyhedron(&corners, &faces, radius)
}

// Unshared vertices per face so every face gets its own flat normal.
fn flat_polyhedron(corners: &[Vec3], faces: &[[usize; 3]], radius: f32) -> MeshData {
    let mut mesh = MeshData::default();
    for face in faces {
        let [a, b, c] = face.map(|i| corners[i].normalize() * radius);
        let n = (b - a).cross(c - a).normalize_or_zero();
        let ia = mesh.push(a, n);
        let ib = mesh.push(b, n);
        let ic = mesh.push(c, n);
        mesh.indices.extend_from_slice(&[ia, ib, ic]);
    }
    mesh
}
