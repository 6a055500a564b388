use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Vertex layout shared with `scene.wgsl` and `shadow.wgsl` (24 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Primitive shape of a mesh node, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    Cylinder {
        height: f32,
        diameter_top: f32,
        diameter_bottom: f32,
        tessellation: u32,
    },
    Sphere {
        diameter_x: f32,
        diameter_y: f32,
        diameter_z: f32,
        segments: u32,
    },
    /// Flat XZ plane facing +Y.
    Ground {
        width: f32,
        depth: f32,
        subdivisions: u32,
    },
}

/// Unit-sized tessellation shared by every shape with the same proportions.
/// The renderer uploads one GPU mesh per key and scales it per draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitMesh {
    Cube,
    Cylinder {
        top_permille: u16,
        bottom_permille: u16,
        tessellation: u16,
    },
    Sphere {
        segments: u16,
    },
    Ground {
        subdivisions: u16,
    },
}

const DEFAULT_CYLINDER_TESSELLATION: u32 = 24;
const DEFAULT_SPHERE_SEGMENTS: u32 = 16;

impl Shape {
    pub const fn cube(size: f32) -> Self {
        Shape::Box {
            width: size,
            height: size,
            depth: size,
        }
    }

    pub const fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Shape::Box {
            width,
            height,
            depth,
        }
    }

    pub const fn cylinder(diameter: f32, height: f32) -> Self {
        Shape::Cylinder {
            height,
            diameter_top: diameter,
            diameter_bottom: diameter,
            tessellation: DEFAULT_CYLINDER_TESSELLATION,
        }
    }

    pub const fn tapered(diameter_top: f32, diameter_bottom: f32, height: f32, tessellation: u32) -> Self {
        Shape::Cylinder {
            height,
            diameter_top,
            diameter_bottom,
            tessellation,
        }
    }

    pub const fn sphere(diameter: f32, segments: u32) -> Self {
        Shape::Sphere {
            diameter_x: diameter,
            diameter_y: diameter,
            diameter_z: diameter,
            segments,
        }
    }

    pub const fn ellipsoid(x: f32, y: f32, z: f32) -> Self {
        Shape::Sphere {
            diameter_x: x,
            diameter_y: y,
            diameter_z: z,
            segments: DEFAULT_SPHERE_SEGMENTS,
        }
    }

    pub const fn ground(width: f32, depth: f32, subdivisions: u32) -> Self {
        Shape::Ground {
            width,
            depth,
            subdivisions,
        }
    }

    /// Key of the unit tessellation plus the scale mapping it onto this shape.
    pub fn unit_mesh(&self) -> (UnitMesh, Vec3) {
        match *self {
            Shape::Box {
                width,
                height,
                depth,
            } => (UnitMesh::Cube, Vec3::new(width, height, depth)),
            Shape::Cylinder {
                height,
                diameter_top,
                diameter_bottom,
                tessellation,
            } => {
                let widest = diameter_top.max(diameter_bottom).max(1e-4);
                let permille = |d: f32| ((d / widest).clamp(0.0, 1.0) * 1000.0).round() as u16;
                (
                    UnitMesh::Cylinder {
                        top_permille: permille(diameter_top),
                        bottom_permille: permille(diameter_bottom),
                        tessellation: tessellation.clamp(3, 256) as u16,
                    },
                    Vec3::new(widest, height, widest),
                )
            }
            Shape::Sphere {
                diameter_x,
                diameter_y,
                diameter_z,
                segments,
            } => (
                UnitMesh::Sphere {
                    segments: segments.clamp(2, 128) as u16,
                },
                Vec3::new(diameter_x, diameter_y, diameter_z),
            ),
            Shape::Ground {
                width,
                depth,
                subdivisions,
            } => (
                UnitMesh::Ground {
                    subdivisions: subdivisions.clamp(1, 256) as u16,
                },
                Vec3::new(width, 1.0, depth),
            ),
        }
    }

    pub fn triangle_count(&self) -> u64 {
        self.unit_mesh().0.triangle_count()
    }
}

impl UnitMesh {
    pub fn triangle_count(&self) -> u64 {
        match *self {
            UnitMesh::Cube => 12,
            UnitMesh::Cylinder { tessellation, .. } => 4 * tessellation as u64,
            UnitMesh::Sphere { segments } => 4 * (segments as u64) * (segments as u64),
            UnitMesh::Ground { subdivisions } => 2 * (subdivisions as u64) * (subdivisions as u64),
        }
    }

    /// Builds the unit-sized vertex and index data, CCW when seen from outside.
    pub fn tessellate(&self) -> MeshData {
        match *self {
            UnitMesh::Cube => unit_cube(),
            UnitMesh::Cylinder {
                top_permille,
                bottom_permille,
                tessellation,
            } => unit_cylinder(
                top_permille as f32 / 2000.0,
                bottom_permille as f32 / 2000.0,
                tessellation as u32,
            ),
            UnitMesh::Sphere { segments } => unit_sphere(segments as u32),
            UnitMesh::Ground { subdivisions } => unit_ground(subdivisions as u32),
        }
    }
}

fn unit_cube() -> MeshData {
    let h = 0.5;
    // (normal, corners in CCW winding viewed from outside)
    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        ([0.0, 0.0, 1.0], [[-h, -h, h], [h, -h, h], [h, h, h], [-h, h, h]]),
        ([0.0, 0.0, -1.0], [[h, -h, -h], [-h, -h, -h], [-h, h, -h], [h, h, -h]]),
        ([1.0, 0.0, 0.0], [[h, -h, h], [h, -h, -h], [h, h, -h], [h, h, h]]),
        ([-1.0, 0.0, 0.0], [[-h, -h, -h], [-h, -h, h], [-h, h, h], [-h, h, -h]]),
        ([0.0, 1.0, 0.0], [[-h, h, h], [h, h, h], [h, h, -h], [-h, h, -h]]),
        ([0.0, -1.0, 0.0], [[-h, -h, -h], [h, -h, -h], [h, -h, h], [-h, -h, h]]),
    ];
    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };
    for (normal, corners) in faces.iter() {
        let base = mesh.vertices.len() as u32;
        for c in corners {
            mesh.vertices
                .push(MeshVertex::new(Vec3::from_array(*c), Vec3::from_array(*normal)));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn unit_cylinder(radius_top: f32, radius_bottom: f32, tessellation: u32) -> MeshData {
    let n = tessellation.max(3);
    let mut mesh = MeshData::default();
    let slope = radius_bottom - radius_top; // side normals tilt outward-up for cones

    // side ring pairs, seam duplicated
    for i in 0..=n {
        let theta = TAU * i as f32 / n as f32;
        let (s, c) = theta.sin_cos();
        let normal = Vec3::new(c, slope, s).normalize_or_zero();
        mesh.vertices
            .push(MeshVertex::new(Vec3::new(c * radius_bottom, -0.5, s * radius_bottom), normal));
        mesh.vertices
            .push(MeshVertex::new(Vec3::new(c * radius_top, 0.5, s * radius_top), normal));
    }
    for i in 0..n {
        let b0 = 2 * i;
        let t0 = b0 + 1;
        let b1 = b0 + 2;
        let t1 = b0 + 3;
        mesh.indices.extend_from_slice(&[b0, t0, t1, b0, t1, b1]);
    }

    for (y, radius, up) in [(0.5_f32, radius_top, true), (-0.5_f32, radius_bottom, false)] {
        let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(MeshVertex::new(Vec3::new(0.0, y, 0.0), normal));
        for i in 0..=n {
            let theta = TAU * i as f32 / n as f32;
            let (s, c) = theta.sin_cos();
            mesh.vertices
                .push(MeshVertex::new(Vec3::new(c * radius, y, s * radius), normal));
        }
        for i in 0..n {
            let p0 = center + 1 + i;
            let p1 = p0 + 1;
            if up {
                mesh.indices.extend_from_slice(&[center, p1, p0]);
            } else {
                mesh.indices.extend_from_slice(&[center, p0, p1]);
            }
        }
    }
    mesh
}

fn unit_sphere(segments: u32) -> MeshData {
    let rings = segments.max(2);
    let slices = rings * 2;
    let mut mesh = MeshData::default();
    for i in 0..=rings {
        let phi = PI * i as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();
        for j in 0..=slices {
            let theta = TAU * j as f32 / slices as f32;
            let (st, ct) = theta.sin_cos();
            let normal = Vec3::new(sp * ct, cp, sp * st);
            mesh.vertices.push(MeshVertex::new(normal * 0.5, normal));
        }
    }
    let stride = slices + 1;
    for i in 0..rings {
        for j in 0..slices {
            let a = i * stride + j;
            let b = a + stride;
            mesh.indices.extend_from_slice(&[b, a, a + 1, b, a + 1, b + 1]);
        }
    }
    mesh
}

fn unit_ground(subdivisions: u32) -> MeshData {
    let n = subdivisions.max(1);
    let mut mesh = MeshData::default();
    for j in 0..=n {
        for i in 0..=n {
            let x = -0.5 + i as f32 / n as f32;
            let z = -0.5 + j as f32 / n as f32;
            mesh.vertices.push(MeshVertex::new(Vec3::new(x, 0.0, z), Vec3::Y));
        }
    }
    let stride = n + 1;
    for j in 0..n {
        for i in 0..n {
            let v00 = j * stride + i;
            let v10 = v00 + 1;
            let v01 = v00 + stride;
            let v11 = v01 + 1;
            mesh.indices.extend_from_slice(&[v00, v01, v11, v00, v11, v10]);
        }
    }
    mesh
}
