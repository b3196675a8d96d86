use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// The fixed set of mesh shapes the backdrop uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Torus,
    Icosahedron,
    Dodecahedron,
    Octahedron,
    TorusKnot,
    Sphere,
}

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Torus,
        Shape::Icosahedron,
        Shape::Dodecahedron,
        Shape::Octahedron,
        Shape::TorusKnot,
        Shape::Sphere,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Triangle mesh for this shape with the dimensions the scene uses.
    pub fn mesh(self) -> MeshData {
        match self {
            Shape::Torus => torus(10.0, 3.0, 16, 100),
            Shape::Icosahedron => icosahedron(4.0, 1),
            Shape::Dodecahedron => dodecahedron(2.6),
            Shape::Octahedron => octahedron(2.2),
            Shape::TorusKnot => torus_knot(2.4, 0.7, 128, 16, 2, 3),
            Shape::Sphere => sphere(1.6, 32, 16),
        }
    }

    /// Radius of the sphere enclosing `mesh()` at unit scale, used for picking.
    pub fn bounding_radius(self) -> f32 {
        match self {
            Shape::Torus => 13.0,
            Shape::Icosahedron => 4.0,
            Shape::Dodecahedron => 2.6,
            Shape::Octahedron => 2.2,
            // curve radius reaches 1.5 * r, plus the tube
            Shape::TorusKnot => 2.4 * 1.5 + 0.7,
            Shape::Sphere => 1.6,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Unique undirected edges as a line-list index buffer (for wireframes).
    pub fn edges(&self) -> Vec<u32> {
        let mut seen = FnvHashSet::default();
        let mut lines = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let pa = self.vertices[a as usize].position;
                let pb = self.vertices[b as usize].position;
                // flat-shaded meshes duplicate corners, so key on positions
                let ka = quantize(pa);
                let kb = quantize(pb);
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }
        lines
    }

    pub fn max_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::from(v.position).length())
            .fold(0.0, f32::max)
    }
}

fn quantize(p: [f32; 3]) -> [i32; 3] {
    [
        (p[0] * 1e4).round() as i32,
        (p[1] * 1e4).round() as i32,
        (p[2] * 1e4).round() as i32,
    ]
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let p = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: (p - center).normalize_or_zero().to_array(),
            });
        }
    }
    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

fn knot_curve(u: f32, p: u32, q: u32, radius: f32) -> Vec3 {
    let qu_over_p = q as f32 / p as f32 * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * qu_over_p.sin() * 0.5,
    )
}

pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let mut mesh = MeshData::default();
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = knot_curve(u, p, q, radius);
        let p2 = knot_curve(u + 0.01, p, q, radius);
        let t = p2 - p1;
        let mut n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        n = b.cross(t).normalize_or_zero();
        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            mesh.vertices.push(Vertex {
                position: pos.to_array(),
                normal: (pos - p1).normalize_or_zero().to_array(),
            });
        }
    }
    let stride = radial_segments + 1;
    for i in 1..=tubular_segments {
        for j in 1..=radial_segments {
            let a = stride * (i - 1) + (j - 1);
            let b = stride * i + (j - 1);
            let c = stride * i + j;
            let d = stride * (i - 1) + j;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let n = Vec3::new(
                -(u * TAU).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.vertices.push(Vertex {
                position: (n * radius).to_array(),
                normal: n.to_array(),
            });
        }
    }
    let stride = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = stride * iy + ix + 1;
            let b = stride * iy + ix;
            let c = stride * (iy + 1) + ix;
            let d = stride * (iy + 1) + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height_segments - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

pub fn octahedron(radius: f32) -> MeshData {
    let corners = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ];
    let faces: [[usize; 3]; 8] = [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ];
    polyhedron(&corners, &faces, radius, 0)
}

pub fn icosahedron(radius: f32, detail: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    let faces: [[usize; 3]; 20] = [
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
    polyhedron(&corners, &faces, radius, detail)
}

pub fn dodecahedron(radius: f32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let r = 1.0 / t;
    let corners = [
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, -r, -t),
        Vec3::new(0.0, -r, t),
        Vec3::new(0.0, r, -t),
        Vec3::new(0.0, r, t),
        Vec3::new(-r, -t, 0.0),
        Vec3::new(-r, t, 0.0),
        Vec3::new(r, -t, 0.0),
        Vec3::new(r, t, 0.0),
        Vec3::new(-t, 0.0, -r),
        Vec3::new(t, 0.0, -r),
        Vec3::new(-t, 0.0, r),
        Vec3::new(t, 0.0, r),
    ];
    let faces: [[usize; 3]; 36] = [
        [3, 11, 7],
        [3, 7, 15],
        [3, 15, 13],
        [7, 19, 17],
        [7, 17, 6],
        [7, 6, 15],
        [17, 4, 8],
        [17, 8, 10],
        [17, 10, 6],
        [8, 0, 16],
        [8, 16, 2],
        [8, 2, 10],
        [0, 12, 1],
        [0, 1, 18],
        [0, 18, 16],
        [6, 10, 2],
        [6, 2, 13],
        [6, 13, 15],
        [2, 16, 18],
        [2, 18, 3],
        [2, 3, 13],
        [18, 1, 9],
        [18, 9, 11],
        [18, 11, 3],
        [4, 14, 12],
        [4, 12, 0],
        [4, 0, 8],
        [11, 9, 5],
        [11, 5, 19],
        [11, 19, 7],
        [19, 5, 14],
        [19, 14, 4],
        [19, 4, 17],
        [1, 12, 14],
        [1, 14, 5],
        [1, 5, 9],
    ];
    polyhedron(&corners, &faces, radius, 0)
}

/// Flat-shaded polyhedron projected onto a sphere of `radius`, each face
/// split into four `detail` times.
fn polyhedron(corners: &[Vec3], faces: &[[usize; 3]], radius: f32, detail: u32) -> MeshData {
    let mut tris: Vec<[Vec3; 3]> = faces
        .iter()
        .map(|f| [corners[f[0]], corners[f[1]], corners[f[2]]])
        .collect();
    for _ in 0..detail {
        tris = tris
            .into_iter()
            .flat_map(|[a, b, c]| {
                let ab = (a + b) * 0.5;
                let bc = (b + c) * 0.5;
                let ca = (c + a) * 0.5;
                [[a, ab, ca], [ab, b, bc], [ca, bc, c], [ab, bc, ca]]
            })
            .collect();
    }

    let mut mesh = MeshData::default();
    for [a, b, c] in tris {
        let mut pts = [
            a.normalize() * radius,
            b.normalize() * radius,
            c.normalize() * radius,
        ];
        let mut n = (pts[1] - pts[0]).cross(pts[2] - pts[0]).normalize_or_zero();
        let centroid = (pts[0] + pts[1] + pts[2]) / 3.0;
        // keep winding and normal facing away from the origin
        if n.dot(centroid) < 0.0 {
            pts.swap(1, 2);
            n = -n;
        }
        let base = mesh.vertices.len() as u32;
        for p in pts {
            mesh.vertices.push(Vertex {
                position: p.to_array(),
                normal: n.to_array(),
            });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    mesh
}
