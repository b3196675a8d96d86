use super::geometry::MeshData;
use super::scene::{Camera, ObjectId, Scene};
use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub dir: Vec3,
}

/// World-space ray from the camera eye through `ndc` (x right, y up, -1..1).
pub fn ray_from_ndc(camera: &Camera, ndc: Vec2) -> Ray {
    let inv = (camera.projection_matrix() * camera.view_matrix()).inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let far: Vec3 = p_far.truncate() / p_far.w;
    Ray {
        origin: camera.eye,
        dir: (far - camera.eye).normalize(),
    }
}

/// Distance along the ray to the first sphere surface in front of the origin.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    if near >= 0.0 {
        return Some(near);
    }
    // origin inside the sphere: the exit point is the hit
    let far = -b + sq;
    (far >= 0.0).then_some(far)
}

/// Double-sided Möller–Trumbore. Returns the ray parameter of the hit.
#[inline]
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

fn ray_mesh(origin: Vec3, dir: Vec3, mesh: &MeshData) -> Option<f32> {
    let mut best = None::<f32>;
    for tri in mesh.indices.chunks_exact(3) {
        let a = Vec3::from(mesh.vertices[tri[0] as usize].position);
        let b = Vec3::from(mesh.vertices[tri[1] as usize].position);
        let c = Vec3::from(mesh.vertices[tri[2] as usize].position);
        if let Some(t) = ray_triangle(origin, dir, a, b, c) {
            if best.map_or(true, |bt| t < bt) {
                best = Some(t);
            }
        }
    }
    best
}

/// Nearest visible interactive mesh hit by `ray`, with its distance.
///
/// Bounding spheres reject most meshes cheaply; survivors are tested
/// triangle by triangle in object space, where the ray parameter matches
/// the world distance because the world direction is unit length.
pub fn pick(scene: &Scene, ray: Ray) -> Option<(ObjectId, f32)> {
    let mut best = None::<(ObjectId, f32)>;
    for &id in scene.interactive() {
        let Some(mesh) = scene.mesh(id) else {
            continue;
        };
        if !mesh.visible {
            continue;
        }
        if ray_sphere(
            ray.origin,
            ray.dir,
            mesh.transform.position,
            mesh.bounding_radius(),
        )
        .is_none()
        {
            continue;
        }
        let inv = mesh.transform.matrix().inverse();
        let origin = inv.transform_point3(ray.origin);
        let dir = inv.transform_vector3(ray.dir);
        if let Some(t) = ray_mesh(origin, dir, scene.geometry(mesh.shape)) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((id, t)),
            }
        }
    }
    best
}
