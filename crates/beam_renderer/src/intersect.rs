//! Ray-object intersection for spheres and planes.
//!
//! Every test returns the ray parameter `t` of the hit, or `None`.
//! Hits at `t <= 0` are behind the ray origin and never count.

use beam_core::{Object, Plane, Scene, Sphere};
use beam_math::{Interval, Ray, Vec3};

/// Below this |dot(direction, normal)| a ray is treated as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Record of the nearest ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at the intersection
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the object in the scene
    pub index: usize,
}

/// Trait for scene objects that can be hit by rays.
pub trait Hittable {
    /// Distance along `ray` to the surface, if it lies strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32>;

    /// Unit normal at surface point `p` for a hit by `ray`.
    fn normal_at(&self, p: Vec3, ray: &Ray) -> Vec3;
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        if !(self.radius > 0.0) || ray.is_degenerate() {
            return None;
        }

        let oc = self.position - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    fn normal_at(&self, p: Vec3, _ray: &Ray) -> Vec3 {
        ((p - self.position) / self.radius).normalize_or_zero()
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let normal = self.normal.normalize_or_zero();
        if normal == Vec3::ZERO || ray.is_degenerate() {
            return None;
        }

        let denom = ray.direction().dot(normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.position - ray.origin()).dot(normal) / denom;
        ray_t.surrounds(t).then_some(t)
    }

    /// Planes are two-sided: the normal always faces the incoming ray.
    fn normal_at(&self, _p: Vec3, ray: &Ray) -> Vec3 {
        let normal = self.normal.normalize_or_zero();
        if ray.direction().dot(normal) > 0.0 {
            -normal
        } else {
            normal
        }
    }
}

impl Hittable for Object {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        match self {
            Object::Sphere(sphere) => sphere.hit(ray, ray_t),
            Object::Plane(plane) => plane.hit(ray, ray_t),
            Object::Camera(_) | Object::Light(_) | Object::Empty => None,
        }
    }

    fn normal_at(&self, p: Vec3, ray: &Ray) -> Vec3 {
        match self {
            Object::Sphere(sphere) => sphere.normal_at(p, ray),
            Object::Plane(plane) => plane.normal_at(p, ray),
            Object::Camera(_) | Object::Light(_) | Object::Empty => Vec3::ZERO,
        }
    }
}

/// Distance along `ray` to `object`, or `None` for a miss.
pub fn intersect(ray: &Ray, object: &Object) -> Option<f32> {
    object.hit(ray, Interval::POSITIVE)
}

/// Distance to a sphere, or `None` for a miss.
pub fn sphere_intersection(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let sphere = Sphere {
        position: center,
        radius,
        material: Default::default(),
    };
    sphere.hit(ray, Interval::POSITIVE)
}

/// Distance to a plane, or `None` for a miss.
pub fn plane_intersection(ray: &Ray, position: Vec3, normal: Vec3) -> Option<f32> {
    let plane = Plane {
        position,
        normal,
        material: Default::default(),
    };
    plane.hit(ray, Interval::POSITIVE)
}

/// Find the nearest object hit by `ray` within `ray_t`.
///
/// Objects are tested in scene order and a later hit only wins if it is
/// strictly closer, so ties go to the earlier object.
pub fn nearest_hit(ray: &Ray, scene: &Scene, ray_t: Interval) -> Option<HitRecord> {
    let mut closest: Option<(usize, f32)> = None;
    let mut closest_so_far = ray_t.max;

    for (index, object) in scene.iter().enumerate() {
        if let Some(t) = object.hit(ray, ray_t.with_max(closest_so_far)) {
            closest_so_far = t;
            closest = Some((index, t));
        }
    }

    let (index, t) = closest?;
    let p = ray.at(t);
    let normal = scene.objects()[index].normal_at(p, ray);
    Some(HitRecord { p, normal, t, index })
}

/// True if any object blocks `ray` closer than `max_distance`.
pub fn occluded(ray: &Ray, scene: &Scene, max_distance: f32) -> bool {
    let ray_t = Interval::POSITIVE.with_max(max_distance);
    scene.iter().any(|object| object.hit(ray, ray_t).is_some())
}
