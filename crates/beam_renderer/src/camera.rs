//! Camera for ray generation.
//!
//! Convention: the eye sits at the world origin looking down -Z with +Y
//! up. The view plane is `VIEW_PLANE_DISTANCE` in front of the eye and
//! spans the scene camera's width x height. Pixel row 0 is the top of the
//! image, matching the scanline order of the written file.

use beam_core::{CameraSpec, Scene};
use beam_math::{Ray, Vec3};

/// Distance from the eye to the view plane along -Z.
pub const VIEW_PLANE_DISTANCE: f32 = 1.0;

/// Pinhole camera that maps pixel coordinates to primary rays.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,

    // View rectangle in world units
    spec: CameraSpec,

    // Cached computed values
    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Camera {
    /// Create a camera for an image of the given resolution.
    ///
    /// Both image dimensions must be non-zero.
    pub fn new(spec: CameraSpec, image_width: u32, image_height: u32) -> Self {
        let center = Vec3::ZERO;

        // Calculate viewport vectors (u runs right, v runs down)
        let viewport_u = Vec3::new(spec.width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -spec.height, 0.0);

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left = center - Vec3::new(0.0, 0.0, VIEW_PLANE_DISTANCE)
            - viewport_u / 2.0
            - viewport_v / 2.0;

        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width,
            image_height,
            spec,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Create the camera for `scene`.
    ///
    /// The first camera in declaration order is used. A scene with no
    /// camera, or whose first camera has a non-positive extent, renders
    /// through `CameraSpec::default()` (a 1 x 1 view plane).
    pub fn from_scene(scene: &Scene, image_width: u32, image_height: u32) -> Self {
        let count = scene.camera_count();
        if count > 1 {
            log::warn!("Scene has {} cameras, using the first one", count);
        }

        let spec = match scene.camera() {
            Some(spec) if spec.is_valid() => *spec,
            Some(spec) => {
                log::warn!(
                    "Camera has invalid size {} x {}, using default camera",
                    spec.width,
                    spec.height
                );
                CameraSpec::default()
            }
            None => {
                log::warn!("Scene has no camera, using default camera");
                CameraSpec::default()
            }
        };

        Self::new(spec, image_width, image_height)
    }

    /// Generate the ray through the center of pixel (x, y).
    pub fn get_ray(&self, x: u32, y: u32) -> Ray {
        let pixel_center = self.pixel00_loc
            + (x as f32) * self.pixel_delta_u
            + (y as f32) * self.pixel_delta_v;

        Ray::towards(self.center, pixel_center)
    }

    /// The eye point all primary rays start from.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// The view rectangle this camera renders through.
    pub fn spec(&self) -> &CameraSpec {
        &self.spec
    }
}

/// Generate the primary ray for pixel (x, y) of a `width` x `height` image.
pub fn make_ray(x: u32, y: u32, width: u32, height: u32, spec: &CameraSpec) -> Ray {
    Camera::new(*spec, width, height).get_ray(x, y)
}
