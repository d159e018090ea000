//! Beam Renderer - CPU raycasting.
//!
//! Casts one ray per pixel from a pinhole camera, finds the nearest
//! sphere or plane, and shades it with local Blinn-Phong style lighting
//! (diffuse + specular, radial and spotlight attenuation, hard shadows).
//! No secondary rays are traced.

mod bucket;
mod camera;
mod intersect;
mod output;
mod renderer;
mod shading;

pub use bucket::{generate_buckets, render_bucket, render_parallel, Bucket, DEFAULT_BUCKET_ROWS};
pub use camera::{make_ray, Camera, VIEW_PLANE_DISTANCE};
pub use intersect::{
    intersect, nearest_hit, occluded, plane_intersection, sphere_intersection, HitRecord, Hittable,
    PARALLEL_EPSILON,
};
pub use output::{color_to_rgb8, save_image, write_ppm, OutputError, OutputResult, PpmEncoding};
pub use renderer::{
    render, render_pixel, trace, ImageBuffer, RenderConfig, RenderError, RenderResult,
    DEFAULT_SHADOW_BIAS, DEFAULT_SHININESS,
};
pub use shading::{angular_attenuation, radial_attenuation, shade};

/// Re-export scene and math types used in the renderer API
pub use beam_core::{Color, Material, Object, Scene};
pub use beam_math::{Interval, Ray, Vec3};
