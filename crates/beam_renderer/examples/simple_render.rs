//! Simple raycaster example.
//!
//! Builds a small scene in code and saves it as a binary PPM.

use beam_core::{CameraSpec, Color, Light, Material, Object, Plane, Scene, Sphere};
use beam_renderer::{render_parallel, save_image, PpmEncoding, RenderConfig, Vec3};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let scene = build_scene()?;
    log::info!("Built scene with {} objects", scene.len());

    let config = RenderConfig {
        background: Color::new(0.05, 0.05, 0.1),
        ..Default::default()
    };

    let image = render_parallel(&scene, 800, 600, &config)?;
    save_image(&image, "output.ppm", PpmEncoding::Binary)?;

    Ok(())
}

fn build_scene() -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    scene.push(Object::Camera(CameraSpec::new(1.0, 0.75)))?;

    // Ground
    scene.push(Object::Plane(Plane::new(
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::Y,
        Material::new(Color::new(0.4, 0.4, 0.4), Color::ZERO),
    )))?;

    // Three spheres
    for (x, diffuse) in [
        (-2.2, Color::new(0.9, 0.2, 0.2)),
        (0.0, Color::new(0.2, 0.9, 0.2)),
        (2.2, Color::new(0.2, 0.2, 0.9)),
    ] {
        scene.push(Object::Sphere(Sphere::new(
            Vec3::new(x, 0.0, -7.0),
            1.0,
            Material::new(diffuse, Color::splat(0.8)),
        )))?;
    }

    // Key light and a spotlight from above
    scene.push(Object::Light(
        Light::point(Vec3::new(3.0, 4.0, -2.0), Color::splat(1.5)).with_radial(1.0, 0.05, 0.01),
    ))?;
    scene.push(Object::Light(Light::spot(
        Vec3::new(0.0, 5.0, -7.0),
        Color::new(1.0, 0.9, 0.7),
        Vec3::NEG_Y,
        20.0,
        2.0,
    )))?;

    Ok(scene)
}
