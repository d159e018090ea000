//! Local illumination.
//!
//! Each light contributes a Lambertian diffuse term and a Phong specular
//! highlight, scaled by radial and spotlight attenuation. Lights blocked
//! by another object contribute nothing. There is no ambient term.

use beam_core::{Color, Light, Material, Object, Scene};
use beam_math::{reflect, Ray, Vec3};

use crate::{intersect::occluded, renderer::clamp_color, HitRecord, RenderConfig};

/// Radial falloff `1 / (a2*d^2 + a1*d + a0)` at distance `d`.
///
/// A zero, negative or non-finite denominator yields 0 (no light).
pub fn radial_attenuation(light: &Light, distance: f32) -> f32 {
    let denom = light.radial_a2 * distance * distance + light.radial_a1 * distance + light.radial_a0;
    if denom > 0.0 && denom.is_finite() {
        1.0 / denom
    } else {
        0.0
    }
}

/// Spotlight falloff for a point in unit direction `light_to_point` from the light.
///
/// Omnidirectional lights (`theta == 0`) always return 1. Outside the
/// cone, or with a zero-length aim direction, the result is 0.
pub fn angular_attenuation(light: &Light, light_to_point: Vec3) -> f32 {
    if !light.is_spotlight() {
        return 1.0;
    }

    let aim = light.direction.normalize_or_zero();
    if aim == Vec3::ZERO {
        return 0.0;
    }

    let cos_alpha = aim.dot(light_to_point);
    if cos_alpha < light.theta.to_radians().cos() {
        return 0.0;
    }

    cos_alpha.max(0.0).powf(light.angular_a0)
}

/// Lambertian term.
#[inline]
fn diffuse(normal: Vec3, to_light: Vec3, light_color: Color, diffuse_color: Color) -> Color {
    let n_dot_l = normal.dot(to_light);
    if n_dot_l > 0.0 {
        light_color * diffuse_color * n_dot_l
    } else {
        Color::ZERO
    }
}

/// Phong highlight: the light reflected about the normal, compared with
/// the direction back to the viewer.
#[inline]
fn specular(
    normal: Vec3,
    to_light: Vec3,
    view: Vec3,
    light_color: Color,
    specular_color: Color,
    shininess: f32,
) -> Color {
    if normal.dot(to_light) <= 0.0 {
        return Color::ZERO;
    }

    let reflected = reflect(-to_light, normal);
    let r_dot_v = reflected.dot(view);
    if r_dot_v > 0.0 {
        light_color * specular_color * r_dot_v.powf(shininess)
    } else {
        Color::ZERO
    }
}

/// Shadow ray offset at `p`, growing with the magnitude of its coordinates
/// so the offset stays above f32 rounding error in distant hit points.
#[inline]
fn shadow_offset(p: Vec3, shadow_bias: f32) -> f32 {
    shadow_bias * p.abs().max_element().max(1.0)
}

/// Contribution of a single light, before clamping.
fn light_contribution(
    light: &Light,
    hit: &HitRecord,
    view: Vec3,
    material: &Material,
    scene: &Scene,
    config: &RenderConfig,
) -> Color {
    let to_light = light.position - hit.p;
    let distance = to_light.length();
    if distance <= 0.0 || !distance.is_finite() {
        return Color::ZERO;
    }
    let l = to_light / distance;

    // Shadow ray starts just off the surface to avoid self-hits
    let shadow_origin = hit.p + hit.normal * shadow_offset(hit.p, config.shadow_bias);
    let shadow_ray = Ray::towards(shadow_origin, light.position);
    let shadow_distance = (light.position - shadow_origin).length();
    if occluded(&shadow_ray, scene, shadow_distance) {
        return Color::ZERO;
    }

    let angular = angular_attenuation(light, -l);
    if angular <= 0.0 {
        return Color::ZERO;
    }

    let radial = radial_attenuation(light, distance);
    if radial <= 0.0 {
        return Color::ZERO;
    }

    let diffuse = diffuse(hit.normal, l, light.color, material.diffuse_color);
    let specular = specular(
        hit.normal,
        l,
        view,
        light.color,
        material.specular_color,
        config.shininess,
    );

    radial * angular * (diffuse + specular)
}

/// Shade a hit point under every light in the scene.
///
/// `view` is the unit vector from the hit point back toward the eye.
/// The result is clamped to [0, 1] per channel.
pub fn shade(
    hit: &HitRecord,
    view: Vec3,
    material: &Material,
    scene: &Scene,
    config: &RenderConfig,
) -> Color {
    let mut color = Color::ZERO;

    for object in scene {
        if let Object::Light(light) = object {
            color += light_contribution(light, hit, view, material, scene, config);
        }
    }

    clamp_color(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use beam_core::{CameraSpec, Sphere};
    use beam_math::Interval;

    use crate::{intersect::nearest_hit, Camera};

    fn hit_at_origin_facing_z() -> HitRecord {
        HitRecord {
            p: Vec3::ZERO,
            normal: Vec3::Z,
            t: 1.0,
            index: 0,
        }
    }

    fn white_material() -> Material {
        Material::new(Color::ONE, Color::ZERO)
    }

    #[test]
    fn test_radial_attenuation() {
        let light = Light::point(Vec3::ZERO, Color::ONE).with_radial(1.0, 0.0, 0.0);
        assert_eq!(radial_attenuation(&light, 10.0), 1.0);

        let light = light.with_radial(0.0, 0.0, 1.0);
        assert!((radial_attenuation(&light, 2.0) - 0.25).abs() < 1e-6);

        let light = light.with_radial(1.0, 1.0, 1.0);
        assert!((radial_attenuation(&light, 1.0) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_radial_zero_denominator_is_dark() {
        let light = Light::point(Vec3::ZERO, Color::ONE).with_radial(0.0, 0.0, 0.0);
        assert_eq!(radial_attenuation(&light, 3.0), 0.0);

        let light = light.with_radial(-1.0, 0.0, 0.0);
        assert_eq!(radial_attenuation(&light, 3.0), 0.0);
    }

    #[test]
    fn test_angular_attenuation_omni() {
        let light = Light::point(Vec3::ZERO, Color::ONE);
        assert_eq!(angular_attenuation(&light, Vec3::X), 1.0);
        assert_eq!(angular_attenuation(&light, Vec3::NEG_Y), 1.0);
    }

    #[test]
    fn test_angular_attenuation_cone() {
        let light = Light::spot(Vec3::ZERO, Color::ONE, Vec3::NEG_Y, 30.0, 2.0);

        // Along the axis
        assert!((angular_attenuation(&light, Vec3::NEG_Y) - 1.0).abs() < 1e-6);

        // 20 degrees off axis: inside, cos^2
        let inside = Vec3::new(20f32.to_radians().sin(), -20f32.to_radians().cos(), 0.0);
        let expected = 20f32.to_radians().cos().powf(2.0);
        assert!((angular_attenuation(&light, inside) - expected).abs() < 1e-5);

        // 45 degrees off axis: outside
        let outside = Vec3::new(1.0, -1.0, 0.0).normalize();
        assert_eq!(angular_attenuation(&light, outside), 0.0);
    }

    #[test]
    fn test_angular_attenuation_zero_aim() {
        let light = Light::spot(Vec3::ZERO, Color::ONE, Vec3::ZERO, 30.0, 1.0);
        assert_eq!(angular_attenuation(&light, Vec3::NEG_Y), 0.0);
    }

    #[test]
    fn test_diffuse_head_on() {
        let scene = Scene::from_objects(vec![Object::Light(Light::point(
            Vec3::new(0.0, 0.0, 2.0),
            Color::new(0.5, 0.5, 0.5),
        ))])
        .unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &Material::new(Color::new(1.0, 0.5, 0.0), Color::ZERO),
            &scene,
            &RenderConfig::default(),
        );
        assert!((color - Color::new(0.5, 0.25, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_light_behind_surface() {
        let scene = Scene::from_objects(vec![Object::Light(Light::point(
            Vec3::new(0.0, 0.0, -2.0),
            Color::ONE,
        ))])
        .unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &Material::new(Color::ONE, Color::ONE),
            &scene,
            &RenderConfig::default(),
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_specular_highlight() {
        // Light and viewer both along the normal: perfect mirror direction
        let scene = Scene::from_objects(vec![Object::Light(Light::point(
            Vec3::new(0.0, 0.0, 3.0),
            Color::ONE,
        ))])
        .unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &Material::new(Color::ZERO, Color::new(0.0, 0.0, 0.75)),
            &scene,
            &RenderConfig::default(),
        );
        assert!((color.z - 0.75).abs() < 1e-5);
        assert_eq!(color.x, 0.0);

        // Viewer well away from the mirror direction sees almost nothing
        let oblique = Vec3::new(1.0, 0.0, 0.2).normalize();
        let color = shade(
            &hit_at_origin_facing_z(),
            oblique,
            &Material::new(Color::ZERO, Color::ONE),
            &scene,
            &RenderConfig::default(),
        );
        assert!(color.z < 1e-3);
    }

    #[test]
    fn test_omni_light_ignores_direction() {
        let material = Material::new(Color::new(0.8, 0.3, 0.1), Color::new(0.5, 0.5, 0.5));
        let view = Vec3::new(0.2, 0.1, 1.0).normalize();
        let config = RenderConfig::default();

        let render_with = |direction: Vec3| {
            let mut light = Light::point(Vec3::new(1.0, 2.0, 3.0), Color::ONE).with_radial(1.0, 0.1, 0.01);
            light.direction = direction;
            let scene = Scene::from_objects(vec![Object::Light(light)]).unwrap();
            shade(&hit_at_origin_facing_z(), view, &material, &scene, &config)
        };

        let reference = render_with(Vec3::ZERO);
        for direction in [Vec3::X, Vec3::NEG_Z, Vec3::new(3.0, -1.0, 7.0)] {
            assert_eq!(render_with(direction), reference);
        }
        assert!(reference.length() > 0.0);
    }

    #[test]
    fn test_blocked_light_contributes_nothing() {
        let light = Light::point(Vec3::new(0.0, 0.0, 10.0), Color::ONE);
        let blocker = Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, white_material()));

        let lit = Scene::from_objects(vec![Object::Light(light)]).unwrap();
        let blocked = Scene::from_objects(vec![blocker, Object::Light(light)]).unwrap();

        let material = Material::new(Color::ONE, Color::ONE);
        let config = RenderConfig::default();
        let hit = hit_at_origin_facing_z();

        assert!(shade(&hit, Vec3::Z, &material, &lit, &config).length() > 0.0);
        assert_eq!(shade(&hit, Vec3::Z, &material, &blocked, &config), Color::ZERO);
    }

    #[test]
    fn test_object_beyond_light_does_not_shadow() {
        let light = Light::point(Vec3::new(0.0, 0.0, 2.0), Color::ONE);
        let beyond = Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 6.0), 1.0, white_material()));
        let scene = Scene::from_objects(vec![beyond, Object::Light(light)]).unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &white_material(),
            &scene,
            &RenderConfig::default(),
        );
        assert!((color - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_output_is_clamped() {
        let scene = Scene::from_objects(vec![
            Object::Light(Light::point(Vec3::new(0.0, 0.0, 1.0), Color::splat(5.0))),
            Object::Light(Light::point(Vec3::new(0.0, 1.0, 1.0), Color::splat(5.0))),
        ])
        .unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &Material::new(Color::new(1.0, 0.5, 0.0), Color::ONE),
            &scene,
            &RenderConfig::default(),
        );
        assert_eq!(color.x, 1.0);
        assert_eq!(color.y, 1.0);
        assert!(color.z >= 0.0 && color.z <= 1.0);
    }

    #[test]
    fn test_shadow_offset_scales_with_position() {
        assert_eq!(shadow_offset(Vec3::ZERO, 1e-4), 1e-4);
        assert_eq!(shadow_offset(Vec3::new(0.5, -0.5, 0.0), 1e-4), 1e-4);
        assert!((shadow_offset(Vec3::new(10.0, -2000.0, 3.0), 1e-4) - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_distant_sphere_does_not_shadow_itself() {
        // Light at the eye: every visible point on the sphere faces it
        let scene = Scene::from_objects(vec![
            Object::Camera(CameraSpec::new(2.0, 2.0)),
            Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, -2000.0), 400.0, white_material())),
            Object::Light(Light::point(Vec3::ZERO, Color::ONE)),
        ])
        .unwrap();
        let config = RenderConfig::default();
        let camera = Camera::from_scene(&scene, 64, 64);

        let mut hits = 0;
        for y in 0..64 {
            for x in 0..64 {
                let ray = camera.get_ray(x, y);
                let Some(hit) = nearest_hit(&ray, &scene, Interval::POSITIVE) else {
                    continue;
                };
                hits += 1;
                let color = shade(&hit, -ray.direction(), &white_material(), &scene, &config);
                assert!(color.length() > 0.0, "pixel ({}, {}) is in shadow", x, y);
            }
        }
        assert!(hits > 0);
    }

    #[test]
    fn test_spotlight_aimed_at_point() {
        let light = Light::spot(Vec3::new(0.0, 0.0, 2.0), Color::ONE, Vec3::NEG_Z, 20.0, 1.0);
        let scene = Scene::from_objects(vec![Object::Light(light)]).unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &white_material(),
            &scene,
            &RenderConfig::default(),
        );
        assert!((color - Color::ONE).length() < 1e-5);
    }

    #[test]
    fn test_spotlight_aimed_away_from_point() {
        let light = Light::spot(Vec3::new(0.0, 0.0, 2.0), Color::ONE, Vec3::Z, 20.0, 1.0);
        let scene = Scene::from_objects(vec![Object::Light(light)]).unwrap();

        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &white_material(),
            &scene,
            &RenderConfig::default(),
        );
        assert_eq!(color, Color::ZERO);
    }

    #[test]
    fn test_no_lights_is_black() {
        let color = shade(
            &hit_at_origin_facing_z(),
            Vec3::Z,
            &white_material(),
            &Scene::new(),
            &RenderConfig::default(),
        );
        assert_eq!(color, Color::ZERO);
    }
}
