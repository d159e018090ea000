//! Example: Load and inspect a JSON scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/spheres.json

use std::env;

use beam_core::{load_scene, Object};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-json-file>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/spheres.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n- NUMBER OF OBJECTS: {} -\n", scene.len());
            for object in &scene {
                println!("{}\n", object);
            }

            println!("--- Summary ---");
            println!("Surfaces: {}", scene.surface_count());
            println!("Lights: {}", scene.lights().count());
            println!(
                "Empty records: {}",
                scene.iter().filter(|o| matches!(o, Object::Empty)).count()
            );
            match scene.camera() {
                Some(camera) => println!("Camera: {} x {}", camera.width, camera.height),
                None => println!("Camera: none (renderer falls back to its default)"),
            }
        }
        Err(e) => {
            eprintln!("Error loading scene file: {}", e);
        }
    }
}
