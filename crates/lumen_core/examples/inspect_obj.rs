//! Example: Load and inspect an OBJ file.
//!
//! Run with: cargo run --example inspect_obj -- path/to/mesh.obj

use std::env;

use lumen_core::{load_obj, CullMode, Scene};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_obj <path-to-obj-file>");
        println!("\nExample:");
        println!("  cargo run --example inspect_obj -- path/to/mesh.obj");
        return;
    }

    let path = &args[1];
    println!("Loading OBJ file: {}", path);

    let obj = match load_obj(path) {
        Ok(obj) => obj,
        Err(e) => {
            eprintln!("Error loading OBJ: {}", e);
            std::process::exit(1);
        }
    };

    let mesh = match obj.clone().into_mesh(CullMode::BackFaceCulling) {
        Ok(mesh) => mesh,
        Err(e) => {
            eprintln!("Invalid mesh: {}", e);
            std::process::exit(1);
        }
    };

    let bounds = mesh.local_bounds();
    let degenerate = mesh.normals().iter().filter(|n| n.length_squared() == 0.0).count();

    println!("\n=== Mesh ===");
    println!("Vertices: {}", mesh.vertex_count());
    println!("Triangles: {}", mesh.triangle_count());
    println!("Degenerate faces: {}", degenerate);
    println!(
        "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
        bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
    );

    match Scene::bunny(obj) {
        Ok(scene) => {
            let world = scene.meshes[0].world_bounds();
            println!("\n=== Scene: {} ===", scene.name);
            println!("Primitives: {}", scene.primitive_count());
            println!("Total triangles: {}", scene.triangle_count());
            println!(
                "Mesh world bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                world.min.x, world.min.y, world.min.z, world.max.x, world.max.y, world.max.z
            );
        }
        Err(e) => eprintln!("Error building scene: {}", e),
    }
}
