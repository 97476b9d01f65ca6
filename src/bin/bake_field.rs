//! Build a grass field headlessly and report on it.
//!
//! Usage: cargo run --release --bin bake_field -- [--config field.json]
//!        [--preset hills] [--frames 120] [--dt 0.016] [--out blades.json]

use std::path::PathBuf;
use std::time::Instant;

use meadow::core::{logging, Error, Result};
use meadow::grass::{GrassConfig, GrassField};

struct Args {
    config: Option<PathBuf>,
    preset: Option<String>,
    frames: u32,
    dt: f32,
    out: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let value = |flag: &str| -> Option<&String> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
    };

    let frames = match value("--frames") {
        Some(v) => v
            .parse()
            .map_err(|_| Error::Config(format!("--frames expects an integer, got '{}'", v)))?,
        None => 120,
    };
    let dt = match value("--dt") {
        Some(v) => v
            .parse()
            .map_err(|_| Error::Config(format!("--dt expects seconds, got '{}'", v)))?,
        None => 1.0 / 60.0,
    };

    Ok(Args {
        config: value("--config").map(PathBuf::from),
        preset: value("--preset").cloned(),
        frames,
        dt,
        out: value("--out").map(PathBuf::from),
    })
}

fn run() -> Result<()> {
    let args = parse_args()?;

    let config = match (&args.config, args.preset.as_deref()) {
        (Some(path), _) => GrassConfig::load(path)?,
        (None, Some("hills")) => GrassConfig::rolling_hills(),
        (None, Some(other)) => {
            return Err(Error::Config(format!("unknown preset '{}', expected 'hills'", other)));
        }
        (None, None) => GrassConfig::default(),
    };

    let mut field = GrassField::new(config)?;
    let mesh = field.terrain_mesh();
    println!("=== Grass field ===");
    println!("Blades:          {}", field.transforms().len());
    println!("Terrain verts:   {}", mesh.vertex_count());
    println!("Terrain tris:    {}", mesh.triangle_count());
    println!("Height range:    [{:.3}, {:.3}]", mesh.aabb_min[1], mesh.aabb_max[1]);
    println!("Terrain color:   {:?}", field.terrain_color());

    let start = Instant::now();
    let mut max_sway = 0.0_f32;
    for _ in 0..args.frames {
        field.update(args.dt);
        if let (Some(tip), Some(t)) = (field.blade_tip(0), field.transforms().first()) {
            let rest = t.to_mat4().transform_point3(glam::Vec3::Y);
            max_sway = max_sway.max((tip - rest).length());
        }
    }
    log::info!(
        "Simulated {} frames ({:.2}s of wind) in {:.2}ms",
        args.frames,
        field.wind().time(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    println!("Max tip sway:    {:.4}", max_sway);

    if let Some(out) = &args.out {
        let json = serde_json::to_string(field.transforms())?;
        std::fs::write(out, json)?;
        println!("Wrote {} transforms to {}", field.transforms().len(), out.display());
    }

    Ok(())
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
