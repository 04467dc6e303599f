//! Headless renderer for the leaf background.
//!
//! Mounts a particle background on a fixed-size host, sweeps a synthetic
//! pointer in a circle, and writes each frame as a PNG.
//!
//! ```text
//! gauhatt <out_dir> [frames] [config.json]
//! ```

use std::error::Error;
use std::f32::consts::TAU;
use std::fs;
use std::path::PathBuf;

use gauhatt::prelude::*;

const WIDTH: u32 = 960;
const HEIGHT: u32 = 540;
const DEFAULT_FRAMES: u32 = 120;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(out_dir) = args.next().map(PathBuf::from) else {
        eprintln!("usage: gauhatt <out_dir> [frames] [config.json]");
        std::process::exit(2);
    };
    let frames = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_FRAMES,
    };
    let config = match args.next() {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    fs::create_dir_all(&out_dir)?;

    let mut host = Host::new(WIDTH, HEIGHT).with_fixed_delta(1.0 / 60.0);
    let background = ParticleBackground::mount(&mut host, config.field);
    log::info!(
        "rendering {} frames of {} leaves to {}",
        frames,
        background.field().particles().len(),
        out_dir.display()
    );

    let center = Vec2::new(WIDTH as f32, HEIGHT as f32) * 0.5;
    let radius = HEIGHT as f32 * 0.3;
    let mut surface = RasterSurface::new(WIDTH, HEIGHT);

    for i in 0..frames {
        let angle = i as f32 / frames.max(1) as f32 * TAU;
        host.pointer_moved(center + Vec2::from_angle(angle) * radius);
        host.frame(&mut surface);
        surface.save(out_dir.join(format!("frame_{:04}.png", i)))?;
    }

    background.unmount(&mut host);
    log::info!("done");
    Ok(())
}
