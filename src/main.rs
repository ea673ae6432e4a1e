mod config;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use strata_geom::Vec3;
use strata_render_headless::{HeadlessPhysics, HeadlessRenderer};
use strata_runtime::ChunkStreamer;
use strata_world::{World, WorldGenMode};

use crate::config::{AppConfig, load_config_from_path};

/// Altitude of the focus path in normal terrain.
const FOCUS_Y: f32 = 64.0;

#[derive(Parser, Debug)]
#[command(name = "strata", about = "Streams voxel terrain chunks around a moving focus point")]
struct Args {
    /// TOML file with [terrain] and [stream] sections.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Terrain seed; overrides the config file.
    #[arg(long)]
    seed: Option<i32>,
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// Streaming radius in chunks.
    #[arg(long)]
    render_distance: Option<i32>,
    /// Chunk loads per tick.
    #[arg(long)]
    budget: Option<usize>,
    /// Use flat terrain with its surface at this height.
    #[arg(long)]
    flat: Option<f32>,
    /// Focus travel along +x per tick, in world units.
    #[arg(long, default_value_t = 0.5)]
    speed: f32,
    /// Skip collision bodies for loaded chunks.
    #[arg(long)]
    no_collision: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut cfg = match &args.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            load_config_from_path(path)?
        }
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.terrain.seed = seed;
    }
    if let Some(r) = args.render_distance {
        cfg.stream.render_distance = r;
    }
    if let Some(b) = args.budget {
        cfg.stream.load_budget = b;
    }
    if args.no_collision {
        cfg.stream.collision = false;
    }
    cfg.validate()?;

    let mode = match args.flat {
        Some(surface_y) => WorldGenMode::Flat { surface_y },
        None => cfg.terrain.generation.world_mode(),
    };
    let world = World::with_params(cfg.terrain.seed, mode, cfg.stream.chunk_size, cfg.world_params());
    log::info!(
        "world seed={} mode={:?} chunk_size={}",
        world.seed,
        world.mode,
        world.chunk_size
    );

    let mut streamer = ChunkStreamer::new(world, cfg.stream.to_stream_config());
    let mut renderer = HeadlessRenderer::new();
    let mut physics = HeadlessPhysics::new();

    let focus_y = match mode {
        WorldGenMode::Flat { surface_y } => surface_y + 2.0,
        WorldGenMode::Normal => FOCUS_Y,
    };
    let mut focus = Vec3::new(0.0, focus_y, 0.0);
    let mut converged_at = None;
    for t in 0..args.ticks {
        let report = streamer.tick(focus, &mut renderer, &mut physics);
        streamer.render_chunks(&mut renderer);
        if report.is_idle() && converged_at.is_none() {
            converged_at = Some(t);
            log::info!(target: "stream", "converged around {} after {} ticks", report.center, t);
        } else if !report.is_idle() {
            converged_at = None;
        }
        if t % 100 == 0 {
            log::info!(
                target: "stream",
                "tick {} center={} loaded={} pending={} meshes={} bodies={}",
                t,
                report.center,
                streamer.loaded_count(),
                report.pending,
                renderer.live_meshes(),
                physics.active_count()
            );
        }
        focus += Vec3::new(args.speed, 0.0, 0.0);
    }

    let stats = streamer.stats();
    let cache = streamer.cache_stats();
    log::info!(
        "done: ticks={} loads={} unloads={} empty={} render_failures={} physics_failures={}",
        stats.ticks,
        stats.loads,
        stats.unloads,
        stats.empty_chunks,
        stats.render_failures,
        stats.physics_failures
    );
    log::info!(
        "density cache: entries={} hits={} misses={}; triangles resident={} draws={}",
        cache.entries,
        cache.hits,
        cache.misses,
        renderer.total_triangles(),
        renderer.draw_calls
    );
    streamer.unload_all(&mut renderer, &mut physics);
    Ok(())
}
