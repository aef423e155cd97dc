//! # redecs_demo
//!
//! Runs a small scene through the reducer loop: a floor and a spinning
//! marker drawn as solid shapes, and a row of walking heroes drawn as
//! animated atlas sprites. There is no window; each second the demo logs
//! what a GPU backend would have received.
//!
//! The hero atlas loads on a background task. The heroes are spawned by a
//! deferred continuation once it finishes, so the first ticks render only
//! the backdrop.

mod scene;
mod world;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use redecs_reducer::{Deferred, DeferredHandle, GameEffect, LoopConfig};
use redecs_render::{RenderContext, RenderQueue, TextureCache};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use world::DemoWorld;

const BUNDLED_ATLAS: &str = include_str!("../assets/hero.json");

#[derive(Parser)]
#[command(name = "redecs_demo", about = "Sprite batching demo for the reducer loop")]
struct Args {
    /// Number of ticks to run (0 runs until interrupted)
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Ticks per second
    #[arg(short = 'r', long, default_value_t = 60.0)]
    tick_rate: f64,

    /// TexturePacker JSON for the hero atlas (defaults to the bundled one)
    #[arg(short, long)]
    atlas: Option<PathBuf>,

    /// Number of heroes to spawn
    #[arg(short, long, default_value_t = 8)]
    sprites: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("redecs_demo=info".parse()?))
        .init();

    let args = Args::parse();
    let config = LoopConfig::new(args.tick_rate).with_max_ticks(args.ticks);
    config.validate()?;

    let cache = Arc::new(TextureCache::new());
    let queue = Arc::new(RenderQueue::new());
    let environment = RenderContext::new(Arc::clone(&cache), Arc::clone(&queue));

    let mut game = world::build_game(config, environment);
    info!(reducers = ?game.reducer_names(), "demo starting");

    game.apply_effect(scene::backdrop());

    let (handle, deferred) = Deferred::channel("load hero atlas");
    game.apply_effect(GameEffect::deferred(deferred));
    tokio::spawn(load_heroes(handle, Arc::clone(&cache), args.atlas, args.sprites));

    let mut interval = tokio::time::interval(config.tick_duration());
    let delta = config.tick_duration().as_secs_f64();
    let report_every = (config.tick_rate.round() as u64).max(1);

    loop {
        interval.tick().await;
        let report = game.tick(delta);
        let batches = queue.drain_sorted();

        if report.tick_id % report_every == 0 {
            let triangles: usize = batches.iter().map(|b| b.triangles.len()).sum();
            let textured = batches.iter().filter(|b| b.texture_id().is_some()).count();
            info!(
                tick_id = report.tick_id,
                entities = game.state().entities.len(),
                batches = batches.len(),
                textured,
                triangles,
                deferred_pending = report.deferred_pending,
                "frame"
            );
        }

        if config.max_ticks > 0 && report.tick_id >= config.max_ticks {
            break;
        }
    }

    info!(ticks = game.tick_id(), "demo finished");
    Ok(())
}

/// Load the hero atlas into `cache`, then resolve `handle` with the spawn
/// commands for the heroes.
///
/// A failed load leaves the scene without heroes.
async fn load_heroes(
    handle: DeferredHandle<DemoWorld>,
    cache: Arc<TextureCache>,
    path: Option<PathBuf>,
    count: usize,
) {
    let effect = match read_atlas(path).await {
        Some(json) => match cache.load_json(scene::HERO_TEXTURE, &json) {
            Ok(_) => scene::heroes(count),
            Err(e) => {
                warn!(%e, "failed to parse atlas");
                GameEffect::none()
            }
        },
        None => GameEffect::none(),
    };
    if !handle.resolve(effect) {
        warn!("game loop dropped the atlas continuation");
    }
}

/// The atlas document at `path`, or the bundled one. `None` if the file
/// cannot be read.
async fn read_atlas(path: Option<PathBuf>) -> Option<String> {
    let Some(path) = path else {
        return Some(BUNDLED_ATLAS.to_owned());
    };
    match tokio::fs::read_to_string(&path).await {
        Ok(json) => Some(json),
        Err(e) => {
            warn!(path = %path.display(), %e, "failed to read atlas");
            None
        }
    }
}
