mod cli;

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use stagehand_actors::builtin_registry;
use stagehand_engine::config::StageConfig;
use stagehand_engine::core::Stage;
use stagehand_engine::input::InputTimeline;
use stagehand_engine::logging::{init_logging, LoggingConfig};
use stagehand_engine::reload::ManifestWatcher;
use stagehand_engine::time::FrameClock;

use crate::cli::{PlayerArgs, USAGE};

fn main() -> Result<()> {
    let args = PlayerArgs::parse_from_env()?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    init_logging(match &args.log {
        Some(filter) => LoggingConfig::with_filter(filter.as_str()),
        None => LoggingConfig::default(),
    });

    let config = StageConfig::load(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest.display()))?;
    log::info!(
        "{}: {}x{} @ {} fps, actor '{}'",
        config.title,
        config.resolution.width,
        config.resolution.height,
        config.fps,
        config.actor.name
    );

    let mut stage = Stage::from_config(&config, builtin_registry()).context("loading initial actor")?;

    let _watcher = if config.live_reload && args.watch {
        match ManifestWatcher::spawn(&args.manifest, stage.context_handle()) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                log::warn!("live reload disabled: {err:#}");
                None
            }
        }
    } else {
        None
    };

    run(&mut stage, &config, &args);
    Ok(())
}

fn run(stage: &mut Stage, config: &StageConfig, args: &PlayerArgs) {
    let mut clock = if args.fixed_step { FrameClock::fixed_fps(config.fps) } else { FrameClock::new() };
    let budget = Duration::from_secs_f64(1.0 / f64::from(config.fps.max(1)));
    let mut timeline = InputTimeline::new(config.input.clone());

    let started = Instant::now();
    let mut frames = 0u64;
    let mut sprites = 0usize;

    loop {
        let frame_start = Instant::now();
        let time = clock.tick();

        for event in timeline.drain_due(time.frame_index) {
            stage.apply_input(event);
        }

        let report = stage.frame(time);
        frames += 1;
        sprites += report.sprites;

        if stage.exit_requested() {
            break;
        }
        if args.frames.is_some_and(|limit| frames >= limit) {
            break;
        }

        // Fixed-step runs go as fast as they can.
        if !clock.is_fixed() {
            if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    log::info!(
        "ran {frames} frames in {:.2?} ({} actor loads, {:.1} sprites/frame)",
        started.elapsed(),
        stage.swaps(),
        sprites as f64 / frames.max(1) as f64
    );
}
