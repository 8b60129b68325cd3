use std::path::Path;

use anyhow::{Context, Result};

use crate::batch::{SpriteBatch, Surface};
use crate::config::StageConfig;
use crate::content::{ContentManager, ContextHandle, ContextQueue};
use crate::coords::Resolution;
use crate::error::ActorError;
use crate::input::{InputEvent, InputFrame, InputState};
use crate::paint::Color;
use crate::time::GameTime;

use super::app::{ActorControl, FrameActor};
use super::ctx::{InitCtx, UpdateCtx};
use super::registry::{ActorRegistry, ActorSpec};

struct ActiveActor {
    spec: ActorSpec,
    actor: Box<dyn FrameActor>,
}

/// Summary of one `Stage::frame` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    /// Whether `update` ran (false while paused or with no actor).
    pub updated: bool,
    pub sprites: usize,
    pub clear: Option<Color>,
    pub control: ActorControl,
}

/// Hosts one active `FrameActor` and drives it frame by frame.
///
/// The stage lives on the context thread. Other threads reach it only through
/// a [`ContextHandle`]; queued jobs run at the start of the next frame.
pub struct Stage {
    resolution: Resolution,
    content: ContentManager,
    registry: ActorRegistry,

    input: InputState,
    input_frame: InputFrame,

    active: Option<ActiveActor>,
    batch: SpriteBatch,
    surface: Surface,

    queue: ContextQueue<Stage>,
    paused: bool,
    exit_requested: bool,
    swaps: u64,
    /// Manifest the stage was built from, for spotting edits a reload cannot apply.
    manifest: Option<StageConfig>,
}

impl Stage {
    pub fn new(resolution: Resolution, content: ContentManager, registry: ActorRegistry) -> Self {
        Self {
            resolution,
            content,
            registry,
            input: InputState::default(),
            input_frame: InputFrame::default(),
            active: None,
            batch: SpriteBatch::new(),
            surface: Surface::new(),
            queue: ContextQueue::new(),
            paused: false,
            exit_requested: false,
            swaps: 0,
            manifest: None,
        }
    }

    /// Builds a stage from a manifest and loads its actor.
    pub fn from_config(config: &StageConfig, registry: ActorRegistry) -> Result<Self, ActorError> {
        let content = ContentManager::new(&config.content_root);
        let mut stage = Self::new(config.resolution, content, registry);
        stage.load_actor(config.actor.clone())?;
        stage.manifest = Some(config.clone());
        Ok(stage)
    }

    pub fn content_mut(&mut self) -> &mut ContentManager {
        &mut self.content
    }

    /// Sprites recorded by the last frame.
    pub fn batch(&self) -> &SpriteBatch {
        &self.batch
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn actor(&self) -> Option<&dyn FrameActor> {
        self.active.as_ref().map(|a| a.actor.as_ref())
    }

    pub fn active_spec(&self) -> Option<&ActorSpec> {
        self.active.as_ref().map(|a| &a.spec)
    }

    /// Number of successful actor swaps so far.
    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn context_handle(&self) -> ContextHandle<Stage> {
        self.queue.handle()
    }

    /// Builds and initializes the actor described by `spec`, then swaps it in.
    ///
    /// On failure the currently active actor keeps running.
    pub fn load_actor(&mut self, spec: ActorSpec) -> Result<(), ActorError> {
        let result = self.registry.create(&spec).and_then(|mut actor| {
            let mut ctx = InitCtx { content: &mut self.content, resolution: self.resolution };
            actor.initialize(&mut ctx)?;
            Ok(actor)
        });

        let actor = match result {
            Ok(actor) => actor,
            Err(err) => {
                log::error!("failed to load actor '{}': {err}", spec.name);
                return Err(err);
            }
        };

        match self.active.replace(ActiveActor { spec, actor }) {
            Some(previous) => log::info!(
                "swapped actor '{}' for '{}'",
                previous.spec.name,
                self.active_name().unwrap_or_default()
            ),
            None => log::info!("loaded actor '{}'", self.active_name().unwrap_or_default()),
        }
        self.swaps += 1;
        Ok(())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.actor.name())
    }

    /// Rebuilds the active actor from its spec with fresh state.
    pub fn reload(&mut self) -> Result<(), ActorError> {
        match self.active_spec().cloned() {
            Some(spec) => self.load_actor(spec),
            None => Ok(()),
        }
    }

    /// Re-reads `manifest` and swaps in the actor it names.
    ///
    /// A changed `content_root` only takes effect if the new actor loads;
    /// otherwise the previous root and its cached assets stay in place.
    pub fn reload_manifest(&mut self, manifest: &Path) -> Result<()> {
        let config = StageConfig::load(manifest)
            .with_context(|| format!("reloading {}", manifest.display()))?;
        self.warn_unapplied(&config);

        let previous = if config.content_root != self.content.root() {
            let fresh = ContentManager::new(&config.content_root);
            Some(std::mem::replace(&mut self.content, fresh))
        } else {
            None
        };

        if let Err(err) = self.load_actor(config.actor.clone()) {
            if let Some(previous) = previous {
                self.content = previous;
            }
            return Err(anyhow::Error::from(err).context(format!("reloading {}", manifest.display())));
        }

        if previous.is_some() {
            log::info!("content root changed to {}", config.content_root.display());
        }
        self.manifest = Some(config);
        Ok(())
    }

    /// Fields that only apply when the stage is built. Returns the names of
    /// the ones `config` changes, after logging each.
    fn warn_unapplied(&self, config: &StageConfig) -> Vec<&'static str> {
        let mut ignored = Vec::new();
        if config.resolution != self.resolution {
            log::warn!(
                "resolution change to {}x{} needs a restart; keeping {}x{}",
                config.resolution.width,
                config.resolution.height,
                self.resolution.width,
                self.resolution.height
            );
            ignored.push("resolution");
        }
        let Some(current) = &self.manifest else { return ignored };
        if config.fps != current.fps {
            log::warn!("fps change to {} needs a restart; keeping {}", config.fps, current.fps);
            ignored.push("fps");
        }
        if config.input != current.input {
            log::warn!("scripted input changed; the running timeline is not replaced");
            ignored.push("input");
        }
        ignored
    }

    /// Pauses, reloads from `manifest`, and restores the previous pause state.
    /// Errors are logged; the previous actor keeps running.
    pub fn hot_reload(&mut self, manifest: &Path) {
        let was_paused = self.paused;
        self.pause();

        match self.reload_manifest(manifest) {
            Ok(()) => log::info!("live reload of {} complete", manifest.display()),
            Err(err) => log::error!("live reload failed: {err:#}"),
        }

        if !was_paused {
            self.resume();
        }
    }

    /// Explicitly returns the active actor to its initial state.
    pub fn reset_actor(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.actor.reset();
            log::debug!("reset actor '{}'", active.spec.name);
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        self.input.apply_event(&mut self.input_frame, event);
    }

    /// Runs one frame: context jobs, `update`, `draw`, `draw2d`.
    pub fn frame(&mut self, time: GameTime) -> FrameReport {
        for job in self.queue.take_pending() {
            job(self);
        }

        let mut control = ActorControl::Continue;
        let mut updated = false;

        if let Some(active) = self.active.as_mut() {
            if !self.paused {
                let ctx = UpdateCtx {
                    input: &self.input,
                    input_frame: &self.input_frame,
                    time,
                    resolution: self.resolution,
                };
                control = active.actor.update(&ctx);
                updated = true;
            }
        }

        self.surface.reset();
        self.batch.begin();
        if let Some(active) = self.active.as_ref() {
            active.actor.draw(&mut self.surface, &time);
            active.actor.draw2d(&mut self.batch, &time);
        }
        self.batch.end();

        // Transitions only live for the frame that observed them.
        self.input_frame.clear();

        if control == ActorControl::Exit && !self.exit_requested {
            log::info!("actor requested exit at frame {}", time.frame_index);
            self.exit_requested = true;
        }

        log::trace!("frame {}: {} sprites", time.frame_index, self.batch.len());

        FrameReport {
            frame_index: time.frame_index,
            updated,
            sprites: self.batch.len(),
            clear: self.surface.clear_color(),
            control,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::batch::Sprite;
    use crate::content::Texture2D;
    use crate::coords::Vec2;
    use crate::input::Key;

    /// Moves right by `speed` px/s; Escape exits.
    struct Slider {
        speed: f32,
        x: f32,
        tex: Option<Arc<Texture2D>>,
    }

    impl FrameActor for Slider {
        fn name(&self) -> &str {
            "slider"
        }

        fn initialize(&mut self, ctx: &mut InitCtx<'_>) -> Result<(), ActorError> {
            self.tex = Some(ctx.content.load::<Texture2D>("slider.png")?);
            Ok(())
        }

        fn update(&mut self, ctx: &UpdateCtx<'_>) -> ActorControl {
            self.x += self.speed * ctx.dt();
            if ctx.key_typed(Key::Escape) { ActorControl::Exit } else { ActorControl::Continue }
        }

        fn draw(&self, surface: &mut Surface, _: &GameTime) {
            surface.clear(Color::BLACK);
        }

        fn draw2d(&self, batch: &mut SpriteBatch, _: &GameTime) {
            if let Some(tex) = &self.tex {
                batch.draw_sprite(Sprite::new(tex, Vec2::new(self.x, 0.0)));
            }
        }

        fn reset(&mut self) {
            self.x = 0.0;
        }
    }

    fn registry() -> ActorRegistry {
        let mut registry = ActorRegistry::new();
        registry.register("slider", |params| {
            let speed = params.positive_f32_or("speed", 10.0)?;
            Ok(Box::new(Slider { speed, x: 0.0, tex: None }) as Box<dyn FrameActor>)
        });
        registry
    }

    fn stage() -> Stage {
        let mut content = ContentManager::new("unused");
        content.insert("slider.png", Texture2D::blank("slider.png", 4, 4));
        Stage::new(Resolution::new(100, 100), content, registry())
    }

    fn second(frame_index: u64) -> GameTime {
        GameTime::new(Duration::from_secs(1), Duration::from_secs(frame_index + 1), frame_index)
    }

    fn slider_x(stage: &Stage) -> f32 {
        stage.batch().items()[0].sprite.position.x
    }

    #[test]
    fn runs_update_then_draw() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();

        let report = stage.frame(second(0));
        assert!(report.updated);
        assert_eq!(report.sprites, 1);
        assert_eq!(report.clear, Some(Color::BLACK));
        assert_eq!(slider_x(&stage), 10.0);
    }

    #[test]
    fn unknown_actor_is_rejected() {
        let mut stage = stage();
        let err = stage.load_actor(ActorSpec::new("ghost")).unwrap_err();
        assert!(matches!(err, ActorError::UnknownActor(name) if name == "ghost"));
        assert!(stage.actor().is_none());
    }

    #[test]
    fn failed_load_keeps_previous_actor() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();
        stage.frame(second(0));

        let bad = ActorSpec::new("slider").with_params(crate::core::ActorParams::new().with("speed", -1));
        assert!(matches!(stage.load_actor(bad), Err(ActorError::InvalidConfiguration(_))));

        stage.frame(second(1));
        assert_eq!(stage.active_name(), Some("slider"));
        assert_eq!(slider_x(&stage), 20.0);
        assert_eq!(stage.swaps(), 1);
    }

    #[test]
    fn missing_texture_fails_initialize() {
        let registry = registry();
        let mut stage = Stage::new(Resolution::new(10, 10), ContentManager::new("nowhere"), registry);
        let err = stage.load_actor(ActorSpec::new("slider")).unwrap_err();
        assert!(matches!(err, ActorError::ResourceLoad(_)));
    }

    #[test]
    fn reload_starts_from_fresh_state() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();
        stage.frame(second(0));
        stage.frame(second(1));

        stage.reload().unwrap();
        stage.frame(second(2));
        assert_eq!(slider_x(&stage), 10.0);
        assert_eq!(stage.swaps(), 2);
    }

    #[test]
    fn paused_stage_draws_without_updating() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();
        stage.pause();

        let report = stage.frame(second(0));
        assert!(!report.updated);
        assert_eq!(slider_x(&stage), 0.0);

        stage.resume();
        stage.frame(second(1));
        assert_eq!(slider_x(&stage), 10.0);
    }

    #[test]
    fn reset_is_explicit() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();
        stage.frame(second(0));
        stage.reset_actor();
        stage.frame(second(1));
        assert_eq!(slider_x(&stage), 10.0);
    }

    #[test]
    fn context_jobs_run_before_update() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();

        let handle = stage.context_handle();
        std::thread::spawn(move || {
            handle.ensure(|stage: &mut Stage| stage.pause());
        })
        .join()
        .unwrap();

        let report = stage.frame(second(0));
        assert!(!report.updated);
        assert!(stage.is_paused());
    }

    #[test]
    fn typed_escape_requests_exit_once() {
        let mut stage = stage();
        stage.load_actor(ActorSpec::new("slider")).unwrap();

        stage.apply_input(InputEvent::key(Key::Escape, true));
        assert_eq!(stage.frame(second(0)).control, ActorControl::Exit);
        assert!(stage.exit_requested());

        // Still held, but no longer "typed".
        assert_eq!(stage.frame(second(1)).control, ActorControl::Continue);
    }

    fn stage_in(root: &Path) -> Stage {
        let mut content = ContentManager::new(root);
        content.insert("slider.png", Texture2D::blank("slider.png", 4, 4));
        Stage::new(Resolution::new(100, 100), content, registry())
    }

    #[test]
    fn hot_reload_swaps_actor_from_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("stage.json");
        std::fs::write(&manifest, r#"{ "actor": { "name": "slider", "params": { "speed": 3 } } }"#).unwrap();

        let mut stage = stage_in(&dir.path().join("assets"));
        stage.hot_reload(&manifest);
        assert!(!stage.is_paused());
        stage.frame(second(0));
        assert_eq!(slider_x(&stage), 3.0);

        std::fs::write(&manifest, r#"{ "actor": { "name": "ghost" } }"#).unwrap();
        stage.hot_reload(&manifest);
        assert_eq!(stage.active_name(), Some("slider"));
    }

    #[test]
    fn failed_reload_keeps_previous_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        let manifest = dir.path().join("stage.json");

        let mut stage = stage_in(&assets);
        stage.load_actor(ActorSpec::new("slider")).unwrap();

        std::fs::write(&manifest, r#"{ "content_root": "elsewhere", "actor": { "name": "ghost" } }"#).unwrap();
        stage.hot_reload(&manifest);

        assert_eq!(stage.active_name(), Some("slider"));
        assert_eq!(stage.content_mut().root(), assets.as_path());
        // The seeded texture is still cached, so rebuilding the actor works.
        stage.reload().unwrap();
        assert_eq!(stage.swaps(), 2);
    }

    #[test]
    fn successful_reload_switches_content_root() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("stage.json");
        let mut stage = stage_in(&dir.path().join("assets"));
        stage.load_actor(ActorSpec::new("slider")).unwrap();
        std::fs::write(&manifest, r#"{ "content_root": "elsewhere", "actor": { "name": "slider" } }"#).unwrap();

        // Nothing exists under the new root, so the swap fails and the old root stays.
        assert!(stage.reload_manifest(&manifest).is_err());
        assert_eq!(stage.content_mut().root(), dir.path().join("assets").as_path());

        std::fs::create_dir_all(dir.path().join("elsewhere")).unwrap();
        image::RgbaImage::new(4, 4).save(dir.path().join("elsewhere/slider.png")).unwrap();
        stage.reload_manifest(&manifest).unwrap();
        assert_eq!(stage.content_mut().root(), dir.path().join("elsewhere").as_path());
        assert_eq!(stage.swaps(), 2);
    }

    #[test]
    fn startup_only_fields_are_reported_on_reload() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("stage.json");
        let mut stage = stage_in(&dir.path().join("assets"));
        std::fs::write(
            &manifest,
            r#"{ "resolution": { "width": 100, "height": 100 }, "actor": { "name": "slider" } }"#,
        )
        .unwrap();
        stage.reload_manifest(&manifest).unwrap();

        let edited = r#"{ "resolution": { "width": 640, "height": 480 }, "fps": 30, "actor": { "name": "slider" } }"#;
        std::fs::write(&manifest, edited).unwrap();
        let config = StageConfig::load(&manifest).unwrap();
        assert_eq!(stage.warn_unapplied(&config), ["resolution", "fps"]);

        // The actor still swaps; the stage keeps its original size.
        stage.reload_manifest(&manifest).unwrap();
        assert_eq!(stage.swaps(), 2);
        assert_eq!(stage.resolution, Resolution::new(100, 100));
    }
}
