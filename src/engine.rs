//! Frame driver
//!
//! Owns the render backend, the input source, the profiler and the frame
//! clock, and drives the current scene through the update → render cycle
//! at a capped frame rate. A failed update aborts that frame's render
//! phase; the failure is logged and the loop carries on.

use std::time::{Duration, Instant};

use tracing::{debug, error, warn};

use crate::config::EngineConfig;
use crate::context::{FrameContext, RenderContext};
use crate::error::Result;
use crate::graphics::RenderBackend;
use crate::input::InputSource;
use crate::profiling::{ProfileSink, Profiler};
use crate::scene::Scene;
use crate::time::Time;

/// Game engine: frame loop around one scene
pub struct GameEngine {
    config: EngineConfig,
    renderer: Box<dyn RenderBackend>,
    input: Box<dyn InputSource>,
    profiler: Profiler,
    time: Time,
    scene: Option<Scene>,
    running: bool,
}

impl GameEngine {
    pub fn new(
        config: EngineConfig,
        renderer: Box<dyn RenderBackend>,
        input: Box<dyn InputSource>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            renderer,
            input,
            profiler: Profiler::new(),
            time: Time::new(),
            scene: None,
            running: false,
        })
    }

    /// Install the scene to drive, applying the configured batch size.
    /// If the engine is already running the scene is initialized
    /// immediately.
    pub fn set_scene(&mut self, mut scene: Scene) {
        scene.set_batch_size(self.config.batch_size);
        if self.running && !scene.is_initialized() {
            scene.initialize();
        }
        self.scene = Some(scene);
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    pub fn input(&self) -> &dyn InputSource {
        &*self.input
    }

    pub fn time(&self) -> &Time {
        &self.time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the run loop to exit after the current frame
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Drive frames until stopped or the backend asks to close, sleeping
    /// toward the configured frame-rate cap. The scene is cleared on the
    /// way out.
    pub fn run(&mut self) {
        self.running = true;
        match &mut self.scene {
            Some(scene) => {
                if !scene.is_initialized() {
                    scene.initialize();
                    debug!(scene = scene.name(), "scene initialized");
                }
            }
            None => warn!("running without a scene"),
        }

        let target = Duration::from_secs_f32(1.0 / self.config.target_fps);
        while self.running && !self.renderer.should_close() {
            let frame_start = Instant::now();
            if let Err(failure) = self.frame() {
                error!(%failure, "frame aborted, render skipped");
            }
            if let Some(remaining) = target.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        debug!(frames = self.time.frame_count(), "run loop finished");
        if let Some(scene) = &mut self.scene {
            scene.clear();
        }
    }

    /// Advance exactly one frame: scene update, then the sequential
    /// render pass (only if the update succeeded), then backend event
    /// polling. Returns the update failure, if any, after the frame's
    /// bookkeeping completes.
    pub fn frame(&mut self) -> Result<()> {
        self.profiler.begin("frame");
        self.time.update();
        let dt = self.time.delta_seconds();

        let result = match &mut self.scene {
            Some(scene) => {
                let mut frame = FrameContext::new(&*self.input, &mut self.profiler);
                scene.update(dt, &mut frame)
            }
            None => Ok(()),
        };

        if result.is_ok() {
            self.profiler.begin("render");
            self.renderer.begin_frame();
            if let Some(scene) = &self.scene {
                let mut ctx = RenderContext::new(&mut *self.renderer);
                scene.render(&mut ctx);
            }
            self.renderer.end_frame();
            self.profiler.end("render");
        }

        self.renderer.poll_events();
        if self.renderer.should_close() {
            self.running = false;
        }

        self.profiler.end("frame");
        self.profiler.end_frame();
        result
    }
}
