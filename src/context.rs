//! Frame contexts
//!
//! The driver owns the input source and the profiling sink and hands them
//! to the scene explicitly each frame; nothing in the runtime reaches for
//! global state. Worker tasks see only [`UpdateContext`], which is the
//! full set of things entity code may touch during the parallel phase.

use crate::command::CommandQueue;
use crate::graphics::RenderSink;
use crate::input::InputSource;
use crate::profiling::ProfileSink;

/// Driver-owned collaborators for one call to `Scene::update`
pub struct FrameContext<'a> {
    pub input: &'a dyn InputSource,
    pub profiler: &'a mut dyn ProfileSink,
}

impl<'a> FrameContext<'a> {
    pub fn new(input: &'a dyn InputSource, profiler: &'a mut dyn ProfileSink) -> Self {
        Self { input, profiler }
    }
}

/// What entity code may reach during the parallel update phase: frame
/// time, input queries and the deferred command queue. Deliberately no
/// access to the live sequence.
pub struct UpdateContext<'a> {
    dt: f32,
    elapsed: f32,
    input: &'a dyn InputSource,
    commands: &'a CommandQueue,
}

impl<'a> UpdateContext<'a> {
    pub fn new(
        dt: f32,
        elapsed: f32,
        input: &'a dyn InputSource,
        commands: &'a CommandQueue,
    ) -> Self {
        Self {
            dt,
            elapsed,
            input,
            commands,
        }
    }

    /// Seconds since the previous frame
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Scene time in seconds, accumulated across frames
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn input(&self) -> &'a dyn InputSource {
        self.input
    }

    /// Deferred add/remove requests, merged at the next frame's
    /// merge points
    pub fn commands(&self) -> &'a CommandQueue {
        self.commands
    }
}

/// Render-phase view: the draw-call sink only
pub struct RenderContext<'a> {
    sink: &'a mut dyn RenderSink,
}

impl<'a> RenderContext<'a> {
    pub fn new(sink: &'a mut dyn RenderSink) -> Self {
        Self { sink }
    }

    pub fn sink(&mut self) -> &mut dyn RenderSink {
        &mut *self.sink
    }

    pub fn width(&self) -> u32 {
        self.sink.width()
    }

    pub fn height(&self) -> u32 {
        self.sink.height()
    }
}
