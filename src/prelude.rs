//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use scene_engine::prelude::*;
//! ```

pub use crate::command::CommandQueue;
pub use crate::component::Component;
pub use crate::config::EngineConfig;
pub use crate::context::{FrameContext, RenderContext, UpdateContext};
pub use crate::engine::GameEngine;
pub use crate::error::{EngineError, Result};
pub use crate::game_object::{Behavior, BehaviorFn, GameObject, GameObjectId};
pub use crate::graphics::{Color, NullRenderer, RenderBackend, RenderSink};
pub use crate::input::{InputSource, MouseButton, NullInput};
pub use crate::profiling::{NullProfiler, ProfileSink, Profiler};
pub use crate::scene::Scene;
pub use crate::time::Time;
