// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scene Engine - entity/component scene runtime
//!
//! A frame loop over named game objects composed of pluggable components,
//! with batched parallel updates behind a per-frame barrier and strictly
//! sequential rendering. Structural changes to the live object set are
//! deferred to two per-frame merge points, so entity code running on
//! worker threads can never race the registry.

pub mod command;
pub mod component;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod game_object;
pub mod graphics;
pub mod input;
pub mod parallel;
pub mod prelude;
pub mod profiling;
pub mod scene;
pub mod time;

pub use command::*;
pub use component::*;
pub use config::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use game_object::*;
pub use graphics::*;
pub use input::*;
pub use parallel::*;
pub use profiling::*;
pub use scene::*;
pub use time::*;
