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

//! Component trait
//!
//! Components are capability units attached to game objects. Each concrete
//! component type may be attached at most once per object; the concrete
//! `TypeId` is the attachment key.

use std::any::Any;

use crate::context::{RenderContext, UpdateContext};
use crate::error::Result;

/// A capability unit owned by exactly one game object.
///
/// Lifecycle: `initialize` runs once before the owning object's first
/// update; `update` runs every frame the object is active (possibly on a
/// worker thread); `render` runs sequentially on the calling thread and
/// must not mutate simulation state, which the `&self` receiver enforces.
pub trait Component: Any + Send {
    /// One-time setup, called before the first `update`.
    fn initialize(&mut self) {}

    /// Per-frame state advance. Frame time, input and the deferred
    /// command queue are reached through the context.
    fn update(&mut self, _ctx: &UpdateContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Per-frame draw pass.
    fn render(&self, _ctx: &mut RenderContext<'_>) {}

    /// Downcast to Any
    fn as_any(&self) -> &dyn Any;

    /// Downcast to mutable Any
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    struct Marker;

    impl Component for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_type_identity_through_trait_object() {
        let marker = Marker;
        let boxed: Box<dyn Component> = Box::new(marker);
        assert_eq!(boxed.as_any().type_id(), TypeId::of::<Marker>());
        assert!(boxed.as_any().downcast_ref::<Marker>().is_some());
    }
}
