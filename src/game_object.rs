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

//! Game objects: named component containers with an active flag and an
//! optional per-object behavior hook.

use std::any::TypeId;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use crate::component::Component;
use crate::context::{RenderContext, UpdateContext};
use crate::error::Result;

/// Component slots kept inline before spilling to the heap
pub const MAX_INLINE_COMPONENTS: usize = 8;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique game object identifier
///
/// Allocated from a process-wide counter, never reused. Removal requests
/// are addressed by id so they stay valid while the object itself is owned
/// by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameObjectId(u64);

impl GameObjectId {
    fn next() -> Self {
        GameObjectId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GameObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-object custom behavior, layered in front of the default
/// component pass.
///
/// The update hook receives the owning object mutably, so it can read and
/// mutate the object's own components, deactivate it, or record deferred
/// scene requests through the context. It must not reach other live
/// objects; cross-object effects go through [`UpdateContext::commands`].
pub trait Behavior: Send {
    /// Runs before the components' update pass.
    fn update(&mut self, _object: &mut GameObject, _ctx: &UpdateContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Runs before the components' render pass.
    fn render(&self, _object: &GameObject, _ctx: &mut RenderContext<'_>) {}
}

/// Closure adapter for update-only behaviors
pub struct BehaviorFn<F>(pub F);

impl<F> Behavior for BehaviorFn<F>
where
    F: FnMut(&mut GameObject, &UpdateContext<'_>) -> Result<()> + Send,
{
    fn update(&mut self, object: &mut GameObject, ctx: &UpdateContext<'_>) -> Result<()> {
        (self.0)(object, ctx)
    }
}

/// An addressable, named container of components.
///
/// Holds at most one component instance per concrete type; attaching a
/// second instance of the same type replaces the first in place, keeping
/// its attachment position. Names need not be unique; identity is the id.
pub struct GameObject {
    id: GameObjectId,
    name: String,
    components: SmallVec<[Box<dyn Component>; MAX_INLINE_COMPONENTS]>,
    behavior: Option<Box<dyn Behavior>>,
    active: bool,
    initialized: bool,
}

impl GameObject {
    /// Create a new, active, component-less object
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: GameObjectId::next(),
            name: name.into(),
            components: SmallVec::new(),
            behavior: None,
            active: true,
            initialized: false,
        }
    }

    /// Builder-style component attachment
    pub fn with_component<C: Component>(mut self, component: C) -> Self {
        self.add_component(component);
        self
    }

    /// Builder-style behavior attachment
    pub fn with_behavior<B: Behavior + 'static>(mut self, behavior: B) -> Self {
        self.set_behavior(behavior);
        self
    }

    pub fn id(&self) -> GameObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the object for removal at the end of the current frame.
    /// Idempotent; the object stops updating and rendering immediately.
    pub fn destroy(&mut self) {
        self.active = false;
    }

    /// Install the custom behavior hook, replacing any prior one
    pub fn set_behavior<B: Behavior + 'static>(&mut self, behavior: B) {
        self.behavior = Some(Box::new(behavior));
    }

    /// Attach a component, keyed by its concrete type.
    ///
    /// A second instance of an already-attached type replaces the first in
    /// its original attachment position. Returns the stored instance.
    pub fn add_component<C: Component>(&mut self, component: C) -> &mut C {
        let key = TypeId::of::<C>();
        let mut boxed: Box<dyn Component> = Box::new(component);
        if self.initialized {
            boxed.initialize();
        }
        let slot = match self
            .components
            .iter()
            .position(|existing| existing.as_any().type_id() == key)
        {
            Some(index) => {
                self.components[index] = boxed;
                index
            }
            None => {
                self.components.push(boxed);
                self.components.len() - 1
            }
        };
        self.components[slot]
            .as_any_mut()
            .downcast_mut::<C>()
            .expect("slot holds the component just stored")
    }

    /// Attached instance of `C`, if any
    pub fn get_component<C: Component>(&self) -> Option<&C> {
        self.components
            .iter()
            .find_map(|component| component.as_any().downcast_ref::<C>())
    }

    /// Mutable attached instance of `C`, if any
    pub fn get_component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<C>())
    }

    pub fn has_component<C: Component>(&self) -> bool {
        let key = TypeId::of::<C>();
        self.components
            .iter()
            .any(|component| component.as_any().type_id() == key)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// One-time setup of all attached components, in attachment order.
    /// Safe to call more than once; only the first call runs.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        for component in &mut self.components {
            component.initialize();
        }
    }

    /// Per-frame update: the behavior hook first, then every component in
    /// attachment order. The first failure stops the pass and propagates.
    pub fn update(&mut self, ctx: &UpdateContext<'_>) -> Result<()> {
        if let Some(mut behavior) = self.behavior.take() {
            let result = behavior.update(self, ctx);
            if self.behavior.is_none() {
                self.behavior = Some(behavior);
            }
            result?;
        }
        for component in &mut self.components {
            component.update(ctx)?;
        }
        Ok(())
    }

    /// Per-frame draw pass: behavior hook first, then every component in
    /// attachment order. Never mutates simulation state.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        if let Some(behavior) = &self.behavior {
            behavior.render(self, ctx);
        }
        for component in &self.components {
            component.render(ctx);
        }
    }
}

// Manual impl: component boxes are not Debug.
impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("components", &self.components.len())
            .finish()
    }
}
