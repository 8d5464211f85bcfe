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

//! Scene: the live object registry and per-frame driver
//!
//! The live sequence changes only at well-defined points inside
//! `update`: pending adds and removals merge at the start of the frame,
//! and the inactive sweep runs at the end. In between, the parallel phase
//! holds the sequence exclusively, so worker tasks can never observe or
//! cause a structural change mid-frame.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::command::{CommandQueue, SceneCommand};
use crate::component::Component;
use crate::context::{FrameContext, RenderContext, UpdateContext};
use crate::error::Result;
use crate::game_object::{GameObject, GameObjectId};
use crate::parallel::{WorkerPool, DEFAULT_BATCH_SIZE};

/// Counters exposed for diagnostics overlays and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStats {
    pub live: usize,
    pub pending_add: usize,
    pub pending_remove: usize,
    pub queued_commands: usize,
    pub elapsed: f32,
}

/// Live object registry, pending queues and the frame update/render cycle
pub struct Scene {
    name: String,
    objects: Vec<GameObject>,
    pending_add: Vec<GameObject>,
    pending_remove: Vec<GameObjectId>,
    commands: CommandQueue,
    pool: WorkerPool,
    batch_size: usize,
    initialized: bool,
    time: f32,
}

impl Scene {
    /// Create an empty scene with its own worker pool. The pool is sized
    /// by the host environment and reused for every frame of this scene's
    /// life.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            objects: Vec::new(),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            commands: CommandQueue::new(),
            pool: WorkerPool::new()?,
            batch_size: DEFAULT_BATCH_SIZE,
            initialized: false,
            time: 0.0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scene time in seconds, accumulated from frame deltas
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Tune the worker batch size. Fails fast on zero.
    pub fn set_batch_size(&mut self, batch_size: usize) {
        assert!(batch_size > 0, "batch size must be at least 1");
        self.batch_size = batch_size;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize every currently live object and mark the scene
    /// initialized; objects merged afterwards initialize at their merge
    /// point.
    pub fn initialize(&mut self) {
        for object in &mut self.objects {
            object.initialize();
        }
        self.initialized = true;
    }

    /// Enqueue an object for addition. It joins the live sequence at the
    /// next frame's add-merge point; until then it is invisible to
    /// queries, never initialized and never updated. Returns the id for
    /// later removal requests.
    pub fn add_game_object(&mut self, object: GameObject) -> GameObjectId {
        let id = object.id();
        self.pending_add.push(object);
        id
    }

    /// Enqueue a removal request by identity. Idempotent: duplicate
    /// requests, requests for inactive objects and requests for unknown
    /// ids are all no-ops. A request aimed at a still-pending addition
    /// cancels that addition outright.
    pub fn remove_game_object(&mut self, id: GameObjectId) {
        self.pending_remove.push(id);
    }

    /// Advance the scene by one frame.
    ///
    /// Order: drain deferred worker requests into the pending queues,
    /// merge adds, merge removals, run the batched parallel update behind
    /// its barrier, then sweep objects deactivated during the phase. On a
    /// batch failure the first observed failure is returned right after
    /// the barrier; the sweep is skipped and the driver is expected to
    /// skip the render phase for this frame.
    pub fn update(&mut self, dt: f32, frame: &mut FrameContext<'_>) -> Result<()> {
        self.time += dt;

        frame.profiler.begin("merge");
        self.merge_pending();
        frame.profiler.end("merge");

        frame.profiler.begin("parallel_update");
        let ctx = UpdateContext::new(dt, self.time, frame.input, &self.commands);
        let result = self.pool.run(&mut self.objects, self.batch_size, &ctx);
        frame.profiler.end("parallel_update");
        result?;

        frame.profiler.begin("sweep");
        self.objects.retain(GameObject::is_active);
        frame.profiler.end("sweep");
        Ok(())
    }

    fn merge_pending(&mut self) {
        // Requests recorded by worker tasks last frame reach the queues
        // first, so they merge at this frame's merge points like any
        // driver-side request.
        for command in self.commands.drain() {
            match command {
                SceneCommand::Add(object) => self.pending_add.push(object),
                SceneCommand::Remove(id) => self.pending_remove.push(id),
            }
        }

        // A removal aimed at a still-pending addition cancels it before
        // it ever becomes live; its initialize must never run.
        if !self.pending_remove.is_empty() && !self.pending_add.is_empty() {
            let doomed: FxHashSet<GameObjectId> = self.pending_remove.iter().copied().collect();
            self.pending_add.retain(|object| !doomed.contains(&object.id()));
        }

        let added = self.pending_add.len();
        for mut object in std::mem::take(&mut self.pending_add) {
            if self.initialized {
                object.initialize();
            }
            self.objects.push(object);
        }

        let mut removed = 0;
        for id in std::mem::take(&mut self.pending_remove) {
            if let Some(index) = self.objects.iter().position(|object| object.id() == id) {
                self.objects.remove(index);
                removed += 1;
            }
        }

        if added > 0 || removed > 0 {
            trace!(added, removed, live = self.objects.len(), "merged pending queues");
        }
    }

    /// Render every active object in live-sequence order, strictly
    /// sequentially on the calling thread. Backends require single-thread
    /// affinity, so no parallelism is permitted here.
    pub fn render(&self, ctx: &mut RenderContext<'_>) {
        for object in self.objects.iter().filter(|object| object.is_active()) {
            object.render(ctx);
        }
    }

    /// First live object with the given name, in insertion order
    pub fn find_game_object_by_name(&self, name: &str) -> Option<&GameObject> {
        self.objects.iter().find(|object| object.name() == name)
    }

    /// Mutable variant of [`find_game_object_by_name`](Self::find_game_object_by_name)
    pub fn find_game_object_by_name_mut(&mut self, name: &str) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|object| object.name() == name)
    }

    /// All live objects carrying a component of type `C`, in live order
    pub fn find_game_objects_by_component<C: Component>(&self) -> Vec<&GameObject> {
        self.objects
            .iter()
            .filter(|object| object.has_component::<C>())
            .collect()
    }

    /// All live `C` instances, in live order
    pub fn get_components<C: Component>(&self) -> Vec<&C> {
        self.objects
            .iter()
            .filter_map(|object| object.get_component::<C>())
            .collect()
    }

    /// Mutable variant of [`get_components`](Self::get_components)
    pub fn get_components_mut<C: Component>(&mut self) -> Vec<&mut C> {
        self.objects
            .iter_mut()
            .filter_map(|object| object.get_component_mut::<C>())
            .collect()
    }

    /// The live sequence, in insertion order
    pub fn game_objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Empty the live sequence, both pending queues and the deferred
    /// command queue; used on scene teardown.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
        self.commands.clear();
    }

    pub fn stats(&self) -> SceneStats {
        SceneStats {
            live: self.objects.len(),
            pending_add: self.pending_add.len(),
            pending_remove: self.pending_remove.len(),
            queued_commands: self.commands.len(),
            elapsed: self.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::game_object::BehaviorFn;
    use crate::input::NullInput;
    use crate::profiling::NullProfiler;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Probe {
        updates: Arc<AtomicUsize>,
        initializes: Arc<AtomicUsize>,
    }

    impl Probe {
        fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let updates = Arc::new(AtomicUsize::new(0));
            let initializes = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    updates: Arc::clone(&updates),
                    initializes: Arc::clone(&initializes),
                },
                updates,
                initializes,
            )
        }
    }

    impl Component for Probe {
        fn initialize(&mut self) {
            self.initializes.fetch_add(1, Ordering::SeqCst);
        }
        fn update(&mut self, _ctx: &UpdateContext<'_>) -> Result<()> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Explode;

    impl Component for Explode {
        fn update(&mut self, _ctx: &UpdateContext<'_>) -> Result<()> {
            Err(EngineError::custom("kaboom"))
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn tick(scene: &mut Scene) -> Result<()> {
        let input = NullInput;
        let mut profiler = NullProfiler;
        let mut frame = FrameContext::new(&input, &mut profiler);
        scene.update(0.016, &mut frame)
    }

    fn scene() -> Scene {
        let mut scene = Scene::new("test").unwrap();
        scene.initialize();
        scene
    }

    #[test]
    fn test_add_is_deferred_one_frame() {
        let mut scene = scene();
        let (probe, updates, initializes) = Probe::new();
        scene.add_game_object(GameObject::new("Player").with_component(probe));

        // Invisible until the next frame's merge point.
        assert!(scene.find_game_object_by_name("Player").is_none());
        assert_eq!(initializes.load(Ordering::SeqCst), 0);

        tick(&mut scene).unwrap();
        assert!(scene.find_game_object_by_name("Player").is_some());
        assert_eq!(initializes.load(Ordering::SeqCst), 1);
        assert_eq!(updates.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_cancels_pending_add() {
        let mut scene = scene();
        let (probe, updates, initializes) = Probe::new();
        let id = scene.add_game_object(GameObject::new("Ghost").with_component(probe));
        scene.remove_game_object(id);

        tick(&mut scene).unwrap();

        assert!(scene.find_game_object_by_name("Ghost").is_none());
        assert_eq!(initializes.load(Ordering::SeqCst), 0);
        assert_eq!(updates.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut scene = scene();
        let id = scene.add_game_object(GameObject::new("Enemy"));
        tick(&mut scene).unwrap();
        assert_eq!(scene.game_objects().len(), 1);

        scene.remove_game_object(id);
        scene.remove_game_object(id);
        tick(&mut scene).unwrap();
        assert!(scene.game_objects().is_empty());

        // Removing an already-removed id stays a no-op.
        scene.remove_game_object(id);
        tick(&mut scene).unwrap();
        assert!(scene.game_objects().is_empty());
    }

    #[test]
    fn test_self_destruction_is_swept_same_frame() {
        let mut scene = scene();
        scene.add_game_object(GameObject::new("Bullet").with_behavior(BehaviorFn(
            |object: &mut GameObject, _ctx: &UpdateContext<'_>| {
                object.destroy();
                Ok(())
            },
        )));

        tick(&mut scene).unwrap();
        assert!(scene.find_game_object_by_name("Bullet").is_none());
        assert!(scene.game_objects().is_empty());
    }

    #[test]
    fn test_worker_spawn_becomes_live_next_frame() {
        let mut scene = scene();
        scene.add_game_object(GameObject::new("Spawner").with_behavior(BehaviorFn(
            |object: &mut GameObject, ctx: &UpdateContext<'_>| {
                // Spawn exactly once.
                object.destroy();
                ctx.commands().add_game_object(GameObject::new("Child"));
                Ok(())
            },
        )));

        tick(&mut scene).unwrap(); // spawner goes live
        assert!(scene.find_game_object_by_name("Child").is_none());

        tick(&mut scene).unwrap(); // child merges
        assert!(scene.find_game_object_by_name("Child").is_some());
    }

    #[test]
    fn test_seventeen_objects_updated_exactly_once() {
        let mut scene = scene();
        scene.set_batch_size(8);
        let mut counters = Vec::new();
        for index in 0..17 {
            let (probe, updates, _) = Probe::new();
            counters.push(updates);
            scene.add_game_object(GameObject::new(format!("obj-{index}")).with_component(probe));
        }

        tick(&mut scene).unwrap();
        for counter in &counters {
            assert_eq!(counter.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn test_batch_failure_aborts_frame_before_sweep() {
        let mut scene = scene();
        scene.add_game_object(GameObject::new("Glitch").with_component(Explode));
        scene.add_game_object(GameObject::new("Doomed").with_behavior(BehaviorFn(
            |object: &mut GameObject, _ctx: &UpdateContext<'_>| {
                object.destroy();
                Ok(())
            },
        )));

        assert!(tick(&mut scene).is_err());
        // Sweep skipped: the deactivated object is still in the live
        // sequence until the next successful frame completes.
        assert_eq!(scene.game_objects().len(), 2);
    }

    #[test]
    fn test_name_lookup_prefers_insertion_order() {
        let mut scene = scene();
        let first = scene.add_game_object(GameObject::new("Enemy"));
        let _second = scene.add_game_object(GameObject::new("Enemy"));
        tick(&mut scene).unwrap();

        assert_eq!(
            scene.find_game_object_by_name("Enemy").map(|o| o.id()),
            Some(first)
        );
    }

    #[test]
    fn test_component_queries_follow_live_order() {
        let mut scene = scene();
        let (probe_a, _, _) = Probe::new();
        let (probe_b, _, _) = Probe::new();
        scene.add_game_object(GameObject::new("A").with_component(probe_a));
        scene.add_game_object(GameObject::new("B"));
        scene.add_game_object(GameObject::new("C").with_component(probe_b));
        tick(&mut scene).unwrap();

        let holders = scene.find_game_objects_by_component::<Probe>();
        assert_eq!(holders.len(), 2);
        assert_eq!(holders[0].name(), "A");
        assert_eq!(holders[1].name(), "C");
        assert_eq!(scene.get_components::<Probe>().len(), 2);
        assert_eq!(scene.get_components_mut::<Probe>().len(), 2);
    }

    #[test]
    fn test_elapsed_time_accumulates() {
        let mut scene = scene();
        tick(&mut scene).unwrap();
        tick(&mut scene).unwrap();
        assert!((scene.time() - 0.032).abs() < 1e-6);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut scene = scene();
        scene.add_game_object(GameObject::new("A"));
        tick(&mut scene).unwrap();
        scene.add_game_object(GameObject::new("B"));

        scene.clear();
        let stats = scene.stats();
        assert_eq!(stats.live, 0);
        assert_eq!(stats.pending_add, 0);
        assert_eq!(stats.pending_remove, 0);
        assert_eq!(stats.queued_commands, 0);
    }

    #[test]
    fn test_uninitialized_scene_defers_object_initialize() {
        let mut scene = Scene::new("lazy").unwrap();
        let (probe, _, initializes) = Probe::new();
        scene.add_game_object(GameObject::new("Player").with_component(probe));

        tick(&mut scene).unwrap();
        assert_eq!(initializes.load(Ordering::SeqCst), 0);

        scene.initialize();
        assert_eq!(initializes.load(Ordering::SeqCst), 1);
    }
}
