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

//! Deferred scene requests
//!
//! The command queue is the only channel through which entity code running
//! in the parallel phase may affect the live sequence. Requests recorded
//! during frame `F` join the scene's pending queues at the start of frame
//! `F + 1` and take effect at that frame's merge points.

use std::fmt;

use parking_lot::Mutex;

use crate::game_object::{GameObject, GameObjectId};

/// Deferred request against the live sequence
pub enum SceneCommand {
    /// Add a freshly built object at the next add-merge point
    Add(GameObject),

    /// Remove an object by identity at the next remove-merge point
    Remove(GameObjectId),
}

impl fmt::Debug for SceneCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneCommand::Add(object) => f.debug_tuple("Add").field(&object.id()).finish(),
            SceneCommand::Remove(id) => f.debug_tuple("Remove").field(id).finish(),
        }
    }
}

/// Thread-safe queue of deferred requests, shared with worker tasks
/// through [`UpdateContext`](crate::context::UpdateContext).
#[derive(Default)]
pub struct CommandQueue {
    queue: Mutex<Vec<SceneCommand>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an object for addition; it becomes live, queryable and
    /// initialized no earlier than the next frame.
    pub fn add_game_object(&self, object: GameObject) {
        self.queue.lock().push(SceneCommand::Add(object));
    }

    /// Queue a removal request. Idempotent; removing an id that is not
    /// (or no longer) live is a no-op.
    pub fn remove_game_object(&self, id: GameObjectId) {
        self.queue.lock().push(SceneCommand::Remove(id));
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// Take every queued request, leaving the queue empty
    pub(crate) fn drain(&self) -> Vec<SceneCommand> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub(crate) fn clear(&self) {
        self.queue.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_records_requests() {
        let queue = CommandQueue::new();
        assert!(queue.is_empty());

        let object = GameObject::new("Spawned");
        let id = object.id();
        queue.add_game_object(object);
        queue.remove_game_object(id);

        assert_eq!(queue.len(), 2);
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(matches!(drained[0], SceneCommand::Add(_)));
        assert!(matches!(drained[1], SceneCommand::Remove(removed) if removed == id));
    }

    #[test]
    fn test_clear_discards_requests() {
        let queue = CommandQueue::new();
        queue.add_game_object(GameObject::new("Spawned"));
        queue.clear();
        assert!(queue.is_empty());
    }
}
