//! Pipe queue backed by a slot pool
//!
//! Live pipes are kept in spawn order (oldest first, which is also left to
//! right on screen). Pipes that scroll off the left edge are overwritten in
//! place when the next one spawns, so the pool stops growing once the
//! screen is full.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::pipe::PipePair;

/// Stable handle to a pool slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObstacleQueue {
    slots: Vec<PipePair>,
    /// Live slots, oldest first
    order: VecDeque<SlotId>,
    /// Slots released by `clear`, reused before the pool grows
    free: Vec<SlotId>,
}

impl ObstacleQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of live pipes
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Slots ever allocated, live or not
    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, id: SlotId) -> Option<&PipePair> {
        self.slots.get(id.0)
    }

    /// Oldest live pipe
    pub fn head(&self) -> Option<(SlotId, &PipePair)> {
        self.order.front().map(|&id| (id, &self.slots[id.0]))
    }

    /// Live pipes, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PipePair> + '_ {
        self.order.iter().map(move |id| &self.slots[id.0])
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (SlotId, &PipePair)> + '_ {
        self.order.iter().map(move |&id| (id, &self.slots[id.0]))
    }

    /// Put a copy of `template` at the tail.
    ///
    /// If the head has scrolled fully past `left_edge` its slot is reused;
    /// otherwise a released slot, and only then a new one.
    pub fn spawn(&mut self, template: &PipePair, left_edge: i32) -> SlotId {
        if let Some(&head) = self.order.front() {
            if self.slots[head.0].bounds.right < left_edge {
                self.order.pop_front();
                self.slots[head.0].reset_from(template);
                self.order.push_back(head);
                log::trace!("recycled pipe slot {}", head.0);
                return head;
            }
        }

        let id = match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = *template;
                id
            }
            None => {
                self.slots.push(*template);
                SlotId(self.slots.len() - 1)
            }
        };
        self.order.push_back(id);
        log::trace!("placed pipe in slot {} (pool size {})", id.0, self.slots.len());
        id
    }

    /// Scroll every live pipe left
    pub fn roll_all(&mut self, speed: i32) {
        for id in &self.order {
            self.slots[id.0].roll(speed);
        }
    }

    /// Release every live pipe back to the pool
    pub fn clear(&mut self) {
        self.free.extend(self.order.drain(..));
    }
}
