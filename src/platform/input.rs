//! Input funnel
//!
//! Gestures can arrive on any thread. They are queued here and drained by
//! the simulation thread at the start of each tick, so the bird is only
//! ever mutated by the thread that steps it.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::sim::TickInput;

/// Gesture already translated by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Tap,
}

/// Cloneable handle for producers; sending never blocks
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns false once the queue has been dropped.
    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn tap(&self) -> bool {
        self.send(InputEvent::Tap)
    }
}

/// Single-consumer end, owned by the simulation thread
#[derive(Debug)]
pub struct InputQueue {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            tx: self.tx.clone(),
        }
    }

    /// Collect everything queued since the last drain into one tick's input
    pub fn drain(&self) -> TickInput {
        let mut input = TickInput::default();
        for event in self.rx.try_iter() {
            match event {
                InputEvent::Tap => input.taps += 1,
            }
        }
        if input.taps > 0 {
            log::trace!("drained {} taps", input.taps);
        }
        input
    }
}
