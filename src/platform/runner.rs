//! Fixed-rate tick loop
//!
//! Owns the game state and the input queue. Each tick drains queued input,
//! advances the simulation once and hands the report to the caller. The
//! stop flag is checked once per tick.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::input::{InputQueue, InputSender};
use crate::sim::{GameState, TickReport, tick};

/// Requests the loop to stop at the next tick boundary
#[derive(Debug, Clone)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub struct Runner {
    state: GameState,
    queue: InputQueue,
    stop: Arc<AtomicBool>,
    interval: Duration,
    realtime: bool,
    idle_mode: bool,
    max_ticks: Option<u64>,
}

impl Runner {
    /// Tick interval comes from the state's config. Runs as fast as
    /// possible until `with_realtime(true)`.
    pub fn new(state: GameState) -> Self {
        let interval = Duration::from_millis(state.config.tick_interval_ms);
        Self {
            state,
            queue: InputQueue::new(),
            stop: Arc::new(AtomicBool::new(false)),
            interval,
            realtime: false,
            idle_mode: false,
            max_ticks: None,
        }
    }

    pub fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub fn with_idle_mode(mut self, idle_mode: bool) -> Self {
        self.idle_mode = idle_mode;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn sender(&self) -> InputSender {
        self.queue.sender()
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            flag: Arc::clone(&self.stop),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Drain input and run exactly one tick
    pub fn step(&mut self) -> TickReport {
        let mut input = self.queue.drain();
        input.idle_mode = self.idle_mode;
        tick(&mut self.state, &input)
    }

    /// Tick until stopped, out of ticks, or `on_tick` breaks.
    /// Returns the number of ticks run.
    pub fn run<F>(&mut self, mut on_tick: F) -> u64
    where
        F: FnMut(&GameState, &TickReport) -> ControlFlow<()>,
    {
        let mut ticks = 0u64;
        let mut deadline = Instant::now();
        log::info!(
            "runner started ({} ms/tick, realtime {})",
            self.interval.as_millis(),
            self.realtime
        );

        loop {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("runner stopped after {} ticks", ticks);
                break;
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                log::info!("tick limit reached");
                break;
            }

            let report = self.step();
            ticks += 1;
            if on_tick(&self.state, &report).is_break() {
                break;
            }

            if self.realtime {
                deadline += self.interval;
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                } else {
                    // Fell behind; don't try to catch up
                    deadline = now;
                }
            }
        }
        ticks
    }
}
