use std::time::Duration;

use crate::board::Board;
use crate::rules::apply_rules;

/// Length of one simulation delay tick.
pub const SIM_TICK: Duration = Duration::from_millis(1);
pub const DEFAULT_SIM_DELAY: u32 = 40;
pub const MAX_SIM_DELAY: u32 = 1000;

/// Steps the automaton and keeps the delay counter between rule
/// applications.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Ticks to wait before each rule application
    pub delay: u32,
    tick: u32,
    generation: u64,
}

impl Simulation {
    pub fn new(delay: u32) -> Self {
        Self {
            delay: delay.min(MAX_SIM_DELAY),
            tick: 0,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// Advance one generation, sleeping on the current thread for the delay.
    pub fn step(&mut self, board: &mut Board) -> usize {
        self.step_with(board, std::thread::sleep)
    }

    /// Advance one generation. `wait` is called once per delay tick between
    /// counting neighbors and applying the rules. Returns the number of cells
    /// that changed state.
    pub fn step_with(&mut self, board: &mut Board, mut wait: impl FnMut(Duration)) -> usize {
        board.count_neighbors();

        while self.tick < self.delay {
            self.tick += 1;
            wait(SIM_TICK);
        }
        self.tick = 0;

        let changed = apply_rules(board);
        self.generation += 1;
        log::trace!("generation {} applied, {} cells changed", self.generation, changed);
        changed
    }
}
