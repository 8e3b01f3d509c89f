use std::time::Duration;

use clap::Parser;

use crate::board::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::geometry::DEFAULT_BORDER_SIZE;
use crate::simulation::{DEFAULT_SIM_DELAY, MAX_SIM_DELAY};

/// Conway's Game of Life with edge-clamped neighbors.
///
/// Space runs or pauses, left mouse flips cells, Escape quits.
#[derive(Debug, Clone, Parser)]
#[command(name = "clamped_life", version, about)]
pub struct Config {
    /// Number of board rows.
    #[arg(long, default_value_t = DEFAULT_ROWS as u32, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub rows: u32,
    /// Number of board columns.
    #[arg(long, default_value_t = DEFAULT_COLUMNS as u32, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub columns: u32,
    /// Milliseconds each generation waits before the rules are applied.
    #[arg(
        long = "sim-delay",
        value_name = "TICKS",
        default_value_t = DEFAULT_SIM_DELAY,
        value_parser = clap::value_parser!(u32).range(0..=MAX_SIM_DELAY as i64)
    )]
    pub sim_delay: u32,
    /// Gap in pixels between the window edge and the grid.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_BORDER_SIZE)]
    pub border: u32,
    /// Initial window width.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
    /// Initial window height.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,
    /// Frame interval of the main loop in milliseconds.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=1000)
    )]
    pub tick_ms: u64,
    /// Present without waiting for vertical sync.
    #[arg(long)]
    pub no_vsync: bool,
    /// Start with the simulation running instead of paused.
    #[arg(long)]
    pub running: bool,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_layout() {
        let config = Config::try_parse_from(["clamped_life"]).unwrap();
        assert_eq!((config.rows, config.columns), (50, 50));
        assert_eq!(config.sim_delay, 40);
        assert_eq!(config.border, 10);
        assert_eq!((config.width, config.height), (800, 800));
        assert_eq!(config.tick_interval(), Duration::from_millis(10));
        assert!(!config.no_vsync);
        assert!(!config.running);
    }

    #[test]
    fn parses_overrides() {
        let config = Config::try_parse_from([
            "clamped_life", "--rows", "20", "--columns", "30", "--sim-delay", "0",
            "--tick-ms", "16", "--no-vsync", "--running",
        ])
        .unwrap();
        assert_eq!((config.rows, config.columns), (20, 30));
        assert_eq!(config.sim_delay, 0);
        assert_eq!(config.tick_ms, 16);
        assert!(config.no_vsync && config.running);
    }

    #[test]
    fn rejects_empty_board() {
        assert!(Config::try_parse_from(["clamped_life", "--rows", "0"]).is_err());
        assert!(Config::try_parse_from(["clamped_life", "--columns", "0"]).is_err());
    }

    #[test]
    fn rejects_out_of_range_delay() {
        assert!(Config::try_parse_from(["clamped_life", "--sim-delay", "5000"]).is_err());
    }
}
