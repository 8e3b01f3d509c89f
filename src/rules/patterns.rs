/// Predefined patterns that can be stamped onto the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A small oscillator
    Blinker,
    /// A small stationary pattern
    Block,
    /// A diagonal spaceship
    Glider,
    /// A horizontal spaceship
    LightweightSpaceship,
}

impl Pattern {
    pub const ALL: [Pattern; 4] = [
        Pattern::Glider,
        Pattern::Blinker,
        Pattern::Block,
        Pattern::LightweightSpaceship,
    ];

    /// Live cells as (row, column) offsets from the anchor cell
    pub fn offsets(&self) -> &'static [(i32, i32)] {
        match self {
            Pattern::Blinker => &[(0, -1), (0, 0), (0, 1)],
            Pattern::Block => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            Pattern::Glider => &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
            Pattern::LightweightSpaceship => &[
                (0, 1), (0, 4),
                (1, 0),
                (2, 0), (2, 4),
                (3, 0), (3, 1), (3, 2), (3, 3),
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pattern::Blinker => "Blinker",
            Pattern::Block => "Block",
            Pattern::Glider => "Glider",
            Pattern::LightweightSpaceship => "Lightweight spaceship",
        }
    }

    /// Pattern bound to a number key, `1` through `4`
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::simulation::Simulation;

    #[test]
    fn digits_map_to_patterns() {
        assert_eq!(Pattern::from_digit('1'), Some(Pattern::Glider));
        assert_eq!(Pattern::from_digit('4'), Some(Pattern::LightweightSpaceship));
        assert_eq!(Pattern::from_digit('0'), None);
        assert_eq!(Pattern::from_digit('5'), None);
        assert_eq!(Pattern::from_digit('x'), None);
    }

    #[test]
    fn block_is_still_life() {
        let mut board = Board::new(6, 6).unwrap();
        board.stamp(Pattern::Block, 2, 2);
        let before = board.clone();
        Simulation::new(0).step_with(&mut board, |_| {});
        let alive = |b: &Board| b.cells().iter().map(|c| c.alive).collect::<Vec<_>>();
        assert_eq!(alive(&board), alive(&before));
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut board = Board::new(7, 7).unwrap();
        board.stamp(Pattern::Blinker, 3, 3);
        let mut sim = Simulation::new(0);

        sim.step_with(&mut board, |_| {});
        assert!(board.is_alive(2, 3) && board.is_alive(3, 3) && board.is_alive(4, 3));
        assert!(!board.is_alive(3, 2) && !board.is_alive(3, 4));

        sim.step_with(&mut board, |_| {});
        assert!(board.is_alive(3, 2) && board.is_alive(3, 3) && board.is_alive(3, 4));
        assert_eq!(board.live_count(), 3);
    }

    #[test]
    fn glider_keeps_five_cells_away_from_edges() {
        let mut board = Board::new(12, 12).unwrap();
        board.stamp(Pattern::Glider, 1, 1);
        let mut sim = Simulation::new(0);
        for _ in 0..4 {
            sim.step_with(&mut board, |_| {});
            assert_eq!(board.live_count(), 5);
        }
        // After four generations the glider has moved one cell down and right.
        for (dr, dc) in Pattern::Glider.offsets() {
            assert!(board.is_alive(2 + *dr as isize, 2 + *dc as isize));
        }
    }
}
