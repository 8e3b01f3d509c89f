/// A single square of the board.
///
/// `neighbor_count` is scratch space filled in by the counting pass of a
/// simulation step and read back by the rule pass of the same step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub alive: bool,
    pub neighbor_count: u8,
}

impl Cell {
    pub fn die(&mut self) {
        self.alive = false;
    }

    pub fn revive(&mut self) {
        self.alive = true;
    }

    /// Switch between dead and alive
    pub fn flip(&mut self) {
        self.alive = !self.alive;
    }
}
