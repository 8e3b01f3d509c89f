pub const DEFAULT_BORDER_SIZE: u32 = 10;

/// Axis-aligned rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// True when the point is strictly inside; edges shared with a
    /// neighboring cell belong to neither.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px > self.x && px < self.x + self.w && py > self.y && py < self.y + self.h
    }
}

/// Placement of the board inside the window.
///
/// The grid is square, inset by `border_size` on the shorter window axis and
/// centered on the longer one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub rows: usize,
    pub columns: usize,
    pub border_size: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridGeometry {
    pub fn new(rows: usize, columns: usize, border_size: u32) -> Self {
        Self {
            rows,
            columns,
            border_size,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            cell_width: 0.0,
            cell_height: 0.0,
        }
    }

    pub fn recalculate(&mut self, window_width: u32, window_height: u32) {
        let min_side = window_width.min(window_height);
        if min_side == 0 || self.rows == 0 || self.columns == 0 {
            // Minimized; nothing to draw until the next resize
            *self = Self::new(self.rows, self.columns, self.border_size);
            return;
        }

        // Shrink the border on tiny windows so at least one pixel of grid is left
        let border = self.border_size.min((min_side - 1) / 2) as f32;
        let extent = min_side as f32 - 2.0 * border;

        self.x = border;
        self.y = border;
        self.width = extent;
        self.height = extent;
        self.cell_width = extent / self.columns as f32;
        self.cell_height = extent / self.rows as f32;

        if window_width > window_height {
            self.x = window_width as f32 / 2.0 - self.width / 2.0;
        } else {
            self.y = window_height as f32 / 2.0 - self.height / 2.0;
        }

        log::debug!(
            "grid at ({:.1}, {:.1}) size {:.1}, cell {:.2}x{:.2} for window {}x{}",
            self.x, self.y, self.width, self.cell_width, self.cell_height,
            window_width, window_height
        );
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn cell_rect(&self, row: usize, column: usize) -> Rect {
        Rect::new(
            self.x + column as f32 * self.cell_width,
            self.y + row as f32 * self.cell_height,
            self.cell_width,
            self.cell_height,
        )
    }

    /// Cell under a window pixel position, if any.
    pub fn cell_at(&self, px: f32, py: f32) -> Option<(usize, usize)> {
        if self.is_empty() {
            return None;
        }
        let column = ((px - self.x) / self.cell_width).floor();
        let row = ((py - self.y) / self.cell_height).floor();
        if column < 0.0 || row < 0.0 || column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((row as usize, column as usize))
    }
}
