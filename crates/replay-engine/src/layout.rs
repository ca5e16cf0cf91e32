//! Pixel geometry of the rendered board and piece animation paths.

use replay_core::{Color, Dimensions, Square};

/// Canvas and board sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub board_size: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas {
            width: 1080,
            height: 1080,
            board_size: 800,
        }
    }
}

/// A pixel position (top-left corner of a piece image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Where squares and captured pieces sit on the canvas for one board size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    dims: Dimensions,
    square_size: i32,
    board_x: i32,
    board_y: i32,
}

impl Layout {
    /// Centers a board of `dims` on the canvas. Squares are sized so the
    /// longer side spans `board_size`.
    pub fn new(canvas: Canvas, dims: Dimensions) -> Self {
        let longest = dims.width().max(dims.height()) as i32;
        let square_size = canvas.board_size as i32 / longest;
        Layout {
            dims,
            square_size,
            board_x: canvas.width as i32 / 2 - square_size * dims.width() as i32 / 2,
            board_y: canvas.height as i32 / 2 - square_size * dims.height() as i32 / 2,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn square_size(&self) -> i32 {
        self.square_size
    }

    pub fn captured_piece_size(&self) -> i32 {
        self.square_size / 2
    }

    /// Top-left corner of the board.
    pub fn origin(&self) -> Point {
        Point::new(self.board_x, self.board_y)
    }

    /// Top-left corner of a square. Row 0 is drawn at the bottom.
    pub fn square_point(&self, square: Square) -> Point {
        let flipped = self.dims.height() as i32 - 1 - square.row() as i32;
        Point::new(
            self.board_x + square.column() as i32 * self.square_size,
            self.board_y + flipped * self.square_size,
        )
    }

    /// Slot of the `index`-th captured piece of `color`.
    ///
    /// White's losses stack downward left of the board; Black's stack
    /// upward from the bottom right.
    pub fn captured_point(&self, color: Color, index: usize) -> Point {
        let size = self.captured_piece_size();
        let index = index as i32;
        match color {
            Color::White => Point::new(self.board_x - self.square_size, self.board_y + size * index),
            Color::Black => Point::new(
                self.board_x + (self.dims.width() as i32 + 1) * self.square_size - size,
                self.board_y + self.dims.height() as i32 * self.square_size - size - size * index,
            ),
        }
    }
}

/// A straight-line move between two points, sampled in a fixed number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    from: Point,
    to: Point,
    cursor: u32,
    steps: u32,
}

impl Animation {
    pub fn new(from: Point, to: Point, steps: u32) -> Self {
        Animation {
            from,
            to,
            cursor: 0,
            steps: steps.max(1),
        }
    }

    /// Position at step `i`; the last step lands exactly on the target.
    pub fn position_at(&self, i: u32) -> Point {
        if i + 1 >= self.steps {
            return self.to;
        }
        let i = i as i32;
        let steps = self.steps as i32;
        Point::new(
            self.from.x + i * (self.to.x - self.from.x) / steps,
            self.from.y + i * (self.to.y - self.from.y) / steps,
        )
    }

    /// Advances one step, returning the new position and whether the path is done.
    pub fn advance(&mut self) -> (Point, bool) {
        let point = self.position_at(self.cursor);
        self.cursor += 1;
        (point, self.cursor >= self.steps)
    }

    pub fn target(&self) -> Point {
        self.to
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_board_is_centered() {
        let layout = Layout::new(Canvas::default(), Dimensions::STANDARD);
        assert_eq!(layout.square_size(), 100);
        assert_eq!(layout.origin(), Point::new(140, 140));
        assert_eq!(layout.square_point(sq("c3")), Point::new(340, 640));
        assert_eq!(layout.square_point(sq("a8")), Point::new(140, 140));
    }

    #[test]
    fn wide_boards_shrink_squares() {
        let layout = Layout::new(Canvas::default(), Dimensions::new(10, 8).unwrap());
        assert_eq!(layout.square_size(), 80);
        assert_eq!(layout.origin(), Point::new(140, 220));
        assert_eq!(layout.captured_piece_size(), 40);
    }

    #[test]
    fn captured_slots() {
        let layout = Layout::new(Canvas::default(), Dimensions::STANDARD);
        assert_eq!(layout.captured_point(Color::White, 0), Point::new(40, 140));
        assert_eq!(layout.captured_point(Color::White, 2), Point::new(40, 240));
        assert_eq!(layout.captured_point(Color::Black, 0), Point::new(990, 890));
        assert_eq!(layout.captured_point(Color::Black, 1), Point::new(990, 840));
    }

    #[test]
    fn animation_interpolates_and_lands_on_target() {
        let mut anim = Animation::new(Point::new(0, 0), Point::new(100, -30), 30);
        assert_eq!(anim.position_at(0), Point::new(0, 0));
        assert_eq!(anim.position_at(15), Point::new(50, -15));
        assert_eq!(anim.position_at(29), Point::new(100, -30));

        let mut last = (Point::default(), false);
        for _ in 0..30 {
            last = anim.advance();
        }
        assert_eq!(last, (Point::new(100, -30), true));
    }

    #[test]
    fn single_step_animation_jumps_to_target() {
        let mut anim = Animation::new(Point::new(5, 5), Point::new(50, 50), 0);
        assert_eq!(anim.steps(), 1);
        assert_eq!(anim.advance(), (Point::new(50, 50), true));
    }
}
