//! Board coordinates for boards up to 10×10.

use std::fmt;

/// Largest supported board side.
pub const MAX_SIDE: u8 = 10;

/// Column letters in board order.
pub const COLUMN_CODES: [char; MAX_SIDE as usize] =
    ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

/// Row codes in board order.
pub const ROW_CODES: [&str; MAX_SIDE as usize] =
    ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// Returns the column index for a column letter ('a'..'j').
#[inline]
pub fn column_index(c: char) -> Option<u8> {
    COLUMN_CODES.iter().position(|&code| code == c).map(|i| i as u8)
}

/// Returns the row index for a row code ("1".."10").
#[inline]
pub fn row_index(code: &str) -> Option<u8> {
    ROW_CODES.iter().position(|&r| r == code).map(|i| i as u8)
}

/// Width and height of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u8,
    height: u8,
}

impl Dimensions {
    /// The regular 8×8 board.
    pub const STANDARD: Dimensions = Dimensions {
        width: 8,
        height: 8,
    };

    /// Creates board dimensions, rejecting empty boards and sides above [`MAX_SIDE`].
    pub const fn new(width: u8, height: u8) -> Option<Self> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            None
        } else {
            Some(Dimensions { width, height })
        }
    }

    #[inline]
    pub const fn width(self) -> u8 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> u8 {
        self.height
    }

    /// Number of squares on the board.
    #[inline]
    pub const fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the square at the given signed coordinates if it lies on the board.
    #[inline]
    pub fn square(self, row: i32, column: i32) -> Option<Square> {
        if row >= 0 && column >= 0 && row < self.height as i32 && column < self.width as i32 {
            Some(Square {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    /// Returns true if the square lies on this board.
    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        square.row < self.height && square.column < self.width
    }

    /// Row-major index of a square (row 0 first).
    #[inline]
    pub const fn index(self, square: Square) -> usize {
        square.row as usize * self.width as usize + square.column as usize
    }

    /// Iterates every square, row 0 first, columns left to right.
    pub fn squares(self) -> impl Iterator<Item = Square> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |column| Square { row, column }))
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Dimensions::STANDARD
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A square addressed by row (0 = White's home row) and column (0 = 'a').
///
/// A `Square` only guarantees that both coordinates fit the largest supported
/// board; use [`Dimensions::square`] or [`Dimensions::contains`] to check it
/// against a concrete board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    column: u8,
}

impl Square {
    /// Creates a square from row and column indices.
    ///
    /// Returns `None` if either index exceeds the largest supported board.
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < MAX_SIDE && column < MAX_SIDE {
            Some(Square { row, column })
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation ("e4", "j10").
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let column = column_index(chars.next()?)?;
        let row = row_index(chars.as_str())?;
        Some(Square { row, column })
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Returns the square shifted by the given deltas, if it stays on the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_column: i32, dims: Dimensions) -> Option<Square> {
        dims.square(self.row as i32 + d_row, self.column as i32 + d_column)
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!(
            "{}{}",
            COLUMN_CODES[self.column as usize],
            ROW_CODES[self.row as usize]
        )
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_and_row_codes() {
        assert_eq!(column_index('a'), Some(0));
        assert_eq!(column_index('j'), Some(9));
        assert_eq!(column_index('k'), None);
        assert_eq!(column_index('A'), None);
        assert_eq!(row_index("1"), Some(0));
        assert_eq!(row_index("10"), Some(9));
        assert_eq!(row_index("11"), None);
        assert_eq!(row_index("0"), None);
    }

    #[test]
    fn square_from_algebraic() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.row(), 3);
        assert_eq!(e4.column(), 4);

        let j10 = Square::from_algebraic("j10").unwrap();
        assert_eq!(j10.row(), 9);
        assert_eq!(j10.column(), 9);

        assert_eq!(Square::from_algebraic("k1"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic(""), None);
        assert_eq!(Square::from_algebraic("e"), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::new(0, 0).unwrap().to_algebraic(), "a1");
        assert_eq!(Square::new(7, 7).unwrap().to_algebraic(), "h8");
        assert_eq!(Square::new(9, 9).unwrap().to_algebraic(), "j10");
        assert_eq!(Square::new(10, 0), None);
    }

    #[test]
    fn dimensions_bounds() {
        assert_eq!(Dimensions::new(0, 8), None);
        assert_eq!(Dimensions::new(11, 8), None);

        let dims = Dimensions::new(10, 8).unwrap();
        assert_eq!(dims.area(), 80);
        assert!(dims.square(7, 9).is_some());
        assert!(dims.square(8, 0).is_none());
        assert!(dims.square(0, -1).is_none());
        assert!(!dims.contains(Square::new(9, 0).unwrap()));
    }

    #[test]
    fn offset_stays_on_board() {
        let dims = Dimensions::STANDARD;
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.offset(1, 1, dims), Square::from_algebraic("f5"));
        assert_eq!(e4.offset(-4, 0, dims), None);
        assert_eq!(e4.offset(0, 4, dims), None);
    }

    #[test]
    fn squares_iterate_row_major() {
        let dims = Dimensions::new(6, 6).unwrap();
        let squares: Vec<Square> = dims.squares().collect();
        assert_eq!(squares.len(), 36);
        assert_eq!(squares[0].to_algebraic(), "a1");
        assert_eq!(squares[6].to_algebraic(), "a2");
        assert_eq!(dims.index(squares[13]), 13);
    }
}
