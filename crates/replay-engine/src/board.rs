//! The replay board: piece grid, captured pieces, counters and visibility.
//!
//! A move goes through three phases. [`Board::start_move`] resolves and
//! validates it and gives the moving pieces an animation path without
//! touching the grid. [`Board::step`] advances every animation by one frame.
//! [`Board::commit`] performs the grid mutation and runs the variant hooks.
//! A move that fails to start leaves the board exactly as it was.

use crate::error::ReplayError;
use crate::game::Outcome;
use crate::layout::{Animation, Canvas, Layout, Point};
use crate::notation::Notation;
use crate::{resolve, rules};
use replay_core::{
    encode_placement, Color, Dimensions, Move, Piece, PieceKind, Square, Variant, KING_DELTAS,
    ROOK_DELTAS,
};
use tracing::{debug, info};

/// Interpolation steps per move.
pub const MOVE_STEPS: u32 = 30;

/// Ice Age freezes after every this many full moves.
pub const ICE_AGE_INTERVAL: u32 = 20;

/// Rendering parameters the board needs to lay out and animate pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSettings {
    pub canvas: Canvas,
    pub move_steps: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        BoardSettings {
            canvas: Canvas::default(),
            move_steps: MOVE_STEPS,
        }
    }
}

/// A piece on the board or in a captured list, with its drawn position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPiece {
    piece: Piece,
    position: Point,
    animation: Option<Animation>,
}

impl BoardPiece {
    fn new(piece: Piece, position: Point) -> Self {
        BoardPiece {
            piece,
            position,
            animation: None,
        }
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    fn animate_to(&mut self, target: Point, steps: u32) {
        self.animation = Some(Animation::new(self.position, target, steps));
    }

    fn step(&mut self) {
        if let Some(animation) = self.animation.as_mut() {
            let (position, done) = animation.advance();
            self.position = position;
            if done {
                self.animation = None;
            }
        }
    }

    fn settle(&mut self, position: Point) {
        self.position = position;
        self.animation = None;
    }
}

type Hook = fn(&mut Board, &Move, Square, Square);

/// Post-move effects, applied in this order after every committed move.
const POST_MOVE_HOOKS: [(Variant, Hook); 4] = [
    (Variant::Atomic, Board::explode),
    (Variant::CheshireCat, Board::leave_hole),
    (Variant::IceAge, Board::ice_age),
    (Variant::Dark, Board::reveal),
];

/// Mutable position of a game being replayed.
#[derive(Debug, Clone)]
pub struct Board {
    variant: Variant,
    dims: Dimensions,
    layout: Layout,
    move_steps: u32,
    outcome: Outcome,
    orientation: Color,
    cells: Vec<Option<BoardPiece>>,
    visible: Vec<bool>,
    captured: [Vec<BoardPiece>; 2],
    checks: [u32; 2],
    king_moved: [bool; 2],
    current: Option<Move>,
    rook_transition: Option<(Square, Square)>,
    target: Option<Square>,
    finished: bool,
}

impl Board {
    /// Creates an empty board sized for the variant.
    pub fn new(variant: Variant, settings: &BoardSettings) -> Self {
        let dims = variant.dimensions();
        Board {
            variant,
            dims,
            layout: Layout::new(settings.canvas, dims),
            move_steps: settings.move_steps,
            outcome: Outcome::Unknown,
            orientation: Color::White,
            cells: vec![None; dims.area()],
            visible: vec![true; dims.area()],
            captured: [Vec::new(), Vec::new()],
            checks: [0; 2],
            king_moved: [false; 2],
            current: None,
            rook_transition: None,
            target: None,
            finished: false,
        }
    }

    /// Sets the recorded outcome, which also fixes the orientation.
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self.orientation = outcome.orientation();
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn orientation(&self) -> Color {
        self.orientation
    }

    fn index(&self, square: Square) -> Option<usize> {
        self.dims
            .contains(square)
            .then(|| self.dims.index(square))
    }

    pub fn board_piece(&self, square: Square) -> Option<&BoardPiece> {
        self.index(square).and_then(|i| self.cells[i].as_ref())
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board_piece(square).map(BoardPiece::piece)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &BoardPiece)> + '_ {
        self.dims
            .squares()
            .filter_map(move |square| self.board_piece(square).map(|bp| (square, bp)))
    }

    /// Pieces `color` has lost, in capture order.
    pub fn captured(&self, color: Color) -> &[BoardPiece] {
        &self.captured[color.index()]
    }

    pub fn checks(&self, color: Color) -> u32 {
        self.checks[color.index()]
    }

    pub(crate) fn has_king_moved(&self, color: Color) -> bool {
        self.king_moved[color.index()]
    }

    /// The move most recently started.
    pub fn current_move(&self) -> Option<&Move> {
        self.current.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Puts a piece on a square, replacing whatever was there.
    pub fn put(&mut self, square: Square, piece: Piece) {
        let position = self.layout.square_point(square);
        if let Some(i) = self.index(square) {
            self.cells[i] = Some(BoardPiece::new(piece, position));
        }
    }

    fn take(&mut self, square: Square) -> Option<BoardPiece> {
        let i = self.index(square)?;
        self.cells[i].take()
    }

    fn place(&mut self, square: Square, piece: Option<BoardPiece>) {
        let position = self.layout.square_point(square);
        if let (Some(i), Some(mut bp)) = (self.index(square), piece) {
            bp.settle(position);
            self.cells[i] = Some(bp);
        }
    }

    fn cell_mut(&mut self, square: Square) -> Option<&mut BoardPiece> {
        let i = self.index(square)?;
        self.cells[i].as_mut()
    }

    /// Highlights a destination before the move is played (Ambiguous chess).
    pub fn mark_target(&mut self, mv: &Move) {
        self.target = mv.to;
    }

    pub fn matches_target(&self, square: Square) -> bool {
        self.target == Some(square)
    }

    /// True for the origin and destination of the move in progress.
    pub fn matches_current_move(&self, square: Square) -> bool {
        self.current
            .as_ref()
            .is_some_and(|mv| mv.from() == Some(square) || mv.to == Some(square))
    }

    /// True for the royal piece of the side that was just given check.
    pub fn matches_piece_in_check(&self, square: Square) -> bool {
        let Some(mv) = self.current.as_ref().filter(|mv| mv.is_check()) else {
            return false;
        };
        self.piece_at(square)
            .is_some_and(|p| p.is(mv.color.opposite(), self.variant.royal_kind()))
    }

    pub fn is_hole(&self, square: Square) -> bool {
        self.piece_at(square)
            .is_some_and(|p| p.kind == PieceKind::Hole)
    }

    pub fn is_visible(&self, square: Square) -> bool {
        self.index(square).is_some_and(|i| self.visible[i])
    }

    /// Begins a move.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the origin cannot be resolved or the move
    /// does not fit the position. The board is left untouched in that case.
    pub fn start_move(&mut self, mv: &Move) -> Result<(), ReplayError> {
        if mv.is_ambiguous() || mv.is_place() {
            if mv.is_place() {
                self.start_drop(mv)?;
            }
            debug!(token = %mv.code, color = %mv.color, "started move");
            self.rook_transition = None;
            self.current = Some(mv.clone());
            return Ok(());
        }
        if mv.is_empty() {
            self.target = None;
            return Ok(());
        }

        let mut mv = mv.clone();
        resolve::resolve_origin(self, &mut mv)?;
        let (from, to) = match (mv.from(), mv.to) {
            (Some(from), Some(to)) => (from, to),
            _ => return Err(ReplayError::origin(&mv.code, "move has no origin")),
        };
        self.check_en_passant(&mv, from, to)?;
        let rook = if mv.is_castling() {
            Some(self.castling_rook(&mv, from)?)
        } else {
            None
        };

        self.target = None;
        if self.variant == Variant::CheshireCat && mv.kind == Some(PieceKind::King) {
            self.king_moved[mv.color.index()] = true;
        }
        let steps = self.move_steps;
        let target = self.layout.square_point(to);
        if let Some(bp) = self.cell_mut(from) {
            bp.animate_to(target, steps);
        }
        if let Some((rook_from, rook_to)) = rook {
            let target = self.layout.square_point(rook_to);
            if let Some(bp) = self.cell_mut(rook_from) {
                bp.animate_to(target, steps);
            }
        }
        debug!(token = %mv.code, color = %mv.color, %from, %to, "resolved move");
        self.rook_transition = rook;
        self.current = Some(mv);
        Ok(())
    }

    fn start_drop(&mut self, mv: &Move) -> Result<(), ReplayError> {
        let to = mv
            .to
            .ok_or_else(|| ReplayError::origin(&mv.code, "drop has no destination"))?;
        let index = self.droppable(mv).ok_or_else(|| {
            ReplayError::origin(&mv.code, "no captured piece of that kind to place")
        })?;
        let target = self.layout.square_point(to);
        let steps = self.move_steps;
        self.captured[mv.color.opposite().index()][index].animate_to(target, steps);
        Ok(())
    }

    /// Index of the captured piece a drop move takes.
    fn droppable(&self, mv: &Move) -> Option<usize> {
        let kind = mv.kind?;
        self.captured[mv.color.opposite().index()]
            .iter()
            .position(|bp| bp.piece.kind == kind)
    }

    fn check_en_passant(&self, mv: &Move, from: Square, to: Square) -> Result<(), ReplayError> {
        if !(mv.is_capture() && mv.is_pawn()) || self.piece_at(to).is_some() {
            return Ok(());
        }
        let victim = Square::new(from.row(), to.column()).and_then(|sq| self.piece_at(sq));
        match victim {
            Some(piece) if !piece.has_color(mv.color) => Ok(()),
            _ => Err(ReplayError::origin(&mv.code, "capture of an empty square")),
        }
    }

    /// Where the castling rook starts and ends.
    fn castling_rook(&self, mv: &Move, king: Square) -> Result<(Square, Square), ReplayError> {
        let long = mv.is_castling_long();
        let width = self.dims.width();
        let row = king.row();
        let wide = matches!(self.variant, Variant::Embassy | Variant::Janus);
        let to_column = match (self.variant, long) {
            (Variant::Embassy, true) => 6,
            (Variant::Janus, true) => 7,
            (_, true) => 3,
            (_, false) if wide => 2,
            (_, false) => 5,
        };
        let own_rook = |column: u8| {
            Square::new(row, column)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.is(mv.color, PieceKind::Rook))
        };
        let from_column = if self.variant.has_random_castling() {
            if long {
                (0..king.column()).rev().find(|&c| own_rook(c))
            } else {
                (king.column() + 1..width).find(|&c| own_rook(c))
            }
        } else {
            let corner = if long != wide { 0 } else { width - 1 };
            own_rook(corner).then_some(corner)
        };
        let from_column =
            from_column.ok_or_else(|| ReplayError::origin(&mv.code, "no rook to castle with"))?;
        match (Square::new(row, from_column), Square::new(row, to_column)) {
            (Some(from), Some(to)) if self.dims.contains(to) => Ok((from, to)),
            _ => Err(ReplayError::origin(&mv.code, "castling does not fit the board")),
        }
    }

    /// True while any piece still has animation steps left.
    pub fn is_animating(&self) -> bool {
        self.cells.iter().flatten().any(BoardPiece::is_animating)
            || self.captured.iter().flatten().any(BoardPiece::is_animating)
    }

    /// Advances every animation by one step. Does nothing once they are done.
    pub fn step(&mut self) {
        self.cells.iter_mut().flatten().for_each(BoardPiece::step);
        self.captured
            .iter_mut()
            .flatten()
            .for_each(BoardPiece::step);
    }

    /// Applies the started move to the grid and runs the variant hooks.
    ///
    /// Committing twice, or with no move started, does nothing.
    pub fn commit(&mut self) -> Result<(), ReplayError> {
        let Some(mv) = self.current.clone() else {
            return Ok(());
        };
        let Some(to) = mv.to else {
            return Ok(());
        };
        if mv.is_place() {
            self.commit_drop(&mv, to)?;
        } else if !mv.is_ambiguous() {
            let from = mv
                .from()
                .ok_or_else(|| ReplayError::origin(&mv.code, "move has no origin"))?;
            self.commit_move(&mv, from, to);
        }
        if let Some(current) = self.current.as_mut() {
            current.clear_squares();
        }
        Ok(())
    }

    fn commit_move(&mut self, mv: &Move, from: Square, to: Square) {
        if mv.is_check() {
            self.checks[mv.color.index()] += 1;
        }
        if let Some((rook_from, rook_to)) = self.rook_transition.take() {
            let king = self.take(from);
            let rook = self.take(rook_from);
            self.place(to, king);
            self.place(rook_to, rook);
        } else {
            let target_empty = self.piece_at(to).is_none();
            if mv.is_capture() && !target_empty {
                if let Some(victim) = self.take(to) {
                    self.capture(victim.piece);
                }
            }
            if mv.is_capture() && mv.is_pawn() && target_empty {
                if let Some(victim) = Square::new(from.row(), to.column()).and_then(|sq| self.take(sq)) {
                    self.capture(victim.piece);
                }
            }
            let mut mover = self.take(from);
            if let (Some(bp), Some(kind)) = (mover.as_mut(), mv.promotion) {
                bp.piece.kind = kind;
            }
            self.place(to, mover);
        }
        for (variant, hook) in POST_MOVE_HOOKS {
            if self.variant == variant {
                hook(self, mv, from, to);
            }
        }
    }

    fn commit_drop(&mut self, mv: &Move, to: Square) -> Result<(), ReplayError> {
        let (Some(index), Some(kind)) = (self.droppable(mv), mv.kind) else {
            return Err(ReplayError::origin(
                &mv.code,
                "no captured piece of that kind to place",
            ));
        };
        let owner = mv.color.opposite();
        self.captured[owner.index()].remove(index);
        self.relayout_captured(owner);
        self.put(to, Piece::new(mv.color, kind));
        Ok(())
    }

    /// Moves a copy of `piece` into its owner's captured list.
    fn capture(&mut self, piece: Piece) {
        let Some(owner) = piece.color else {
            return;
        };
        let mut copy = piece;
        if self.variant == Variant::Loop {
            copy.color = Some(owner.opposite());
        }
        let position = self
            .layout
            .captured_point(owner, self.captured[owner.index()].len());
        self.captured[owner.index()].push(BoardPiece::new(copy, position));
    }

    fn relayout_captured(&mut self, color: Color) {
        let layout = self.layout;
        for (i, bp) in self.captured[color.index()].iter_mut().enumerate() {
            bp.settle(layout.captured_point(color, i));
        }
    }

    fn explode(&mut self, mv: &Move, _from: Square, to: Square) {
        if !mv.is_capture() {
            return;
        }
        for delta in KING_DELTAS {
            let Some(square) = to.offset(delta.row as i32, delta.column as i32, self.dims) else {
                continue;
            };
            if self.piece_at(square).is_some_and(|p| p.kind != PieceKind::Pawn) {
                if let Some(bp) = self.take(square) {
                    self.capture(bp.piece);
                }
            }
        }
        if let Some(bp) = self.take(to) {
            self.capture(bp.piece);
        }
    }

    fn leave_hole(&mut self, _mv: &Move, from: Square, _to: Square) {
        if self.piece_at(from).is_none() {
            self.put(from, Piece::neutral(PieceKind::Hole));
        }
    }

    fn has_playable_neighbor(&self, square: Square) -> bool {
        ROOK_DELTAS.iter().any(|d| {
            square
                .offset(d.row as i32, d.column as i32, self.dims)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(Piece::is_playable)
        })
    }

    fn ice_age(&mut self, mv: &Move, _from: Square, _to: Square) {
        if mv.color != Color::Black || mv.number % ICE_AGE_INTERVAL != 0 {
            return;
        }
        let mut empty = Vec::new();
        let mut isolated = Vec::new();
        for square in self.dims.squares() {
            match self.piece_at(square) {
                None if !self.has_playable_neighbor(square) => empty.push(square),
                Some(p) if p.is_playable() && !self.has_playable_neighbor(square) => {
                    isolated.push(square)
                }
                _ => {}
            }
        }
        debug!(
            number = mv.number,
            frozen = isolated.len(),
            iced = empty.len(),
            "ice age"
        );
        for square in empty {
            self.put(square, Piece::neutral(PieceKind::IceCube));
        }
        for square in isolated {
            if let Some(bp) = self.take(square) {
                self.capture(bp.piece);
            }
            self.put(square, Piece::neutral(PieceKind::IceCube));
        }
    }

    fn reveal(&mut self, _mv: &Move, _from: Square, _to: Square) {
        self.refresh_visibility();
    }

    /// Recomputes which squares the oriented side can see.
    pub fn refresh_visibility(&mut self) {
        let mut visible = vec![false; self.dims.area()];
        let color = self.orientation;
        for (square, bp) in self.pieces() {
            if bp.piece.has_color(color) {
                for seen in std::iter::once(square).chain(self.reach(bp.piece, square)) {
                    visible[self.dims.index(seen)] = true;
                }
            }
        }
        self.visible = visible;
    }

    fn blocks(&self, square: Square) -> bool {
        self.piece_at(square).is_some_and(Piece::is_playable)
    }

    fn pawn_start_row(&self, color: Color) -> u8 {
        let height = self.dims.height();
        match (self.variant, color) {
            (Variant::Grand, Color::White) => 2,
            (Variant::Grand, Color::Black) => height - 3,
            _ => color.pawn_row(height),
        }
    }

    /// Squares a piece on `square` sees.
    fn reach(&self, piece: Piece, square: Square) -> Vec<Square> {
        let dims = self.dims;
        let mut seen = Vec::new();
        if piece.kind == PieceKind::Pawn {
            let Some(color) = piece.color else {
                return seen;
            };
            let dir = color.pawn_direction();
            if let Some(ahead) = square.offset(dir, 0, dims) {
                seen.push(ahead);
                if square.row() == self.pawn_start_row(color) && !self.blocks(ahead) {
                    seen.extend(square.offset(2 * dir, 0, dims));
                }
            }
            seen.extend(square.offset(dir, -1, dims));
            seen.extend(square.offset(dir, 1, dims));
            return seen;
        }
        for &delta in piece.kind.movement().directions {
            for distance in 1..=piece.kind.distance_along(delta) as i32 {
                let Some(sq) = square.offset(
                    delta.row as i32 * distance,
                    delta.column as i32 * distance,
                    dims,
                ) else {
                    break;
                };
                seen.push(sq);
                if self.blocks(sq) {
                    break;
                }
            }
        }
        seen
    }

    /// Ends the replay: the result becomes visible and the fog lifts.
    pub fn finish(&mut self) {
        self.finished = true;
        self.visible.fill(true);
        info!(variant = %self.variant, result = %self.result(), "game finished");
    }

    /// Result text for the current position, or empty if there is none.
    pub fn result(&self) -> String {
        rules::derive_result(self)
    }

    /// Variant counters shown under the board.
    pub fn game_status(&self) -> String {
        if self.variant == Variant::ThreeChecks {
            format!(
                "Checks: {}/{}",
                self.checks(Color::White),
                self.checks(Color::Black)
            )
        } else {
            String::new()
        }
    }

    /// Display text for the current move.
    pub fn notation(&self) -> Notation {
        Notation::from_board(self)
    }

    /// FEN-like placement of the grid, top row first.
    pub fn placement(&self) -> String {
        encode_placement(self.dims, |square| self.piece_at(square))
    }
}
