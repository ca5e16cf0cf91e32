//! Starting positions.
//!
//! A `FEN` tag always wins. Without one, variants with a fixed layout get it
//! from the tables below and everything else starts from the standard array.

use crate::board::{Board, BoardSettings};
use crate::error::ReplayError;
use crate::game::GameRecord;
use replay_core::PieceKind::{Archbishop, Bishop, Chancellor, King, Knight, Pawn, Queen, Rook};
use replay_core::{
    decode_placement, Color, Dimensions, FenError, Piece, PieceKind, Square, Variant,
};
use tracing::debug;

/// A piece placement as `(row, column, kind)`.
type Placement = (u8, u8, PieceKind);

const STANDARD_RANK: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
const KNIGHTMATE_RANK: [PieceKind; 8] = [Rook, King, Bishop, Queen, Knight, Bishop, King, Rook];
const LOS_ALAMOS_RANK: [PieceKind; 6] = [Rook, Knight, Queen, King, Knight, Rook];
const GRAND_RANK: [PieceKind; 8] = [Knight, Bishop, Queen, King, Chancellor, Archbishop, Bishop, Knight];

const RACING_KINGS_BLACK: [Placement; 8] = [
    (1, 0, King),
    (0, 0, Queen),
    (1, 1, Rook),
    (0, 1, Rook),
    (1, 2, Bishop),
    (0, 2, Bishop),
    (1, 3, Knight),
    (0, 3, Knight),
];

const RACING_KINGS_WHITE: [Placement; 8] = [
    (1, 4, Knight),
    (0, 4, Knight),
    (1, 5, Bishop),
    (0, 5, Bishop),
    (1, 6, Rook),
    (0, 6, Rook),
    (1, 7, King),
    (0, 7, Queen),
];

const LEGAN_WHITE: [Placement; 16] = [
    (0, 3, Pawn),
    (0, 4, Rook),
    (0, 5, Bishop),
    (0, 6, Knight),
    (0, 7, King),
    (1, 4, Pawn),
    (1, 5, Pawn),
    (1, 6, Queen),
    (1, 7, Bishop),
    (2, 5, Pawn),
    (2, 6, Pawn),
    (2, 7, Knight),
    (3, 4, Pawn),
    (3, 6, Pawn),
    (3, 7, Rook),
    (4, 7, Pawn),
];

const LEGAN_BLACK: [Placement; 16] = [
    (3, 0, Pawn),
    (4, 0, Rook),
    (4, 1, Pawn),
    (4, 3, Pawn),
    (5, 0, Knight),
    (5, 1, Pawn),
    (5, 2, Pawn),
    (6, 0, Bishop),
    (6, 1, Queen),
    (6, 2, Pawn),
    (6, 3, Pawn),
    (7, 0, King),
    (7, 1, Knight),
    (7, 2, Bishop),
    (7, 3, Rook),
    (7, 4, Pawn),
];

/// Builds the board a recorded game starts from.
///
/// # Errors
///
/// Returns [`ReplayError::VariantConfiguration`] when the variant needs a
/// `FEN` tag the record lacks or the tag does not fit the board, and
/// [`ReplayError::Fen`] for any other placement error.
pub fn starting_board(record: &GameRecord, settings: &BoardSettings) -> Result<Board, ReplayError> {
    let variant = record.variant();
    let mut board = Board::new(variant, settings).with_outcome(record.outcome());
    match record.fen() {
        Some(fen) => {
            let placement =
                decode_placement(fen, board.dimensions(), variant).map_err(|e| match e {
                    FenError::DimensionMismatch { .. } => {
                        ReplayError::VariantConfiguration(e.to_string())
                    }
                    other => other.into(),
                })?;
            for (square, piece) in placement {
                board.put(square, piece);
            }
        }
        None => arrange(&mut board)?,
    }
    if variant == Variant::Dark {
        board.refresh_visibility();
    }
    debug!(game = record.name(), %variant, placement = %board.placement(), "starting position");
    Ok(board)
}

/// The fixed starting position of a variant, without any recorded game.
pub fn initial_board(variant: Variant, settings: &BoardSettings) -> Result<Board, ReplayError> {
    let mut board = Board::new(variant, settings);
    arrange(&mut board)?;
    if variant == Variant::Dark {
        board.refresh_visibility();
    }
    Ok(board)
}

fn arrange(board: &mut Board) -> Result<(), ReplayError> {
    let variant = board.variant();
    if variant.requires_fen() {
        return Err(ReplayError::VariantConfiguration(format!(
            "{variant} games need a FEN starting position"
        )));
    }
    match variant {
        Variant::RacingKings => {
            place(board, Color::White, &RACING_KINGS_WHITE);
            place(board, Color::Black, &RACING_KINGS_BLACK);
        }
        Variant::Knightmate => symmetric(board, &KNIGHTMATE_RANK),
        Variant::LosAlamos => symmetric(board, &LOS_ALAMOS_RANK),
        Variant::Legan => {
            place(board, Color::White, &LEGAN_WHITE);
            place(board, Color::Black, &LEGAN_BLACK);
        }
        Variant::Grand => grand(board),
        Variant::Horde => horde(board),
        Variant::IceAge => {
            standard(board)?;
            for row in 2..=5 {
                fill_row(board, row, Piece::neutral(PieceKind::IceCube));
            }
        }
        _ => standard(board)?,
    }
    Ok(())
}

fn place(board: &mut Board, color: Color, placements: &[Placement]) {
    for &(row, column, kind) in placements {
        if let Some(square) = Square::new(row, column) {
            board.put(square, Piece::new(color, kind));
        }
    }
}

fn rank(board: &mut Board, row: u8, first_column: u8, color: Color, kinds: &[PieceKind]) {
    for (column, &kind) in (first_column..).zip(kinds) {
        if let Some(square) = Square::new(row, column) {
            board.put(square, Piece::new(color, kind));
        }
    }
}

fn fill_row(board: &mut Board, row: u8, piece: Piece) {
    for column in 0..board.dimensions().width() {
        if let Some(square) = Square::new(row, column) {
            board.put(square, piece);
        }
    }
}

/// Mirrored back ranks on the edge rows with a row of pawns in front.
fn symmetric(board: &mut Board, back: &[PieceKind]) {
    let top = board.dimensions().height() - 1;
    rank(board, 0, 0, Color::White, back);
    rank(board, top, 0, Color::Black, back);
    fill_row(board, 1, Piece::new(Color::White, Pawn));
    fill_row(board, top - 1, Piece::new(Color::Black, Pawn));
}

fn standard(board: &mut Board) -> Result<(), ReplayError> {
    if board.dimensions() != Dimensions::STANDARD {
        return Err(ReplayError::VariantConfiguration(format!(
            "no standard layout for a {} board",
            board.dimensions()
        )));
    }
    symmetric(board, &STANDARD_RANK);
    Ok(())
}

fn grand(board: &mut Board) {
    let top = board.dimensions().height() - 1;
    let right = board.dimensions().width() - 1;
    fill_row(board, 2, Piece::new(Color::White, Pawn));
    fill_row(board, top - 2, Piece::new(Color::Black, Pawn));
    rank(board, 1, 1, Color::White, &GRAND_RANK);
    rank(board, top - 1, 1, Color::Black, &GRAND_RANK);
    for (row, color) in [(0, Color::White), (top, Color::Black)] {
        place(board, color, &[(row, 0, Rook), (row, right, Rook)]);
    }
}

fn horde(board: &mut Board) {
    rank(board, 0, 0, Color::White, &STANDARD_RANK);
    fill_row(board, 1, Piece::new(Color::White, Pawn));
    for row in 4..=6 {
        fill_row(board, row, Piece::new(Color::Black, Pawn));
    }
    for column in [0, 1, 2, 5, 6, 7] {
        place(board, Color::Black, &[(7, column, Pawn)]);
    }
    place(board, Color::Black, &[(3, 3, Pawn), (3, 4, Pawn)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Outcome;
    use replay_core::STARTPOS;

    fn initial(variant: Variant) -> Board {
        initial_board(variant, &BoardSettings::default()).unwrap()
    }

    fn count(board: &Board, piece: Piece) -> usize {
        board.pieces().filter(|(_, bp)| bp.piece() == piece).count()
    }

    #[test]
    fn standard_and_unlisted_variants_use_the_standard_array() {
        assert_eq!(initial(Variant::Standard).placement(), STARTPOS);
        assert_eq!(initial(Variant::Atomic).placement(), STARTPOS);
        assert_eq!(initial(Variant::Extinction).placement(), STARTPOS);
    }

    #[test]
    fn racing_kings() {
        assert_eq!(
            initial(Variant::RacingKings).placement(),
            "8/8/8/8/8/8/krbnNBRK/qrbnNBRQ"
        );
    }

    #[test]
    fn knightmate_swaps_kings_and_knights() {
        assert_eq!(
            initial(Variant::Knightmate).placement(),
            "rkbqnbkr/pppppppp/8/8/8/8/PPPPPPPP/RKBQNBKR"
        );
    }

    #[test]
    fn los_alamos_is_six_by_six() {
        assert_eq!(
            initial(Variant::LosAlamos).placement(),
            "rnqknr/pppppp/6/6/PPPPPP/RNQKNR"
        );
    }

    #[test]
    fn legan_diagonal_setup() {
        assert_eq!(
            initial(Variant::Legan).placement(),
            "knbrp3/bqpp4/npp5/rp1p3P/p3P1PR/5PPN/4PPQB/3PRBNK"
        );
    }

    #[test]
    fn grand_has_ten_ranks_and_fairy_pieces() {
        assert_eq!(
            initial(Variant::Grand).placement(),
            "r8r/1nbqkcabn1/pppppppppp/10/10/10/10/PPPPPPPPPP/1NBQKCABN1/R8R"
        );
    }

    #[test]
    fn horde_has_a_wall_of_black_pawns() {
        let board = initial(Variant::Horde);
        assert_eq!(count(&board, Piece::new(Color::Black, Pawn)), 32);
        assert_eq!(count(&board, Piece::new(Color::Black, King)), 0);
        assert_eq!(count(&board, Piece::new(Color::White, Pawn)), 8);
        assert_eq!(
            board.placement(),
            "ppp2ppp/pppppppp/pppppppp/pppppppp/3pp3/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn ice_age_covers_the_middle_with_ice() {
        let board = initial(Variant::IceAge);
        assert_eq!(count(&board, Piece::neutral(PieceKind::IceCube)), 32);
        assert_eq!(count(&board, Piece::new(Color::White, Pawn)), 8);
    }

    #[test]
    fn fen_tag_wins_over_the_variant_layout() {
        let mut record = GameRecord::new("g");
        record.add_metadata("Variant", "Racing Kings");
        record.add_metadata("FEN", "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let board = starting_board(&record, &BoardSettings::default()).unwrap();
        assert_eq!(board.placement(), "4k3/8/8/8/8/8/8/4K3");
    }

    #[test]
    fn fen_only_variants_need_a_fen() {
        let mut record = GameRecord::new("g");
        record.add_metadata("Variant", "Fischer Random");
        assert!(matches!(
            starting_board(&record, &BoardSettings::default()),
            Err(ReplayError::VariantConfiguration(_))
        ));

        record.add_metadata("FEN", "bbqnnrkr/pppppppp/8/8/8/8/PPPPPPPP/BBQNNRKR");
        let board = starting_board(&record, &BoardSettings::default()).unwrap();
        assert_eq!(board.placement(), "bbqnnrkr/pppppppp/8/8/8/8/PPPPPPPP/BBQNNRKR");
    }

    #[test]
    fn embassy_fen_is_remapped() {
        let mut record = GameRecord::new("g");
        record.add_metadata("Variant", "Embassy");
        record.add_metadata("FEN", "rnbqkmcbnr/pppppppppp/10/10/10/10/PPPPPPPPPP/RNBQKMCBNR");
        let board = starting_board(&record, &BoardSettings::default()).unwrap();
        let f1 = Square::from_algebraic("f1").unwrap();
        assert_eq!(board.piece_at(f1), Some(Piece::new(Color::White, Chancellor)));
        let g8 = Square::from_algebraic("g8").unwrap();
        assert_eq!(board.piece_at(g8), Some(Piece::new(Color::Black, Archbishop)));
    }

    #[test]
    fn fen_that_does_not_fit_is_a_configuration_error() {
        let mut record = GameRecord::new("g");
        record.add_metadata("Variant", "Grand");
        record.add_metadata("FEN", STARTPOS);
        assert!(matches!(
            starting_board(&record, &BoardSettings::default()),
            Err(ReplayError::VariantConfiguration(_))
        ));
    }

    #[test]
    fn unknown_fen_letters_fail() {
        let mut record = GameRecord::new("g");
        record.add_metadata("FEN", "4k3/8/8/8/8/8/8/4K2Z");
        assert!(matches!(
            starting_board(&record, &BoardSettings::default()),
            Err(ReplayError::Fen(_))
        ));
    }

    #[test]
    fn dark_games_start_fogged_for_the_oriented_side() {
        let mut record = GameRecord::new("g");
        record.add_metadata("Variant", "Dark");
        record.add_metadata("Result", "0-1");
        let board = starting_board(&record, &BoardSettings::default()).unwrap();
        assert_eq!(board.outcome(), Outcome::BlackWon);
        assert_eq!(board.orientation(), Color::Black);
        assert!(board.is_visible(Square::from_algebraic("e5").unwrap()));
        assert!(board.is_visible(Square::from_algebraic("c6").unwrap()));
        assert!(!board.is_visible(Square::from_algebraic("e4").unwrap()));
        assert!(!board.is_visible(Square::from_algebraic("e1").unwrap()));
    }
}
