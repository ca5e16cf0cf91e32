//! Integration tests replaying complete game records through the public API.

use proptest::prelude::*;
use replay_core::{Color, Move, ParseContext, Piece, PieceKind, Square, Variant};
use replay_engine::{
    import_str, initial_board, replay, Board, BoardSettings, Frame, ReplayAbort, ReplayError,
    ReplaySettings, ReplaySummary,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn run(text: &str) -> ReplaySummary {
    let game = import_str("test", text).expect("game should import");
    let mut ignore = |_: &Board, _: &Frame<'_>| {};
    replay(&game, &ReplaySettings::default(), &mut ignore).expect("game should replay")
}

fn play(board: &mut Board, token: &str, number: u32, color: Color) {
    let mv = Move::parse(token, number, color, &ParseContext::new(board.variant())).unwrap();
    board.start_move(&mv).unwrap();
    while board.is_animating() {
        board.step();
    }
    board.commit().unwrap();
}

#[test]
fn test_opening_moves() {
    let summary = run("1. e4 e5 *");
    let board = &summary.board;
    assert_eq!(board.piece_at(sq("e4")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(board.piece_at(sq("e5")), Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(board.piece_at(sq("e2")), None);
    assert_eq!(board.piece_at(sq("e7")), None);
}

#[test]
fn test_en_passant() {
    let summary = run("1. e4 a6 2. e5 d5 3. exd6 *");
    let board = &summary.board;
    assert_eq!(board.piece_at(sq("d5")), None);
    assert_eq!(board.piece_at(sq("d6")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert_eq!(board.captured(Color::Black).len(), 1);
}

#[test]
fn test_castling_in_a_real_game() {
    let summary = run("1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O Nf6 5. d3 O-O *");
    let board = &summary.board;
    assert_eq!(board.piece_at(sq("g1")), Some(Piece::new(Color::White, PieceKind::King)));
    assert_eq!(board.piece_at(sq("f1")), Some(Piece::new(Color::White, PieceKind::Rook)));
    assert_eq!(board.piece_at(sq("g8")), Some(Piece::new(Color::Black, PieceKind::King)));
    assert_eq!(board.piece_at(sq("f8")), Some(Piece::new(Color::Black, PieceKind::Rook)));
    assert_eq!(board.piece_at(sq("h1")), None);
    assert_eq!(board.piece_at(sq("h8")), None);
}

#[test]
fn test_atomic_explosion_spares_pawns() {
    let summary = run(concat!(
        "[Variant \"Atomic\"]\n",
        "[FEN \"4k3/8/8/3rp3/3pnq2/3b1P2/8/4R1K1 w - - 0 1\"]\n",
        "1. Rxe4 *"
    ));
    let board = &summary.board;
    for s in ["d3", "d5", "e4", "f4"] {
        assert_eq!(board.piece_at(sq(s)), None, "{s} should have exploded");
    }
    for s in ["d4", "e5", "f3"] {
        assert!(
            board.piece_at(sq(s)).is_some_and(|p| p.kind == PieceKind::Pawn),
            "pawn on {s} should survive"
        );
    }
    assert_eq!(board.captured(Color::Black).len(), 4);
    assert_eq!(board.captured(Color::White).len(), 1);
}

#[test]
fn test_atomic_king_explosion_result() {
    let summary = run(concat!(
        "[Variant \"Atomic\"]\n",
        "[FEN \"3qk3/8/8/8/8/8/8/3QK3 w - - 0 1\"]\n",
        "1. Qxd8 *"
    ));
    assert_eq!(summary.result(), "Black king exploded");
}

#[test]
fn test_extinction_result() {
    let summary = run(concat!(
        "[Variant \"Extinction\"]\n",
        "[FEN \"rn1qk1nr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1\"]\n",
        "1. e4 *"
    ));
    assert_eq!(summary.result(), "Black lost all bishops");
    assert_eq!(
        summary.board.notation().to_string(),
        "1. e4 (Black lost all bishops)"
    );
}

#[test]
fn test_three_checks() {
    let summary = run(concat!(
        "[Variant \"Three Checks\"]\n",
        "1. e4 e5 2. Bc4 Nc6 3. Bxf7+ Kxf7 4. Qh5+ Ke7 5. Qxe5+ 1-0"
    ));
    assert_eq!(summary.board.checks(Color::White), 3);
    assert_eq!(summary.board.game_status(), "Checks: 3/0");
    assert_eq!(summary.result(), "Third check");
}

#[test]
fn test_resignation_and_checkmate_text() {
    assert_eq!(run("[Result \"1-0\"]\n1. e4 e5 1-0").result(), "Black resigned");
    assert_eq!(run("[Result \"0-1\"]\n1. e4 e5 0-1").result(), "White resigned");
    assert_eq!(
        run("[Result \"1/2-1/2\"]\n1. e4 e5 1/2-1/2").result(),
        "Draw"
    );
    let mate = run("[Result \"0-1\"]\n1. f3 e5 2. g4 Qh4# 0-1");
    assert_eq!(mate.result(), "Checkmate");
    assert_eq!(mate.board.orientation(), Color::Black);
}

#[test]
fn test_dark_visibility_follows_the_oriented_side() {
    let settings = BoardSettings::default();
    let mut board = initial_board(Variant::Dark, &settings).unwrap();
    assert!(board.is_visible(sq("e4")));
    assert!(board.is_visible(sq("c3")));
    assert!(!board.is_visible(sq("e5")));
    assert!(!board.is_visible(sq("e8")));

    play(&mut board, "e4", 1, Color::White);
    assert!(board.is_visible(sq("e5")));
    assert!(board.is_visible(sq("d5")));
    assert!(board.is_visible(sq("a6")));
    assert!(board.is_visible(sq("h5")));
    assert!(!board.is_visible(sq("e8")));
    assert!(!board.is_visible(sq("e6")));

    board.finish();
    assert!(board.dimensions().squares().all(|s| board.is_visible(s)));
}

#[test]
fn test_cheshire_cat_holes() {
    let summary = run("[Variant \"Cheshire Cat\"]\n1. Nf3 Nc6 *");
    assert!(summary.board.is_hole(sq("g1")));
    assert!(summary.board.is_hole(sq("b8")));
    assert_eq!(
        summary.placement(),
        "rhbqkbnr/pppppppp/2n5/8/8/5N2/PPPPPPPP/RNBQKBhR"
    );
}

#[test]
fn test_loop_drop() {
    let summary = run("[Variant \"Loop\"]\n1. e4 d5 2. exd5 Qxd5 3. Nc3 Qa5 4. P@e4 *");
    let board = &summary.board;
    assert_eq!(board.piece_at(sq("e4")), Some(Piece::new(Color::White, PieceKind::Pawn)));
    assert!(board.captured(Color::Black).is_empty());
    assert_eq!(
        board.captured(Color::White)[0].piece(),
        Piece::new(Color::Black, PieceKind::Pawn)
    );
}

#[test]
fn test_racing_kings_finish() {
    let summary = run(concat!(
        "[Variant \"Racing Kings\"]\n",
        "1. Kh3 Ka3 2. Kh4 Ka4 3. Kh5 Ka5 4. Kh6 Ka6 5. Kh7 Ka7 6. Kh8 *"
    ));
    assert_eq!(summary.result(), "White king reached the last row");
}

#[test]
fn test_grand_chess_ten_by_ten() {
    let summary = run("[Variant \"Grand\"]\n1. e5 e6 2. Ce4 *");
    assert_eq!(
        summary.placement(),
        "r8r/1nbqkcabn1/pppp1ppppp/10/4p5/4P5/4C5/PPPP1PPPPP/1NBQK1ABN1/R8R"
    );
}

#[test]
fn test_malformed_token_fails_the_import() {
    let err = import_str("bad", "1. e4 zz99 2. Nf3 *").unwrap_err();
    assert_eq!(err.token(), Some("zz99"));
}

#[test]
fn test_failed_move_leaves_the_board_untouched() {
    let settings = BoardSettings::default();
    let mut board = initial_board(Variant::Standard, &settings).unwrap();
    play(&mut board, "e4", 1, Color::White);
    let before = board.placement();

    let bad = Move::parse("Qe6", 1, Color::Black, &ParseContext::default()).unwrap();
    assert!(matches!(
        board.start_move(&bad),
        Err(ReplayError::OriginResolution { .. })
    ));
    assert!(!board.is_animating());
    board.commit().unwrap();
    assert_eq!(board.placement(), before);
}

#[test]
fn test_replay_abort_reports_the_token() {
    let game = import_str("g", "1. e4 e5 2. Ke3 *").unwrap();
    let mut ignore = |_: &Board, _: &Frame<'_>| {};
    let err = replay(&game, &ReplaySettings::default(), &mut ignore).unwrap_err();
    assert!(matches!(err, ReplayAbort::Move { number: 2, .. }));
    assert_eq!(err.token(), Some("Ke3"));
}

proptest! {
    #[test]
    fn extra_steps_after_a_move_change_nothing(extra in 0usize..40) {
        let settings = BoardSettings::default();
        let mut board = initial_board(Variant::Standard, &settings).unwrap();
        let mv = Move::parse("Nc3", 1, Color::White, &ParseContext::default()).unwrap();
        board.start_move(&mv).unwrap();
        while board.is_animating() {
            board.step();
        }
        let settled: Vec<_> = board.pieces().map(|(s, bp)| (s, bp.position())).collect();
        for _ in 0..extra {
            board.step();
        }
        let after: Vec<_> = board.pieces().map(|(s, bp)| (s, bp.position())).collect();
        prop_assert_eq!(settled, after);
    }
}
