//! KPK (king and pawn versus king) classification.
//!
//! A full retrograde-generated bitbase for this material signature has 2^24
//! reachable index combinations; rather than building and storing that table,
//! this applies the classical "rule of the square" plus a key-squares check
//! for the defending side, which classifies the large majority of KPK
//! positions correctly and cheaply. This is the "simple scoring heuristic"
//! variant the general endgame-evaluator contract allows in place of a
//! closed-form table lookup.

use pleco::core::score::*;
use pleco::{Board, File, PieceType, Player, SQ};

/// Value returned for the side holding the pawn when the pawn is judged to
/// queen safely.
const PAWN_WINS: Value = PAWN_EG + 500;

/// Returns a value from White's perspective for a King+Pawn vs King position.
pub fn probe_kpk(board: &Board) -> Value {
    let (strong, weak) = if board.count_piece(Player::White, PieceType::P) == 1 {
        (Player::White, Player::Black)
    } else {
        (Player::Black, Player::White)
    };

    let pawn_sq = board.piece_bb(strong, PieceType::P).to_sq();
    let strong_ksq = board.king_sq(strong);
    let weak_ksq = board.king_sq(weak);
    let weak_to_move = board.turn() == weak;

    let won = is_win(strong, pawn_sq, strong_ksq, weak_ksq, weak_to_move);
    let value = if won { PAWN_WINS } else { ZERO };
    if strong == Player::White {
        value
    } else {
        -value
    }
}

/// Distance (in ranks, 0-indexed from the strong side's perspective) the
/// pawn still has to travel to queen.
fn relative_rank(strong: Player, sq: SQ) -> i32 {
    let r = sq.rank() as i32;
    if strong == Player::White {
        r
    } else {
        7 - r
    }
}

fn is_win(strong: Player, pawn_sq: SQ, strong_ksq: SQ, weak_ksq: SQ, weak_to_move: bool) -> bool {
    let queening_file = pawn_sq.file();
    let queening_rank_dist = 7 - relative_rank(strong, pawn_sq);

    // Square of the pawn: the defending king must be inside this square to
    // catch the pawn (expanded by one extra rank of "reach" if it is the
    // defender's move).
    let square_size = queening_rank_dist + if weak_to_move { 0 } else { 1 };
    let weak_rank_dist = (7 - relative_rank(strong, weak_ksq)).max(relative_rank(strong, weak_ksq));
    let file_dist = (weak_ksq.file() as i32 - queening_file as i32).abs();
    let rank_dist_to_queen = (weak_rank_dist - queening_rank_dist).abs().min(weak_rank_dist);
    let outside_square = file_dist.max(rank_dist_to_queen) > square_size;

    if outside_square {
        return true;
    }

    // Rook-pawns can only be escorted home via the queening corner, which a
    // king that has reached the square can always defend; treat these as
    // drawn once the defender is inside the square.
    if queening_file == File::A || queening_file == File::H {
        return false;
    }

    // Otherwise the pawn queens iff the strong king has taken up a key
    // square: on or ahead of the pawn, within one file, at least two ranks
    // in front of it (the classic "king supports the pawn" condition).
    let strong_file_dist = (strong_ksq.file() as i32 - pawn_sq.file() as i32).abs();
    let strong_ahead = relative_rank(strong, strong_ksq) >= relative_rank(strong, pawn_sq);
    strong_file_dist <= 1 && strong_ahead && strong_ksq != weak_ksq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_pawn_with_king_cut_off_is_a_draw() {
        // White king far away, black king in front of its own rook pawn's path.
        let board = Board::from_fen("8/8/8/8/8/2k5/P7/K7 w - - 0 1").unwrap();
        assert_eq!(probe_kpk(&board), ZERO);
    }

    #[test]
    fn advanced_supported_pawn_wins() {
        let board = Board::from_fen("8/8/8/8/4k3/8/3PK3/8 w - - 0 1").unwrap();
        assert!(probe_kpk(&board) > 0);
    }
}
