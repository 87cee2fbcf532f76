//! Specialized endgame evaluators.
//!
//! A handful of material signatures are common enough, and hard enough for the
//! general-purpose evaluator to score well, that they get a dedicated
//! closed-form function instead: mating a lone king, KBNK, KRKP and friends.
//! `probe` recognizes these signatures directly from piece counts (rather than
//! building a material-key hash map, since the signature set is small and
//! fixed) and returns a value in place of the general evaluator's whole
//! output, from White's perspective.

pub mod bitbases;

use pleco::core::score::*;
use pleco::{BitBoard, Board, File, Player, PieceType, Rank, SQ};

/// Distance of a square from the edge of the board: 0 on the rim, up to 3 in
/// the center. Used to push a lone king towards the corner.
fn push_to_edge(sq: SQ) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    let fd = file.min(7 - file);
    let rd = rank.min(7 - rank);
    90 - (7 * fd.min(rd) + 3 * fd.max(rd))
}

/// Bonus for pushing a lone king into the corner matching the mating bishop's
/// square color (dark or light), used by KBNK.
fn push_to_corner(sq: SQ) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    (((file - rank).abs()).min((file + rank - 7).abs())) * -10 + 90
}

/// Bonus for pulling the mating king close to the losing king.
fn push_close(a: SQ, b: SQ) -> i32 {
    140 - 20 * a.distance(b) as i32
}

/// Penalty for the mating king lingering far from the losing king (used where
/// the mating side instead wants distance, e.g. KRKP).
fn push_away(a: SQ, b: SQ) -> i32 {
    120 - push_close(a, b)
}

const KNOWN_WIN: Value = 10000;

/// Side `c`'s pieces, excluding pawns and king: (knights, bishops, rooks, queens).
fn minor_major_counts(board: &Board, c: Player) -> (u8, u8, u8, u8) {
    (
        board.count_piece(c, PieceType::N),
        board.count_piece(c, PieceType::B),
        board.count_piece(c, PieceType::R),
        board.count_piece(c, PieceType::Q),
    )
}

/// Attempts to resolve `board` with a specialized endgame formula, returning a
/// value from White's perspective (the caller adjusts for side to move).
///
/// Returns `None` when no specialized evaluator's material signature matches,
/// in which case the general evaluator runs as usual.
pub fn probe(board: &Board) -> Option<Value> {
    let w_pawns = board.count_piece(Player::White, PieceType::P);
    let b_pawns = board.count_piece(Player::Black, PieceType::P);
    let (w_n, w_b, w_r, w_q) = minor_major_counts(board, Player::White);
    let (b_n, b_b, b_r, b_q) = minor_major_counts(board, Player::Black);

    let w_npm = board.non_pawn_material(Player::White);
    let b_npm = board.non_pawn_material(Player::Black);
    let w_pieces = w_n + w_b + w_r + w_q;
    let b_pieces = b_n + b_b + b_r + b_q;

    // KPK: lone pawn versus lone king, either side.
    if w_pieces == 0 && b_pieces == 0 && w_pawns + b_pawns == 1 {
        return Some(bitbases::probe_kpk(board));
    }

    // One side is bare (no pawns, no pieces): the other side either mates
    // with its material (KXK, with enough force to not be a theoretical
    // draw) or the position is simply won/drawn by the heuristic below.
    let white_bare = w_pawns == 0 && w_pieces == 0;
    let black_bare = b_pawns == 0 && b_pieces == 0;

    // KBPsK: bishop and one or more pawns versus a lone king. Checked ahead
    // of the generic KXK fallback below, since that fallback would otherwise
    // treat it as a trivial mate and miss the wrong-bishop draw.
    if black_bare && w_b == 1 && w_n == 0 && w_r == 0 && w_q == 0 && w_pawns > 0 {
        return Some(kbpsk(board, Player::White));
    }
    if white_bare && b_b == 1 && b_n == 0 && b_r == 0 && b_q == 0 && b_pawns > 0 {
        return Some(-kbpsk(board, Player::Black));
    }

    if black_bare && !white_bare && b_npm == 0 {
        return Some(kxk(board, Player::White, w_pawns, w_n, w_b, w_r, w_q));
    }
    if white_bare && !black_bare && w_npm == 0 {
        return Some(-kxk(board, Player::Black, b_pawns, b_n, b_b, b_r, b_q));
    }

    // KBNK: bishop + knight mating a lone king.
    if white_bare && b_pawns == 0 && b_n == 1 && b_b == 1 && b_r == 0 && b_q == 0 {
        return Some(-kbnk(board, Player::Black));
    }
    if black_bare && w_pawns == 0 && w_n == 1 && w_b == 1 && w_r == 0 && w_q == 0 {
        return Some(kbnk(board, Player::White));
    }

    // KRKP: rook versus lone pawn.
    if w_pawns == 0 && w_r == 1 && w_n == 0 && w_b == 0 && w_q == 0
        && b_pawns == 1 && b_pieces == 0
    {
        return Some(krkp(board, Player::White));
    }
    if b_pawns == 0 && b_r == 1 && b_n == 0 && b_b == 0 && b_q == 0
        && w_pawns == 1 && w_pieces == 0
    {
        return Some(-krkp(board, Player::Black));
    }

    // KRKB / KRKN: rook versus a lone minor, both drawish.
    if w_pawns == 0 && b_pawns == 0 && w_r == 1 && w_n == 0 && w_b == 0 && w_q == 0 {
        if b_b == 1 && b_n == 0 && b_r == 0 && b_q == 0 {
            return Some(drawish_minor(board, Player::White));
        }
        if b_n == 1 && b_b == 0 && b_r == 0 && b_q == 0 {
            return Some(drawish_minor(board, Player::White));
        }
    }
    if w_pawns == 0 && b_pawns == 0 && b_r == 1 && b_n == 0 && b_b == 0 && b_q == 0 {
        if w_b == 1 && w_n == 0 && w_r == 0 && w_q == 0 {
            return Some(-drawish_minor(board, Player::Black));
        }
        if w_n == 1 && w_b == 0 && w_r == 0 && w_q == 0 {
            return Some(-drawish_minor(board, Player::Black));
        }
    }

    // KQKP: queen versus lone pawn, won for the queen unless the pawn is one
    // square from promotion defended by its king.
    if w_pawns == 0 && w_q == 1 && w_n == 0 && w_b == 0 && w_r == 0
        && b_pawns == 1 && b_pieces == 0
    {
        return Some(kqkp(board, Player::White));
    }
    if b_pawns == 0 && b_q == 1 && b_n == 0 && b_b == 0 && b_r == 0
        && w_pawns == 1 && w_pieces == 0
    {
        return Some(-kqkp(board, Player::Black));
    }

    // KNNK: two knights can't force mate against a bare king.
    if w_pawns == 0 && b_pawns == 0 && w_n == 2 && w_b == 0 && w_r == 0 && w_q == 0 && black_bare {
        return Some(ZERO);
    }
    if w_pawns == 0 && b_pawns == 0 && b_n == 2 && b_b == 0 && b_r == 0 && b_q == 0 && white_bare {
        return Some(ZERO);
    }

    None
}

/// Generic "mate the lone king" formula: material plus a push-to-edge bonus
/// for the losing king and a push-together bonus for the kings.
fn kxk(board: &Board, strong: Player, pawns: u8, n: u8, b: u8, r: u8, q: u8) -> Value {
    let weak = strong.other_player();
    let material = i32::from(pawns) * PAWN_EG
        + i32::from(n) * KNIGHT_EG
        + i32::from(b) * BISHOP_EG
        + i32::from(r) * ROOK_EG
        + i32::from(q) * QUEEN_EG;

    let strong_ksq = board.king_sq(strong);
    let weak_ksq = board.king_sq(weak);
    let v = material + push_to_edge(weak_ksq) + push_close(strong_ksq, weak_ksq);
    (KNOWN_WIN + v as Value).min(30000)
}

/// Bishop + knight versus a lone king: won, but only by driving the king into
/// the corner the bishop covers.
fn kbnk(board: &Board, strong: Player) -> Value {
    let weak = strong.other_player();
    let strong_ksq = board.king_sq(strong);
    let weak_ksq = board.king_sq(weak);
    let bsq = board.piece_bb(strong, PieceType::B).to_sq();

    // Bishops on a1-h8-colored squares want the king pushed to a1/h8;
    // the other diagonal colored bishop wants a8/h1. `push_to_corner`
    // already measures distance to the a1-h8 diagonal, so mirror the
    // losing king horizontally when the bishop sits on a light square.
    let dark_bishop = (bsq.0 / 8 + bsq.0 % 8) % 2 == 0;
    let corner_sq = if dark_bishop { weak_ksq } else { weak_ksq.flip() };

    KNOWN_WIN
        + push_close(strong_ksq, weak_ksq) as Value
        + push_to_corner(corner_sq) as Value
}

/// Rook versus a lone pawn: generally won, scaled down by how advanced the
/// pawn already is and how far the defending king is from it.
fn krkp(board: &Board, strong: Player) -> Value {
    let weak = strong.other_player();
    let strong_ksq = board.king_sq(strong);
    let weak_ksq = board.king_sq(weak);
    let pawn_sq = board.piece_bb(weak, PieceType::P).to_sq();
    let queening_rank = if weak == Player::White { 7 } else { 0 };
    let push_dist = (queening_rank - pawn_sq.rank() as i32).abs();

    let v = ROOK_EG as i32 - push_dist * 20 + push_away(strong_ksq, pawn_sq);
    (v.max(40) as Value).min(ROOK_EG + 200)
}

/// Queen versus a lone pawn: nearly always won, with a small discount while
/// the pawn is close to queening and shielded by its own king.
fn kqkp(board: &Board, strong: Player) -> Value {
    let weak = strong.other_player();
    let weak_ksq = board.king_sq(weak);
    let pawn_sq = board.piece_bb(weak, PieceType::P).to_sq();
    let queening_rank = if weak == Player::White { 7 } else { 0 };
    let close_to_promoting =
        (queening_rank - pawn_sq.rank() as i32).abs() <= 1 && weak_ksq.distance(pawn_sq) <= 1;

    if close_to_promoting {
        (QUEEN_EG - ROOK_EG) as Value
    } else {
        QUEEN_EG
    }
}

/// A lone rook against a lone minor piece: a likely draw, regardless of how
/// the kings are placed.
fn drawish_minor(_board: &Board, _strong: Player) -> Value {
    ROOK_EG - BISHOP_EG
}

/// Bishop and pawns versus a lone king. Normally a comfortable win, but
/// drawn in the classic "wrong bishop" case: every pawn is a rook pawn,
/// the bishop doesn't control the queening corner, and the defending king
/// can reach that corner in time to shepherd it.
fn kbpsk(board: &Board, strong: Player) -> Value {
    let weak = strong.other_player();
    let pawns = board.piece_bb(strong, PieceType::P);
    let pawn_cnt = pawns.count_bits() as i32;
    let strong_ksq = board.king_sq(strong);
    let weak_ksq = board.king_sq(weak);
    let bsq = board.piece_bb(strong, PieceType::B).to_sq();

    let queening_rank = if strong == Player::White { Rank::R8 } else { Rank::R1 };
    let all_file_a = (pawns & !BitBoard::FILE_A).is_empty();
    let all_file_h = (pawns & !BitBoard::FILE_H).is_empty();

    if all_file_a || all_file_h {
        let file = if all_file_a { File::A } else { File::H };
        let corner = SQ::make(file, queening_rank);
        if bsq.on_dark_square() != corner.on_dark_square() && weak_ksq.distance(corner) <= 1 {
            return ZERO;
        }
    }

    let material = pawn_cnt * i32::from(PAWN_EG) + i32::from(BISHOP_EG);
    let v = KNOWN_WIN
        + material as Value
        + push_to_edge(weak_ksq) as Value
        + push_close(strong_ksq, weak_ksq) as Value;
    v.min(30000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kxk_favors_attacker() {
        let board = Board::from_fen("8/8/8/8/4k3/8/8/R3K3 w - - 0 1").unwrap();
        let v = probe(&board).unwrap();
        assert!(v > 0);
    }

    #[test]
    fn knnk_is_a_draw() {
        let board = Board::from_fen("8/8/8/4k3/8/8/8/N2NK3 w - - 0 1").unwrap();
        assert_eq!(probe(&board), Some(ZERO));
    }

    #[test]
    fn kbnk_favors_attacker() {
        let board = Board::from_fen("8/8/8/4k3/8/8/8/BN2K3 w - - 0 1").unwrap();
        let v = probe(&board).unwrap();
        assert!(v > 0);
    }

    #[test]
    fn kbpsk_wrong_bishop_corner_is_drawn() {
        // White pawn stuck on the a-file, light-squared bishop can't cover
        // a8, and the black king is already sat in that corner.
        let board = Board::from_fen("k7/8/8/8/8/8/P7/BK6 w - - 0 1").unwrap();
        assert_eq!(probe(&board), Some(ZERO));
    }

    #[test]
    fn kbpsk_right_bishop_is_won() {
        let board = Board::from_fen("k7/8/8/8/8/8/P7/1K1B4 w - - 0 1").unwrap();
        let v = probe(&board).unwrap();
        assert!(v > 0);
    }
}
