//! The main position evaluator.
//!
//! Follows the general shape of a Stockfish-style evaluation: material and
//! piece-square tables, material imbalance, pawn structure, mobility, king
//! safety, threats, passed pawns, space and an endgame initiative/scaling
//! correction. A cheap lazy exit short-circuits the expensive terms when the
//! coarse material + pawn score already puts the position far from balanced.

use pleco::core::masks::*;
use pleco::core::mono_traits::*;
use pleco::core::score::*;
use pleco::helper::psqt;
use pleco::{BitBoard, Board, Piece, PieceType, Player, Rank, SQ};

use consts::UCI_CONFIG;
use endgame;
use tables::material::{Material, MaterialEntry, PHASE_MID_GAME, SCALE_FACTOR_NORMAL};
use tables::pawn_table::{PawnEntry, PawnTable};

/// Bonus granted to the side to move, to compensate for the fact that a
/// static evaluation cannot see the tempo the mover is about to spend.
const TEMPO: Value = 28;

/// If the coarse material + pawns evaluation already exceeds this (scaled up
/// slightly as material comes off) there's no point computing the rest.
const LAZY_THRESHOLD: Value = 1400;

/// Non-pawn material (both sides combined) below which space isn't scored.
const SPACE_THRESHOLD: Value = 12222;

const MOBILITY_KNIGHT: [Score; 9] = [
    Score(-62, -81), Score(-53, -56), Score(-12, -30), Score(-4, -14), Score(3, 8),
    Score(13, 15), Score(22, 23), Score(28, 27), Score(33, 33),
];

const MOBILITY_BISHOP: [Score; 14] = [
    Score(-48, -59), Score(-20, -23), Score(16, -3), Score(26, 13), Score(38, 24),
    Score(51, 42), Score(55, 54), Score(63, 57), Score(63, 65), Score(68, 73),
    Score(81, 78), Score(81, 86), Score(91, 88), Score(98, 97),
];

const MOBILITY_ROOK: [Score; 15] = [
    Score(-58, -76), Score(-27, -18), Score(-15, 28), Score(-10, 55), Score(-5, 69),
    Score(-2, 82), Score(9, 112), Score(16, 118), Score(30, 132), Score(29, 142),
    Score(32, 155), Score(38, 165), Score(46, 166), Score(48, 169), Score(58, 171),
];

const MOBILITY_QUEEN: [Score; 28] = [
    Score(-39, -36), Score(-21, -15), Score(3, 8), Score(3, 18), Score(14, 34),
    Score(22, 54), Score(28, 61), Score(41, 73), Score(43, 79), Score(48, 92),
    Score(56, 94), Score(60, 104), Score(60, 113), Score(66, 120), Score(67, 123),
    Score(70, 126), Score(71, 133), Score(73, 136), Score(79, 140), Score(88, 143),
    Score(88, 148), Score(99, 166), Score(102, 170), Score(102, 175), Score(106, 184),
    Score(109, 191), Score(113, 206), Score(116, 212),
];

/// Indexed by `PieceType as usize`; the attacked piece's type determines the bonus.
const MINOR_THREAT: [Score; PIECE_TYPE_CNT] = [
    Score::ZERO,    // None
    Score(0, 31),   // Pawn
    Score(39, 42),  // Knight
    Score(57, 44),  // Bishop
    Score(68, 112), // Rook
    Score(62, 120), // Queen
    Score::ZERO,    // King
    Score::ZERO,    // All
];

const MAJOR_THREAT: [Score; PIECE_TYPE_CNT] = [
    Score::ZERO,
    Score(0, 24),
    Score(38, 71),
    Score(38, 61),
    Score(0, 38),
    Score(51, 38),
    Score::ZERO,
    Score::ZERO,
];

/// Indexed by `PieceType as usize`: the weight a piece type contributes to the
/// king danger score when it attacks a square next to the enemy king.
const KING_ATTACKER_WEIGHT: [i32; PIECE_TYPE_CNT] = [0, 0, 77, 55, 44, 10, 0, 0];

/// Indexed by `PieceType as usize`: weight applied per safe check a piece
/// type delivers against the king. Pawn checks are never generated here, so
/// that slot stays 0.
const SAFE_CHECK_WEIGHT: [i32; PIECE_TYPE_CNT] = [0, 0, 790, 635, 880, 980, 0, 0];

const PASSED_RANK: [Score; 8] = [
    Score(0, 0), Score(5, 18), Score(12, 23), Score(10, 31),
    Score(57, 62), Score(163, 167), Score(271, 250), Score(0, 0),
];

const PASSED_FILE: [Score; 4] = [Score(-1, 7), Score(0, 9), Score(-9, -8), Score(-30, -14)];

const MINOR_BEHIND_PAWN: Score = Score(18, 3);
const KING_PROTECTOR: Score = Score(7, 8);
const ROOK_ON_FILE: [Score; 2] = [Score(18, 7), Score(44, 20)];
const KING_THREAT: Score = Score(24, 89);
const PIECE_HANGING: Score = Score(69, 36);
const PIECE_RESTRICTED: Score = Score(7, 6);
const PAWN_WEAK_UNOPPOSED: Score = Score(12, 23);
const PAWN_THREAT: Score = Score(173, 94);
const PAWN_PUSH_THREAT: Score = Score(48, 39);

fn mobility_bonus(pt: PieceType, mob: usize) -> Score {
    match pt {
        PieceType::N => MOBILITY_KNIGHT[mob.min(MOBILITY_KNIGHT.len() - 1)],
        PieceType::B => MOBILITY_BISHOP[mob.min(MOBILITY_BISHOP.len() - 1)],
        PieceType::R => MOBILITY_ROOK[mob.min(MOBILITY_ROOK.len() - 1)],
        PieceType::Q => MOBILITY_QUEEN[mob.min(MOBILITY_QUEEN.len() - 1)],
        _ => Score::ZERO,
    }
}

/// Per-call scratch state needed to evaluate a single position.
///
/// Built fresh for every call to `evaluate`; nothing here is retained between
/// calls except through the pawn / material hash tables.
pub struct Evaluation<'a> {
    board: &'a Board,
    pawn_entry: &'a mut PawnEntry,
    material_entry: &'a mut MaterialEntry,
    mobility_area: [BitBoard; PLAYER_CNT],
    mobility: [Score; PLAYER_CNT],
    /// Attacks of each piece type, per side. Does not include x-rays through friendly pieces.
    attacked_by: [[BitBoard; PIECE_TYPE_CNT]; PLAYER_CNT],
    /// Union of every `attacked_by` entry for a side.
    attacked_by_all: [BitBoard; PLAYER_CNT],
    /// Squares attacked by two or more of a side's own pieces.
    attacked_by2: [BitBoard; PLAYER_CNT],
    king_attackers_count: [u8; PLAYER_CNT],
    king_attackers_weight: [i32; PLAYER_CNT],
    king_adjacent_zone_attacks_count: [i32; PLAYER_CNT],
}

impl<'a> Evaluation<'a> {
    /// Statically evaluates a board, from the point of view of the side to move.
    pub fn evaluate(board: &Board, pawn_table: &mut PawnTable, material: &mut Material) -> Value {
        if let Some(white_value) = endgame::probe(board) {
            return if board.turn() == Player::White {
                white_value
            } else {
                -white_value
            };
        }

        let pawn_entry = pawn_table.probe(board);
        let material_entry = material.probe(board);

        let mut eval = Evaluation {
            board,
            pawn_entry,
            material_entry,
            mobility_area: [BitBoard(0); PLAYER_CNT],
            mobility: [Score::ZERO; PLAYER_CNT],
            attacked_by: [[BitBoard(0); PIECE_TYPE_CNT]; PLAYER_CNT],
            attacked_by_all: [BitBoard(0); PLAYER_CNT],
            attacked_by2: [BitBoard(0); PLAYER_CNT],
            king_attackers_count: [0; PLAYER_CNT],
            king_attackers_weight: [0; PLAYER_CNT],
            king_adjacent_zone_attacks_count: [0; PLAYER_CNT],
        };
        eval.value()
    }

    /// Prints a one-line breakdown to stdout, for the UCI `eval` debug command.
    pub fn trace(board: &Board) {
        let mut pawns = PawnTable::new();
        let mut material = Material::new();
        let value = Evaluation::evaluate(board, &mut pawns, &mut material);
        let white_value = if board.turn() == Player::White { value } else { -value };
        println!("Total Evaluation: {} (white's perspective, centipawns)", white_value);
    }

    fn psq_score(&self) -> Score {
        let mut score = Score::ZERO;
        for player in &[Player::White, Player::Black] {
            for pt in &[PieceType::P, PieceType::N, PieceType::B, PieceType::R, PieceType::Q, PieceType::K] {
                let mut bb = self.board.piece_bb(*player, *pt);
                let piece = Piece::make_lossy(*player, *pt);
                while let Some(s) = bb.pop_some_lsb() {
                    score += psqt::psq(piece, s);
                }
            }
        }
        score
    }

    /// Computes the single-attack bitboards of pawns and kings for both sides.
    fn initialize_base(&mut self) {
        for &us in &[Player::White, Player::Black] {
            let ui = us as usize;
            let pawns = self.board.piece_bb(us, PieceType::P);
            let pawn_atk = if us == Player::White {
                WhiteType::shift_up_left(pawns) | WhiteType::shift_up_right(pawns)
            } else {
                BlackType::shift_up_left(pawns) | BlackType::shift_up_right(pawns)
            };
            let ksq = self.board.king_sq(us);
            let king_atk = self.board.magic_helper.king_moves(ksq);

            self.attacked_by[ui][PieceType::P as usize] = pawn_atk;
            self.attacked_by[ui][PieceType::K as usize] = king_atk;
            self.attacked_by2[ui] = pawn_atk & king_atk;
            self.attacked_by_all[ui] = pawn_atk | king_atk;
        }
    }

    fn compute_mobility_areas(&mut self) {
        let occupied = self.board.get_occupied();
        for &us in &[Player::White, Player::Black] {
            let them = us.other_player();
            let ui = us as usize;
            let ti = them as usize;

            let our_pawns = self.board.piece_bb(us, PieceType::P);
            let low_ranks = us.relative_rank(Rank::R2).bb() | us.relative_rank(Rank::R3).bb();
            let blocked = our_pawns
                & if us == Player::White {
                    WhiteType::shift_down(occupied)
                } else {
                    BlackType::shift_down(occupied)
                };

            let excluded = self.attacked_by[ti][PieceType::P as usize]
                | self.board.piece_bb(us, PieceType::Q)
                | self.board.piece_bb(us, PieceType::K)
                | (our_pawns & low_ranks)
                | blocked;
            self.mobility_area[ui] = !excluded;
        }
    }

    fn attacks_from(&self, pt: PieceType, sq: SQ) -> BitBoard {
        let occ = self.board.get_occupied();
        match pt {
            PieceType::N => self.board.magic_helper.knight_moves(sq),
            PieceType::B => self.board.magic_helper.bishop_moves(occ, sq),
            PieceType::R => self.board.magic_helper.rook_moves(occ, sq),
            PieceType::Q => self.board.magic_helper.queen_moves(occ, sq),
            PieceType::K => self.board.magic_helper.king_moves(sq),
            _ => BitBoard(0),
        }
    }

    /// Evaluates every piece of type `pt` for one side, accumulating mobility
    /// and king-attack bookkeeping as a side effect, and returning the
    /// piece-specific positional bonuses (minor shielded by a pawn,
    /// king-protector penalty, rook on an open file).
    fn pieces<P: PlayerTrait>(&mut self, pt: PieceType) -> Score {
        let us = P::player();
        let them = P::opp_player();
        let ui = us as usize;
        let ti = them as usize;
        let our_ksq = self.board.king_sq(us);

        let mut score = Score::ZERO;
        let mut bb = self.board.piece_bb(us, pt);

        while let Some(s) = bb.pop_some_lsb() {
            let atk = self.attacks_from(pt, s);

            self.attacked_by2[ui] |= self.attacked_by_all[ui] & atk;
            self.attacked_by_all[ui] |= atk;
            self.attacked_by[ui][pt as usize] |= atk;

            if (atk & self.attacked_by[ti][PieceType::K as usize]).is_not_empty() {
                self.king_attackers_count[ui] += 1;
                self.king_attackers_weight[ui] += KING_ATTACKER_WEIGHT[pt as usize];
                self.king_adjacent_zone_attacks_count[ui] +=
                    (atk & self.attacked_by[ti][PieceType::K as usize]).count_bits() as i32;
            }

            let mob = (atk & self.mobility_area[ui]).count_bits() as usize;
            self.mobility[ui] += mobility_bonus(pt, mob);

            match pt {
                PieceType::N | PieceType::B => {
                    if P::player().relative_rank_of_sq(s) != Rank::R1 {
                        let behind = P::down(s);
                        if (behind.to_bb() & self.board.piece_bb_both_players(PieceType::P)).is_not_empty() {
                            score += MINOR_BEHIND_PAWN;
                        }
                    }
                    let dist = self.board.magic_helper.distance_of_sqs(s, our_ksq) as i32;
                    score -= KING_PROTECTOR * dist;
                }
                PieceType::R => {
                    let file = s.file();
                    if self.pawn_entry.semiopen_file(us, file) {
                        let idx = if self.pawn_entry.semiopen_file(them, file) { 1 } else { 0 };
                        score += ROOK_ON_FILE[idx];
                    }
                }
                _ => {}
            }
        }

        score
    }

    fn king_safety<P: PlayerTrait>(&mut self) -> Score {
        let us = P::player();
        let them = P::opp_player();
        let ui = us as usize;
        let ti = them as usize;
        let ksq = self.board.king_sq(us);

        let mut score = self.pawn_entry.king_safety::<P>(self.board, ksq);

        if self.king_attackers_count[ti] > 0 {
            // Squares attacked by the enemy and defended by us at most once,
            // excluding squares only our queen or king defend.
            let weak_area = self.attacked_by_all[ti]
                & !self.attacked_by2[ui]
                & (!self.attacked_by_all[ui]
                    | self.attacked_by[ui][PieceType::Q as usize]
                    | self.attacked_by[ui][PieceType::K as usize]);

            // Squares where an enemy check next move would be safe for them.
            let safe_area = !self.board.get_occupied_player(them)
                & (!self.attacked_by_all[ui] | (weak_area & self.attacked_by2[ti]));

            let king_ring = self.attacked_by[ui][PieceType::K as usize];

            let mut king_danger: i32 = self.king_attackers_count[ti] as i32
                * self.king_attackers_weight[ti]
                + 69 * self.king_adjacent_zone_attacks_count[ti]
                + 185 * (king_ring & weak_area).count_bits() as i32
                + (self.mobility[ti].mg() as i32 - self.mobility[ui].mg() as i32)
                - 3 * (score.mg() as i32) / 4
                - 7;

            let occ_no_queen = self.board.get_occupied() ^ self.board.piece_bb(us, PieceType::Q);
            let bshp_attack = self.board.magic_helper.bishop_moves(occ_no_queen, ksq);
            let rook_attack = self.board.magic_helper.rook_moves(occ_no_queen, ksq);

            let mut unsafe_check = BitBoard(0);

            let knight_atk = self.board.magic_helper.knight_moves(ksq) & self.attacked_by[ti][PieceType::N as usize];
            let knight_safe_check = knight_atk & safe_area;
            if knight_safe_check.is_not_empty() {
                king_danger += knight_safe_check.count_bits() as i32 * SAFE_CHECK_WEIGHT[PieceType::N as usize];
            } else {
                unsafe_check |= knight_atk;
            }

            let queen_safe_check = (bshp_attack | rook_attack)
                & self.attacked_by[ti][PieceType::Q as usize]
                & !self.attacked_by[ui][PieceType::Q as usize]
                & safe_area;

            let bishop_safe_check = bshp_attack & self.attacked_by[ti][PieceType::B as usize] & safe_area;
            let b = bishop_safe_check & !queen_safe_check;
            if b.is_not_empty() {
                king_danger += b.count_bits() as i32 * SAFE_CHECK_WEIGHT[PieceType::B as usize];
            } else {
                unsafe_check |= bshp_attack & self.attacked_by[ti][PieceType::B as usize];
            }

            let rook_safe_check = rook_attack & self.attacked_by[ti][PieceType::R as usize] & safe_area;
            let b = rook_safe_check & !queen_safe_check;
            if b.is_not_empty() {
                king_danger += b.count_bits() as i32 * SAFE_CHECK_WEIGHT[PieceType::R as usize];
            } else {
                unsafe_check |= rook_attack & self.attacked_by[ti][PieceType::R as usize];
            }

            if queen_safe_check.is_not_empty() {
                king_danger += queen_safe_check.count_bits() as i32 * SAFE_CHECK_WEIGHT[PieceType::Q as usize];
            }

            let b = queen_safe_check & (bishop_safe_check | rook_safe_check);
            if b.is_not_empty() {
                king_danger += b.count_bits() as i32 * 200;
            }

            unsafe_check &= self.mobility_area[ti];
            king_danger += 150 * (self.board.all_pinned_pieces(us) | unsafe_check).count_bits() as i32;

            if self.board.count_piece(them, PieceType::Q) == 0 {
                king_danger -= 873;
            }

            let king_spot = king_ring | ksq.to_bb();
            if (king_spot & self.attacked_by[ui][PieceType::N as usize]).is_not_empty() {
                king_danger -= 100;
            }
            if (king_spot & self.attacked_by[ui][PieceType::B as usize]).is_not_empty() {
                king_danger -= 35;
            }

            if king_danger > 0 {
                score -= Score::new(
                    (king_danger * king_danger / 4096) as Value,
                    (king_danger / 16) as Value,
                );
            }
        }

        score
    }

    fn threats<P: PlayerTrait>(&self) -> Score {
        let us = P::player();
        let them = P::opp_player();
        let ui = us as usize;
        let ti = them as usize;
        let mut score = Score::ZERO;

        let nonpawn_enemies =
            self.board.get_occupied_player(them) & !self.board.piece_bb(them, PieceType::P);
        let defended_area = self.attacked_by[ti][PieceType::P as usize]
            | (self.attacked_by2[ti] & !self.attacked_by2[ui]);
        let weak_enemies =
            self.board.get_occupied_player(them) & !defended_area & self.attacked_by_all[ui];
        let defended_nonpawns = nonpawn_enemies & defended_area;

        let mut b = (weak_enemies | defended_nonpawns)
            & (self.attacked_by[ui][PieceType::N as usize] | self.attacked_by[ui][PieceType::B as usize]);
        while let Some(s) = b.pop_some_lsb() {
            let pt = self.board.piece_at_sq(s).type_of();
            score += MINOR_THREAT[pt as usize];
        }

        let mut b = weak_enemies & self.attacked_by[ui][PieceType::R as usize];
        while let Some(s) = b.pop_some_lsb() {
            let pt = self.board.piece_at_sq(s).type_of();
            score += MAJOR_THREAT[pt as usize];
        }

        if (weak_enemies & self.attacked_by[ui][PieceType::K as usize]).is_not_empty() {
            score += KING_THREAT;
        }

        let hanging =
            weak_enemies & (!self.attacked_by_all[ti] | (nonpawn_enemies & self.attacked_by2[ui]));
        score += PIECE_HANGING * (hanging.count_bits() as i32);

        let restricted = self.attacked_by_all[ti] & !defended_area & self.attacked_by_all[ui];
        score += PIECE_RESTRICTED * (restricted.count_bits() as i32);

        if self.board.count_piece(us, PieceType::R) > 0 || self.board.count_piece(us, PieceType::Q) > 0 {
            score += PAWN_WEAK_UNOPPOSED * (self.pawn_entry.weak_unopposed(them) as i32);
        }

        let safe_squares = self.attacked_by_all[ui] | !self.attacked_by_all[ti];
        let safe_pawns = self.board.piece_bb(us, PieceType::P) & safe_squares;
        let pawn_attacks = P::shift_up_left(safe_pawns) | P::shift_up_right(safe_pawns);
        score += PAWN_THREAT * ((pawn_attacks & nonpawn_enemies).count_bits() as i32);

        let occupied = self.board.get_occupied();
        let our_pawns = self.board.piece_bb(us, PieceType::P);
        let push1 = P::shift_up(our_pawns) & !occupied;
        let rank3 = us.relative_rank(Rank::R3).bb();
        let push2 = P::shift_up(push1 & rank3) & !occupied;
        let pushed = (push1 | push2) & safe_squares & !self.attacked_by[ti][PieceType::P as usize];
        let push_attacks = P::shift_up_left(pushed) | P::shift_up_right(pushed);
        score += PAWN_PUSH_THREAT
            * ((push_attacks & self.board.get_occupied_player(them)).count_bits() as i32);

        score
    }

    fn passed_pawns<P: PlayerTrait>(&self) -> Score {
        let us = P::player();
        let them = P::opp_player();
        let ti = them as usize;
        let our_ksq = self.board.king_sq(us);
        let their_ksq = self.board.king_sq(them);

        let mut score = Score::ZERO;
        let mut passers = self.pawn_entry.passed_pawns(us);
        while let Some(s) = passers.pop_some_lsb() {
            let rank = us.relative_rank_of_sq(s) as usize;
            let mut bonus = PASSED_RANK[rank];

            if rank > Rank::R3 as usize {
                let w = ((rank as i32) - 2) * ((rank as i32) - 2) + 2;
                let push_sq = P::up(s);
                let dist_them = self.board.magic_helper.distance_of_sqs(their_ksq, push_sq).min(5) as i32;
                let dist_us = self.board.magic_helper.distance_of_sqs(our_ksq, push_sq).min(5) as i32;
                bonus += Score::new(0, 5 * w * dist_them - 2 * w * dist_us);

                if rank != Rank::R7 as usize {
                    let push2_sq = P::up(push_sq);
                    let dist2_us = self.board.magic_helper.distance_of_sqs(our_ksq, push2_sq).min(5) as i32;
                    bonus += Score::new(0, -1 * w * dist2_us);
                }

                if self.board.piece_at_sq(push_sq) == Piece::None {
                    let k = if (self.attacked_by_all[ti] & push_sq.to_bb()).is_not_empty() { 9 } else { 20 };
                    bonus += Score::new(k * w, k * w);
                }
            }

            let file = s.file().min(!s.file());
            score += bonus + PASSED_FILE[file as usize];
        }
        score
    }

    fn space<P: PlayerTrait>(&self) -> Score {
        let us = P::player();
        let them = P::opp_player();

        if self.board.non_pawn_material(us) + self.board.non_pawn_material(them) < SPACE_THRESHOLD {
            return Score::ZERO;
        }

        let our_pawns = self.board.piece_bb(us, PieceType::P);
        let mut behind = our_pawns;
        behind |= P::shift_down(behind);
        behind |= P::shift_down(P::shift_down(our_pawns));

        let central_files = BitBoard::FILE_C | BitBoard::FILE_D | BitBoard::FILE_E | BitBoard::FILE_F;
        let our_half = us.relative_rank(Rank::R2).bb()
            | us.relative_rank(Rank::R3).bb()
            | us.relative_rank(Rank::R4).bb();

        let safe_space = central_files
            & our_half
            & !our_pawns
            & !self.attacked_by[them as usize][PieceType::P as usize];

        let bonus = safe_space.count_bits() as i32 + (behind & safe_space).count_bits() as i32;
        let weight = self.board.count_pieces_player(us) as i32 - 1;
        Score::new((bonus * weight * weight / 16) as Value, 0)
    }

    fn initiative(&self, eg: Value) -> Score {
        let white_ksq = self.board.king_sq(Player::White);
        let black_ksq = self.board.king_sq(Player::Black);

        let passed_count = self.pawn_entry.passed_pawns(Player::White).count_bits() as i32
            + self.pawn_entry.passed_pawns(Player::Black).count_bits() as i32;
        let pawn_count = self.board.count_piece(Player::White, PieceType::P) as i32
            + self.board.count_piece(Player::Black, PieceType::P) as i32;

        let file_dist = (white_ksq.file() as i32 - black_ksq.file() as i32).abs();
        let rank_dist = (white_ksq.rank() as i32 - black_ksq.rank() as i32).abs();

        let mut complexity = 9 * passed_count + 11 * pawn_count + 9 * (file_dist - rank_dist) - 103;

        let pawns = self.board.piece_bb_both_players(PieceType::P);
        let kingside = BitBoard::FILE_E | BitBoard::FILE_F | BitBoard::FILE_G | BitBoard::FILE_H;
        let queenside = BitBoard::FILE_A | BitBoard::FILE_B | BitBoard::FILE_C | BitBoard::FILE_D;
        if (pawns & kingside).is_not_empty() && (pawns & queenside).is_not_empty() {
            complexity += 18;
        }

        if self.board.non_pawn_material(Player::White) + self.board.non_pawn_material(Player::Black) == 0 {
            complexity += 49;
        }

        let sign = if eg > 0 { 1 } else if eg < 0 { -1 } else { 0 };
        let eg_term = complexity.max(-(eg.abs() as i32));
        Score::new(0, (sign * eg_term) as Value)
    }

    fn value(&mut self) -> Value {
        let mut score = self.material_entry.score() + self.pawn_entry.pawns_score() + self.psq_score();

        let phase = self.material_entry.phase as i32;
        let lazy_v =
            ((score.mg() as i32) * phase + (score.eg() as i32) * (PHASE_MID_GAME as i32 - phase))
                / (PHASE_MID_GAME as i32);
        let lazy_margin = LAZY_THRESHOLD as i32 + phase / 4;
        if lazy_v.abs() > lazy_margin {
            let v = lazy_v as Value;
            return if self.board.turn() == Player::White { v + TEMPO } else { -v + TEMPO } + self.contempt();
        }

        self.initialize_base();
        self.compute_mobility_areas();

        score += self.pieces::<WhiteType>(PieceType::N) - self.pieces::<BlackType>(PieceType::N);
        score += self.pieces::<WhiteType>(PieceType::B) - self.pieces::<BlackType>(PieceType::B);
        score += self.pieces::<WhiteType>(PieceType::R) - self.pieces::<BlackType>(PieceType::R);
        score += self.pieces::<WhiteType>(PieceType::Q) - self.pieces::<BlackType>(PieceType::Q);

        score += self.mobility[Player::White as usize] - self.mobility[Player::Black as usize];

        score += self.king_safety::<WhiteType>() - self.king_safety::<BlackType>()
            + self.threats::<WhiteType>() - self.threats::<BlackType>()
            + self.passed_pawns::<WhiteType>() - self.passed_pawns::<BlackType>()
            + self.space::<WhiteType>() - self.space::<BlackType>();

        score += self.initiative(score.eg());

        let phase = self.material_entry.phase as i32;
        let mg = score.mg() as i32;
        let mut eg = score.eg() as i32;
        let scale = if eg > 0 {
            self.material_entry.scale_factor(Player::White)
        } else if eg < 0 {
            self.material_entry.scale_factor(Player::Black)
        } else {
            SCALE_FACTOR_NORMAL
        } as i32;
        eg = eg * scale / (SCALE_FACTOR_NORMAL as i32);

        let v = (mg * phase + eg * (PHASE_MID_GAME as i32 - phase)) / (PHASE_MID_GAME as i32);
        let v = v as Value;

        if self.board.turn() == Player::White { v + TEMPO } else { -v + TEMPO } + self.contempt()
    }

    /// Bonus applied for the side to move, making drawish positions look
    /// slightly worse than dead equal so the engine steers away from them.
    /// A simplified contempt: rather than tracking which color the engine
    /// itself is playing, `UCI_CONFIG.contempt()` is applied relative to
    /// whichever side is on move at this node, White-positive by convention.
    fn contempt(&self) -> Value {
        let c = UCI_CONFIG.contempt() as Value;
        if self.board.turn() == Player::White { c } else { -c }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kpk_endgame_short_circuits_general_eval() {
        let board = Board::from_fen("8/8/8/8/4k3/8/3PK3/8 w - - 0 1").unwrap();
        let mut pawns = PawnTable::new();
        let mut material = Material::new();
        let value = Evaluation::evaluate(&board, &mut pawns, &mut material);
        assert!(value > PAWN_EG);
    }

    #[test]
    fn contempt_favors_side_to_move() {
        let board = Board::start_pos();
        UCI_CONFIG.set_contempt(30);
        let mut pawns = PawnTable::new();
        let mut material = Material::new();
        let with_contempt = Evaluation::evaluate(&board, &mut pawns, &mut material);
        UCI_CONFIG.set_contempt(0);
        let mut pawns = PawnTable::new();
        let mut material = Material::new();
        let without_contempt = Evaluation::evaluate(&board, &mut pawns, &mut material);
        assert_eq!(with_contempt - without_contempt, 30);
    }
}
