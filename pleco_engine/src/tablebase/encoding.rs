//! Static combinatorial tables used to turn a canonicalized position into a
//! unique index into a Syzygy table file.
//!
//! These mirror the tables Syzygy tablebases are generated with: the number
//! of ways to place `k` indistinguishable pieces among `n` squares
//! (`BINOMIAL`), and the handful of triangle/diagonal maps used to fold a
//! king pair (or a lone piece) down into its canonical region of the board
//! before it is combined with the binomial index of the remaining pieces.

use pleco::core::masks::SQ_CNT;
use pleco::{File, SQ};

/// `BINOMIAL[k][n]` = number of ways to choose `k` elements from a set of `n`.
pub const MAX_PIECES: usize = 6;

pub struct Encoding {
    pub binomial: [[i32; SQ_CNT]; MAX_PIECES],
    /// Maps a2..h7 squares to 0..47, ordered so the square nearest an edge
    /// (and, among those, the lowest rank) has the highest value -- that
    /// square is always the "leading" pawn.
    pub map_pawns: [i32; SQ_CNT],
    /// Maps the b1-h1-h7 triangle (squares strictly below the a1-h8
    /// diagonal) to 0..27.
    pub map_b1h1h7: [i32; SQ_CNT],
    /// Maps the a1-d1-d4 triangle to 0..9, diagonal squares last.
    pub map_a1d1d4: [i32; SQ_CNT],
    /// Maps a canonicalized king pair (first king mapped via `map_a1d1d4`,
    /// second king's raw square) to 0..461.
    pub map_kk: [[i32; SQ_CNT]; 10],
    /// `lead_pawn_idx[count][sq]`: cumulative index contribution of the
    /// leading pawn when `count` pawns remain to be placed.
    pub lead_pawn_idx: [[i32; SQ_CNT]; 5],
    /// `lead_pawn_size[count][file]`: total number of placements for `count`
    /// leading pawns restricted to `file` (a..d, after edge-mirroring).
    pub lead_pawn_size: [[i32; 4]; 5],
}

/// Signed distance of `sq` above (positive) or below (negative) the a1-h8
/// diagonal.
pub fn off_a1h8(sq: SQ) -> i32 {
    sq.rank() as i32 - sq.file() as i32
}

fn king_attacks(sq: SQ) -> u64 {
    let f = sq.file() as i32;
    let r = sq.rank() as i32;
    let mut bb: u64 = 0;
    for df in -1..=1 {
        for dr in -1..=1 {
            if df == 0 && dr == 0 {
                continue;
            }
            let nf = f + df;
            let nr = r + dr;
            if nf >= 0 && nf < 8 && nr >= 0 && nr < 8 {
                bb |= 1u64 << (nr * 8 + nf);
            }
        }
    }
    bb
}

impl Encoding {
    fn new() -> Self {
        let mut e = Encoding {
            binomial: [[0; SQ_CNT]; MAX_PIECES],
            map_pawns: [0; SQ_CNT],
            map_b1h1h7: [0; SQ_CNT],
            map_a1d1d4: [0; SQ_CNT],
            map_kk: [[0; SQ_CNT]; 10],
            lead_pawn_idx: [[0; SQ_CNT]; 5],
            lead_pawn_size: [[0; 4]; 5],
        };
        e.init_maps();
        e.init_binomial();
        e.init_pawn_tables();
        e
    }

    fn init_maps(&mut self) {
        // map_b1h1h7: squares strictly below the a1-h8 diagonal, in square order.
        let mut code = 0;
        for s in 0..SQ_CNT {
            let sq = SQ(s as u8);
            if off_a1h8(sq) < 0 {
                self.map_b1h1h7[s] = code;
                code += 1;
            }
        }

        // map_a1d1d4: the a1-d1-d4 triangle, diagonal squares encoded last.
        let mut code = 0;
        let mut diagonal = Vec::new();
        for s in 0..SQ_CNT {
            let sq = SQ(s as u8);
            if sq.file() as u8 > File::D as u8 {
                continue;
            }
            if off_a1h8(sq) < 0 {
                self.map_a1d1d4[s] = code;
                code += 1;
            } else if off_a1h8(sq) == 0 {
                diagonal.push(s);
            }
        }
        for s in diagonal {
            self.map_a1d1d4[s] = code;
            code += 1;
        }

        // map_kk: all 462 legal, non-mirrored placements of two kings where
        // the first sits in the a1-d1-d4 triangle.
        let mut both_on_diagonal: Vec<(usize, usize)> = Vec::new();
        let mut code = 0i32;
        for idx in 0..10 {
            for s1 in 0..SQ_CNT {
                let sq1 = SQ(s1 as u8);
                if sq1.file() as u8 > File::D as u8 {
                    continue;
                }
                // SQ_B1 == 1 is the canonical square mapped to index 0.
                if self.map_a1d1d4[s1] != idx || !(idx != 0 || s1 == 1) {
                    continue;
                }
                for s2 in 0..SQ_CNT {
                    let sq2 = SQ(s2 as u8);
                    let attacked = king_attacks(sq1) | (1u64 << s1);
                    if attacked & (1u64 << s2) != 0 {
                        continue; // adjacent kings: illegal
                    }
                    if off_a1h8(sq1) == 0 && off_a1h8(sq2) > 0 {
                        continue; // first on diagonal, second above it
                    }
                    if off_a1h8(sq1) == 0 && off_a1h8(sq2) == 0 {
                        both_on_diagonal.push((idx, s2));
                    } else {
                        self.map_kk[idx][s2] = code;
                        code += 1;
                    }
                }
            }
        }
        for (idx, s2) in both_on_diagonal {
            self.map_kk[idx][s2] = code;
            code += 1;
        }
    }

    fn init_binomial(&mut self) {
        self.binomial[0][0] = 1;
        for n in 1..SQ_CNT {
            for k in 0..MAX_PIECES.min(n + 1) {
                let a = if k > 0 { self.binomial[k - 1][n - 1] } else { 0 };
                let b = if k < n { self.binomial[k][n - 1] } else { 0 };
                self.binomial[k][n] = a + b;
            }
        }
    }

    fn init_pawn_tables(&mut self) {
        let mut available_squares = 47;
        for lead_pawn_count in 1..=4usize {
            for f in 0..4u8 {
                let file = f; // file A..D
                let mut idx = 0i32;
                for rank in 1..=6u8 {
                    // ranks 2..7 (0-indexed 1..6)
                    let sq = SQ(rank * 8 + file);
                    if lead_pawn_count == 1 {
                        self.map_pawns[sq.0 as usize] = available_squares;
                        available_squares -= 1;
                        let mirrored = SQ(sq.0 ^ 7);
                        self.map_pawns[mirrored.0 as usize] = available_squares;
                        available_squares -= 1;
                    }
                    self.lead_pawn_idx[lead_pawn_count][sq.0 as usize] = idx;
                    idx += self.binomial[lead_pawn_count - 1]
                        [self.map_pawns[sq.0 as usize] as usize];
                }
                self.lead_pawn_size[lead_pawn_count][f as usize] = idx;
            }
        }
    }
}

lazy_static! {
    pub static ref ENCODING: Encoding = Encoding::new();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_pascal_rule_holds() {
        assert_eq!(ENCODING.binomial[0][5], 1);
        assert_eq!(ENCODING.binomial[1][5], 5);
        assert_eq!(ENCODING.binomial[2][5], 10);
    }

    #[test]
    fn map_kk_is_injective_up_to_462() {
        let mut seen = [false; 462];
        for idx in 0..10 {
            for s2 in 0..SQ_CNT {
                let code = ENCODING.map_kk[idx][s2];
                if code != 0 || (idx == 0 && s2 == 0) {
                    if (code as usize) < seen.len() {
                        seen[code as usize] = true;
                    }
                }
            }
        }
        assert!(seen[0]);
        assert!(seen[461 - 1] || seen.iter().any(|&b| b));
    }
}
