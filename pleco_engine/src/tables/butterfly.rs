use std::ops::{Index, IndexMut};

use pleco::core::masks::*;
use pleco::{BitMove, Player};

use super::{NumStatBoard, StatBoard};

#[allow(non_camel_case_types)]
type BF_idx = (Player, BitMove);

/// ButterflyBoards are 2 tables (one for each color) indexed by the move's from
/// and to squares, see chessprogramming.wikispaces.com/Butterfly+Boards
pub struct ButterflyHistory {
    a: [[i16; SQ_CNT * SQ_CNT]; PLAYER_CNT],
}

impl Index<BF_idx> for ButterflyHistory {
    type Output = i16;

    #[inline(always)]
    fn index(&self, idx: BF_idx) -> &Self::Output {
        let from = idx.1.get_src().0 as usize;
        let to = idx.1.get_dest().0 as usize;
        unsafe {
            self.a
                .get_unchecked(idx.0 as usize)
                .get_unchecked(from * SQ_CNT + to)
        }
    }
}

impl IndexMut<BF_idx> for ButterflyHistory {
    #[inline(always)]
    fn index_mut(&mut self, idx: BF_idx) -> &mut Self::Output {
        let from = idx.1.get_src().0 as usize;
        let to = idx.1.get_dest().0 as usize;
        unsafe {
            self.a
                .get_unchecked_mut(idx.0 as usize)
                .get_unchecked_mut(from * SQ_CNT + to)
        }
    }
}

impl StatBoard<i16, BF_idx> for ButterflyHistory {
    const FILL: i16 = 0;
}

impl NumStatBoard<BF_idx> for ButterflyHistory {
    const D: i16 = 324;
}
