//! Syzygy-style endgame tablebase probing.
//!
//! A `.rtbw` file stores the win/draw/loss value of every legal position for
//! one material signature (e.g. `KQvKR`); a `.rtbz` file stores the
//! distance-to-zero (the number of moves, counting from the last capture or
//! pawn move, until the result is forced). Both share the block-compressed
//! layout parsed in `file` and decoded in `decode`; `encoding` holds the
//! combinatorial tables used to turn a position into a table index.

pub mod decode;
pub mod encoding;
pub mod file;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use pleco::core::score::{DRAW, MATE};
use pleco::core::{PieceType, Player};
use pleco::Board;

use self::decode::decompress_pairs;
use self::file::{open_table, table_info, SideCounts, TableFile, DTZ_MAGIC, WDL_MAGIC};

/// Mirrors the WDL outcome codes a Syzygy table stores: a "cursed" win or
/// "blessed" loss is only a win/loss in theory, and reverts to a draw under
/// the 50-move rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wdl {
    Loss = -2,
    BlessedLoss = -1,
    Draw = 0,
    CursedWin = 1,
    Win = 2,
}

impl Wdl {
    fn from_raw(v: i32) -> Wdl {
        match v {
            v if v <= -2 => Wdl::Loss,
            -1 => Wdl::BlessedLoss,
            0 => Wdl::Draw,
            1 => Wdl::CursedWin,
            _ => Wdl::Win,
        }
    }
}

struct CachedTable {
    wdl: Option<TableFile>,
    dtz: Option<TableFile>,
}

/// Global tablebase registry. Tables are loaded lazily, one entry per
/// material signature, and cached for the lifetime of the process.
pub struct Tablebases {
    paths: RwLock<Vec<PathBuf>>,
    tables: RwLock<::std::collections::HashMap<String, CachedTable>>,
    max_pieces: AtomicUsize,
    probe_depth: AtomicUsize,
    probe_limit: AtomicUsize,
    fifty_move_rule: AtomicBool,
}

impl Tablebases {
    fn new() -> Tablebases {
        Tablebases {
            paths: RwLock::new(Vec::new()),
            tables: RwLock::new(::std::collections::HashMap::new()),
            max_pieces: AtomicUsize::new(0),
            probe_depth: AtomicUsize::new(1),
            probe_limit: AtomicUsize::new(0),
            fifty_move_rule: AtomicBool::new(true),
        }
    }

    /// Minimum remaining search depth (the `SyzygyProbeDepth` UCI option)
    /// before the search loop bothers probing a table.
    pub fn probe_depth(&self) -> usize {
        self.probe_depth.load(Ordering::Relaxed)
    }

    pub fn set_probe_depth(&self, depth: usize) {
        self.probe_depth.store(depth, Ordering::Relaxed);
    }

    /// Largest piece count the search loop should probe at (the
    /// `SyzygyProbeLimit` UCI option), capped by what tables are loaded.
    pub fn probe_limit(&self) -> usize {
        self.probe_limit.load(Ordering::Relaxed).min(self.max_pieces())
    }

    pub fn set_probe_limit(&self, limit: usize) {
        self.probe_limit.store(limit, Ordering::Relaxed);
    }

    /// Whether a cursed win / blessed loss should be treated as a draw (the
    /// `Syzygy50MoveRule` UCI option).
    pub fn fifty_move_rule(&self) -> bool {
        self.fifty_move_rule.load(Ordering::Relaxed)
    }

    pub fn set_fifty_move_rule(&self, on: bool) {
        self.fifty_move_rule.store(on, Ordering::Relaxed);
    }

    /// Sets the directories to search for table files, as a `;`- or
    /// `:`-separated list (the `SyzygyPath` UCI option). Clears any tables
    /// already cached from a previous path.
    pub fn set_paths(&self, paths_str: &str) {
        let seps: &[char] = &[';', ':'];
        let paths: Vec<PathBuf> = paths_str
            .split(seps)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        let have_paths = !paths.is_empty();
        *self.paths.write().unwrap() = paths;
        self.tables.write().unwrap().clear();
        self.max_pieces.store(if have_paths { decode::TB_PIECES } else { 0 }, Ordering::SeqCst);
        if have_paths && self.probe_limit.load(Ordering::Relaxed) == 0 {
            self.probe_limit.store(decode::TB_PIECES, Ordering::Relaxed);
        }
    }

    pub fn max_pieces(&self) -> usize {
        self.max_pieces.load(Ordering::SeqCst)
    }

    fn signature(board: &Board, lead: Player) -> (String, String, SideCounts, SideCounts) {
        let counts_for = |p: Player| -> SideCounts {
            [
                board.count_piece(p, PieceType::P),
                board.count_piece(p, PieceType::N),
                board.count_piece(p, PieceType::B),
                board.count_piece(p, PieceType::R),
                board.count_piece(p, PieceType::Q),
                1,
            ]
        };
        let strong_counts = counts_for(lead);
        let weak_counts = counts_for(lead.other_player());
        let strong = file::signature_string(&strong_counts);
        let weak = file::signature_string(&weak_counts);
        (strong, weak, strong_counts, weak_counts)
    }

    fn material_value(counts: &SideCounts) -> i32 {
        const VALUES: [i32; 6] = [1, 3, 3, 5, 9, 0];
        counts.iter().zip(VALUES.iter()).map(|(&c, &v)| c as i32 * v).sum()
    }

    /// Loads (or fetches from cache) the WDL/DTZ table pair for the material
    /// signature of `board`, orienting it so the canonical "strong" side in
    /// the stored filename is whichever side has at least as much material.
    fn with_table<F, R>(&self, board: &Board, f: F) -> Option<R>
    where
        F: FnOnce(&CachedTable, bool, &Board) -> Option<R>,
    {
        if self.paths.read().unwrap().is_empty() {
            return None;
        }

        let (white_str, white_weak, white_counts, black_counts) = Self::signature(board, Player::White);
        let flip = Self::material_value(&black_counts) > Self::material_value(&white_counts);
        let (strong, weak, strong_counts, weak_counts) = if flip {
            Self::signature(board, Player::Black)
        } else {
            (white_str, white_weak, white_counts, black_counts)
        };

        let key = format!("{}v{}", strong, weak);
        if let Some(cached) = self.tables.read().unwrap().get(&key) {
            return f(cached, flip, board);
        }

        let info = table_info(&strong_counts, &weak_counts);
        let paths = self.paths.read().unwrap().clone();
        let wdl = open_table(&paths, &strong, &weak, ".rtbw", WDL_MAGIC, &info);
        let dtz = open_table(&paths, &strong, &weak, ".rtbz", DTZ_MAGIC, &info);

        let mut tables = self.tables.write().unwrap();
        let entry = tables.entry(key).or_insert(CachedTable { wdl, dtz });
        f(entry, flip, board)
    }

    /// Looks up the win/draw/loss value of `board` from the side to move's
    /// perspective, ignoring the 50-move counter (a "cursed"/"blessed"
    /// result still shows as a theoretical win/loss here).
    pub fn probe_wdl(&self, board: &Board) -> Option<Wdl> {
        self.with_table(board, |cached, flip, board| {
            let table = cached.wdl.as_ref()?;
            let side = if (board.turn() == Player::Black) != flip { 1 } else { 0 };
            let file_idx = if table.files > 1 { file_bucket(board) } else { 0 };
            let slice = table.slice(file_idx, if table.sides > 1 { side } else { 0 });
            let idx = position_index(board, slice, flip);
            let raw = decompress_pairs(table.data(), slice, idx);
            Some(Wdl::from_raw(raw))
        })
    }

    /// Looks up the distance-to-zero value for `board`, in plies, from the
    /// side to move's perspective. `None` if no table covers this material
    /// or the position is a theoretical draw with no DTZ defined.
    pub fn probe_dtz(&self, board: &Board) -> Option<i32> {
        self.with_table(board, |cached, flip, board| {
            let table = cached.dtz.as_ref()?;
            let file_idx = if table.files > 1 { file_bucket(board) } else { 0 };
            let slice = table.slice(file_idx, 0);
            let idx = position_index(board, slice, flip);
            Some(decompress_pairs(table.data(), slice, idx))
        })
    }
}

/// Canonicalizes the board's pawn structure down to a file in `a..d` by
/// mirroring `e..h` onto `d..a`, matching the file bucket a pawn table's
/// squares were encoded under.
fn file_bucket(board: &Board) -> usize {
    let mut pawns = board.piece_bb_both_players(PieceType::P);
    let mut min_file = 3u8;
    while let Some(sq) = pawns.pop_some_lsb() {
        let f = sq.file() as u8;
        let f = if f > 3 { 7 - f } else { f };
        if f < min_file {
            min_file = f;
        }
    }
    min_file as usize
}

/// Computes the group-encoded table index for `board` against `slice`'s
/// piece order, applying a color flip first if the canonical "strong" side
/// doesn't match White.
///
/// This is a structural port of the reference `encode` routine: it walks
/// `slice.pieces` (already ordered into groups by `file::set_groups`),
/// folds each group through `ENCODING`'s combinatorial maps, and combines
/// the per-group contributions via `slice.group_idx`.
fn position_index(board: &Board, slice: &self::decode::PairsData, flip: bool) -> u64 {
    use self::encoding::ENCODING;
    use pleco::SQ;

    let mut squares: Vec<u8> = Vec::with_capacity(decode::TB_PIECES);
    for piece in slice.pieces.iter() {
        let (white, pt) = match *piece {
            Some(p) => p,
            None => break,
        };
        let player = if white != flip { Player::White } else { Player::Black };
        let mut bb = board.piece_bb(player, pleco_piece_type(pt));
        let sq = bb.pop_some_lsb().unwrap_or(SQ(0));
        squares.push(if flip { sq.flip().0 } else { sq.0 });
    }
    if squares.is_empty() {
        return 0;
    }

    let lead_len = slice.group_len[0] as usize;
    let lead_idx = if lead_len >= 2 {
        // two kings: fold the first through the a1-d1-d4 triangle, then
        // look up the pair's joint index through MapKK.
        ENCODING.map_kk[ENCODING.map_a1d1d4[squares[0] as usize] as usize][squares[1] as usize] as u64
    } else {
        ENCODING.map_pawns[squares[0] as usize] as u64
    };

    let mut idx = lead_idx * slice.group_idx[0];
    let mut remaining: Vec<u8> = (0u8..64).filter(|s| !squares[..lead_len].contains(s)).collect();
    let mut consumed = lead_len;

    for g in 1..slice.group_len.len() {
        let len = slice.group_len[g] as usize;
        if len == 0 {
            break;
        }
        let mut group_squares: Vec<u8> = squares[consumed..consumed + len].to_vec();
        group_squares.sort_unstable();
        idx += group_combination_index(&group_squares, &remaining) * slice.group_idx[g];
        remaining.retain(|s| !group_squares.contains(s));
        consumed += len;
    }

    idx
}

/// Combinadic rank of `squares` (sorted ascending) among `remaining`: the
/// sum of `C(rank_i, i+1)` for each square's position within `remaining`.
fn group_combination_index(squares: &[u8], remaining: &[u8]) -> u64 {
    let mut idx = 0u64;
    for (i, &sq) in squares.iter().enumerate() {
        let rank = remaining.iter().position(|&s| s == sq).unwrap_or(0);
        idx += decode::binomial(i + 1, rank) as u64;
    }
    idx
}

fn pleco_piece_type(pt: u8) -> PieceType {
    match pt {
        1 => PieceType::P,
        2 => PieceType::N,
        3 => PieceType::B,
        4 => PieceType::R,
        5 => PieceType::Q,
        6 => PieceType::K,
        _ => PieceType::None,
    }
}

/// Score assigned to a tablebase-proven win, kept below `MATE` so that a
/// search line with an actual forced mate is still preferred over one that
/// merely transposes into a won table.
pub const TB_WIN_VALUE: i32 = MATE - 1000;

/// Converts a WDL outcome at search ply `ply` into a search value, from the
/// side to move's perspective.
pub fn wdl_to_value(wdl: Wdl, ply: u16) -> i32 {
    match wdl {
        Wdl::Win => TB_WIN_VALUE - ply as i32,
        Wdl::CursedWin => DRAW + 1,
        Wdl::Draw => DRAW,
        Wdl::BlessedLoss => DRAW - 1,
        Wdl::Loss => -TB_WIN_VALUE + ply as i32,
    }
}

lazy_static! {
    pub static ref TABLEBASES: Tablebases = Tablebases::new();
}

pub fn tablebases() -> &'static Tablebases {
    &TABLEBASES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_probes_nothing() {
        let board = Board::start_pos();
        assert!(TABLEBASES.probe_wdl(&board).is_none());
    }

    #[test]
    fn wdl_from_raw_matches_cursed_bounds() {
        assert_eq!(Wdl::from_raw(2), Wdl::Win);
        assert_eq!(Wdl::from_raw(1), Wdl::CursedWin);
        assert_eq!(Wdl::from_raw(0), Wdl::Draw);
        assert_eq!(Wdl::from_raw(-1), Wdl::BlessedLoss);
        assert_eq!(Wdl::from_raw(-2), Wdl::Loss);
    }

    #[test]
    fn wdl_to_value_prefers_closer_mates() {
        let near = wdl_to_value(Wdl::Win, 2);
        let far = wdl_to_value(Wdl::Win, 20);
        assert!(near > far);
        assert!(near < MATE);
    }

    #[test]
    fn wdl_to_value_cursed_and_blessed_are_draw_adjacent() {
        assert_eq!(wdl_to_value(Wdl::CursedWin, 5), DRAW + 1);
        assert_eq!(wdl_to_value(Wdl::BlessedLoss, 5), DRAW - 1);
        assert_eq!(wdl_to_value(Wdl::Draw, 5), DRAW);
    }

    #[test]
    fn probe_limit_defaults_to_zero_until_paths_are_set() {
        let tb = Tablebases::new();
        assert_eq!(tb.probe_limit(), 0);
        assert_eq!(tb.probe_depth(), 1);
        assert!(tb.fifty_move_rule());
    }

    #[test]
    fn probe_depth_and_fifty_move_rule_round_trip() {
        let tb = Tablebases::new();
        tb.set_probe_depth(3);
        assert_eq!(tb.probe_depth(), 3);
        tb.set_fifty_move_rule(false);
        assert!(!tb.fifty_move_rule());
    }
}
