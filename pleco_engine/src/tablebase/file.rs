//! Locating, memory-mapping, and parsing the header of a single `.rtbw` /
//! `.rtbz` table file into the `PairsData` slices `decode::decompress_pairs`
//! can read from.

use std::fs::File;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use tablebase::decode::{self, PairsData, TB_PIECES};
use tablebase::encoding::ENCODING;

pub const WDL_MAGIC: [u8; 4] = [0xD7, 0x66, 0x0C, 0xA5];
pub const DTZ_MAGIC: [u8; 4] = [0x71, 0xE8, 0x23, 0x5D];

const PIECE_LETTERS: [char; 6] = ['P', 'N', 'B', 'R', 'Q', 'K'];

/// Everything about a material signature needed to parse the table header,
/// independent of any particular position.
#[derive(Clone, Debug)]
pub struct TableInfo {
    pub piece_count: usize,
    pub has_pawns: bool,
    pub has_unique_pieces: bool,
    /// `[leading color pawn count, other color pawn count]`, valid only when `has_pawns`.
    pub pawn_count: [u8; 2],
}

/// Counts of each piece type, ordered `P N B R Q K`, for one side.
pub type SideCounts = [u8; 6];

pub fn signature_string(counts: &SideCounts) -> String {
    let mut s = String::new();
    for pt in (0..6).rev() {
        for _ in 0..counts[pt] {
            s.push(PIECE_LETTERS[pt]);
        }
    }
    s
}

/// Builds the `TableInfo` for a `strong vs weak` material signature, where
/// each side's counts are ordered `P N B R Q K`.
pub fn table_info(strong: &SideCounts, weak: &SideCounts) -> TableInfo {
    let piece_count: usize = strong.iter().chain(weak.iter()).map(|&c| c as usize).sum();
    let has_pawns = strong[0] != 0 || weak[0] != 0;
    let has_unique_pieces = (0..5).any(|pt| strong[pt] == 1) || (0..5).any(|pt| weak[pt] == 1);

    let pawn_count = if has_pawns {
        // the leading color is whichever has fewer pawns (ties favor `strong`,
        // which always plays the white role in our canonical orientation).
        let lead_is_strong = weak[0] == 0 || (strong[0] != 0 && weak[0] >= strong[0]);
        if lead_is_strong {
            [strong[0], weak[0]]
        } else {
            [weak[0], strong[0]]
        }
    } else {
        [0, 0]
    };

    TableInfo {
        piece_count,
        has_pawns,
        has_unique_pieces,
        pawn_count,
    }
}

/// A memory-mapped `.rtbw`/`.rtbz` file plus its parsed header layout.
pub struct TableFile {
    mmap: Mmap,
    /// Number of distinct file-buckets: 1 for piece tables, 4 (a..d) for pawn tables.
    pub files: usize,
    /// Number of stored side-to-move orientations: 1 (symmetric material) or 2.
    pub sides: usize,
    /// `slices[file * sides + side]`.
    pub slices: Vec<PairsData>,
}

impl TableFile {
    pub fn data(&self) -> &[u8] {
        &self.mmap
    }

    pub fn slice(&self, file: usize, side: usize) -> &PairsData {
        &self.slices[file * self.sides + side]
    }
}

/// Searches `search_paths` for `<strong>v<weak><ext>`, memory-maps the first
/// match, checks the magic bytes, and parses its header.
pub fn open_table(
    search_paths: &[PathBuf],
    strong: &str,
    weak: &str,
    ext: &str,
    magic: [u8; 4],
    info: &TableInfo,
) -> Option<TableFile> {
    let filename = format!("{}v{}{}", strong, weak, ext);
    let path = search_paths.iter().map(|p| p.join(&filename)).find(|p| p.exists())?;

    let mmap = open_mmap(&path)?;
    if mmap.len() < 4 || mmap[0..4] != magic {
        return None;
    }

    let is_dtz = ext == ".rtbz";
    let symmetric = strong == weak;
    let sides = if is_dtz { 1 } else if symmetric { 1 } else { 2 };
    let files = if info.has_pawns { 4 } else { 1 };

    let (slices, _) = parse_header(&mmap, 4, info, files, sides, is_dtz)?;

    Some(TableFile {
        mmap,
        files,
        sides,
        slices,
    })
}

fn open_mmap(path: &Path) -> Option<Mmap> {
    let file = File::open(path).ok()?;
    unsafe { Mmap::map(&file).ok() }
}

/// Parses the shared WDL/DTZ header: per-(file,side) piece order and group
/// structure, followed by per-(file,side) block-layout sizes, followed by
/// the sparse index / block-length / compressed-data regions. Mirrors
/// `do_init` in the reference decoder.
fn parse_header(
    data: &[u8],
    header_off: usize,
    info: &TableInfo,
    files: usize,
    sides: usize,
    is_dtz: bool,
) -> Option<(Vec<PairsData>, usize)> {
    let mut off = header_off;
    off += 1; // flags byte: has-pawns / split, already known from `info`.

    let pp = info.has_pawns && info.pawn_count[1] != 0;

    // Per-slice piece order + raw piece list, parsed file-major, side-minor.
    let mut orders = vec![[0i32; 2]; files * sides];
    let mut piece_lists = vec![[None; TB_PIECES]; files * sides];

    for f in 0..files {
        let order_byte0 = data[off];
        let order_byte1 = if pp { data[off + 1] } else { 0xFF };
        for (side, order) in orders[f * sides..f * sides + sides].iter_mut().enumerate() {
            order[0] = if side == 0 {
                (order_byte0 & 0xF) as i32
            } else {
                (order_byte0 >> 4) as i32
            };
            order[1] = if pp {
                if side == 0 { (order_byte1 & 0xF) as i32 } else { (order_byte1 >> 4) as i32 }
            } else {
                0xF
            };
        }
        off += if pp { 2 } else { 1 };

        for k in 0..info.piece_count {
            let byte = data[off];
            off += 1;
            for side in 0..sides {
                let nibble = if side == 0 { byte & 0xF } else { byte >> 4 };
                piece_lists[f * sides + side][k] = tb_piece(nibble);
            }
        }
    }
    off += off & 1; // word alignment

    let mut slices: Vec<PairsData> = Vec::with_capacity(files * sides);
    for f in 0..files {
        for side in 0..sides {
            let (group_len, group_idx) =
                set_groups(info, &piece_lists[f * sides + side], orders[f * sides + side], f);
            let (pd, new_off) = decode::set_sizes(data, off, group_len, group_idx, piece_lists[f * sides + side]);
            off = new_off;
            slices.push(pd);
        }
    }

    if is_dtz {
        off = set_dtz_map(data, off, &slices, files, sides);
    }

    for s in slices.iter_mut() {
        if s.single_value() {
            continue;
        }
        s.sparse_index_off = off;
        off += s.sparse_index_size * 6;
    }
    for s in slices.iter_mut() {
        if s.single_value() {
            continue;
        }
        s.block_length_off = off;
        off += s.block_length_size * 2;
    }
    for s in slices.iter_mut() {
        if s.single_value() {
            continue;
        }
        off = (off + 0x3F) & !0x3F;
        s.data_off = off;
        off += s.num_blocks as usize * s.block_size;
    }

    Some((slices, off))
}

fn tb_piece(nibble: u8) -> Option<(bool, u8)> {
    if nibble == 0 {
        None
    } else {
        let white = nibble < 8;
        let pt = if white { nibble } else { nibble - 8 };
        Some((white, pt))
    }
}

/// Groups the pieces for one (file, side) slice, mirroring `set_groups`:
/// consecutive identical pieces are grouped together (the leading group may
/// additionally combine up to 3 distinct pieces, or the two kings, when
/// there are no pawns), then assigns each group a multiplicative index base.
fn set_groups(
    info: &TableInfo,
    pieces: &[Option<(bool, u8)>; TB_PIECES],
    order: [i32; 2],
    file: usize,
) -> ([i32; TB_PIECES + 1], [u64; TB_PIECES + 2]) {
    let mut group_len = [0i32; TB_PIECES + 1];
    let mut n = 0usize;
    let mut first_len: i32 = if info.has_pawns {
        0
    } else if info.has_unique_pieces {
        3
    } else {
        2
    };

    group_len[0] = 1;
    for i in 1..info.piece_count {
        first_len -= 1;
        if first_len > 0 || pieces[i] == pieces[i - 1] {
            group_len[n] += 1;
        } else {
            n += 1;
            group_len[n] = 1;
        }
    }
    n += 1;
    group_len[n] = 0; // zero-terminated

    let pp = info.has_pawns && info.pawn_count[1] != 0;
    let mut next = if pp { 2 } else { 1 };
    let mut free_squares = 64 - group_len[0] - if pp { group_len[1] } else { 0 };
    let mut idx: u64 = 1;
    let mut group_idx = [0u64; TB_PIECES + 2];

    let mut k = 0i32;
    loop {
        if !((next as i32) < n as i32 || k == order[0] || k == order[1]) {
            break;
        }
        if k == order[0] {
            group_idx[0] = idx;
            idx *= if info.has_pawns {
                ENCODING.lead_pawn_size[group_len[0] as usize][file] as u64
            } else if info.has_unique_pieces {
                31332
            } else {
                462
            };
        } else if k == order[1] {
            group_idx[1] = idx;
            idx *= decode::binomial(group_len[1] as usize, 48 - group_len[0] as usize) as u64;
        } else {
            group_idx[next] = idx;
            idx *= decode::binomial(group_len[next] as usize, free_squares as usize) as u64;
            free_squares -= group_len[next];
            next += 1;
        }
        k += 1;
    }
    group_idx[n] = idx;

    (group_len, group_idx)
}

/// DTZ tables additionally store a value-remapping table, one per file,
/// right after the header sizes and before the sparse index. `map_score`
/// (the DTZ probe's final remap step) reads it lazily straight out of the
/// mmap, so all `set_dtz_map` has to do is skip past it.
fn set_dtz_map(data: &[u8], mut off: usize, slices: &[PairsData], files: usize, sides: usize) -> usize {
    debug_assert_eq!(sides, 1);
    for f in 0..files {
        if slices[f].is_mapped() {
            for _ in 0..4 {
                off += data[off] as usize + 1;
            }
        }
    }
    off += off & 1;
    off
}
