mod pick;

use pleco::core::mono_traits::*;
use pleco::board::movegen::{MoveGen, PseudoLegal};
use pleco::{BitMove, Board, Piece, PieceType, SQ, ScoringMove, ScoringMoveList};

use self::pick::PickMain;
use tables::butterfly::ButterflyHistory;
use tables::capture_piece_history::CapturePieceToHistory;
use tables::continuation::PieceToHistory;

// TODO: use Generators once stabilized.

/// Implemented by each staged picker (main search, evasions, probcut, qsearch). Mirrors the
/// way the `Stage` enum in Stockfish's `MovePicker` drives a `switch` inside `next_move()`.
pub trait MovePickerType: Sized {
    fn next(&mut self, board: &Board, moves: &mut ScoringMoveList, skip_quiets: bool) -> Option<BitMove>;
}

/// Hands out moves from a position one at a time, in an order intended to maximize the
/// chance of an alpha-beta cutoff on the first few tries. Internally generates moves lazily,
/// a stage at a time, rather than generating and scoring the entire move list up front.
pub struct MovePicker<MPT: MovePickerType> {
    picker: MPT,
    board: *const Board,
    moves: ScoringMoveList,
}

impl MovePicker<MainSearchPicker> {
    /// Move picker used by the main (PV / non-PV) negamax search.
    pub fn main_search(
        board: &Board,
        depth: i16,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
        cont_histories: *const [*mut PieceToHistory; 4],
        mut ttm: BitMove,
        killers: [BitMove; 2],
        counter_move: BitMove,
    ) -> Self {
        assert!(!board.in_check());

        if ttm == BitMove::null() || !board.pseudo_legal_move(ttm) {
            ttm = BitMove::null();
        }

        let picker = MainSearchPicker::new(
            depth,
            ttm,
            killers,
            counter_move,
            main_history,
            capture_history,
            cont_histories,
        );
        MovePicker::new(board, picker)
    }
}

impl MovePicker<QSearchPicker> {
    /// Move picker used by quiescence search.
    pub fn qsearch(
        board: &Board,
        depth: i16,
        mut ttm: BitMove,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
        recapture_sq: SQ,
    ) -> Self {
        if ttm == BitMove::null()
            || !board.pseudo_legal_move(ttm)
            || (depth <= 0 && !board.is_capture_or_promotion(ttm))
        {
            ttm = BitMove::null();
        }

        let picker = QSearchPicker::new(depth, ttm, main_history, capture_history, recapture_sq);
        MovePicker::new(board, picker)
    }
}

impl MovePicker<EvasionPicker> {
    /// Move picker used while the side to move is in check.
    pub fn evasions(
        board: &Board,
        mut ttm: BitMove,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
    ) -> Self {
        assert!(board.in_check());

        if ttm == BitMove::null() || !board.pseudo_legal_move(ttm) {
            ttm = BitMove::null();
        }

        let picker = EvasionPicker::new(ttm, main_history, capture_history);
        MovePicker::new(board, picker)
    }
}

impl<MPT: MovePickerType> MovePicker<MPT> {
    fn new(board: &Board, picker: MPT) -> Self {
        MovePicker {
            picker,
            board: board as *const Board,
            moves: ScoringMoveList::default(),
        }
    }

    /// Returns the next move to try, or `None` once every stage is exhausted.
    ///
    /// `skip_quiets` tells the picker to jump straight past the quiet-move stages (used by
    /// late-move-count pruning in the main search).
    pub fn next(&mut self, skip_quiets: bool) -> Option<BitMove> {
        let board: &Board = unsafe { &*self.board };
        self.picker.next(board, &mut self.moves, skip_quiets)
    }
}

/// Scores a freshly-generated block of captures `moves[from..]` by a simple MVV (most
/// valuable victim) heuristic blended with capture history.
fn score_captures(
    board: &Board,
    moves: &mut [ScoringMove],
    capture_history: *const CapturePieceToHistory,
) {
    for sm in moves.iter_mut() {
        let mov = sm.bitmove();
        let moved = board.moved_piece(mov);
        let captured = board
            .captured_piece(mov)
            .map(Piece::type_of)
            .unwrap_or(PieceType::None);
        let hist = unsafe { (*capture_history)[(moved, mov.get_dest(), captured)] };
        let score = i32::from(PieceType::value(captured)) * 64 + i32::from(hist);
        sm.score = score.max(i16::min_value() as i32).min(i16::max_value() as i32) as i16;
    }
}

/// Scores a freshly-generated block of quiet moves by butterfly + continuation history.
fn score_quiets(
    board: &Board,
    moves: &mut [ScoringMove],
    main_history: *const ButterflyHistory,
    cont_histories: &[*mut PieceToHistory; 4],
) {
    let us = board.turn();
    for sm in moves.iter_mut() {
        let mov = sm.bitmove();
        let moved = board.moved_piece(mov);
        let to = mov.get_dest();
        let mut score = i32::from(unsafe { (*main_history)[(us, mov)] });
        for ch in cont_histories.iter() {
            if !ch.is_null() {
                score += i32::from(unsafe { (**ch)[(moved, to)] });
            }
        }
        sm.score = score.max(i16::min_value() as i32).min(i16::max_value() as i32) as i16;
    }
}

/// Selects the highest-scoring move in `moves[cur..end]`, swaps it to the front of that
/// range and returns it. Used to lazily sort-as-we-go instead of fully sorting up front.
fn pick_best(moves: &mut [ScoringMove], cur: usize) -> ScoringMove {
    let mut best = cur;
    for i in (cur + 1)..moves.len() {
        if moves[i].score() > moves[best].score() {
            best = i;
        }
    }
    moves.swap(cur, best);
    moves[cur]
}

/// Staged picker driving the main alpha-beta search: TT move, winning captures, killers,
/// the countermove, quiet moves (history-ordered), then losing captures.
pub struct MainSearchPicker {
    pick: PickMain,
    depth: i16,
    ttm: BitMove,
    killers: [BitMove; 2],
    counter_move: BitMove,
    main_history: *const ButterflyHistory,
    capture_history: *const CapturePieceToHistory,
    cont_histories: *const [*mut PieceToHistory; 4],
    cur: usize,
    captures_end: usize,
    quiets_end: usize,
    bad_captures: [ScoringMove; 64],
    bad_captures_len: usize,
}

impl MainSearchPicker {
    fn new(
        depth: i16,
        ttm: BitMove,
        killers: [BitMove; 2],
        counter_move: BitMove,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
        cont_histories: *const [*mut PieceToHistory; 4],
    ) -> Self {
        let pick = if ttm == BitMove::null() {
            PickMain::CapturesInit
        } else {
            PickMain::MainSearch
        };
        MainSearchPicker {
            pick,
            depth,
            ttm,
            killers,
            counter_move,
            main_history,
            capture_history,
            cont_histories,
            cur: 0,
            captures_end: 0,
            quiets_end: 0,
            bad_captures: [ScoringMove::null(); 64],
            bad_captures_len: 0,
        }
    }

    /// `true` if `mov` was already returned as the TT move, a killer, or the countermove, and
    /// so must not be handed out a second time during the quiet/capture sweeps.
    fn already_tried(&self, mov: BitMove) -> bool {
        mov == self.ttm
            || mov == self.killers[0]
            || mov == self.killers[1]
            || mov == self.counter_move
    }
}

impl MovePickerType for MainSearchPicker {
    fn next(&mut self, board: &Board, moves: &mut ScoringMoveList, skip_quiets: bool) -> Option<BitMove> {
        loop {
            match self.pick {
                PickMain::MainSearch => {
                    self.pick.incr();
                    return Some(self.ttm);
                }
                PickMain::CapturesInit => {
                    let start = moves.len();
                    unsafe {
                        MoveGen::extend::<PseudoLegal, CapturesGenType, ScoringMoveList>(board, moves);
                    }
                    score_captures(board, &mut moves.as_mut_slice()[start..], self.capture_history);
                    self.cur = start;
                    self.captures_end = moves.len();
                    self.pick.incr();
                }
                PickMain::GoodCaptures => {
                    if self.cur >= self.captures_end {
                        self.pick.incr();
                        continue;
                    }
                    let sm = pick_best(moves.as_mut_slice(), self.cur);
                    self.cur += 1;
                    let mov = sm.bitmove();
                    if mov == self.ttm {
                        continue;
                    }
                    if board.see_ge(mov, -(sm.score() as i32) / 16) {
                        return Some(mov);
                    }
                    if self.bad_captures_len < self.bad_captures.len() {
                        self.bad_captures[self.bad_captures_len] = sm;
                        self.bad_captures_len += 1;
                    }
                }
                PickMain::KillerOne => {
                    self.pick.incr();
                    let k = self.killers[0];
                    if k != BitMove::null()
                        && k != self.ttm
                        && !k.is_capture()
                        && board.pseudo_legal_move(k)
                    {
                        return Some(k);
                    }
                }
                PickMain::KillerTwo => {
                    self.pick.incr();
                    let k = self.killers[1];
                    if k != BitMove::null()
                        && k != self.ttm
                        && !k.is_capture()
                        && board.pseudo_legal_move(k)
                    {
                        return Some(k);
                    }
                }
                PickMain::CounterMove => {
                    self.pick.incr();
                    let c = self.counter_move;
                    if c != BitMove::null()
                        && !self.already_tried(c)
                        && !c.is_capture()
                        && board.pseudo_legal_move(c)
                    {
                        return Some(c);
                    }
                }
                PickMain::QuietInit => {
                    if skip_quiets {
                        self.pick = PickMain::BadCaptures;
                        continue;
                    }
                    let start = moves.len();
                    unsafe {
                        MoveGen::extend::<PseudoLegal, QuietsGenType, ScoringMoveList>(board, moves);
                    }
                    let cont_histories = unsafe { &*self.cont_histories };
                    score_quiets(
                        board,
                        &mut moves.as_mut_slice()[start..],
                        self.main_history,
                        cont_histories,
                    );
                    self.cur = start;
                    self.quiets_end = moves.len();
                    self.pick.incr();
                }
                PickMain::QuietMoves => {
                    if skip_quiets || self.cur >= self.quiets_end {
                        self.pick.incr();
                        continue;
                    }
                    let sm = pick_best(moves.as_mut_slice(), self.cur);
                    self.cur += 1;
                    let mov = sm.bitmove();
                    if self.already_tried(mov) {
                        continue;
                    }
                    return Some(mov);
                }
                PickMain::BadCaptures => {
                    if self.cur < self.bad_captures_len {
                        let mov = self.bad_captures[self.cur].bitmove();
                        self.cur += 1;
                        if mov == self.ttm {
                            continue;
                        }
                        return Some(mov);
                    }
                    self.pick.incr();
                }
                _ => return None,
            }
        }
    }
}

/// Staged picker used while the side to move is in check: TT move, then every pseudo-legal
/// evasion in simple MVV / history order (no quiet/capture split — there usually aren't
/// enough evasions for that to matter).
pub struct EvasionPicker {
    pick: PickMain,
    ttm: BitMove,
    main_history: *const ButterflyHistory,
    capture_history: *const CapturePieceToHistory,
    cur: usize,
    end: usize,
}

impl EvasionPicker {
    fn new(
        ttm: BitMove,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
    ) -> Self {
        let pick = if ttm == BitMove::null() {
            PickMain::EvasionsInit
        } else {
            PickMain::EvasionSearch
        };
        EvasionPicker {
            pick,
            ttm,
            main_history,
            capture_history,
            cur: 0,
            end: 0,
        }
    }
}

impl MovePickerType for EvasionPicker {
    fn next(&mut self, board: &Board, moves: &mut ScoringMoveList, _skip_quiets: bool) -> Option<BitMove> {
        loop {
            match self.pick {
                PickMain::EvasionSearch => {
                    self.pick = PickMain::EvasionsInit;
                    return Some(self.ttm);
                }
                PickMain::EvasionsInit => {
                    let start = moves.len();
                    unsafe {
                        MoveGen::extend::<PseudoLegal, EvasionsGenType, ScoringMoveList>(board, moves);
                    }
                    let us = board.turn();
                    for sm in moves.as_mut_slice()[start..].iter_mut() {
                        let mov = sm.bitmove();
                        let score = if mov.is_capture() {
                            let moved = board.moved_piece(mov);
                            let captured = board
                                .captured_piece(mov)
                                .map(Piece::type_of)
                                .unwrap_or(PieceType::None);
                            let hist = unsafe { (*self.capture_history)[(moved, mov.get_dest(), captured)] };
                            i32::from(PieceType::value(captured)) * 64 + i32::from(hist) + 1_000_000
                        } else {
                            i32::from(unsafe { (*self.main_history)[(us, mov)] })
                        };
                        sm.score = score.max(i16::min_value() as i32).min(i16::max_value() as i32) as i16;
                    }
                    self.cur = start;
                    self.end = moves.len();
                    self.pick = PickMain::AllEvasions;
                }
                PickMain::AllEvasions => {
                    if self.cur >= self.end {
                        return None;
                    }
                    let sm = pick_best(moves.as_mut_slice(), self.cur);
                    self.cur += 1;
                    if sm.bitmove() == self.ttm {
                        continue;
                    }
                    return Some(sm.bitmove());
                }
                _ => return None,
            }
        }
    }
}

/// Staged picker used by quiescence search: optionally the TT move, then captures (and, at
/// the shallowest qsearch depth, checks), or — one ply into a recapture sequence — only
/// captures that land on the recapture square.
pub struct QSearchPicker {
    pick: PickMain,
    depth: i16,
    ttm: BitMove,
    main_history: *const ButterflyHistory,
    capture_history: *const CapturePieceToHistory,
    recapture_sq: SQ,
    cur: usize,
    end: usize,
}

impl QSearchPicker {
    fn new(
        depth: i16,
        ttm: BitMove,
        main_history: *const ButterflyHistory,
        capture_history: *const CapturePieceToHistory,
        recapture_sq: SQ,
    ) -> Self {
        let recapturing = depth <= 0 && ttm == BitMove::null();
        let pick = if ttm != BitMove::null() {
            PickMain::QSearch
        } else if recapturing {
            PickMain::QSearchRecaptures
        } else {
            PickMain::QSearchInit
        };
        QSearchPicker {
            pick,
            depth,
            ttm,
            main_history,
            capture_history,
            recapture_sq,
            cur: 0,
            end: 0,
        }
    }
}

impl MovePickerType for QSearchPicker {
    fn next(&mut self, board: &Board, moves: &mut ScoringMoveList, _skip_quiets: bool) -> Option<BitMove> {
        loop {
            match self.pick {
                PickMain::QSearch => {
                    self.pick.incr();
                    return Some(self.ttm);
                }
                PickMain::QSearchInit => {
                    let start = moves.len();
                    if self.depth > 0 {
                        unsafe {
                            MoveGen::extend::<PseudoLegal, AllGenType, ScoringMoveList>(board, moves);
                        }
                    } else {
                        unsafe {
                            MoveGen::extend::<PseudoLegal, CapturesGenType, ScoringMoveList>(board, moves);
                        }
                    }
                    score_captures(board, &mut moves.as_mut_slice()[start..], self.capture_history);
                    let us = board.turn();
                    for sm in moves.as_mut_slice()[start..].iter_mut() {
                        if !sm.bitmove().is_capture() {
                            sm.score = unsafe { (*self.main_history)[(us, sm.bitmove())] };
                        }
                    }
                    self.cur = start;
                    self.end = moves.len();
                    self.pick = PickMain::QCaptures;
                }
                PickMain::QCaptures | PickMain::QChecks => {
                    if self.cur >= self.end {
                        return None;
                    }
                    let sm = pick_best(moves.as_mut_slice(), self.cur);
                    self.cur += 1;
                    if sm.bitmove() == self.ttm {
                        continue;
                    }
                    return Some(sm.bitmove());
                }
                PickMain::QSearchRecaptures => {
                    let start = moves.len();
                    unsafe {
                        MoveGen::extend::<PseudoLegal, CapturesGenType, ScoringMoveList>(board, moves);
                    }
                    score_captures(board, &mut moves.as_mut_slice()[start..], self.capture_history);
                    self.cur = start;
                    self.end = moves.len();
                    self.pick = PickMain::QRecaptures;
                }
                PickMain::QRecaptures => {
                    while self.cur < self.end {
                        let sm = pick_best(moves.as_mut_slice(), self.cur);
                        self.cur += 1;
                        if sm.bitmove().get_dest() == self.recapture_sq {
                            return Some(sm.bitmove());
                        }
                    }
                    return None;
                }
                _ => return None,
            }
        }
    }
}
