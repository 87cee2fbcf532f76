//! Constant values and static structures.
use lazy_static;

use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize};
use std::sync::atomic::Ordering;

use pleco::tools::tt::TranspositionTable;
//use time::time_management::TimeManager;

pub const MAX_PLY: u16 = 126;
pub const THREAD_STACK_SIZE: usize = MAX_PLY as usize + 7;
pub const MAX_THREADS: usize = 256;

pub const DEFAULT_TT_SIZE: usize = 256;

pub const PAWN_TABLE_SIZE: usize = 16384;
pub const MATERIAL_TABLE_SIZE: usize = 8192;

static INITALIZED: AtomicBool = AtomicBool::new(false);
/// Global Timer
//pub static TIMER: TimeManager = TimeManager::uninitialized();
//pub static TT_TABLE: TranspositionTable = unsafe {TranspositionTable::uninitialized()};
//pub static mut POSITION: Board = unsafe {Board::uninitialized()};

lazy_static! {
    pub static ref TT_TABLE: TranspositionTable = TranspositionTable::new(DEFAULT_TT_SIZE);
}

pub fn init_globals() {
    if !INITALIZED.swap(true, Ordering::SeqCst) {
//        unsafe {
            lazy_static::initialize(&TT_TABLE);
//            POSITION.uninitialized_init();
//        }
    }
}

/// Returns a handle to the single, global Transposition Table shared by every search thread.
pub fn tt() -> &'static TranspositionTable {
    &TT_TABLE
}

/// UCI-tunable knobs outside the transposition table / thread count, kept as
/// plain atomics since they're read from every searching thread but written
/// only from the single UCI command loop.
pub struct UciConfig {
    multi_pv: AtomicUsize,
    move_overhead: AtomicUsize,
    ponder: AtomicBool,
    chess960: AtomicBool,
    contempt: AtomicI32,
}

impl UciConfig {
    const fn new() -> UciConfig {
        UciConfig {
            multi_pv: AtomicUsize::new(1),
            move_overhead: AtomicUsize::new(10),
            ponder: AtomicBool::new(false),
            chess960: AtomicBool::new(false),
            contempt: AtomicI32::new(0),
        }
    }

    pub fn multi_pv(&self) -> usize {
        self.multi_pv.load(Ordering::Relaxed)
    }

    pub fn set_multi_pv(&self, n: usize) {
        self.multi_pv.store(n, Ordering::Relaxed);
    }

    /// Milliseconds reserved against the clock to account for GUI/network lag.
    pub fn move_overhead(&self) -> usize {
        self.move_overhead.load(Ordering::Relaxed)
    }

    pub fn set_move_overhead(&self, ms: usize) {
        self.move_overhead.store(ms, Ordering::Relaxed);
    }

    pub fn ponder(&self) -> bool {
        self.ponder.load(Ordering::Relaxed)
    }

    pub fn set_ponder(&self, on: bool) {
        self.ponder.store(on, Ordering::Relaxed);
    }

    pub fn chess960(&self) -> bool {
        self.chess960.load(Ordering::Relaxed)
    }

    pub fn set_chess960(&self, on: bool) {
        self.chess960.store(on, Ordering::Relaxed);
    }

    pub fn contempt(&self) -> i32 {
        self.contempt.load(Ordering::Relaxed)
    }

    pub fn set_contempt(&self, value: i32) {
        self.contempt.store(value, Ordering::Relaxed);
    }
}

pub static UCI_CONFIG: UciConfig = UciConfig::new();

pub trait PVNode {
    fn is_pv() -> bool;
}

pub struct PV {}
pub struct NonPV {}

impl PVNode for PV {
    fn is_pv() -> bool {
        true
    }
}

impl PVNode for NonPV {
    fn is_pv() -> bool {
        false
    }
}

pub trait CheckState {
    fn in_check() -> bool;
}


pub struct InCheck {}
pub struct NoCheck {}

impl CheckState for InCheck {
    fn in_check() -> bool { true}
}

impl CheckState for NoCheck {
    fn in_check() -> bool { false}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_config_defaults() {
        let cfg = UciConfig::new();
        assert_eq!(cfg.multi_pv(), 1);
        assert_eq!(cfg.move_overhead(), 10);
        assert!(!cfg.ponder());
        assert!(!cfg.chess960());
        assert_eq!(cfg.contempt(), 0);
    }

    #[test]
    fn uci_config_setters_round_trip() {
        let cfg = UciConfig::new();
        cfg.set_multi_pv(4);
        cfg.set_move_overhead(50);
        cfg.set_ponder(true);
        cfg.set_chess960(true);
        cfg.set_contempt(-12);
        assert_eq!(cfg.multi_pv(), 4);
        assert_eq!(cfg.move_overhead(), 50);
        assert!(cfg.ponder());
        assert!(cfg.chess960());
        assert_eq!(cfg.contempt(), -12);
    }
}