use std::fmt;
use std::mem;

/// Current stage of move generation. Shared by the main-search, evasion, probcut and
/// qsearch pickers — each picker only ever visits a subset of these variants, skipping
/// straight past the ones that don't apply to it.
#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum PickMain {
    // Main Searching Algo
    MainSearch = 0,
    CapturesInit = 1,
    GoodCaptures = 2,
    KillerOne = 3,
    KillerTwo = 4,
    CounterMove = 5,
    QuietInit = 6,
    QuietMoves = 7,
    BadCaptures = 8,
    // Evasions, Main and Qsearch
    EvasionSearch = 9,
    EvasionsInit = 10,
    AllEvasions = 11,
    // ProbCut Searching
    ProbCutSearch = 12,
    ProbCutCapturesInit = 13,
    ProbCutCaptures = 14,
    // QSearch - Non Re-Captures
    QSearch = 15,
    QSearchInit = 16,
    QCaptures = 17,
    QChecks = 18,
    // Q Search ReCaptures
    QSearchRecaptures = 19,
    QRecaptures = 20,
    // Terminal stage, returned once a picker has nothing left.
    Done = 21,
}

impl PickMain {
    #[inline(always)]
    pub fn incr(&mut self) {
        unsafe {
            *self = mem::transmute((*self as u8 + 1).min(PickMain::Done as u8));
        }
    }
}

impl fmt::Display for PickMain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            PickMain::MainSearch => "MainSearch",
            PickMain::CapturesInit => "CapturesInit",
            PickMain::GoodCaptures => "GoodCaptures",
            PickMain::KillerOne => "KillerOne",
            PickMain::KillerTwo => "KillerTwo",
            PickMain::CounterMove => "CounterMove",
            PickMain::QuietInit => "QuietInit",
            PickMain::QuietMoves => "QuietMoves",
            PickMain::BadCaptures => "BadCaptures",
            PickMain::EvasionSearch => "EvasionSearch",
            PickMain::EvasionsInit => "EvasionsInit",
            PickMain::AllEvasions => "AllEvasions",
            PickMain::ProbCutSearch => "ProbCutSearch",
            PickMain::ProbCutCapturesInit => "ProbCutCapturesInit",
            PickMain::ProbCutCaptures => "ProbCutCaptures",
            PickMain::QSearch => "QSearch",
            PickMain::QSearchInit => "QSearchInit",
            PickMain::QCaptures => "QCaptures",
            PickMain::QChecks => "QChecks",
            PickMain::QSearchRecaptures => "QSearchRecaptures",
            PickMain::QRecaptures => "QRecaptures",
            PickMain::Done => "Done",
        })
    }
}
