
#[allow(unused_imports)]
use pleco::{BitMove,Board};
#[allow(unused_imports)]
use pleco::core::move_list::ScoringMoveList;


// TODO: use Generators once stabilized.

// types

// Root
// MainSearch
// Evasions
// ProbCut
// Qsearch


// Strategy

// RootMoves -------

// MainSearch ------
// Captures_init
// Good_Captures
// Killer0
// Killer1
// CounterMove
// Quiet_Init
// Quiet
// Bad Captures
//

// Evasions -------
// Evasions_init
// All_evasions

// ProbCut
// Probcut_Captures_Init
// Probvut Captures

// Qsearch
// QCaptures_Init
// QCaptures
// QChecks
// QSearch_Recaptures
// QRecaptures




pub struct MovePicker {

}
