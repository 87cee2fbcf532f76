
extern crate pleco;

mod board_build;
mod move_generating;
mod fen_building;
mod board_move_apply;
mod basic_bots;
mod board_hash;
