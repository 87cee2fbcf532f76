extern crate pleco_engine;

use pleco_engine::engine::PlecoSearcher;

fn main() {
    let mut searcher = PlecoSearcher::init(true);
    searcher.uci();
}
