//! Running the full board loop against fast-forwarded simulated time.
//!
//! Lives in its own test binary because it installs the process-wide
//! simulated time source.

use happyhour::board::{Board, StopReason};
use happyhour::config::Config;
use happyhour::io::signals::SignalState;
use happyhour::scheduler::Scheduler;
use happyhour::time::source::{self, SimulatedTimeSource, parse_datetime};
use std::sync::Arc;

#[test]
fn test_board_runs_until_simulation_ends() {
    let start = parse_datetime("2025-06-01 15:58:00").unwrap();
    let end = parse_datetime("2025-06-01 16:02:00").unwrap();
    source::init_time_source(Arc::new(SimulatedTimeSource::new(start, end, 0.0)));
    assert!(source::is_simulated());

    let scheduler = Scheduler::new();
    let mut board = Board::mount(&Config::default(), &scheduler).unwrap();
    assert!(!board.snapshot(source::now()).promo.is_active);

    let signals = SignalState::detached();
    let reason = board.run(&signals, false).unwrap();
    assert_eq!(reason, StopReason::SimulationEnded);

    // Four simulated minutes crossed the 16:00 opening
    let state = board.snapshot(source::now());
    assert!(state.promo.is_active);
    assert_eq!(state.promo.remaining.to_string(), "02:58:00");

    // 240s of 6s autoplay over three built-in slides
    assert_eq!(state.slide.index, 40 % 3);

    board.unmount();
    assert!(scheduler.is_empty());
}
