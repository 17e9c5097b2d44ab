#![allow(missing_docs)]

use raceway::simulation::progress::LapProgress;

#[test]
fn test_fresh_progress_scores_the_minimum() {
    let progress = LapProgress::new(4);
    assert_eq!(progress.score(), 1);
    assert_eq!(progress.laps(), 0);
    assert_eq!(progress.visited_count(), 0);
    assert!(!progress.is_complete());
}

#[test]
fn test_score_grows_with_each_visited_waypoint() {
    let mut progress = LapProgress::new(4);

    let mut previous = progress.score();
    for index in 0..4 {
        progress.visit(index);
        assert!(progress.score() > previous);
        previous = progress.score();
    }

    assert_eq!(progress.score(), 5);
    assert!(progress.is_complete());
}

#[test]
fn test_visiting_twice_counts_once() {
    let mut progress = LapProgress::new(3);
    progress.visit(1);
    progress.visit(1);

    assert_eq!(progress.visited_count(), 1);
    assert_eq!(progress.score(), 2);
}

#[test]
fn test_visit_order_is_free() {
    let mut progress = LapProgress::new(3);
    progress.visit(2);
    progress.visit(0);
    progress.visit(1);

    assert!(progress.is_complete());
    assert_eq!(progress.score(), 4);
}

#[test]
fn test_lap_advance_clears_visits_and_counts_one_lap() {
    let mut progress = LapProgress::new(2);
    progress.visit(0);
    progress.visit(1);

    progress.advance_lap();

    assert_eq!(progress.laps(), 1);
    assert_eq!(progress.visited_count(), 0);
    assert!(!progress.is_visited(0));
    assert!(!progress.is_visited(1));
    // (1 lap + 1) * (0 visited + 1)
    assert_eq!(progress.score(), 2);
}

#[test]
fn test_score_multiplies_laps_and_visits() {
    let mut progress = LapProgress::new(3);
    progress.visit(0);
    progress.visit(1);
    progress.visit(2);
    progress.advance_lap();

    progress.visit(1);
    // (1 + 1) * (1 + 1)
    assert_eq!(progress.score(), 4);
}

#[test]
fn test_reset_clears_everything() {
    let mut progress = LapProgress::new(2);
    progress.visit(0);
    progress.visit(1);
    progress.advance_lap();
    progress.visit(0);

    progress.reset();

    assert_eq!(progress.laps(), 0);
    assert_eq!(progress.visited_count(), 0);
    assert_eq!(progress.score(), 1);
    assert!(!progress.is_complete());
}
