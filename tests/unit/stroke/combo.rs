use crate::fake::{FakeStroke, new_log};

use super::*;

#[test]
fn empty_combo_is_rejected() {
    let err = ComboStroke::<FakeStroke>::new(Vec::new()).unwrap_err();
    assert!(matches!(err, InkError::Validation(_)));
}

#[test]
fn completeness_follows_last_part() {
    let log = new_log();
    let combo = ComboStroke::new(vec![
        FakeStroke::new("a", false, &log),
        FakeStroke::new("b", true, &log),
    ])
    .unwrap();
    assert!(combo.is_complete());
    assert_eq!(combo.num_parts(), 2);
}

#[test]
fn bounds_and_distance_aggregate_parts() {
    let log = new_log();
    let combo = ComboStroke::new(vec![
        FakeStroke::new("a", false, &log)
            .with_bounds(0.0, 5.0, 4.0, 9.0)
            .with_distance(10.0),
        FakeStroke::new("b", true, &log)
            .with_bounds(2.0, 1.0, 8.0, 3.0)
            .with_distance(20.0),
    ])
    .unwrap();
    assert_eq!(
        combo.bounds(),
        Bounds::new(Point::new(0.0, 1.0), Point::new(8.0, 9.0))
    );
    assert_eq!(combo.average_distance(&[Point::ZERO]), 15.0);
}

#[test]
fn animate_runs_parts_in_order_then_completes() {
    let log = new_log();
    let combo = ComboStroke::new(vec![
        FakeStroke::new("a", false, &log),
        FakeStroke::new("b", false, &log),
        FakeStroke::new("c", true, &log),
    ])
    .unwrap();
    let sink = Rc::clone(&log);
    combo.animate(Box::new(move || sink.borrow_mut().push("combo done".to_string())));
    assert_eq!(
        *log.borrow(),
        vec![
            "animate a@0",
            "done a@0",
            "animate b@0",
            "done b@0",
            "animate c@0",
            "done c@0",
            "combo done",
        ]
    );
}

#[test]
fn hide_completes_once_after_all_parts() {
    let log = new_log();
    let combo = ComboStroke::new(vec![
        FakeStroke::new("a", false, &log),
        FakeStroke::new("b", true, &log),
    ])
    .unwrap();
    let sink = Rc::clone(&log);
    combo.hide(AnimationOpts::new().with_on_complete(move || {
        sink.borrow_mut().push("hidden".to_string())
    }));
    assert_eq!(*log.borrow(), vec!["hide a@0", "hide b@0", "hidden"]);
}
