use super::*;

#[test]
fn from_points_empty_is_none() {
    assert_eq!(Bounds::from_points(std::iter::empty()), None);
}

#[test]
fn single_point_is_degenerate_box() {
    let b = Bounds::from_points([Point::new(3.0, 4.0)]).unwrap();
    assert_eq!(b.min, Point::new(3.0, 4.0));
    assert_eq!(b.max, Point::new(3.0, 4.0));
    assert_eq!(b.width(), 0.0);
    assert_eq!(b.height(), 0.0);
}

#[test]
fn enclosing_takes_axes_independently() {
    let a = Bounds::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
    let b = Bounds::new(Point::new(5.0, 5.0), Point::new(20.0, 3.0));
    let out = Bounds::enclosing([a, b]).unwrap();
    assert_eq!(out.min, Point::new(0.0, 0.0));
    assert_eq!(out.max, Point::new(20.0, 10.0));
}

#[test]
fn rect_round_trip_normalizes() {
    let r = Bounds::new(Point::new(4.0, 1.0), Point::new(2.0, 5.0)).to_rect();
    assert_eq!(r, Rect::new(2.0, 1.0, 4.0, 5.0));
    let b = Bounds::from(r);
    assert_eq!(b.min, Point::new(2.0, 1.0));
}
