//! Integration tests validating the distance helpers exported by `pardbscan-core`.

use pardbscan_core::{Point, euclidean_distance, within_radius};
use rstest::rstest;

#[rstest]
#[case((0.0, 0.0), (0.0, 0.0), 0.0)]
#[case((1.0, 2.0), (4.0, 6.0), 5.0)]
#[case((-1.0, -1.0), (1.0, 1.0), 8.0_f64.sqrt())]
fn euclidean_distance_returns_expected(
    #[case] left: (f64, f64),
    #[case] right: (f64, f64),
    #[case] expected: f64,
) {
    let distance = euclidean_distance(&Point::new(left.0, left.1), &Point::new(right.0, right.1));
    assert!((distance - expected).abs() < 1e-12);
}

#[test]
fn euclidean_distance_is_symmetric() {
    let a = Point::new(0.3, -7.25);
    let b = Point::new(-2.5, 4.0);
    assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
}

#[rstest]
#[case::on_boundary((1.0, 0.0), true)]
#[case::inside((0.5, 0.5), true)]
#[case::just_outside((1.000_001, 0.0), false)]
#[case::nan((f64::NAN, 0.0), false)]
#[case::infinite((f64::INFINITY, 0.0), false)]
fn within_radius_is_inclusive_and_rejects_non_finite(
    #[case] other: (f64, f64),
    #[case] expected: bool,
) {
    let origin = Point::new(0.0, 0.0);
    assert_eq!(
        within_radius(&origin, &Point::new(other.0, other.1), 1.0),
        expected
    );
}
