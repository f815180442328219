use dragcut_core::{Curve, Vector2};
use dragcut_toolpath::{order, travel_distance};
use proptest::prelude::*;

fn lines() -> impl Strategy<Value = Vec<Curve>> {
    prop::collection::vec(
        (-500.0..500.0f64, -500.0..500.0f64, -500.0..500.0f64, -500.0..500.0f64),
        0..40,
    )
    .prop_map(|coords| {
        coords
            .into_iter()
            .map(|(x0, y0, x1, y1)| Curve::line(Vector2::new(x0, y0), Vector2::new(x1, y1)))
            .collect()
    })
}

proptest! {
    #[test]
    fn order_is_deterministic(curves in lines()) {
        prop_assert_eq!(order(curves.clone()), order(curves));
    }

    #[test]
    fn order_is_a_permutation_starting_with_the_first(curves in lines()) {
        let ordered = order(curves.clone());
        prop_assert_eq!(ordered.len(), curves.len());
        if let Some(first) = curves.first() {
            prop_assert_eq!(&ordered[0], first);
        }
        for curve in &curves {
            prop_assert!(ordered.contains(curve));
        }
    }

    #[test]
    fn each_pick_is_the_nearest_start(curves in lines()) {
        let ordered = order(curves);
        for i in 1..ordered.len() {
            let from = ordered[i - 1].end();
            let picked = from.distance_squared_to(&ordered[i].start());
            for later in &ordered[i..] {
                prop_assert!(picked <= from.distance_squared_to(&later.start()));
            }
        }
    }
}

#[test]
fn test_grid_travel_is_reduced() {
    // Short strokes on a 5x5 grid, listed column-major but cut row by row.
    let mut curves = Vec::new();
    for x in 0..5 {
        for y in [0, 4, 1, 3, 2] {
            let start = Vector2::new(x as f64 * 10.0, y as f64 * 10.0);
            curves.push(Curve::line(start, start + Vector2::new(1.0, 0.0)));
        }
    }
    let before = travel_distance(&curves, None);
    let after = travel_distance(&order(curves), None);
    assert!(after < before);
}
