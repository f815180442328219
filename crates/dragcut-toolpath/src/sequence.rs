//! Path sequencing - reduces non-cutting travel between strokes.
//!
//! [`order`] is a greedy nearest-neighbour heuristic: O(n²) and not
//! optimal, but deterministic and good enough to avoid crossing the sheet
//! between every pair of strokes.

use dragcut_core::{Curve, SegmentChain, Vector2};
use tracing::debug;

/// Anything with a start and an end point the blade travels between.
pub trait Endpoints {
    /// Where cutting of the item begins, `None` for an empty item.
    fn start_point(&self) -> Option<Vector2>;
    /// Where cutting of the item ends, `None` for an empty item.
    fn end_point(&self) -> Option<Vector2>;
}

impl Endpoints for Curve {
    fn start_point(&self) -> Option<Vector2> {
        Some(self.start())
    }

    fn end_point(&self) -> Option<Vector2> {
        Some(self.end())
    }
}

impl Endpoints for SegmentChain {
    fn start_point(&self) -> Option<Vector2> {
        self.start()
    }

    fn end_point(&self) -> Option<Vector2> {
        self.end()
    }
}

/// Reorders `items` by greedy nearest neighbour.
///
/// The first item stays first. Each following item is the remaining one
/// whose start is closest to the end of the previously placed item; on a
/// tie the earliest remaining item wins. Items without endpoints sort after
/// every item that has them.
pub fn order<T: Endpoints>(items: Vec<T>) -> Vec<T> {
    let mut remaining = items;
    if remaining.is_empty() {
        return remaining;
    }

    let mut ordered = Vec::with_capacity(remaining.len());
    ordered.push(remaining.remove(0));

    while !remaining.is_empty() {
        let from = ordered.last().and_then(Endpoints::end_point);
        let mut best = 0;
        let mut best_distance = f64::INFINITY;

        if let Some(from) = from {
            for (i, item) in remaining.iter().enumerate() {
                let distance = item
                    .start_point()
                    .map_or(f64::INFINITY, |start| from.distance_squared_to(&start));
                if distance < best_distance {
                    best = i;
                    best_distance = distance;
                }
            }
        }

        ordered.push(remaining.remove(best));
    }

    debug!("Sequenced {} items", ordered.len());
    ordered
}

/// Total non-cutting travel when cutting `items` in order, starting at
/// `from` (or at the first item's start when `from` is `None`).
pub fn travel_distance<T: Endpoints>(items: &[T], from: Option<Vector2>) -> f64 {
    let mut position = from;
    let mut total = 0.0;
    for item in items {
        if let (Some(p), Some(start)) = (position, item.start_point()) {
            total += p.distance_to(&start);
        }
        if let Some(end) = item.end_point() {
            position = Some(end);
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Curve {
        Curve::line(Vector2::new(x0, y0), Vector2::new(x1, y1))
    }

    #[test]
    fn test_empty_input() {
        let out: Vec<Curve> = order(Vec::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_first_item_stays_first() {
        let curves = vec![
            line(50.0, 50.0, 60.0, 50.0),
            line(0.0, 0.0, 1.0, 0.0),
            line(61.0, 50.0, 70.0, 50.0),
        ];
        let out = order(curves.clone());
        assert_eq!(out[0], curves[0]);
        assert_eq!(out[1], curves[2]);
        assert_eq!(out[2], curves[1]);
    }

    #[test]
    fn test_tie_keeps_earliest() {
        let curves = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.0, 5.0, 20.0, 5.0),
            line(10.0, -5.0, 20.0, -5.0),
        ];
        let out = order(curves.clone());
        assert_eq!(out[1], curves[1]);
    }

    #[test]
    fn test_reduces_travel() {
        let curves = vec![
            line(0.0, 0.0, 1.0, 0.0),
            line(100.0, 0.0, 101.0, 0.0),
            line(2.0, 0.0, 3.0, 0.0),
            line(50.0, 0.0, 51.0, 0.0),
        ];
        let before = travel_distance(&curves, None);
        let after = travel_distance(&order(curves), None);
        assert!(after < before);
        assert_eq!(after, 1.0 + 47.0 + 49.0);
    }

    #[test]
    fn test_empty_chains_sort_last() {
        let chains = vec![
            SegmentChain::from_points(&[Vector2::ZERO, Vector2::new(1.0, 0.0)]),
            SegmentChain::new(),
            SegmentChain::from_points(&[Vector2::new(5.0, 0.0), Vector2::new(6.0, 0.0)]),
        ];
        let out = order(chains);
        assert!(!out[1].is_empty());
        assert!(out[2].is_empty());
    }
}
