use laserdxx_core::{ContourId, Point, Polyline};
use laserdxx_pipeline::heal::heal;
use proptest::prelude::*;

fn segments(raw: Vec<((i32, i32), (i32, i32))>) -> Vec<Polyline> {
    raw.into_iter()
        .filter(|(a, b)| a != b)
        .enumerate()
        .map(|(i, (a, b))| {
            Polyline::new(
                ContourId(i as u64),
                vec![
                    Point::new(a.0 as f64 * 10.0, a.1 as f64 * 10.0),
                    Point::new(b.0 as f64 * 10.0, b.1 as f64 * 10.0),
                ],
                false,
                "0",
            )
        })
        .collect()
}

fn grid_segments() -> impl Strategy<Value = Vec<((i32, i32), (i32, i32))>> {
    prop::collection::vec(((0i32..4, 0i32..4), (0i32..4, 0i32..4)), 1..16)
}

proptest! {
    #[test]
    fn heal_is_idempotent(raw in grid_segments()) {
        let once = heal(segments(raw), 0.1);
        let twice = heal(once.clone(), 0.1);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn heal_never_adds_chains(raw in grid_segments()) {
        let input = segments(raw);
        let count = input.len();
        let out = heal(input, 0.1);
        prop_assert!(out.len() <= count);
    }

    #[test]
    fn heal_keeps_closure_and_ids(raw in grid_segments()) {
        let input = segments(raw);
        let ids: Vec<ContourId> = input.iter().map(|p| p.id).collect();
        let out = heal(input, 0.1);
        for chain in &out {
            prop_assert!(chain.is_properly_closed());
            prop_assert!(ids.contains(&chain.id));
        }
    }
}
