use gemscout::AngleSet;
use proptest::prelude::*;
use std::f64::consts::PI;

fn angle() -> impl Strategy<Value = f64> {
    -PI..=PI
}

fn arb_intervals() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((angle(), angle()), 0..24)
}

fn arb_eps() -> impl Strategy<Value = f64> {
    1e-12..1e-2f64
}

fn build(eps: f64, intervals: &[(f64, f64)]) -> AngleSet {
    let mut set = AngleSet::new(eps);
    for &(a, b) in intervals {
        set.add_interval(a, b).unwrap();
    }
    set
}

proptest! {
    // Stored intervals are well-formed, sorted and strictly apart after every insert
    #[test]
    fn intervals_sorted_and_disjoint(eps in arb_eps(), intervals in arb_intervals()) {
        let mut set = AngleSet::new(eps);
        for &(a, b) in &intervals {
            set.add_interval(a, b).unwrap();
            for &(start, end) in set.intervals() {
                prop_assert!(start <= end);
            }
            for pair in set.intervals().windows(2) {
                prop_assert!(pair[0].1 < pair[1].0, "overlap after ({}, {}): {:?}", a, b, set.intervals());
            }
        }
    }

    // Everything ever added stays covered, seam-crossing intervals included
    #[test]
    fn added_intervals_stay_covered(eps in arb_eps(), intervals in arb_intervals()) {
        let set = build(eps, &intervals);
        for &(a, b) in &intervals {
            prop_assert!(set.contains(a, b).unwrap(), "({}, {}) lost in {:?}", a, b, set.intervals());
        }
    }

    // Adding the same interval twice changes nothing
    #[test]
    fn re_adding_is_idempotent(eps in arb_eps(), intervals in arb_intervals(), a in angle(), b in angle()) {
        let mut set = build(eps, &intervals);
        set.add_interval(a, b).unwrap();
        let before = set.intervals().to_vec();
        set.add_interval(a, b).unwrap();
        prop_assert_eq!(before, set.intervals().to_vec());
    }

    // The union does not depend on insertion order
    #[test]
    fn insertion_order_irrelevant(eps in arb_eps(), intervals in arb_intervals()) {
        let forward = build(eps, &intervals);
        let reversed: Vec<_> = intervals.iter().rev().copied().collect();
        let backward = build(eps, &reversed);
        prop_assert_eq!(forward.intervals(), backward.intervals());
    }

    // Angles outside [-PI, PI] are refused without touching the set
    #[test]
    fn out_of_range_rejected(eps in arb_eps(), intervals in arb_intervals(), excess in 1e-6..10.0f64, a in angle()) {
        let mut set = build(eps, &intervals);
        let before = set.intervals().to_vec();
        prop_assert!(set.add_interval(a, PI + excess).is_err());
        prop_assert!(set.add_interval(-PI - excess, a).is_err());
        prop_assert!(set.contains(a, PI + excess).is_err());
        prop_assert_eq!(before, set.intervals().to_vec());
    }
}
