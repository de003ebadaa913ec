use std::collections::HashSet;

use proptest::prelude::*;
use telechart_rs::core::{AnimatedScalar, FadeKey, FadingGroup};

#[derive(Debug, Clone, PartialEq)]
struct Keyed(u8);

impl FadeKey for Keyed {
    type Key = u8;

    fn fade_key(&self) -> Self::Key {
        self.0
    }
}

proptest! {
    #[test]
    fn animated_scalar_lands_exactly_on_target(
        start in -1_000_000.0f64..1_000_000.0,
        target in -1_000_000.0f64..1_000_000.0,
        fractions in prop::collection::vec(0.0f64..0.5, 1..40),
        last in 0.0f64..2.0
    ) {
        let mut scalar = AnimatedScalar::new(start);
        scalar.set_target(target);

        let mut total = 0.0;
        for fraction in &fractions {
            scalar.step(*fraction);
            total += fraction;
            let (low, high) = if start <= target { (start, target) } else { (target, start) };
            prop_assert!(scalar.get() >= low && scalar.get() <= high);
        }
        scalar.step((1.0 - total).max(0.0) + last);

        prop_assert_eq!(scalar.get(), target);
        prop_assert!(scalar.is_settled());
    }

    #[test]
    fn fading_group_keeps_persistent_items_and_evicts_absent_ones(
        rounds in prop::collection::vec(
            (prop::collection::vec(0u8..8, 0..6), 0.0f64..0.6),
            1..30
        )
    ) {
        let mut group = FadingGroup::new();
        // Key 255 is requested every round.
        let mut seen_opacity = 0.0;
        for (keys, fraction) in &rounds {
            let values: Vec<Keyed> = keys
                .iter()
                .copied()
                .chain(std::iter::once(255))
                .map(Keyed)
                .collect();
            group.put_values(values);
            group.step(*fraction);

            let fading = group.fading_of(&255).expect("persistent item tracked");
            prop_assert!(fading.appearing);
            prop_assert!(fading.opacity >= seen_opacity);
            seen_opacity = fading.opacity;

            for (_, fading) in group.iter() {
                prop_assert!((0.0..=1.0).contains(&fading.opacity));
            }
        }

        let last_keys: HashSet<u8> = rounds
            .last()
            .map(|(keys, _)| keys.iter().copied().collect())
            .unwrap_or_default();
        group.put_values([Keyed(255)]);
        group.step(0.5);
        group.step(0.5);
        for key in last_keys {
            prop_assert!(group.fading_of(&key).is_none());
        }
        prop_assert_eq!(group.len(), 1);
    }
}
