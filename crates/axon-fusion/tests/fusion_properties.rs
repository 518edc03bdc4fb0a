use axon_core::config::FusionConfig;
use axon_fusion::{fuse, Evidence, Modality};
use proptest::prelude::*;

fn arb_modality() -> impl Strategy<Value = Modality> {
    prop_oneof![
        Just(Modality::Graph),
        Just(Modality::Activation),
        Just(Modality::Association),
        Just(Modality::Context),
        Just(Modality::External),
    ]
}

fn arb_evidence() -> impl Strategy<Value = Evidence> {
    (arb_modality(), 0.0f64..=1.0, 0.0f64..=2.0, 0.0f64..=1.0)
        .prop_map(|(m, v, w, u)| Evidence::new(m, v, w, u))
}

proptest! {
    // The identity law: fuse([{value: v, weight: 1, uncertainty: 0}]) == v.
    #[test]
    fn single_certain_item_is_the_identity(v in 0.0f64..=1.0) {
        let out = fuse(&[Evidence::new(Modality::Graph, v, 1.0, 0.0)], &FusionConfig::default());
        prop_assert_eq!(out.final_confidence, v);
        prop_assert!(!out.conflict);
    }

    #[test]
    fn fused_confidence_stays_in_unit_range(items in prop::collection::vec(arb_evidence(), 0..8)) {
        let out = fuse(&items, &FusionConfig::default());
        prop_assert!(out.final_confidence >= 0.0);
        prop_assert!(out.final_confidence <= 1.0);
        prop_assert!(out.uncertainty >= 0.0);
        prop_assert!(out.uncertainty <= 1.0);
    }

    #[test]
    fn fusion_never_exceeds_the_strongest_value(items in prop::collection::vec(arb_evidence(), 1..8)) {
        let out = fuse(&items, &FusionConfig::default());
        let max_value = items.iter().map(|e| e.value).fold(0.0f64, f64::max);
        prop_assert!(out.final_confidence <= max_value + 1e-12);
    }

    #[test]
    fn raising_uncertainty_never_raises_influence(
        v_low in 0.0f64..0.4,
        v_high in 0.6f64..=1.0,
        uncertainty in 0.1f64..=1.0,
    ) {
        // The high item loses influence as its uncertainty grows, so the
        // fused value moves toward the certain low item.
        let cfg = FusionConfig { conflict_variance_threshold: 1.0, ..Default::default() };
        let certain = fuse(&[
            Evidence::new(Modality::Graph, v_low, 1.0, 0.0),
            Evidence::new(Modality::Activation, v_high, 1.0, 0.0),
        ], &cfg);
        let discounted = fuse(&[
            Evidence::new(Modality::Graph, v_low, 1.0, 0.0),
            Evidence::new(Modality::Activation, v_high, 1.0, uncertainty),
        ], &cfg);
        prop_assert!(discounted.final_confidence <= certain.final_confidence + 1e-12);
    }
}
