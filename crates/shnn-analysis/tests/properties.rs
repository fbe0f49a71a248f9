//! Property tests for grouping by parametrization.

use proptest::prelude::*;
use shnn_analysis::{
    ParametrizationKey, StimulusCodec, StimulusIdParser, StimulusRecord, TuningCurve,
};
use std::collections::HashMap;

const NAMES: [&str; 3] = ["contrast", "orientation", "phase"];

fn record(values: &[u8; 3]) -> StimulusRecord {
    NAMES
        .iter()
        .zip(values)
        .fold(StimulusRecord::new("Grating"), |r, (name, v)| {
            r.with_parameter(*name, v.to_string())
        })
}

fn encode(values: &[u8; 3]) -> String {
    StimulusCodec::new().encode(&record(values)).unwrap()
}

fn key_of(id: &str, index: usize) -> ParametrizationKey {
    let parsed = StimulusCodec::new().parse(id).unwrap();
    ParametrizationKey::split(parsed, index).unwrap().0
}

/// Stimuli drawn from a small grid so that groups actually collide
fn curve_strategy() -> impl Strategy<Value = TuningCurve> {
    (1usize..4, 0usize..3).prop_flat_map(|(units, index)| {
        prop::collection::vec(
            (
                [0u8..3, 0u8..4, 0u8..2],
                prop::collection::vec(-100.0f64..100.0, units),
            ),
            0..24,
        )
        .prop_map(move |rows| {
            let (ids, values): (Vec<_>, Vec<_>) =
                rows.into_iter().map(|(p, v)| (encode(&p), v)).unzip();
            TuningCurve::new("V1_Exc", values, ids, index).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn every_row_lands_in_exactly_one_group(curve in curve_strategy()) {
        let groups = curve.group_by_parametrization(&StimulusCodec::new()).unwrap();
        let total: usize = groups.values().map(|g| g.len()).sum();
        prop_assert_eq!(total, curve.len());
        for group in groups.values() {
            prop_assert_eq!(group.values.nrows(), group.len());
            prop_assert_eq!(group.num_units(), curve.num_units());
        }
    }

    #[test]
    fn grouping_is_idempotent(curve in curve_strategy()) {
        let codec = StimulusCodec::new();
        let first = curve.group_by_parametrization(&codec).unwrap();
        let second = curve.group_by_parametrization(&codec).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn groups_keep_presentation_order(curve in curve_strategy()) {
        let groups = curve.group_by_parametrization(&StimulusCodec::new()).unwrap();

        let mut expected: HashMap<ParametrizationKey, Vec<usize>> = HashMap::new();
        for (i, id) in curve.stimulus_ids().iter().enumerate() {
            expected.entry(key_of(id, curve.parameter_index())).or_default().push(i);
        }
        prop_assert_eq!(expected.len(), groups.len());

        for (key, rows) in expected {
            let group = &groups[&key];
            for (pos, &i) in rows.iter().enumerate() {
                let row: Vec<f64> = group.values.row(pos).to_vec();
                prop_assert_eq!(&row, &curve.values()[i]);
                let parsed = StimulusCodec::new().parse(&curve.stimulus_ids()[i]).unwrap();
                let varying = &parsed.parameters[curve.parameter_index()].value;
                prop_assert_eq!(&group.parameter_values[pos], varying);
            }
        }
    }

    #[test]
    fn keys_ignore_only_the_varying_parameter(
        base in [0u8..10, 0u8..10, 0u8..10],
        index in 0usize..3,
        other in 0usize..3,
        bump in 1u8..10,
    ) {
        let mut swept = base;
        swept[index] = base[index].wrapping_add(bump);
        prop_assert_eq!(key_of(&encode(&base), index), key_of(&encode(&swept), index));

        prop_assume!(other != index);
        let mut changed = base;
        changed[other] = base[other].wrapping_add(bump);
        prop_assert_ne!(key_of(&encode(&base), index), key_of(&encode(&changed), index));
    }
}
