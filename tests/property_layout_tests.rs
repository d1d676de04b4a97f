use proptest::prelude::*;
use timeseries_panel::api::{LayoutConfig, chart_stage, column_count, filter_value_ticks, pad_value_extent};
use timeseries_panel::core::linear_ticks;

#[test]
fn padding_examples_straddle_zero() {
    let (min, max) = pad_value_extent((2.0, 10.0));
    assert_eq!(min, 0.0);
    assert!((max - 11.0).abs() <= 1e-9);

    let (min, max) = pad_value_extent((-10.0, -2.0));
    assert!((min + 11.0).abs() <= 1e-9);
    assert_eq!(max, 0.0);

    let (min, max) = pad_value_extent((-3.0, 7.0));
    assert!((min + 3.3).abs() <= 1e-9);
    assert!((max - 7.7).abs() <= 1e-9);
}

proptest! {
    #[test]
    fn padded_extent_always_contains_zero(
        a in -1.0e9f64..1.0e9,
        b in -1.0e9f64..1.0e9,
    ) {
        let raw = (a.min(b), a.max(b));
        let (min, max) = pad_value_extent(raw);
        prop_assert!(min <= 0.0);
        prop_assert!(max >= 0.0);
        prop_assert!(min <= raw.0);
        prop_assert!(max >= raw.1);
    }

    #[test]
    fn filtered_value_ticks_never_include_zero(
        a in -1.0e6f64..1.0e6,
        span in 1.0f64..1.0e6,
        count in 1usize..20,
    ) {
        let raw = linear_ticks(a, a + span, count);
        let filtered = filter_value_ticks(raw.clone());
        prop_assert!(filtered.iter().all(|tick| *tick != 0.0));
        prop_assert!(filtered.len() <= raw.len().div_ceil(2));
        prop_assert!(filtered.iter().all(|tick| raw.contains(tick)));
    }

    #[test]
    fn columns_never_exceed_max_chart_width(
        width in 1.0f64..20_000.0,
        max_width in 100.0f64..4_000.0,
    ) {
        let config = LayoutConfig::default().with_max_graph_width(max_width);
        let columns = column_count(width, &config);
        prop_assert!(columns >= 1);
        prop_assert!(width / (columns as f64) <= max_width + 1e-9);

        let stage = chart_stage(width, columns, &config);
        prop_assert!(stage.width >= 0.0);
        prop_assert!(stage.width * (columns as f64) <= width);
    }
}
