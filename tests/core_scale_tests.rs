use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use timeseries_panel::PanelError;
use timeseries_panel::core::{
    LinearScale, Margin, ScaleDomain, ScaleKind, Stage, TimeScale, build_scale, time_ticks,
};

fn instant(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, hour, minute, 0)
        .single()
        .expect("valid instant")
}

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new((10.0, 110.0), (0.0, 1000.0)).expect("valid scale");

    let base = 42.5;
    let px = scale.map(base);
    assert_relative_eq!(px, 325.0, epsilon = 1e-9);
    assert_relative_eq!(scale.invert(px), base, epsilon = 1e-9);
}

#[test]
fn value_scale_flips_into_screen_space() {
    let scale = LinearScale::new((-5.0, 15.0), (100.0, 0.0)).expect("valid scale");
    assert_eq!(scale.map(-5.0), 100.0);
    assert_eq!(scale.map(15.0), 0.0);
    assert_relative_eq!(scale.map(0.0), 75.0, epsilon = 1e-9);
}

#[test]
fn zero_width_domain_maps_to_range_start() {
    let scale = LinearScale::new((0.0, 0.0), (100.0, 0.0)).expect("valid scale");
    assert_eq!(scale.map(0.0), 100.0);
    assert_eq!(scale.map(42.0), 100.0);
}

#[test]
fn non_finite_domain_is_rejected() {
    assert!(LinearScale::new((0.0, f64::NAN), (0.0, 1.0)).is_err());
    assert!(LinearScale::new((0.0, 1.0), (f64::INFINITY, 1.0)).is_err());
}

#[test]
fn time_scale_round_trip_within_tolerance() {
    let scale = TimeScale::new((instant(0, 0), instant(10, 0)), (0.0, 1000.0)).expect("valid scale");

    let base = instant(2, 30);
    let px = scale.map(base);
    assert_relative_eq!(px, 250.0, epsilon = 1e-9);
    assert_eq!(scale.invert(px).expect("from pixel"), base);
    assert!(scale.invert(f64::NAN).is_err());
}

#[test]
fn build_scale_matches_kind_and_domain() {
    let time = build_scale(
        ScaleKind::Time,
        ScaleDomain::Time(instant(0, 0), instant(4, 0)),
        (0.0, 400.0),
    )
    .expect("time scale");
    assert_eq!(time.kind(), ScaleKind::Time);
    assert!(time.as_linear().is_none());
    assert_relative_eq!(
        time.as_time().expect("time").map(instant(1, 0)),
        100.0,
        epsilon = 1e-9
    );

    let linear = build_scale(ScaleKind::Linear, ScaleDomain::Linear(0.0, 50.0), (100.0, 0.0))
        .expect("linear scale");
    assert_eq!(linear.kind(), ScaleKind::Linear);
    assert_eq!(linear.tick_positions(5), vec![100.0, 80.0, 60.0, 40.0, 20.0, 0.0]);
}

#[test]
fn build_scale_rejects_mismatched_domain() {
    let err = build_scale(ScaleKind::Linear, ScaleDomain::Time(instant(0, 0), instant(1, 0)), (0.0, 1.0))
        .expect_err("kind mismatch");
    assert!(matches!(err, PanelError::InvalidData(_)));
}

#[test]
fn time_ticks_align_to_calendar_steps() {
    let ticks = time_ticks(instant(0, 7), instant(2, 7), 4);
    assert_eq!(ticks, vec![instant(0, 30), instant(1, 0), instant(1, 30), instant(2, 0)]);

    let day = Utc
        .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .expect("valid day");
    let daily = time_ticks(day, day + TimeDelta::days(10), 10);
    assert_eq!(daily.len(), 11);
    assert!(daily.windows(2).all(|pair| pair[1] - pair[0] == TimeDelta::days(1)));
}

#[test]
fn time_ticks_on_empty_span_return_the_instant() {
    assert_eq!(time_ticks(instant(3, 0), instant(3, 0), 10), vec![instant(3, 0)]);
    assert!(time_ticks(instant(3, 0), instant(4, 0), 0).is_empty());
}

#[test]
fn margins_carve_sub_stages() {
    let stage = Stage::new(10.0, 0.0, 800.0, 120.0);
    let inner = stage.within(Margin::default().top(20.0).right(60.0));
    assert_eq!(inner, Stage::new(10.0, 20.0, 740.0, 100.0));

    let collapsed = stage.within(Margin::default().left(900.0));
    assert_eq!(collapsed.width, 0.0);
    assert!(collapsed.is_empty());
}
