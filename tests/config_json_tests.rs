use telechart_rs::core::VisibleWindow;
use telechart_rs::{ChartConfig, ChartError};

#[test]
fn config_json_round_trip_preserves_every_field() {
    let config = ChartConfig::default()
        .with_pixel_ratio(2.0)
        .with_dark_theme(true)
        .with_width(640)
        .with_heights(360, 64)
        .with_initial_window(VisibleWindow::new(0.25, 0.5).expect("window"));

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn empty_json_object_yields_defaults() {
    let config = ChartConfig::from_json_str("{}").expect("parse");
    assert_eq!(config, ChartConfig::default());
}

#[test]
fn invalid_config_json_is_reported_as_invalid_data() {
    let err = ChartConfig::from_json_str("{ not json").expect_err("malformed");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ChartConfig::from_json_str(r#"{"min_window_span": 0.0}"#).expect_err("zero span");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ChartConfig::from_json_str(r#"{"width_px": 0}"#).expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidData(_)));
}
