use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use chart2d_rs::core::{Point, Series};

#[test]
fn point_from_decimal_time_uses_epoch_seconds() {
    let time = Utc
        .timestamp_opt(1_700_000_000, 250_000_000)
        .single()
        .expect("valid ts");
    let point = Point::from_decimal_time(time, Decimal::new(12345, 2)).expect("point");

    assert!((point.x - 1_700_000_000.25).abs() <= 1e-6);
    assert!((point.y - 123.45).abs() <= 1e-9);
}

#[test]
fn decimal_samples_feed_series_extents() {
    let start = Utc
        .timestamp_opt(1_600_000_000, 0)
        .single()
        .expect("valid ts");
    let mut series = Series::new("prices");
    for (offset, cents) in [(0, 1050), (60, 990), (120, 1125)] {
        let time = start + chrono::Duration::seconds(offset);
        let point = Point::from_decimal_time(time, Decimal::new(cents, 2)).expect("point");
        series.add_point(point.x, point.y);
    }

    assert!((series.x_max() - series.x_min() - 120.0).abs() <= 1e-9);
    assert!((series.y_min() - 9.90).abs() <= 1e-9);
    assert!((series.y_max() - 11.25).abs() <= 1e-9);
}
