use super::*;

#[test]
fn test_format_grouped_6() {
    assert_eq!(format_grouped_6(0.0), "0.000000");
    assert_eq!(format_grouped_6(12.5), "12.500000");
    assert_eq!(format_grouped_6(999.9999994), "999.999999");
    assert_eq!(format_grouped_6(1234.5), "1,234.500000");
    assert_eq!(format_grouped_6(1234567.891), "1,234,567.891000");
    assert_eq!(format_grouped_6(-98765.4321), "-98,765.432100");
    assert_eq!(format_grouped_6(100000.0), "100,000.000000");
}

#[test]
fn test_format_grouped_6_rounding_carries_into_group() {
    assert_eq!(format_grouped_6(999.9999999), "1,000.000000");
}

#[test]
fn test_metric_text() {
    assert_eq!(metric_text(&MetricValue::Number(0.25)), "0.250000");
    assert_eq!(metric_text(&MetricValue::Text("N/A".to_string())), "N/A");
    assert_eq!(metric_text(&MetricValue::Missing), NO_DATA);
}

#[test]
fn test_format_grouped_6_non_finite() {
    assert_eq!(format_grouped_6(f64::NAN), "nan");
    assert_eq!(format_grouped_6(f64::INFINITY), "inf");
    assert_eq!(format_grouped_6(f64::NEG_INFINITY), "-inf");
}
