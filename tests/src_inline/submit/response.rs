use super::*;

fn raw(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        body: body.to_string(),
    }
}

fn text(s: &str) -> MetaValue {
    MetaValue::Text(s.to_string())
}

const FULL_BODY: &str = r#"{
  "metrics": {
    "weighted_mae": 12.345678,
    "mae_day_9_18": 15.0,
    "mae_night_18_24": 8.25,
    "mae_midnight_0_9": 3.5,
    "rmsle": 0.42,
    "mae_global": 10.0,
    "rmse": 1234.5,
    "r2": 0.87
  },
  "meta": {
    "rows_evaluated": 168,
    "user_id": "team-42",
    "segment_info": {"day_count": 63, "night_count": 42, "midnight_count": 63}
  }
}"#;

#[test]
fn test_full_success_body() {
    let Evaluation::Success(result) = classify(&raw(200, FULL_BODY)) else {
        panic!("expected success");
    };
    assert_eq!(result.metrics.weighted_mae, MetricValue::Number(12.345678));
    assert_eq!(result.metrics.r2, MetricValue::Number(0.87));
    assert_eq!(result.meta.rows_evaluated.text(), Some("168"));
    assert_eq!(result.meta.user_id.text(), Some("team-42"));
    assert_eq!(
        result.meta.segment_info,
        Some(SegmentInfo {
            day_count: text("63"),
            night_count: text("42"),
            midnight_count: text("63"),
        })
    );
}

#[test]
fn test_missing_and_null_metrics_are_missing() {
    let body = r#"{"metrics":{"rmse":null,"r2":"n/a"},"meta":{}}"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(result.metrics.weighted_mae, MetricValue::Missing);
    assert_eq!(result.metrics.rmse, MetricValue::Missing);
    assert_eq!(result.metrics.r2, MetricValue::Text("n/a".to_string()));
    assert_eq!(result.meta, Meta::default());
}

#[test]
fn test_integer_metric_is_numeric() {
    let body = r#"{"metrics":{"weighted_mae":3}}"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(result.metrics.weighted_mae, MetricValue::Number(3.0));
}

#[test]
fn test_segment_info_defaults_and_empty_object() {
    let body = r#"{"metrics":{},"meta":{"segment_info":{"night_count":5}}}"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(
        result.meta.segment_info,
        Some(SegmentInfo {
            day_count: MetaValue::Missing,
            night_count: text("5"),
            midnight_count: MetaValue::Missing,
        })
    );

    let body = r#"{"metrics":{},"meta":{"segment_info":{}}}"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(result.meta.segment_info, None);
}

#[test]
fn test_rate_limit_ignores_body() {
    assert_eq!(classify(&raw(429, "")), Evaluation::RateLimited);
    assert_eq!(
        classify(&raw(429, r#"{"error":"too many"}"#)),
        Evaluation::RateLimited
    );
}

#[test]
fn test_error_message_preferred() {
    assert_eq!(
        classify(&raw(400, r#"{"error":"missing Timestamp column"}"#)),
        Evaluation::ClientError {
            status: 400,
            detail: ErrorDetail::Message("missing Timestamp column".to_string()),
        }
    );
    assert_eq!(
        classify(&raw(500, r#"{"error":{"code":7}}"#)),
        Evaluation::ServerError {
            status: 500,
            detail: ErrorDetail::Message(r#"{"code":7}"#.to_string()),
        }
    );
}

#[test]
fn test_raw_body_then_unavailable() {
    assert_eq!(
        classify(&raw(502, "Bad Gateway")),
        Evaluation::ServerError {
            status: 502,
            detail: ErrorDetail::RawBody("Bad Gateway".to_string()),
        }
    );
    assert_eq!(
        classify(&raw(404, r#"{"detail":"nope"}"#)),
        Evaluation::ClientError {
            status: 404,
            detail: ErrorDetail::RawBody(r#"{"detail":"nope"}"#.to_string()),
        }
    );
    assert_eq!(
        classify(&raw(503, "")),
        Evaluation::ServerError {
            status: 503,
            detail: ErrorDetail::Unavailable,
        }
    );
}

// Status 200 alone is not enough: the body has to be a usable JSON object.
#[test]
fn test_ok_status_with_unparseable_body_is_not_success() {
    assert_eq!(
        classify(&raw(200, "Internal hiccup")),
        Evaluation::Unparseable {
            status: 200,
            detail: ErrorDetail::RawBody("Internal hiccup".to_string()),
        }
    );
    assert_eq!(
        classify(&raw(200, "")),
        Evaluation::Unparseable {
            status: 200,
            detail: ErrorDetail::Unavailable,
        }
    );
}

#[test]
fn test_ok_status_with_empty_or_non_object_json_is_not_success() {
    for body in ["{}", "[]", "null", "0", "[1,2]"] {
        let evaluation = classify(&raw(200, body));
        assert_eq!(evaluation.kind(), "unparseable", "body {body}");
    }
}

#[test]
fn test_ok_status_with_wrong_shape_is_not_success() {
    let evaluation = classify(&raw(200, r#"{"metrics":null}"#));
    assert_eq!(evaluation.kind(), "unparseable");

    let evaluation = classify(&raw(200, r#"{"error":"scoring failed"}"#));
    // An object without metrics still parses; it is a success with every metric missing.
    assert_eq!(evaluation.kind(), "success");
}

#[test]
fn test_non_integer_meta_keeps_metrics() {
    let body = r#"{
      "metrics": {"weighted_mae": 1.5, "rmse": 2.0},
      "meta": {"rows_evaluated": 168.0, "user_id": 7}
    }"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(result.metrics.weighted_mae, MetricValue::Number(1.5));
    assert_eq!(result.metrics.rmse, MetricValue::Number(2.0));
    assert_eq!(result.meta.rows_evaluated.text(), Some("168.0"));
    assert_eq!(result.meta.user_id.text(), Some("7"));
}

#[test]
fn test_segment_counts_kept_as_sent() {
    let body = r#"{"metrics":{},"meta":{"segment_info":{"day_count":63.0,"night_count":"42","midnight_count":null}}}"#;
    let Evaluation::Success(result) = classify(&raw(200, body)) else {
        panic!("expected success");
    };
    assert_eq!(
        result.meta.segment_info,
        Some(SegmentInfo {
            day_count: text("63.0"),
            night_count: text("42"),
            midnight_count: MetaValue::Missing,
        })
    );
}

#[test]
fn test_malformed_meta_does_not_discard_metrics() {
    for meta in ["null", "5", "\"oops\"", "[1]", r#"{"segment_info":[1,2]}"#] {
        let body = format!(r#"{{"metrics":{{"weighted_mae":0.5}},"meta":{meta}}}"#);
        let Evaluation::Success(result) = classify(&raw(200, &body)) else {
            panic!("expected success for meta {meta}");
        };
        assert_eq!(result.metrics.weighted_mae, MetricValue::Number(0.5));
        assert_eq!(result.meta.segment_info, None);
    }
}

#[test]
fn test_bare_nan_token_is_unparseable() {
    let body = r#"{"metrics": {"weighted_mae": NaN}}"#;
    assert_eq!(
        classify(&raw(200, body)),
        Evaluation::Unparseable {
            status: 200,
            detail: ErrorDetail::RawBody(body.to_string()),
        }
    );
}
