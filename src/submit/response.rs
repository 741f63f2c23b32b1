use serde::Deserialize;
use serde_json::{Map, Value};

use crate::submit::transport::RawResponse;

pub const STATUS_OK: u16 = 200;
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Server reply after classification. Rendering only ever looks at this.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Success(EvaluationResult),
    RateLimited,
    ClientError { status: u16, detail: ErrorDetail },
    ServerError { status: u16, detail: ErrorDetail },
    /// 200 whose body is not a usable JSON document.
    Unparseable { status: u16, detail: ErrorDetail },
}

impl Evaluation {
    pub fn kind(&self) -> &'static str {
        match self {
            Evaluation::Success(_) => "success",
            Evaluation::RateLimited => "rate_limited",
            Evaluation::ClientError { .. } => "client_error",
            Evaluation::ServerError { .. } => "server_error",
            Evaluation::Unparseable { .. } => "unparseable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorDetail {
    Message(String),
    RawBody(String),
    Unavailable,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EvaluationResult {
    pub metrics: Metrics,
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub weighted_mae: MetricValue,
    pub mae_day_9_18: MetricValue,
    pub mae_night_18_24: MetricValue,
    pub mae_midnight_0_9: MetricValue,
    pub rmsle: MetricValue,
    pub mae_global: MetricValue,
    pub rmse: MetricValue,
    pub r2: MetricValue,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum MetricValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<Value> for MetricValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MetricValue::Missing,
            Value::Number(n) => n
                .as_f64()
                .map(MetricValue::Number)
                .unwrap_or_else(|| MetricValue::Text(n.to_string())),
            Value::String(s) => MetricValue::Text(s),
            other => MetricValue::Text(other.to_string()),
        }
    }
}

/// A `meta` field shown as the server sent it: strings verbatim, anything
/// else as its JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub enum MetaValue {
    Text(String),
    #[default]
    Missing,
}

impl MetaValue {
    pub fn text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            MetaValue::Missing => None,
        }
    }
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MetaValue::Missing,
            Value::String(s) => MetaValue::Text(s),
            other => MetaValue::Text(other.to_string()),
        }
    }
}

/// Never fails: a malformed `meta` must not cost the metrics block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct Meta {
    pub rows_evaluated: MetaValue,
    pub user_id: MetaValue,
    pub segment_info: Option<SegmentInfo>,
}

/// Row counts per time bucket; absent counts render as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentInfo {
    pub day_count: MetaValue,
    pub night_count: MetaValue,
    pub midnight_count: MetaValue,
}

impl From<Value> for Meta {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Meta::default();
        };
        let mut field = |key: &str| map.remove(key).map(MetaValue::from).unwrap_or_default();
        let rows_evaluated = field("rows_evaluated");
        let user_id = field("user_id");
        let segment_info = match map.remove("segment_info") {
            // An empty object is treated like an absent one.
            Some(Value::Object(seg)) if !seg.is_empty() => Some(SegmentInfo::from(seg)),
            _ => None,
        };
        Meta {
            rows_evaluated,
            user_id,
            segment_info,
        }
    }
}

impl From<Map<String, Value>> for SegmentInfo {
    fn from(mut map: Map<String, Value>) -> Self {
        let mut count = |key: &str| map.remove(key).map(MetaValue::from).unwrap_or_default();
        SegmentInfo {
            day_count: count("day_count"),
            night_count: count("night_count"),
            midnight_count: count("midnight_count"),
        }
    }
}

pub fn classify(raw: &RawResponse) -> Evaluation {
    let json = serde_json::from_str::<Value>(&raw.body).ok();

    if raw.status == STATUS_OK {
        // `{}`, `[]`, scalars and null all fall through to the failure path.
        if let Some(value) = json
            .as_ref()
            .filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
        {
            match serde_json::from_value::<EvaluationResult>(value.clone()) {
                Ok(result) => return Evaluation::Success(result),
                Err(e) => tracing::warn!("success body has an unexpected shape: {e}"),
            }
        }
        return Evaluation::Unparseable {
            status: raw.status,
            detail: error_detail(json.as_ref(), &raw.body),
        };
    }

    if raw.status == STATUS_TOO_MANY_REQUESTS {
        return Evaluation::RateLimited;
    }

    let detail = error_detail(json.as_ref(), &raw.body);
    if (400..500).contains(&raw.status) {
        Evaluation::ClientError {
            status: raw.status,
            detail,
        }
    } else {
        Evaluation::ServerError {
            status: raw.status,
            detail,
        }
    }
}

fn error_detail(json: Option<&Value>, body: &str) -> ErrorDetail {
    if let Some(err) = json.and_then(|v| v.get("error")) {
        return ErrorDetail::Message(match err {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
    }
    if !body.is_empty() {
        return ErrorDetail::RawBody(body.to_string());
    }
    ErrorDetail::Unavailable
}

#[cfg(test)]
#[path = "../../tests/src_inline/submit/response.rs"]
mod tests;
