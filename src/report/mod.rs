pub mod text;

use crate::submit::response::MetricValue;

pub const NO_DATA: &str = "No Data";
pub const NOT_AVAILABLE: &str = "N/A";
pub const RULE_WIDTH: usize = 40;
pub const LABEL_WIDTH: usize = 20;

/// Fixed six decimals with `,` grouping of the integer part.
pub fn format_grouped_6(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let fixed = format!("{:.6}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if v.is_sign_negative() {
        out.push('-');
    }
    let n = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('.');
    out.push_str(frac_part);
    out
}

pub fn metric_text(value: &MetricValue) -> String {
    match value {
        MetricValue::Number(v) => format_grouped_6(*v),
        MetricValue::Text(s) => s.clone(),
        MetricValue::Missing => NO_DATA.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
