use crate::config::SubmitConfig;
use crate::report::{LABEL_WIDTH, NOT_AVAILABLE, RULE_WIDTH, metric_text};
use crate::submit::SubmitError;
use crate::submit::response::{ErrorDetail, Evaluation, EvaluationResult, MetaValue, MetricValue};
use crate::template::{TIMESTAMP_FORMAT, TemplateError, TemplateSummary};

pub const RATE_LIMIT_ADVISORY: &str =
    "Daily submission limit exceeded. Please try again tomorrow.";
pub const NO_DETAIL_MESSAGE: &str = "Could not get a detailed error message from the server.";

pub fn render_submission(
    outcome: &Result<Evaluation, SubmitError>,
    config: &SubmitConfig,
) -> String {
    match outcome {
        Ok(evaluation) => render_evaluation(evaluation, config),
        Err(err) => render_submit_error(err),
    }
}

pub fn render_evaluation(evaluation: &Evaluation, config: &SubmitConfig) -> String {
    let mut out = String::new();
    push_rule(&mut out, '=');

    match evaluation {
        Evaluation::Success(result) => push_success(&mut out, result, config),
        Evaluation::RateLimited => {
            out.push_str("Rate limit exceeded\n");
            push_rule(&mut out, '-');
            out.push_str(&format!("  {}\n", RATE_LIMIT_ADVISORY));
        }
        Evaluation::ClientError { status, detail } | Evaluation::ServerError { status, detail } => {
            out.push_str(&format!("Error (Status Code: {})\n", status));
            push_rule(&mut out, '-');
            push_detail(&mut out, detail);
        }
        Evaluation::Unparseable { status, detail } => {
            out.push_str(&format!(
                "Error (Status Code: {}, unreadable evaluation response)\n",
                status
            ));
            push_rule(&mut out, '-');
            push_detail(&mut out, detail);
        }
    }

    push_rule(&mut out, '=');
    out
}

fn push_success(out: &mut String, result: &EvaluationResult, config: &SubmitConfig) {
    let metrics = &result.metrics;
    let meta = &result.meta;

    out.push_str("Evaluation result (Success)\n");
    push_rule(out, '-');

    out.push_str("  [Main Score]\n");
    push_metric(out, "Weighted MAE", &metrics.weighted_mae);
    push_rule(out, '-');

    out.push_str("  [Time Segmented MAE]\n");
    push_metric(out, "Day (09-18)", &metrics.mae_day_9_18);
    push_metric(out, "Night (18-24)", &metrics.mae_night_18_24);
    push_metric(out, "Midnight (00-09)", &metrics.mae_midnight_0_9);
    push_rule(out, '-');

    out.push_str("  [Global Details]\n");
    push_metric(out, "RMSLE", &metrics.rmsle);
    push_metric(out, "MAE (Global)", &metrics.mae_global);
    push_metric(out, "RMSE", &metrics.rmse);
    push_metric(out, "R2 Score", &metrics.r2);
    push_rule(out, '-');

    let rows = match meta.rows_evaluated.text() {
        Some(n) => format!("{} rows", n),
        None => NOT_AVAILABLE.to_string(),
    };
    push_field(out, "Rows evaluated", &rows);
    if let Some(seg) = &meta.segment_info {
        push_segment(out, "Day Rows", &seg.day_count);
        push_segment(out, "Night Rows", &seg.night_count);
        push_segment(out, "Midnight Rows", &seg.midnight_count);
    }
    let user_id = meta.user_id.text().unwrap_or(&config.user_id);
    push_field(out, "User ID", user_id);
}

fn push_detail(out: &mut String, detail: &ErrorDetail) {
    match detail {
        ErrorDetail::Message(msg) => out.push_str(&format!("  Error message: {}\n", msg)),
        ErrorDetail::RawBody(body) => {
            out.push_str("  Server response:\n");
            out.push_str(body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        }
        ErrorDetail::Unavailable => out.push_str(&format!("  {}\n", NO_DETAIL_MESSAGE)),
    }
}

pub fn render_submit_error(err: &SubmitError) -> String {
    let mut out = String::new();
    match err {
        SubmitError::FileMissing(path) => {
            out.push_str(&format!(
                "Error: submission file not found: {}\n",
                path.display()
            ));
        }
        SubmitError::NetworkUnreachable { url } => {
            push_rule(&mut out, '=');
            out.push_str("Error: cannot connect to the server.\n");
            out.push_str(&format!(
                "Check that '{}' is running and that the network is reachable.\n",
                url
            ));
            push_rule(&mut out, '=');
        }
        SubmitError::Timeout { timeout } => {
            push_rule(&mut out, '=');
            out.push_str(&format!(
                "Error: the request timed out after {}s. The server is not responding.\n",
                timeout.as_secs()
            ));
            push_rule(&mut out, '=');
        }
        SubmitError::Unexpected(msg) => {
            out.push_str(&format!("Unexpected error: {}\n", msg));
        }
    }
    out
}

pub fn render_template_summary(summary: &TemplateSummary) -> String {
    let mut out = String::new();
    out.push_str("--- Generated data preview ---\n");
    for line in &summary.preview {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("------------------------------\n");
    out.push_str(&format!(
        "CSV file '{}' generated successfully.\n",
        summary.output.display()
    ));
    out.push_str(&format!(
        "Period: {} to {}\n",
        summary.start.format(TIMESTAMP_FORMAT),
        summary.end.format(TIMESTAMP_FORMAT)
    ));
    out.push_str(&format!("Total rows: {}\n", summary.n_rows));
    out
}

pub fn render_template_error(err: &TemplateError) -> String {
    match err {
        TemplateError::InvalidRange { .. } => {
            format!("Error: {}. Swap --start and --end.\n", err)
        }
        _ => format!("Error: {}\n", err),
    }
}

fn push_rule(out: &mut String, ch: char) {
    for _ in 0..RULE_WIDTH {
        out.push(ch);
    }
    out.push('\n');
}

fn push_metric(out: &mut String, label: &str, value: &MetricValue) {
    push_field(out, label, &metric_text(value));
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {:<width$}: {}\n", label, value, width = LABEL_WIDTH));
}

fn push_segment(out: &mut String, label: &str, count: &MetaValue) {
    out.push_str(&format!(
        "   - {:<width$}: {}\n",
        label,
        count.text().unwrap_or("0"),
        width = LABEL_WIDTH - 3
    ));
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
