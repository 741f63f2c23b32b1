use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::config::TemplateConfig;

pub mod csv;

pub const TIMESTAMP_COLUMN: &str = "Timestamp";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const PREVIEW_ROWS: usize = 5;
/// A little over a century of hourly rows.
pub const MAX_ROWS: i64 = 1_000_000;

const ACCEPTED_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("invalid date-time '{0}' (expected YYYY-MM-DD HH:MM:SS)")]
    InvalidFormat(String),
    #[error("end {end} is before start {start}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    #[error("range spans {rows} hourly rows; at most {max} are supported")]
    RangeTooLarge { rows: i64, max: i64 },
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Hourly skeleton of a prediction file: one row per hour in `[start, end]`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionTemplate {
    pub value_column: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub value: f64,
}

#[derive(Debug, Clone)]
pub struct TemplateSummary {
    pub output: PathBuf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub n_rows: usize,
    pub preview: Vec<String>,
}

pub fn parse_datetime(raw: &str) -> Result<NaiveDateTime, TemplateError> {
    let trimmed = raw.trim();
    for fmt in ACCEPTED_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TemplateError::InvalidFormat(raw.to_string()))
}

impl SubmissionTemplate {
    pub fn hourly(
        start: NaiveDateTime,
        end: NaiveDateTime,
        value: f64,
        value_column: &str,
    ) -> Result<Self, TemplateError> {
        if end < start {
            return Err(TemplateError::InvalidRange { start, end });
        }
        let n_rows = (end - start).num_hours() + 1;
        if n_rows > MAX_ROWS {
            return Err(TemplateError::RangeTooLarge {
                rows: n_rows,
                max: MAX_ROWS,
            });
        }
        // Every row lies in [start, end], so none of the additions can overflow.
        let timestamps = (0..n_rows)
            .map(|i| start + TimeDelta::hours(i))
            .collect();
        Ok(Self {
            value_column: value_column.to_string(),
            timestamps,
            value,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.timestamps.len()
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), TemplateError> {
        csv::write_template(self, path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parses the configured range, builds the table and writes it to disk.
pub fn generate(config: &TemplateConfig) -> Result<TemplateSummary, TemplateError> {
    let start = parse_datetime(&config.start)?;
    let end = parse_datetime(&config.end)?;
    let template = SubmissionTemplate::hourly(start, end, config.value, &config.value_column)?;

    template.write_csv(&config.output)?;
    tracing::info!(
        "wrote {} rows to {}",
        template.n_rows(),
        config.output.display()
    );

    Ok(TemplateSummary {
        output: config.output.clone(),
        start,
        end,
        n_rows: template.n_rows(),
        preview: csv::preview_lines(&template, PREVIEW_ROWS),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/template/tests.rs"]
mod tests;
