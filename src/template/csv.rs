use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::template::{SubmissionTemplate, TIMESTAMP_COLUMN, TIMESTAMP_FORMAT};

#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

pub fn header_line(template: &SubmissionTemplate) -> String {
    format!("{},{}", TIMESTAMP_COLUMN, quote_field(&template.value_column))
}

pub fn write_template(template: &SubmissionTemplate, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(header_line(template).as_bytes())?;
    w.write_all(LINE_ENDING.as_bytes())?;

    let value = template.value.to_string();
    for ts in &template.timestamps {
        write!(w, "{},{}{}", ts.format(TIMESTAMP_FORMAT), value, LINE_ENDING)?;
    }
    w.flush()
}

/// Header plus the first `n` data rows, as they appear in the file.
pub fn preview_lines(template: &SubmissionTemplate, n: usize) -> Vec<String> {
    let value = template.value.to_string();
    let mut out = Vec::with_capacity(n + 1);
    out.push(header_line(template));
    for ts in template.timestamps.iter().take(n) {
        out.push(format!("{},{}", ts.format(TIMESTAMP_FORMAT), value));
    }
    out
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
