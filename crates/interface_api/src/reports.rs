//! Payment report rendering

use std::fmt::Write as _;

use serde::Deserialize;
use thiserror::Error;

use domain_claims::PaymentReport;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV output was not valid UTF-8")]
    Encoding,
}

/// Output formats for the approved-claims report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Csv,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text/plain; charset=utf-8",
            ReportFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn render(&self, report: &PaymentReport) -> Result<String, ReportError> {
        match self {
            ReportFormat::Text => Ok(render_text(report)),
            ReportFormat::Csv => render_csv(report),
        }
    }
}

/// Human-readable summary, one line per approved claim
pub fn render_text(report: &PaymentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Approved Claims Payment Report");
    let _ = writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out);

    if report.is_empty() {
        let _ = writeln!(out, "No approved claims.");
    }
    for line in &report.lines {
        let _ = writeln!(
            out,
            "{} | {} | {} h x {:.2} = {:.2}",
            line.submitted_at.format("%Y-%m-%d"),
            line.lecturer_name,
            line.hours_worked.normalize(),
            line.hourly_rate,
            line.total_payment
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Claims: {}", report.lines.len());
    let _ = writeln!(out, "Total payable: {:.2}", report.grand_total);
    out
}

/// CSV with a header row and a closing total row
pub fn render_csv(report: &PaymentReport) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "claim_id",
        "lecturer_name",
        "hours_worked",
        "hourly_rate",
        "total_payment",
        "submitted_at",
    ])?;

    for line in &report.lines {
        writer.write_record([
            line.claim_id.as_uuid().to_string(),
            line.lecturer_name.clone(),
            line.hours_worked.to_string(),
            line.hourly_rate.to_string(),
            format!("{:.2}", line.total_payment),
            line.submitted_at.to_rfc3339(),
        ])?;
    }
    writer.write_record([
        String::new(),
        "TOTAL".to_string(),
        String::new(),
        String::new(),
        format!("{:.2}", report.grand_total),
        String::new(),
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ReportError::Encoding)
}
