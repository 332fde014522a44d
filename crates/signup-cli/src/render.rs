//! Plain-text rendering of form state, listings and failures

use signup_form::{ListingStatus, SubmissionFailure};
use signup_schema::FieldErrors;
use signup_store::StoredRecord;

const HEADERS: [&str; 4] = ["ID", "NAME", "EMAIL", "AGE"];

/// Render records as an aligned table
#[must_use]
pub fn listing_table(records: &[StoredRecord]) -> String {
    if records.is_empty() {
        return "(no records)\n".to_string();
    }

    let rows: Vec<[String; 4]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.name.clone(),
                r.email.clone(),
                r.age.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render one line per failing field
#[must_use]
pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        out.push_str(&format!("  {field}: {message}\n"));
    }
    out
}

/// Render a submission failure with its retry hint
#[must_use]
pub fn failure(failure: &SubmissionFailure) -> String {
    let hint = if failure.is_retryable() {
        " (retry may help)"
    } else {
        ""
    };
    format!("{}{hint}\n  {}\n", failure.message, failure.detail)
}

/// Notice shown above a listing that is not fresh
#[must_use]
pub fn listing_notice(status: &ListingStatus) -> Option<String> {
    match status {
        ListingStatus::Failed { message } => Some(format!(
            "listing could not be refreshed: {message} (run `signup list` to retry)"
        )),
        ListingStatus::NotLoaded => Some("listing not loaded".to_string()),
        ListingStatus::Loaded | ListingStatus::Refreshing => None,
    }
}
