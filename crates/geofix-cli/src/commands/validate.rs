use crate::batch::{BatchSummary, FileProcessingResult};
use crate::errors::file_failed;
use crate::files::read_document;
use crate::output::OutputWriter;
use crate::progress::{file_progress, finish_success};
use anyhow::{Context, Result};
use geofix_core::{check_document, ValidityReport};
use geofix_geo::GeoEngine;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::Tabled;

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Verdict")]
    verdict: String,
    #[tabled(rename = "Explanation")]
    explanation: String,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    report: Option<&'a ValidityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Report the validity of every file without modifying anything.
///
/// An invalid document is a result, not a failure; only files that cannot be
/// read or checked count as failed.
pub fn execute(files: &[PathBuf], output: &OutputWriter) -> Result<BatchSummary> {
    let engine = GeoEngine::new();

    let progress = file_progress(files.len(), "Checking files", output.is_json());
    let results: Vec<Result<ValidityReport>> = files
        .par_iter()
        .map(|path| {
            let result = check_file(&engine, path);
            progress.inc(1);
            result
        })
        .collect();
    finish_success(&progress, &format!("Checked {} files", files.len()));

    let mut batch = BatchSummary::new(files.len());
    let mut rows = Vec::new();
    let mut reports = Vec::with_capacity(files.len());

    for (path, result) in files.iter().zip(&results) {
        match result {
            Ok(report) => {
                rows.push(ReportRow {
                    file: path.display().to_string(),
                    verdict: report.verdict.to_string(),
                    explanation: report.explanations.join("; "),
                });
                batch.add_success(FileProcessingResult::success(path.clone(), Some(report.to_string())));
                reports.push(FileReport { path: path.as_path(), report: Some(report), error: None });
            }
            Err(error) => {
                if !output.is_json() {
                    file_failed(path, error).display();
                }
                let message = format!("{:#}", error);
                batch.add_failure(FileProcessingResult::failure(path.clone(), message.clone()));
                reports.push(FileReport { path: path.as_path(), report: None, error: Some(message) });
            }
        }
    }

    output.table(rows);
    output.result(
        batch.all_succeeded(),
        serde_json::json!({
            "files": reports,
            "total_files": batch.total_files,
            "failed": batch.failure_count(),
        }),
    )?;

    Ok(batch)
}

fn check_file(engine: &GeoEngine, path: &Path) -> Result<ValidityReport> {
    let document = read_document(path)?;
    check_document(engine, &document).with_context(|| format!("Failed to check {}", path.display()))
}
