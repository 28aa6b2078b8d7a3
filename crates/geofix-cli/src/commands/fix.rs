use crate::batch::{BatchSummary, FileProcessingResult};
use crate::errors::file_failed;
use crate::files::{new_file_path, read_document, write_document};
use crate::output::OutputWriter;
use crate::progress::{file_progress, finish_success};
use anyhow::{Context, Result};
use geofix_core::config::LayeredConfig;
use geofix_core::models::{FixOptions, OutputMethod};
use geofix_core::{fix_document, FixSummary};
use geofix_geo::GeoEngine;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// A file that was fixed successfully
struct FixedFile {
    document: Value,
    summary: FixSummary,
    written: Option<PathBuf>,
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<FixSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Fix every file, each independently
pub fn execute(files: &[PathBuf], config: &LayeredConfig, output: &OutputWriter) -> Result<BatchSummary> {
    let engine = GeoEngine::new();
    let options = FixOptions::new(config.axis_mode.value);
    let method = config.output_method.value;
    let suffix = config.suffix.value.as_str();

    let progress = file_progress(files.len(), "Fixing files", output.is_json());
    let results: Vec<Result<FixedFile>> = files
        .par_iter()
        .map(|path| {
            let result = fix_file(&engine, path, &options, method, suffix);
            progress.inc(1);
            result
        })
        .collect();
    finish_success(&progress, &format!("Processed {} files", files.len()));

    let mut batch = BatchSummary::new(files.len());
    let mut reports = Vec::with_capacity(files.len());

    for (path, result) in files.iter().zip(&results) {
        match result {
            Ok(fixed) => {
                let detail = fixed.written.as_ref().map(|target| format!("Wrote fixes to {}", target.display()));
                match &detail {
                    Some(message) => output.success(message),
                    None if !output.is_json() => output.document(&fixed.document)?,
                    None => {}
                }
                if fixed.summary.changed() {
                    tracing::info!(
                        file = %path.display(),
                        geometries = fixed.summary.geometries,
                        flipped = fixed.summary.flipped,
                        repaired = fixed.summary.repaired,
                        rewound = fixed.summary.rewound,
                        "Fixed file"
                    );
                } else {
                    tracing::debug!(
                        file = %path.display(),
                        geometries = fixed.summary.geometries,
                        "No geometry needed changes"
                    );
                }

                batch.add_success(FileProcessingResult::success(path.clone(), detail));
                reports.push(FileReport {
                    path: path.as_path(),
                    written: fixed.written.as_deref(),
                    summary: Some(fixed.summary),
                    document: fixed.written.is_none().then_some(&fixed.document),
                    error: None,
                });
            }
            Err(error) => {
                if !output.is_json() {
                    file_failed(path, error).display();
                }
                let message = format!("{:#}", error);
                batch.add_failure(FileProcessingResult::failure(path.clone(), message.clone()));
                reports.push(FileReport {
                    path: path.as_path(),
                    written: None,
                    summary: None,
                    document: None,
                    error: Some(message),
                });
            }
        }
    }

    if files.len() > 1 && method != OutputMethod::Print {
        batch.display(output);
    }

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

fn fix_file(
    engine: &GeoEngine,
    path: &Path,
    options: &FixOptions,
    method: OutputMethod,
    suffix: &str,
) -> Result<FixedFile> {
    let document = read_document(path)?;
    let fixed = fix_document(engine, &document, options)
        .with_context(|| format!("Failed to fix {}", path.display()))?;

    let written = match method {
        OutputMethod::Overwrite => {
            write_document(path, &fixed.document)?;
            Some(path.to_path_buf())
        }
        OutputMethod::NewFile => {
            let target = new_file_path(path, suffix);
            write_document(&target, &fixed.document)?;
            Some(target)
        }
        OutputMethod::Print => None,
    };

    Ok(FixedFile { document: fixed.document, summary: fixed.summary, written })
}
