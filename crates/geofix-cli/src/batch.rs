use crate::output::OutputWriter;
use serde::Serialize;
use std::path::PathBuf;

/// Result of processing a single file in a batch
#[derive(Debug, Clone, Serialize)]
pub struct FileProcessingResult {
    pub path: PathBuf,
    /// What happened, e.g. where fixes were written
    pub detail: Option<String>,
    pub error: Option<String>,
}

impl FileProcessingResult {
    pub fn success(path: PathBuf, detail: Option<String>) -> Self {
        Self { path, detail, error: None }
    }

    pub fn failure(path: PathBuf, error: String) -> Self {
        Self { path, detail: None, error: Some(error) }
    }
}

/// Summary of batch processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    /// Total files given
    pub total_files: usize,

    /// Successfully processed files
    pub successful: Vec<FileProcessingResult>,

    /// Failed files
    pub failed: Vec<FileProcessingResult>,
}

impl BatchSummary {
    /// Create a new empty batch summary
    pub fn new(total_files: usize) -> Self {
        Self { total_files, ..Self::default() }
    }

    pub fn add_success(&mut self, result: FileProcessingResult) {
        self.successful.push(result);
    }

    pub fn add_failure(&mut self, result: FileProcessingResult) {
        self.failed.push(result);
    }

    pub fn success_count(&self) -> usize {
        self.successful.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len()
    }

    /// Check if all files succeeded
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Display summary to output
    pub fn display(&self, output: &OutputWriter) {
        output.section("Batch Processing Summary");
        output.kv("Total Files", self.total_files);
        output.kv("Successful", self.success_count());
        output.kv("Failed", self.failure_count());

        if !self.failed.is_empty() {
            output.section("Failed Files");
            for result in &self.failed {
                output.kv(
                    result.path.display(),
                    result.error.as_deref().unwrap_or("unknown error"),
                );
            }
        }
    }
}
