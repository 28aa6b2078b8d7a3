use console::style;
use geofix_core::GeofixError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Build a presentable error for a file that could not be processed
pub fn file_failed(path: &Path, error: &anyhow::Error) -> CliError {
    let base = CliError::new(format!("Failed to process {}", path.display()))
        .with_context(format!("{:#}", error));

    if let Some(geofix_error) = error.chain().find_map(|e| e.downcast_ref::<GeofixError>()) {
        return with_domain_suggestions(base, geofix_error.root_cause());
    }

    if error.chain().any(|e| e.downcast_ref::<serde_json::Error>().is_some()) {
        return base
            .with_suggestion("Check that the file contains valid JSON")
            .with_help("Run: geofix --help");
    }

    if error.chain().any(|e| e.downcast_ref::<std::io::Error>().is_some()) {
        return base
            .with_suggestion("Check the file path and try again")
            .with_suggestion("Make sure the file and its directory are readable and writable");
    }

    base
}

fn with_domain_suggestions(base: CliError, cause: &GeofixError) -> CliError {
    match cause {
        GeofixError::MalformedGeometry { .. } => base
            .with_suggestion("Check the coordinate nesting of the reported geometry")
            .with_suggestion("Every position needs at least two numbers"),
        GeofixError::UnrepairableGeometry { .. } => base
            .with_suggestion("Inspect the geometry: geofix --validate <FILE>")
            .with_suggestion("Try a different axis mode with --flip never or --flip always"),
        GeofixError::InvalidDocument { .. } => base
            .with_suggestion("The file must hold a FeatureCollection, a Feature or a Geometry")
            .with_help("Run: geofix --help"),
        GeofixError::ConfigInvalid { .. } => base
            .with_suggestion("Check geofix.toml and the GEOFIX_* environment variables")
            .with_help("Run: geofix --show-config"),
        _ => base,
    }
}
