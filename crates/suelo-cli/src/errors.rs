use console::style;
use std::fmt;
use suelo_core::models::ReportId;
use suelo_core::SueloError;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
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

/// Create error for a report id that is not stored
pub fn report_not_found(id: ReportId) -> CliError {
    CliError::new("Report not found")
        .with_context(format!("No saved report has this id.\n\nID: {}", id))
        .with_suggestion("List saved reports: suelo reports list")
        .with_suggestion("Check --user: reports of other users are not visible")
        .with_help("Run: suelo reports --help")
}

/// Create error for a form submitted with unset scoring fields
pub fn incomplete_assessment(scheme: &str, fields: &[String]) -> CliError {
    let flags: Vec<String> = fields.iter().map(|f| format!("--{}", flag_name(f))).collect();

    CliError::new("Incomplete assessment")
        .with_context(format!(
            "All scoring observations are required.\n\nMissing: {}",
            fields.join(", ")
        ))
        .with_suggestion(format!("Provide {}", flags.join(" ")))
        .with_help(format!("Run: suelo assess {} --help", scheme))
}

/// Create error for clearing without confirmation
pub fn clear_not_confirmed() -> CliError {
    CliError::new("Refusing to delete all reports")
        .with_context("This removes every saved report of the current user.")
        .with_suggestion("Confirm with: suelo reports clear --yes")
}

/// Map a domain error to a CLI error with suggestions where we have them
pub fn from_suelo(scheme: &str, error: SueloError) -> CliError {
    match error {
        SueloError::IncompleteInput { fields } => incomplete_assessment(scheme, &fields),
        SueloError::InvalidCoordinates { lat, lon, reason } => {
            CliError::new("Invalid coordinates")
                .with_context(format!("({}, {}): {}", lat, lon, reason))
                .with_suggestion("Latitude must be within -90..90 and longitude within -180..180")
        }
        SueloError::Storage { key, reason } => CliError::new("Storage failure")
            .with_context(format!("Key: {}\n\nError: {}", key, reason))
            .with_suggestion("Check that --data-dir points to a writable directory")
            .with_help("Run: suelo config"),
        other => CliError::new(other.to_string()),
    }
}

/// CLI flag for an observation field name
fn flag_name(field: &str) -> &str {
    match field {
        "water_table_depth" => "water-table",
        "affected_area_m2" => "area",
        "free_phase" => "free-phase",
        "land_use" => "land-use",
        "water_body" => "water-body",
        other => other,
    }
}
