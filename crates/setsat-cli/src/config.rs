use serde::Deserialize;
use setsat_core::model::deck::DECK_SIZE;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_TEMPLATE: &str = "{run_id}";

/// Root batch configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BatchConfig {
    pub run_id: String,
    pub deals: DealConfig,
    #[serde(default)]
    pub solver: SolverConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BatchConfig {
    /// Load and validate a YAML batch file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let mut cfg: BatchConfig = match serde_yaml::from_reader(BufReader::new(file)) {
            Ok(cfg) => cfg,
            Err(source) => return Err(ConfigError::Parse { path, source }),
        };
        match cfg.validate() {
            Ok(()) => Ok(cfg),
            Err(source) => Err(ConfigError::Invalid { path, source }),
        }
    }

    /// Checks every field; call again after applying command-line overrides.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        check_run_id(&self.run_id)?;
        self.deals.validate()?;
        self.outputs.validate()?;
        if self.logging.tracing_level.trim().is_empty() {
            self.logging.tracing_level = LoggingConfig::default().tracing_level;
        }
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        self.outputs.resolve(&self.run_id)
    }
}

/// How many deals to draw and how large each one is.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealConfig {
    pub seed: Option<u64>,
    pub rounds: usize,
    #[serde(default = "DealConfig::default_cards_per_deal")]
    pub cards_per_deal: usize,
}

impl DealConfig {
    /// A standard Set layout.
    pub const DEFAULT_CARDS_PER_DEAL: usize = 12;

    fn default_cards_per_deal() -> usize {
        Self::DEFAULT_CARDS_PER_DEAL
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.rounds == 0 {
            return Err(ValidationError::field(
                "deals.rounds",
                "a batch needs at least one round",
            ));
        }
        if self.cards_per_deal > DECK_SIZE {
            return Err(ValidationError::field(
                "deals.cards_per_deal",
                format!("a deal holds at most {DECK_SIZE} cards"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SolverConfig {
    /// Cross-check every answer against brute-force enumeration.
    #[serde(default = "SolverConfig::verify_by_default")]
    pub verify: bool,
    /// Enumerate every Set per deal instead of stopping at the first.
    #[serde(default)]
    pub enumerate_all: bool,
}

impl SolverConfig {
    fn verify_by_default() -> bool {
        true
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            verify: Self::verify_by_default(),
            enumerate_all: false,
        }
    }
}

/// Where rows and the summary go; `{run_id}` is substituted.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let blank = [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ]
        .into_iter()
        .find(|(_, template)| template.trim().is_empty());
        match blank {
            Some((field, _)) => Err(ValidationError::field(field, "path must not be empty")),
            None => Ok(()),
        }
    }

    fn resolve(&self, run_id: &str) -> ResolvedOutputs {
        let fill = |template: &str| PathBuf::from(template.replace(RUN_ID_TEMPLATE, run_id));
        ResolvedOutputs {
            jsonl: fill(&self.jsonl),
            summary_md: fill(&self.summary_md),
        }
    }
}

/// Structured telemetry is off unless asked for.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_structured: bool,
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: Level::INFO.to_string(),
        }
    }
}

impl LoggingConfig {
    /// `None` when the configured name is not a tracing level.
    pub fn level(&self) -> Option<Level> {
        self.tracing_level.trim().parse().ok()
    }
}

fn check_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() {
        return Err(ValidationError::field("run_id", "run_id must not be empty"));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-');
    match run_id.chars().find(|&c| !allowed(c)) {
        Some(c) => Err(ValidationError::field(
            "run_id",
            format!("'{c}' is not allowed; use letters, digits, '.', '_' or '-'"),
        )),
        None => Ok(()),
    }
}

/// Output paths with the run id filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

impl ResolvedOutputs {
    /// Directory holding the summary; telemetry is written next to it.
    pub fn summary_dir(&self) -> PathBuf {
        match self.summary_md.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot open batch config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("batch config {} is not valid YAML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("batch config {} rejected: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        let (Self::Read { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. }) = self;
        path
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

impl ValidationError {
    fn field(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn field_name(&self) -> &str {
        let Self::InvalidField { field, .. } = self;
        field
    }
}
