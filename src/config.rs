//! Configuration: server settings from the environment, scoring schedule from CSV or JSON.

use crate::models::{ScoringSchedule, Stage, StagePoints};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid schedule CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown stage '{0}' in schedule")]
    UnknownStage(String),
    #[error("stage {0} listed more than once in schedule")]
    DuplicateStage(Stage),
    #[error("schedule has no entries")]
    EmptySchedule,
    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// One CSV row: `stage,exact_score_both,exact_score_one,result,knockout_winner`.
#[derive(Debug, Deserialize)]
struct ScheduleRow {
    stage: String,
    exact_score_both: u32,
    exact_score_one: u32,
    result: u32,
    #[serde(default)]
    knockout_winner: Option<u32>,
}

/// Read a schedule from CSV with a header row.
/// `knockout_winner` may be left empty for the group stage.
pub fn load_schedule_csv<R: Read>(reader: R) -> Result<ScoringSchedule, ConfigError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut schedule = ScoringSchedule::new();
    let mut seen = BTreeSet::new();
    for row in rdr.deserialize() {
        let row: ScheduleRow = row?;
        let stage = Stage::parse(&row.stage)
            .ok_or_else(|| ConfigError::UnknownStage(row.stage.clone()))?;
        if !seen.insert(stage) {
            return Err(ConfigError::DuplicateStage(stage));
        }
        schedule.set(
            stage,
            StagePoints {
                exact_score_both: row.exact_score_both,
                exact_score_one: row.exact_score_one,
                result: row.result,
                knockout_winner: row.knockout_winner,
            },
        );
    }
    if schedule.is_empty() {
        return Err(ConfigError::EmptySchedule);
    }
    Ok(schedule)
}

/// Read a schedule from a JSON object keyed by stage name.
pub fn load_schedule_json<R: Read>(reader: R) -> Result<ScoringSchedule, ConfigError> {
    let schedule: ScoringSchedule = serde_json::from_reader(reader)?;
    if schedule.is_empty() {
        return Err(ConfigError::EmptySchedule);
    }
    Ok(schedule)
}

/// Load a schedule file; `.json` is parsed as JSON, anything else as CSV.
pub fn load_schedule(path: &Path) -> Result<ScoringSchedule, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let schedule = if is_json {
        load_schedule_json(file)?
    } else {
        load_schedule_csv(file)?
    };
    log::info!(
        "Loaded scoring schedule from {} ({} stages)",
        path.display(),
        schedule.stages().count()
    );
    Ok(schedule)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Web server settings. Env: HOST, PORT, SCORING_SCHEDULE, SESSION_KEY.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Schedule file; the built-in schedule is used when unset.
    pub schedule_path: Option<PathBuf>,
    /// Cookie signing secret (at least 64 bytes). A random key is used when unset.
    pub session_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            schedule_path: None,
            session_key: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let port = match non_empty("PORT") {
            Some(p) => p.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: p,
            })?,
            None => default_port(),
        };
        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(default_host),
            port,
            schedule_path: non_empty("SCORING_SCHEDULE").map(PathBuf::from),
            session_key: non_empty("SESSION_KEY"),
        })
    }

    /// The configured schedule, or the built-in one.
    pub fn schedule(&self) -> Result<ScoringSchedule, ConfigError> {
        match &self.schedule_path {
            Some(path) => load_schedule(path),
            None => {
                log::info!("SCORING_SCHEDULE not set; using the standard schedule");
                Ok(ScoringSchedule::standard())
            }
        }
    }
}
