// Match dataset loading and column normalization.
//
// Reads a CSV of match results in the Base dos Dados layout (ano_campeonato,
// time_mandante, time_visitante, gols_mandante, gols_visitante). Header names
// are normalized before lookup, so case and spacing variants are accepted.
// Goal cells that are not a finite non-negative number are coerced to zero.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

/// Season assigned to every record when the file has no season column.
pub const DEFAULT_SEASON: u16 = 2022;

const SEASON_ALIASES: &[&str] = &["ano_campeonato", "season", "ano", "year"];
const HOME_TEAM_ALIASES: &[&str] = &["time_mandante", "home_team", "mandante"];
const AWAY_TEAM_ALIASES: &[&str] = &["time_visitante", "away_team", "visitante"];
const HOME_GOALS_ALIASES: &[&str] = &["gols_mandante", "home_goals"];
const AWAY_GOALS_ALIASES: &[&str] = &["gols_visitante", "away_goals"];

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One played match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchRecord {
    pub season: u16,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl MatchRecord {
    pub fn new(
        season: u16,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        MatchRecord {
            season,
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
        }
    }

    /// True if `team` played this match on either side.
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }
}

/// Which goal column a coercion warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GoalColumn {
    Home,
    Away,
}

impl GoalColumn {
    pub fn label(&self) -> &'static str {
        match self {
            GoalColumn::Home => "home goals",
            GoalColumn::Away => "away goals",
        }
    }
}

/// Non-fatal problems found while loading. The dataset is still usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LoadWarning {
    /// The file had no season column; every record got `default_season`.
    MissingSeasonColumn { default_season: u16 },
    /// Season cells that were not a number and got `default_season`.
    InvalidSeason { count: usize, default_season: u16 },
    /// Goal cells that were not a finite non-negative number and became 0.
    CoercedGoals { column: GoalColumn, count: usize },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingSeasonColumn { default_season } => write!(
                f,
                "season column not found, using {default_season} for every match"
            ),
            LoadWarning::InvalidSeason {
                count,
                default_season,
            } => write!(
                f,
                "{count} season value(s) were not numbers, using {default_season}"
            ),
            LoadWarning::CoercedGoals { column, count } => write!(
                f,
                "{count} {} value(s) were not valid numbers and were set to 0",
                column.label()
            ),
        }
    }
}

/// Loader settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub default_season: u16,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            default_season: DEFAULT_SEASON,
        }
    }
}

/// The loaded match table. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<MatchRecord>,
    warnings: Vec<LoadWarning>,
}

impl Dataset {
    /// Wrap already-typed records (no load warnings).
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        Dataset {
            records,
            warnings: Vec::new(),
        }
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("missing required column `{column}` in {path}")]
    MissingColumn { path: String, column: &'static str },
}

// ---------------------------------------------------------------------------
// Header handling
// ---------------------------------------------------------------------------

/// Normalize a header cell: trim, lowercase, and join words with `_`.
///
/// `" Time Mandante "`, `"TIME-MANDANTE"` and `"time_mandante"` all map to
/// `"time_mandante"`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    season: Option<usize>,
    home_team: usize,
    away_team: usize,
    home_goals: usize,
    away_goals: usize,
}

fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|alias| h == alias))
}

fn resolve_columns(headers: &[String], source: &str) -> Result<ColumnMap, DatasetError> {
    let required = |aliases: &[&'static str]| {
        find_column(headers, aliases).ok_or_else(|| DatasetError::MissingColumn {
            path: source.to_string(),
            column: aliases[0],
        })
    };

    Ok(ColumnMap {
        season: find_column(headers, SEASON_ALIASES),
        home_team: required(HOME_TEAM_ALIASES)?,
        away_team: required(AWAY_TEAM_ALIASES)?,
        home_goals: required(HOME_GOALS_ALIASES)?,
        away_goals: required(AWAY_GOALS_ALIASES)?,
    })
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Parse a goal cell. `None` means the value must be coerced to 0.
fn parse_goals(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as u32)
}

fn parse_season(raw: &str) -> Option<u16> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u16::MAX) {
        return None;
    }
    Some(value.trunc() as u16)
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_labeled<R: Read>(
    rdr: R,
    source: &str,
    options: &LoadOptions,
) -> Result<Dataset, DatasetError> {
    let csv_err = |e: csv::Error| DatasetError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(rdr);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = resolve_columns(&headers, source)?;

    let mut warnings = Vec::new();
    if columns.season.is_none() {
        warn!(
            "{}: season column not found, defaulting every match to {}",
            source, options.default_season
        );
        warnings.push(LoadWarning::MissingSeasonColumn {
            default_season: options.default_season,
        });
    }

    let mut records = Vec::new();
    let mut bad_seasons = 0usize;
    let mut bad_home_goals = 0usize;
    let mut bad_away_goals = 0usize;

    for result in reader.records() {
        let row = result.map_err(csv_err)?;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let season = match columns.season {
            Some(idx) => parse_season(cell(idx)).unwrap_or_else(|| {
                bad_seasons += 1;
                options.default_season
            }),
            None => options.default_season,
        };
        let home_goals = parse_goals(cell(columns.home_goals)).unwrap_or_else(|| {
            bad_home_goals += 1;
            0
        });
        let away_goals = parse_goals(cell(columns.away_goals)).unwrap_or_else(|| {
            bad_away_goals += 1;
            0
        });

        records.push(MatchRecord {
            season,
            home_team: cell(columns.home_team).trim().to_string(),
            away_team: cell(columns.away_team).trim().to_string(),
            home_goals,
            away_goals,
        });
    }

    if bad_seasons > 0 {
        warn!("{}: {} non-numeric season value(s)", source, bad_seasons);
        warnings.push(LoadWarning::InvalidSeason {
            count: bad_seasons,
            default_season: options.default_season,
        });
    }
    for (column, count) in [
        (GoalColumn::Home, bad_home_goals),
        (GoalColumn::Away, bad_away_goals),
    ] {
        if count > 0 {
            warn!("{}: coerced {} {} value(s) to 0", source, count, column.label());
            warnings.push(LoadWarning::CoercedGoals { column, count });
        }
    }

    debug!("{}: parsed {} match rows", source, records.len());
    Ok(Dataset { records, warnings })
}

/// Load matches from any reader (in-memory CSV, stdin, ...).
pub fn load_from_reader<R: Read>(rdr: R, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    load_labeled(rdr, "<reader>", options)
}

/// Load matches from a CSV file.
pub fn load(path: &Path, options: &LoadOptions) -> Result<Dataset, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_labeled(file, &path.display().to_string(), options)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
