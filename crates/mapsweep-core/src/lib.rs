//! Bulk removal of map layers by pattern.
//!
//! Resolves comma-separated wildcard patterns against the maps of the
//! current mapset and either lists the matches (dry run) or removes
//! them. Results carry captured stdout/stderr so the caller decides how
//! to surface them.

use mapsweep_gis::{GisError, MapType, Session};
use mapsweep_pattern::{MatchMode, PatternError, PatternList};
use std::fmt::Write as _;

/// Removal errors
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("-r and -e are mutually exclusive")]
    ConflictingModes,

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Gis(#[from] GisError),
}

/// One removal invocation.
#[derive(Debug, Clone)]
pub struct RemoveRequest {
    /// Map type to operate on.
    pub map_type: MapType,
    /// Comma-separated patterns selecting maps.
    pub pattern: String,
    /// Wildcard pattern of maps to keep.
    pub exclude: Option<String>,
    /// Actually remove the maps instead of listing them.
    pub force: bool,
    /// Interpret `pattern` as a basic regular expression.
    pub regex: bool,
    /// Interpret `pattern` as an extended regular expression.
    pub extended: bool,
    /// Ignore case when matching.
    pub ignore_case: bool,
}

impl RemoveRequest {
    #[must_use]
    pub fn new(map_type: MapType, pattern: impl Into<String>) -> Self {
        Self {
            map_type,
            pattern: pattern.into(),
            exclude: None,
            force: false,
            regex: false,
            extended: false,
            ignore_case: false,
        }
    }

    fn match_mode(&self) -> Result<MatchMode, CoreError> {
        match (self.regex, self.extended) {
            (true, true) => Err(CoreError::ConflictingModes),
            (true, false) => Ok(MatchMode::Regex),
            (false, true) => Ok(MatchMode::ExtendedRegex),
            (false, false) => Ok(MatchMode::Wildcard),
        }
    }
}

/// Captured result of one invocation.
///
/// `stdout` carries the dry-run listing, `stderr` the removal log; the
/// CLI prints both verbatim and exits with `code`.
#[derive(Debug)]
pub struct RunStatus {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run one removal request against a session.
///
/// Without `force`, prints one `type/name@mapset` line per matching map
/// to stdout, sorted by name. With `force`, removes each matching map
/// and prints one `Removing <noun> <name>` line per map to stderr.
/// Matching is anchored to the whole map name; the exclusion pattern is
/// always wildcard syntax. Zero matches is a quiet success either way.
///
/// # Errors
///
/// Returns `CoreError::ConflictingModes` when both regex modes are
/// requested, and propagates pattern and store errors.
pub fn run(session: &Session, request: &RemoveRequest) -> Result<RunStatus, CoreError> {
    let mode = request.match_mode()?;
    let include = PatternList::compile(&request.pattern, mode, request.ignore_case)?;
    let exclude = request
        .exclude
        .as_deref()
        .map(|pattern| PatternList::compile(pattern, MatchMode::Wildcard, request.ignore_case))
        .transpose()?;

    let mut names: Vec<String> = session
        .list_maps(request.map_type)?
        .into_iter()
        .filter(|name| include.matches(name))
        .collect();
    if let Some(exclude) = &exclude {
        names.retain(|name| !exclude.matches(name));
    }

    let mut stdout = String::new();
    let mut stderr = String::new();
    if request.force {
        for name in &names {
            session.remove_map(request.map_type, name)?;
            let _ = writeln!(stderr, "Removing {} <{}>", request.map_type.noun(), name);
        }
    } else {
        for name in &names {
            let _ = writeln!(
                stdout,
                "{}/{}@{}",
                request.map_type.alias(),
                name,
                session.mapset()
            );
        }
    }

    Ok(RunStatus {
        code: 0,
        stdout,
        stderr,
    })
}
