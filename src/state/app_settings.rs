use log::{LevelFilter, warn};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MINUTE_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    /// `MATCHDAY_SETUP_JSON`; the bundled setup is used when unset.
    pub setup_path: Option<PathBuf>,
    /// Wall-clock length of one match minute.
    pub minute_duration: Duration,
    pub commentary_url: Option<String>,
    pub commentary_model: Option<String>,
    pub api_key: Option<String>,
    /// Values that were rejected while loading. Settings are read before the
    /// logger exists, so these are logged later by `log_problems`.
    pub problems: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Warn,
            setup_path: None,
            minute_duration: Duration::from_secs(DEFAULT_MINUTE_SECS),
            commentary_url: None,
            commentary_model: None,
            api_key: None,
            problems: Vec::new(),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut problems = Vec::new();

        let log_level = match var("MATCHDAY_LOG") {
            Some(level) => level.trim().parse().unwrap_or_else(|_| {
                problems.push(format!("MATCHDAY_LOG={level} is not a log level, using warn"));
                LevelFilter::Warn
            }),
            None => LevelFilter::Warn,
        };

        let minute_secs = match var("MATCHDAY_MINUTE_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    problems.push(format!(
                        "MATCHDAY_MINUTE_SECS={secs} is not a positive number, using {DEFAULT_MINUTE_SECS}"
                    ));
                    DEFAULT_MINUTE_SECS
                }
            },
            None => DEFAULT_MINUTE_SECS,
        };

        Self {
            full_screen: false,
            log_level,
            setup_path: var("MATCHDAY_SETUP_JSON").map(PathBuf::from),
            minute_duration: Duration::from_secs(minute_secs),
            commentary_url: var("MATCHDAY_COMMENTARY_URL"),
            commentary_model: var("MATCHDAY_COMMENTARY_MODEL"),
            api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            problems,
        }
    }

    /// Call once the logger is up.
    pub fn log_problems(&self) {
        for problem in &self.problems {
            warn!("{problem}");
        }
    }
}
