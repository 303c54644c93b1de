use std::path::PathBuf;

/// Journal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalConfig {
    /// Append-only JSONL target. `None` disables the journal.
    pub log_path: Option<PathBuf>,
}

impl JournalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_path = lookup("MEMORY_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self { log_path }
    }

    pub fn with_log_path(path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: Some(path.into()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.log_path.is_some()
    }
}
