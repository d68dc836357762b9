use std::{path::PathBuf, time::Duration};

/// Settings shared by every subcommand.
#[derive(Clone, Debug)]
pub struct GlobalArgs {
    pub api_url: String,
    pub timeout: Duration,
    pub session_file: PathBuf,
    pub email_config: Vec<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: String, timeout: Duration) -> Self {
        Self {
            api_url,
            timeout,
            session_file: PathBuf::from("libris-session.json"),
            email_config: crate::notify::NotifierConfig::default_paths(),
        }
    }

    #[must_use]
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }

    #[must_use]
    pub fn with_email_config(mut self, paths: Vec<PathBuf>) -> Self {
        if !paths.is_empty() {
            self.email_config = paths;
        }
        self
    }
}
