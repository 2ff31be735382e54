use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Login surface and date-paginated timeline.
pub const LOGIN_URL: &str = "https://www.wodup.com/login";
pub const TIMELINE_URL: &str = "https://www.wodup.com/timeline";

/// Login form fields; the form submits on Enter.
pub const USERNAME_INPUT: &str = r#"input[name="username"]"#;
pub const PASSWORD_INPUT: &str = r#"input[type="password"]"#;

/// Style-class marker carried by every rendered card on a day page.
pub const CARD_SELECTOR: &str = ".shadow-card";

/// Visible label of the per-card expansion trigger.
pub const EXPAND_LABEL: &str = "Show full workout";

/// Cards whose text contains this substring are social chatter, not
/// workouts. This is the only known non-workout marker; other card
/// types may exist and would slip through unfiltered.
pub const NON_WORKOUT_MARKER: &str = "Water Cooler";

/// Title sub-element holding the program name inside a card.
pub const PROGRAM_TITLE_SELECTOR: &str = "div.flex-auto.text-sm.font-medium";

/// Sentinel used when a card has no readable program title.
pub const UNKNOWN_PROGRAM: &str = "Unknown Program";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set to a non-empty value")]
    MissingCredential(&'static str),
    #[error("WODUP_START_DATE is not a valid YYYY-MM-DD date: {0}")]
    BadStartDate(String),
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Result<Self, ConfigError> {
        if username.trim().is_empty() {
            return Err(ConfigError::MissingCredential("WODUP_USERNAME"));
        }
        if password.trim().is_empty() {
            return Err(ConfigError::MissingCredential("WODUP_PASSWORD"));
        }
        Ok(Self { username, password })
    }
}

#[derive(Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub webdriver_url: String,
    pub output_path: PathBuf,
    pub screenshot_path: PathBuf,
    /// Anchor of the scraping window; the end is always "today".
    pub start_date: NaiveDate,
    pub login_field_wait: Duration,
    pub login_redirect_wait: Duration,
    pub card_wait: Duration,
    /// Delay granted to the page after a navigation or click so that
    /// asynchronously rendered content can materialize.
    pub settle_delay: Duration,
    /// Hard cap on expansion iterations per day page.
    pub max_expand_iterations: u32,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    /// Fails before any network interaction when credentials are missing.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let credentials = Credentials::new(
            env_or_empty("WODUP_USERNAME"),
            env_or_empty("WODUP_PASSWORD"),
        )?;

        let start_date = match env::var("WODUP_START_DATE").ok().filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::BadStartDate(raw))?,
            None => default_start_date(),
        };

        let output_path = env::var("WODUP_OUTPUT")
            .unwrap_or_else(|_| "workouts.json".to_string())
            .into();

        let webdriver_url = env::var("WEBDRIVER_URL")
            .unwrap_or_else(|_| "http://localhost:4444".to_string());

        Ok(Config {
            credentials,
            webdriver_url,
            output_path,
            screenshot_path: PathBuf::from("error_screenshot.png"),
            start_date,
            login_field_wait: Duration::from_secs(10),
            login_redirect_wait: Duration::from_secs(30),
            card_wait: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
            max_expand_iterations: 20,
        })
    }
}

fn env_or_empty(key: &str) -> String {
    env::var(key).unwrap_or_default()
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid anchor date")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_username() {
        let err = Credentials::new(String::new(), "secret".into()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("WODUP_USERNAME")));
    }

    #[test]
    fn credentials_require_password() {
        let err = Credentials::new("me@example.com".into(), "  ".into()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("WODUP_PASSWORD")));
    }

    #[test]
    fn credentials_accept_non_empty_pair() {
        let creds = Credentials::new("me@example.com".into(), "secret".into()).unwrap();
        assert_eq!(creds.username, "me@example.com");
    }
}
