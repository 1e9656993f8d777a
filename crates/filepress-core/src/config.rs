//! Configuration module
//!
//! Configuration is read once at startup, validated, and then handed to the
//! storage, pipeline and HTTP layers through their constructors.

use std::env;
use std::path::PathBuf;

const SERVER_PORT: u16 = 5000;
const MAX_UPLOAD_SIZE_MB: usize = 16;
const UPLOAD_FOLDER: &str = "uploads";

/// Extensions accepted when `ALLOWED_EXTENSIONS` is not set.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] =
    &["txt", "pdf", "png", "jpg", "jpeg", "gif", "docx", "csv"];

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    /// Flat directory holding raw and compressed artifacts
    pub upload_folder: PathBuf,
    pub max_upload_size_bytes: usize,
    /// Lowercased, without the leading dot
    pub allowed_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            log_format: LogFormat::Text,
            upload_folder: PathBuf::from(UPLOAD_FOLDER),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| SERVER_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(SERVER_PORT);

        let log_format = env::var("LOG_FORMAT")
            .map(|s| LogFormat::parse(&s))
            .unwrap_or_default();

        let upload_folder = env::var("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(UPLOAD_FOLDER));

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let allowed_extensions = match env::var("ALLOWED_EXTENSIONS") {
            Ok(list) => parse_extension_list(&list),
            Err(_) => DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let config = Config {
            server_port,
            environment,
            log_format,
            upload_folder,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            allowed_extensions,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.upload_folder.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOAD_FOLDER must not be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Split a comma separated extension list, dropping blanks and leading dots.
fn parse_extension_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_upload_size_bytes, 16 * 1024 * 1024);
        assert_eq!(config.allowed_extensions.len(), 8);
        assert!(!config.is_production());
    }

    #[test]
    fn test_parse_extension_list() {
        assert_eq!(
            parse_extension_list(" TXT, .pdf,,png "),
            vec!["txt".to_string(), "pdf".to_string(), "png".to_string()]
        );
        assert!(parse_extension_list(" , ").is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_allow_list() {
        let config = Config {
            allowed_extensions: Vec::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_size_cap() {
        let config = Config {
            max_upload_size_bytes: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let config = Config {
            environment: "Prod".to_string(),
            ..Config::default()
        };
        assert!(config.is_production());
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("text"), LogFormat::Text);
        assert_eq!(LogFormat::parse("anything"), LogFormat::Text);
    }
}
