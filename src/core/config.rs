use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub downloads: DownloadConfig,
}

/// Connection settings for the remote document service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the document service
    pub base_url: String,
    /// Anti-forgery token sent on state-mutating requests
    pub csrf_token: String,
}

/// Where downloaded documents are saved
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            // Only error if it's not "file not found" - that's acceptable
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            api: ApiConfig::from_env()?,
            downloads: DownloadConfig::from_env()?,
        })
    }
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let csrf_token = env::var("CSRF_TOKEN")
            .map_err(|_| "CSRF_TOKEN environment variable is required".to_string())?;

        Ok(Self {
            base_url,
            csrf_token,
        })
    }
}

impl DownloadConfig {
    const DEFAULT_DOWNLOAD_DIR: &'static str = "downloads";

    pub fn from_env() -> Result<Self, String> {
        let dir =
            env::var("DOWNLOAD_DIR").unwrap_or_else(|_| Self::DEFAULT_DOWNLOAD_DIR.to_string());

        Ok(Self {
            dir: PathBuf::from(dir),
        })
    }
}
