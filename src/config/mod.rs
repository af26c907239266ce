use crate::config::cli::{Args, Backend, Mode};
use crate::error::Result;
use crate::infrastructure::{
    BrowserProfile, HttpSource, PageSource, WebDriverSource, NAVIGATION_TIMEOUT, USER_AGENT,
};
use clap::Parser;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::sync::Arc;
use tracing::info;

pub(crate) mod cli;

pub struct Config {
    pub args: Args,
    pub profile: BrowserProfile,
    pub http_client: Client,
}

impl Config {
    pub fn new() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let profile = BrowserProfile::desktop(args.mode == Mode::Production);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let http_client = Client::builder()
            .timeout(NAVIGATION_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            args,
            profile,
            http_client,
        })
    }

    /// The page source every store adapter shares.
    pub fn page_source(&self) -> Arc<dyn PageSource> {
        match self.args.backend {
            Backend::Webdriver => {
                info!("Loading store pages through WebDriver at {}", self.args.webdriver_url);
                Arc::new(WebDriverSource::new(
                    self.args.webdriver_url.clone(),
                    self.profile.clone(),
                ))
            }
            Backend::Http => {
                info!("Loading store pages over plain HTTP");
                Arc::new(HttpSource::new(self.http_client.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::Command;

    #[test]
    fn defaults_match_development_server() {
        let args = Args::try_parse_from(["gamehub"]).unwrap();
        assert_eq!(args.command, None);
        assert_eq!(args.mode, Mode::Development);
        assert_eq!(args.backend, Backend::Webdriver);
        assert_eq!(args.webdriver_url, "http://localhost:9515");

        let config = Config::from_args(args).unwrap();
        assert!(!config.profile.hardened);
    }

    #[test]
    fn production_mode_hardens_browser() {
        let args = Args::try_parse_from(["gamehub", "--mode", "production", "--port", "8080"]).unwrap();
        assert_eq!(args.port, 8080);

        let config = Config::from_args(args).unwrap();
        assert!(config.profile.hardened);
    }

    #[test]
    fn batch_needs_at_least_one_name() {
        assert!(Args::try_parse_from(["gamehub", "batch"]).is_err());

        let args = Args::try_parse_from(["gamehub", "--backend", "http", "batch", "Hades", "Celeste"]).unwrap();
        assert_eq!(args.backend, Backend::Http);
        assert_eq!(
            args.command,
            Some(Command::Batch {
                names: vec!["Hades".to_string(), "Celeste".to_string()]
            })
        );
    }
}
