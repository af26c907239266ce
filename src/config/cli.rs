use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Port the HTTP API listens on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Runtime mode; production hardens the browser launch for containers
    #[arg(long, env = "APP_ENV", value_enum, default_value_t = Mode::Development)]
    pub mode: Mode,

    /// How store pages are loaded
    #[arg(long, env = "GAMEHUB_BACKEND", value_enum, default_value_t = Backend::Webdriver)]
    pub backend: Backend,

    /// WebDriver endpoint used by the webdriver backend
    #[arg(long, env = "WEBDRIVER_URL", default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Log level (error, warn, info, debug, trace), overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Search every store for one game and print the result as JSON
    Search { name: String },
    /// Search every store for several games, one after another
    Batch {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Development,
    Production,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Headless Chrome through chromedriver
    Webdriver,
    /// Plain HTTP requests, no script execution
    Http,
}
