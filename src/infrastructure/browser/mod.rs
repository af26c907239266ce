use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub(crate) mod http;
pub(crate) mod webdriver;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const NAVIGATION_TIMEOUT: Duration = Duration::from_millis(45_000);

const HARDENING_ARGS: [&str; 4] = [
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-blink-features=AutomationControlled",
];

/// How a browsing session presents itself to the stores.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserProfile {
    pub user_agent: String,
    pub viewport: (u32, u32),
    pub locale: String,
    pub timezone: String,
    /// Adds the sandbox-disabling launch flags needed inside containers.
    pub hardened: bool,
}

impl BrowserProfile {
    /// An ordinary 1080p US desktop Chrome.
    pub fn desktop(hardened: bool) -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            viewport: (1920, 1080),
            locale: "en-US".to_string(),
            timezone: "America/New_York".to_string(),
            hardened,
        }
    }

    pub fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            "--headless=new".to_string(),
            format!("--user-agent={}", self.user_agent),
            format!("--window-size={},{}", self.viewport.0, self.viewport.1),
            format!("--lang={}", self.locale),
        ];
        if self.hardened {
            args.extend(HARDENING_ARGS.iter().map(|arg| arg.to_string()));
        }
        args
    }
}

/// Something that can open isolated browsing sessions.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageSession>>;
}

/// A single browsing session. Callers must `close` it once done, whether or
/// not the work in between succeeded.
#[async_trait]
pub trait PageSession: Send {
    async fn goto(&mut self, url: &str, timeout: Duration) -> Result<()>;

    /// Waits until `selector` matches something on the page, or `timeout`
    /// elapses. Returns whether it matched.
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Current DOM serialized as HTML.
    async fn content(&mut self) -> Result<String>;

    async fn close(&mut self) -> Result<()>;
}
