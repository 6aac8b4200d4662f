use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = "QuickLinks/0.1 (link metadata)";
pub const MAX_HTML_BYTES: u64 = 1024 * 512;
pub const MAX_ICON_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_html_bytes: u64,
    pub max_icon_bytes: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_html_bytes: MAX_HTML_BYTES,
            max_icon_bytes: MAX_ICON_BYTES,
        }
    }
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
