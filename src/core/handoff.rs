//! # Navigation Handoff
//!
//! Holds the most recent Waze deep link from the backend and decides how to
//! open it. On a mobile platform the web-domain prefix is rewritten to the
//! `waze:` scheme so the native app opens directly; everywhere else the
//! unmodified web link is opened in the browser.
//!
//! The prefix pair below is a compatibility contract with the Waze deep-link
//! handler and must stay bit-exact.

/// Web-domain prefix of backend-supplied navigation links.
pub const WAZE_WEB_PREFIX: &str = "https://www.waze.com/";
/// Scheme prefix that launches the native Waze app.
pub const WAZE_SCHEME_PREFIX: &str = "waze://";

/// Platform markers matched case-insensitively against the agent string.
/// Any single match means "mobile".
const MOBILE_MARKERS: [&str; 7] = [
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// True if the agent string identifies a mobile platform.
pub fn is_mobile_platform(agent: &str) -> bool {
    let agent = agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|marker| agent.contains(marker))
}

/// How a navigation link should be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Rewritten `waze://` link, handed straight to the native app.
    DeepLink(String),
    /// Unmodified web link, opened in a new browsing context.
    Browser(String),
}

impl LaunchTarget {
    pub fn url(&self) -> &str {
        match self {
            LaunchTarget::DeepLink(url) | LaunchTarget::Browser(url) => url,
        }
    }
}

/// Resolve the launch target for a link given the platform agent string.
pub fn launch_target(link: &str, agent: &str) -> LaunchTarget {
    if is_mobile_platform(agent) {
        if let Some(rest) = link.strip_prefix(WAZE_WEB_PREFIX) {
            return LaunchTarget::DeepLink(format!("{WAZE_SCHEME_PREFIX}{rest}"));
        }
        // Bare domain without a path segment
        if link == "https://www.waze.com" {
            return LaunchTarget::DeepLink(WAZE_SCHEME_PREFIX.to_string());
        }
    }
    LaunchTarget::Browser(link.to_string())
}

/// Latest-link state for the handoff control. The link is overwritten by
/// each successful response that carries one; the control is only shown once
/// a link exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Handoff {
    link: Option<String>,
}

impl Handoff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the most recent deep link. Idempotent: setting the same link
    /// twice is the same as setting it once.
    pub fn set_link(&mut self, url: String) {
        self.link = Some(url);
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// Whether the "open in Waze" control should be visible.
    pub fn is_available(&self) -> bool {
        self.link.is_some()
    }
}
