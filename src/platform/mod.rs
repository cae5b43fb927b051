//! Seams between the app and the browser
//!
//! The app only talks to storage and history through these traits, so the
//! whole shell runs natively against the in-memory backends in `memory`.

mod memory;

pub use memory::{MemoryHistory, MemoryStore};

use crate::error::Result;

/// String key-value storage (browser `localStorage`)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Session history (browser `history` + `location`)
pub trait HistoryBackend {
    /// Scheme, host and port of the page
    fn origin(&self) -> String;
    /// Path and query string of the current entry
    fn current_url(&self) -> String;
    fn push(&mut self, url: &str) -> Result<()>;
    fn replace(&mut self, url: &str) -> Result<()>;
}

/// Input device class, derived from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Device {
    #[default]
    Desktop,
    Touch,
}

const TOUCH_MARKERS: [&str; 7] = ["mobi", "android", "iphone", "ipad", "ipod", "tablet", "mobile"];

impl Device {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_ascii_lowercase();
        if TOUCH_MARKERS.iter().any(|marker| ua.contains(marker)) {
            Device::Touch
        } else {
            Device::Desktop
        }
    }

    pub fn is_desktop(self) -> bool {
        self == Device::Desktop
    }
}

/// Which flavor of the fullscreen API the browser exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Ms,
    Unsupported,
}

impl FullscreenApi {
    /// Probe order: unprefixed first, then Safari, then IE11
    const VARIANTS: [FullscreenApi; 3] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Ms,
    ];

    /// Pick the first variant whose request method `has_method` reports
    pub fn probe(has_method: impl Fn(&str) -> bool) -> Self {
        Self::VARIANTS
            .into_iter()
            .find(|api| api.request_method().is_some_and(&has_method))
            .unwrap_or(FullscreenApi::Unsupported)
    }

    /// Method on the element that enters fullscreen
    pub fn request_method(self) -> Option<&'static str> {
        match self {
            FullscreenApi::Standard => Some("requestFullscreen"),
            FullscreenApi::Webkit => Some("webkitRequestFullscreen"),
            FullscreenApi::Ms => Some("msRequestFullscreen"),
            FullscreenApi::Unsupported => None,
        }
    }

    /// Method on the document that leaves fullscreen
    pub fn exit_method(self) -> Option<&'static str> {
        match self {
            FullscreenApi::Standard => Some("exitFullscreen"),
            FullscreenApi::Webkit => Some("webkitExitFullscreen"),
            FullscreenApi::Ms => Some("msExitFullscreen"),
            FullscreenApi::Unsupported => None,
        }
    }

    /// Document property holding the current fullscreen element
    pub fn element_property(self) -> Option<&'static str> {
        match self {
            FullscreenApi::Standard => Some("fullscreenElement"),
            FullscreenApi::Webkit => Some("webkitFullscreenElement"),
            FullscreenApi::Ms => Some("msFullscreenElement"),
            FullscreenApi::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self != FullscreenApi::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_from_user_agent() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
        let android = "Mozilla/5.0 (Linux; ANDROID 14; Pixel 8)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

        assert_eq!(Device::from_user_agent(iphone), Device::Touch);
        assert_eq!(Device::from_user_agent(android), Device::Touch);
        assert_eq!(Device::from_user_agent(desktop), Device::Desktop);
        assert!(Device::from_user_agent("").is_desktop());
    }

    #[test]
    fn test_fullscreen_probe_prefers_standard() {
        let api = FullscreenApi::probe(|_| true);
        assert_eq!(api, FullscreenApi::Standard);
        assert_eq!(api.exit_method(), Some("exitFullscreen"));
    }

    #[test]
    fn test_fullscreen_probe_falls_back_to_prefixes() {
        let safari = FullscreenApi::probe(|name| name == "webkitRequestFullscreen");
        assert_eq!(safari, FullscreenApi::Webkit);
        assert_eq!(safari.element_property(), Some("webkitFullscreenElement"));

        let ie = FullscreenApi::probe(|name| name.starts_with("ms"));
        assert_eq!(ie, FullscreenApi::Ms);
    }

    #[test]
    fn test_fullscreen_probe_unsupported() {
        let api = FullscreenApi::probe(|_| false);
        assert!(!api.is_supported());
        assert_eq!(api.request_method(), None);
        assert_eq!(api.exit_method(), None);
    }
}
