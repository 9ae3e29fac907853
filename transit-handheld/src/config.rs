//! Device configuration.
//!
//! Timing constants are the handheld's stock values. Every one of them can
//! be overridden through the config structs so tests can run with
//! compressed thresholds.

use std::path::PathBuf;

/// Default backend base URL.
pub const DEFAULT_BASE_URL: &str = "https://youshouldgo.onrender.com";

/// Default directory for the persisted collection store.
pub const DEFAULT_DATA_DIR: &str = "transit_cache";

/// Minimum gap between two accepted button actions (ms).
pub const DEBOUNCE_MS: u64 = 200;

/// SELECT hold that jumps back to the route list (ms).
pub const LONG_PRESS_MS: u64 = 800;

/// SELECT hold that wipes every cached collection (ms).
pub const CLEAR_PRESS_MS: u64 = 10_000;

/// SELECT hold after which the clear-cache countdown appears (ms).
pub const POPUP_DELAY_MS: u64 = 1_000;

/// Redraw cadence of the countdown popup (ms).
pub const POPUP_REFRESH_MS: u64 = 200;

/// Dead time after an accepted NEXT press (ms).
pub const NEXT_DEAD_TIME_MS: u64 = 200;

/// Control loop period (ms).
pub const TICK_MS: u64 = 50;

/// Status screen refresh interval (ms).
pub const STATUS_POLL_MS: u64 = 2_000;

/// How long transient notices stay up before the screen is restored (ms).
pub const MESSAGE_DWELL_MS: u64 = 2_000;

/// Pause after wiping the cache, before routes are reloaded (ms).
pub const CLEAR_DWELL_MS: u64 = 1_000;

/// Wait between link checks while the network is down (ms).
pub const OFFLINE_BACKOFF_MS: u64 = 5_000;

/// HTTP request timeout (seconds).
pub const HTTP_TIMEOUT_SECS: u64 = 15;

/// Errors produced while reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Thresholds used by the button interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureConfig {
    /// Minimum gap between two accepted actions.
    pub debounce_ms: u64,

    /// SELECT hold that returns to the route list.
    pub long_press_ms: u64,

    /// SELECT hold that clears every cache. Must exceed `long_press_ms`.
    pub clear_press_ms: u64,

    /// Hold time before the countdown popup is drawn.
    pub popup_delay_ms: u64,

    /// Minimum interval between two popup redraws.
    pub popup_refresh_ms: u64,

    /// Sampling pause after an accepted NEXT press.
    pub next_dead_time_ms: u64,
}

impl GestureConfig {
    /// Set the long-press threshold.
    pub fn with_long_press(mut self, ms: u64) -> Self {
        self.long_press_ms = ms;
        self
    }

    /// Set the clear-cache threshold.
    pub fn with_clear_press(mut self, ms: u64) -> Self {
        self.clear_press_ms = ms;
        self
    }

    /// Set the delay before the countdown popup appears.
    pub fn with_popup_delay(mut self, ms: u64) -> Self {
        self.popup_delay_ms = ms;
        self
    }

    /// Set the debounce window.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
            clear_press_ms: CLEAR_PRESS_MS,
            popup_delay_ms: POPUP_DELAY_MS,
            popup_refresh_ms: POPUP_REFRESH_MS,
            next_dead_time_ms: NEXT_DEAD_TIME_MS,
        }
    }
}

/// Timings the navigation controller applies between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTimings {
    /// Status screen refresh interval.
    pub status_poll_ms: u64,

    /// Dwell for error and confirmation notices.
    pub message_dwell_ms: u64,

    /// Dwell after the cache wipe notice.
    pub clear_dwell_ms: u64,
}

impl Default for NavTimings {
    fn default() -> Self {
        Self {
            status_poll_ms: STATUS_POLL_MS,
            message_dwell_ms: MESSAGE_DWELL_MS,
            clear_dwell_ms: CLEAR_DWELL_MS,
        }
    }
}

/// Complete device configuration.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Backend base URL, without a trailing path.
    pub base_url: String,

    /// Directory backing the persistent collection store.
    pub data_dir: PathBuf,

    /// Serve canned responses from this directory instead of the network.
    pub mock_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Skip TLS certificate validation (the handheld ships with an insecure client).
    pub accept_invalid_certs: bool,

    /// Control loop period.
    pub tick_ms: u64,

    /// Back-off while the link is down.
    pub offline_backoff_ms: u64,

    pub nav: NavTimings,

    pub gesture: GestureConfig,
}

impl DeviceConfig {
    /// Create a config pointing at the given backend with default timings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            mock_dir: None,
            timeout_secs: HTTP_TIMEOUT_SECS,
            accept_invalid_certs: false,
            tick_ms: TICK_MS,
            offline_backoff_ms: OFFLINE_BACKOFF_MS,
            nav: NavTimings::default(),
            gesture: GestureConfig::default(),
        }
    }

    /// Set the store directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Serve responses from a mock data directory.
    pub fn with_mock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mock_dir = Some(dir.into());
        self
    }

    /// Set the status poll interval.
    pub fn with_status_poll(mut self, ms: u64) -> Self {
        self.nav.status_poll_ms = ms;
        self
    }

    /// Replace the gesture thresholds.
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config =
            Self::new(lookup("TRANSIT_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));

        if let Some(dir) = lookup("TRANSIT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("TRANSIT_MOCK_DIR") {
            config.mock_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = lookup("TRANSIT_TIMEOUT_SECS") {
            config.timeout_secs = parse_number("TRANSIT_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("TRANSIT_POLL_MS") {
            config.nav.status_poll_ms = parse_number("TRANSIT_POLL_MS", &value)?;
        }
        if let Some(value) = lookup("TRANSIT_ACCEPT_INVALID_CERTS") {
            config.accept_invalid_certs = parse_flag("TRANSIT_ACCEPT_INVALID_CERTS", &value)?;
        }

        Ok(config)
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        }),
    }
}
