use std::env;
use std::str::FromStr;

use log::Level;

use crate::utils::trace::{LogObserver, Traced};

/// Environment variable read by [`TraceConfig::from_env`].
pub const TRACE_ENV_VAR: &str = "BITWIDTH_TRACE";

/// Controls call tracing of the bit helpers.
///
/// Tracing is off unless enabled explicitly or through `BITWIDTH_TRACE`.
/// Nothing here is global: build a config and hand it to whatever needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConfig {
    /// Whether helper calls are reported at all.
    pub enabled: bool,
    /// Level used for reported calls.
    pub level: Level,
}

impl Default for TraceConfig {
    fn default() -> Self {
        TraceConfig {
            enabled: false,
            level: Level::Debug,
        }
    }
}

impl TraceConfig {
    /// Tracing enabled at `level`.
    pub fn enabled(level: Level) -> Self {
        TraceConfig {
            enabled: true,
            level,
        }
    }

    /// Reads `BITWIDTH_TRACE`, falling back to the default when it is unset.
    pub fn from_env() -> Self {
        match env::var(TRACE_ENV_VAR) {
            Ok(setting) => Self::parse(&setting),
            Err(_) => Self::default(),
        }
    }

    /// Interprets a `BITWIDTH_TRACE` setting.
    ///
    /// `off`, `0` and `false` disable tracing; a level name enables it at
    /// that level; `on`, `1` and `true` enable it at debug level. Anything
    /// else leaves the default in place.
    pub fn parse(setting: &str) -> Self {
        let setting = setting.trim().to_ascii_lowercase();
        match setting.as_str() {
            "off" | "0" | "false" | "" => Self::default(),
            "on" | "1" | "true" => Self::enabled(Level::Debug),
            other => match Level::from_str(other) {
                Ok(level) => Self::enabled(level),
                Err(_) => {
                    log::warn!("Ignoring unrecognised {} value {:?}", TRACE_ENV_VAR, other);
                    Self::default()
                }
            },
        }
    }

    /// The observer to use, or `None` when tracing is disabled.
    pub fn observer(&self) -> Option<LogObserver> {
        self.enabled.then(|| LogObserver::new(self.level))
    }

    /// Bit helpers traced according to this config.
    pub fn traced(&self) -> Traced<Option<LogObserver>> {
        Traced::new(self.observer())
    }
}
