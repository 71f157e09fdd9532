//! Configuration presets
//!
//! Each [`Profile`] maps to one level, format and display combination.
//! [`Config::from_env`] starts from the defaults and lets the process
//! environment override the level and the format.

use super::{Config, DisplayConfig, Format};

/// Level filter variables, most specific first.
const LEVEL_VARS: [&str; 2] = ["FORMGUARD_LOG", "RUST_LOG"];

/// Output format variable.
const FORMAT_VAR: &str = "FORMGUARD_LOG_FORMAT";

/// Deployment profile a preset is tuned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Colored multi-line output with source locations, `debug` and up
    Development,
    /// Flat JSON lines, `info` and up
    Production,
    /// Everything, compact, without timestamps so captured output is stable
    Test,
}

impl Profile {
    /// The profile matching the build: development for debug builds,
    /// production otherwise.
    #[must_use]
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl Config {
    /// Preset for `profile`.
    #[must_use]
    pub fn for_profile(profile: Profile) -> Self {
        let (level, format, display) = match profile {
            Profile::Development => (
                "debug",
                Format::Pretty,
                DisplayConfig {
                    colors: true,
                    source: true,
                    ..DisplayConfig::default()
                },
            ),
            Profile::Production => ("info", Format::Json, DisplayConfig::default()),
            Profile::Test => (
                "trace",
                Format::Compact,
                DisplayConfig {
                    time: false,
                    ..DisplayConfig::default()
                },
            ),
        };
        Self {
            level: level.to_owned(),
            format,
            display,
        }
    }

    #[must_use]
    pub fn development() -> Self {
        Self::for_profile(Profile::Development)
    }

    #[must_use]
    pub fn production() -> Self {
        Self::for_profile(Profile::Production)
    }

    #[must_use]
    pub fn test() -> Self {
        Self::for_profile(Profile::Test)
    }

    /// Defaults overridden by `FORMGUARD_LOG` (or `RUST_LOG`) and
    /// `FORMGUARD_LOG_FORMAT`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Whether a level filter is set in the environment.
    #[must_use]
    pub fn level_in_env() -> bool {
        LEVEL_VARS.iter().any(|name| std::env::var_os(*name).is_some())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = LEVEL_VARS.iter().find_map(|name| lookup(*name)) {
            self.level = level;
        }
        if let Some(format) = lookup(FORMAT_VAR) {
            self.format = Format::parse(&format);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        }
    }

    #[test]
    fn test_profiles_differ_in_format() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        assert_eq!(Config::test().format, Format::Compact);
        assert!(!Config::test().display.time);
        assert!(Config::development().display.source);
    }

    #[test]
    fn test_specific_level_var_wins() {
        let config = Config::default().with_overrides(lookup(&[
            ("RUST_LOG", "warn"),
            ("FORMGUARD_LOG", "formguard_validator=trace"),
        ]));
        assert_eq!(config.level, "formguard_validator=trace");

        let fallback = Config::default().with_overrides(lookup(&[("RUST_LOG", "warn")]));
        assert_eq!(fallback.level, "warn");
    }

    #[test]
    fn test_format_override() {
        let config = Config::default().with_overrides(lookup(&[("FORMGUARD_LOG_FORMAT", "JSON")]));
        assert_eq!(config.format, Format::Json);
        assert_eq!(config.level, Config::default().level);

        let unknown = Config::default().with_overrides(lookup(&[("FORMGUARD_LOG_FORMAT", "xml")]));
        assert_eq!(unknown.format, Format::Compact);
    }
}
