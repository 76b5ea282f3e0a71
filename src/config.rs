//! Render loop configuration.
//!
//! Callers assemble a [`RenderConfig`] through the builder; validation runs
//! over the finished object as a unit so every violation is reported
//! together instead of failing on the first bad field. The resulting config
//! is immutable and the rest of the crate trusts it without re-checking.

use std::fmt;
use std::time::Duration;

/// Validated, immutable render loop settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    refresh_per_second: f64,
    width_override: Option<usize>,
    force_ascii: bool,
}

impl RenderConfig {
    /// Start building a config.
    #[must_use]
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Frames rendered per second.
    #[must_use]
    pub const fn refresh_per_second(&self) -> f64 {
        self.refresh_per_second
    }

    /// Time between frames.
    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.refresh_per_second)
    }

    /// Fixed width to render at instead of the detected terminal width.
    #[must_use]
    pub const fn width_override(&self) -> Option<usize> {
        self.width_override
    }

    /// Treat the terminal as ASCII-only regardless of detection.
    #[must_use]
    pub const fn force_ascii(&self) -> bool {
        self.force_ascii
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            refresh_per_second: 12.5,
            width_override: None,
            force_ascii: false,
        }
    }
}

/// A single configuration violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Refresh rate must be a positive, finite number.
    InvalidRefreshRate(String),
    /// A width override of zero cannot lay anything out.
    ZeroWidthOverride,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRefreshRate(value) => {
                write!(f, "refresh rate must be positive and finite, got {value}")
            }
            Self::ZeroWidthOverride => write!(f, "width override must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// All violations found while validating one config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigErrors {
    errors: Vec<ConfigError>,
}

impl ConfigErrors {
    /// The individual violations.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }
}

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid render config: ")?;
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

/// Builder for [`RenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct RenderConfigBuilder {
    refresh_per_second: Option<f64>,
    width_override: Option<usize>,
    force_ascii: bool,
}

impl RenderConfigBuilder {
    /// Set the refresh rate in frames per second.
    #[must_use]
    pub const fn refresh_per_second(mut self, value: f64) -> Self {
        self.refresh_per_second = Some(value);
        self
    }

    /// Render at a fixed width instead of the detected terminal width.
    #[must_use]
    pub const fn width_override(mut self, width: usize) -> Self {
        self.width_override = Some(width);
        self
    }

    /// Force ASCII-safe output.
    #[must_use]
    pub const fn force_ascii(mut self, force: bool) -> Self {
        self.force_ascii = force;
        self
    }

    /// Validate and build the config.
    ///
    /// # Errors
    ///
    /// Returns every violation found, not just the first.
    pub fn build(self) -> Result<RenderConfig, ConfigErrors> {
        let defaults = RenderConfig::default();
        let refresh = self.refresh_per_second.unwrap_or(defaults.refresh_per_second);

        let mut errors = Vec::new();
        if !refresh.is_finite() || refresh <= 0.0 {
            errors.push(ConfigError::InvalidRefreshRate(format!("{refresh}")));
        }
        if self.width_override == Some(0) {
            errors.push(ConfigError::ZeroWidthOverride);
        }

        if errors.is_empty() {
            Ok(RenderConfig {
                refresh_per_second: refresh,
                width_override: self.width_override,
                force_ascii: self.force_ascii,
            })
        } else {
            Err(ConfigErrors { errors })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_build() {
        let config = RenderConfig::builder().build().unwrap();
        assert!(config.refresh_per_second() > 0.0);
        assert_eq!(config.width_override(), None);
        assert!(!config.force_ascii());
    }

    #[test]
    fn test_frame_interval() {
        let config = RenderConfig::builder()
            .refresh_per_second(10.0)
            .build()
            .unwrap();
        assert_eq!(config.frame_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_refresh_rejected() {
        let err = RenderConfig::builder()
            .refresh_per_second(0.0)
            .build()
            .unwrap_err();
        assert_eq!(err.errors().len(), 1);
        assert!(matches!(err.errors()[0], ConfigError::InvalidRefreshRate(_)));
    }

    #[test]
    fn test_all_errors_reported_together() {
        let err = RenderConfig::builder()
            .refresh_per_second(f64::NAN)
            .width_override(0)
            .build()
            .unwrap_err();
        assert_eq!(err.errors().len(), 2);
        let message = err.to_string();
        assert!(message.contains("refresh rate"));
        assert!(message.contains("width override"));
    }

    #[test]
    fn test_valid_overrides() {
        let config = RenderConfig::builder()
            .width_override(120)
            .force_ascii(true)
            .build()
            .unwrap();
        assert_eq!(config.width_override(), Some(120));
        assert!(config.force_ascii());
    }
}
