//! Error types for zen-particles.
//!
//! Nothing in the per-frame path is allowed to fail hard. Configuration
//! problems, unknown shape names and numeric blow-ups are recovered locally
//! and reported as [`Fault`]s. Only config file I/O returns a `Result`.

use std::fmt;

/// Problems found in a [`MorphConfig`](crate::MorphConfig) or while loading one.
#[derive(Debug)]
pub enum ConfigError {
    /// Particle count must be at least one.
    ZeroParticleCount,
    /// A numeric field was NaN or infinite.
    NonFinite {
        field: &'static str,
        value: f32,
    },
    /// A numeric field was below its allowed minimum.
    Negative {
        field: &'static str,
        value: f32,
    },
    /// Failed to read or write a config file.
    Io(std::io::Error),
    /// Config file was not valid JSON for this schema.
    Parse(serde_json::Error),
}

impl ConfigError {
    /// Name of the offending config field, or `"file"` for I/O and parse errors.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::ZeroParticleCount => "particle_count",
            ConfigError::NonFinite { field, .. } | ConfigError::Negative { field, .. } => *field,
            ConfigError::Io(_) | ConfigError::Parse(_) => "file",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroParticleCount => write!(f, "Particle count must be positive"),
            ConfigError::NonFinite { field, value } => {
                write!(f, "Config field `{}` is not finite ({})", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "Config field `{}` must not be negative ({})", field, value)
            }
            ConfigError::Io(e) => write!(f, "Failed to access config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Returned by `str::parse::<Silhouette>()` for names that match no shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSilhouette(pub String);

impl fmt::Display for UnknownSilhouette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown silhouette: {:?}", self.0)
    }
}

impl std::error::Error for UnknownSilhouette {}

/// A recovered anomaly observed during one [`MorphEngine::advance`](crate::MorphEngine::advance).
#[derive(Debug)]
pub enum Fault {
    /// A config field was rejected and replaced by its last good value.
    InvalidConfiguration(ConfigError),
    /// The selected silhouette is unknown; particles collapse to the origin.
    UnknownSilhouette,
    /// Particles whose position went non-finite and were snapped back to target.
    NumericInstability { particles: usize },
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::InvalidConfiguration(e) => write!(f, "Invalid configuration: {}", e),
            Fault::UnknownSilhouette => write!(f, "Unknown silhouette, using origin fallback"),
            Fault::NumericInstability { particles } => {
                write!(f, "Reset {} non-finite particle(s) to target", particles)
            }
        }
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Fault::InvalidConfiguration(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NonFinite {
            field: "morph_speed",
            value: f32::NAN,
        };
        assert!(err.to_string().contains("morph_speed"));
    }

    #[test]
    fn test_fault_source_chain() {
        let fault = Fault::InvalidConfiguration(ConfigError::ZeroParticleCount);
        assert!(fault.source().is_some());
        assert!(Fault::UnknownSilhouette.source().is_none());
    }
}
