use std::fmt;

/// Rejected simulation configuration
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Config text was not valid JSON for [`crate::SimConfig`]
    Parse(String),
    /// World rectangle has a non-positive or non-finite side
    InvalidDimension { width: f32, height: f32 },
    /// A tuning value is outside its allowed range
    InvalidValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::InvalidDimension { width, height } => {
                write!(f, "invalid world dimensions: {width} x {height}")
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "invalid config value `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
