use fdnd_controls::ControlError;
use fdnd_core::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("control error: {0}")]
    Control(#[from] ControlError),

    #[error("invalid script step {index} ({token:?}): {message}")]
    Script {
        index: usize,
        token: String,
        message: String,
    },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Script { .. } | Self::InvalidArgument { .. } => 2,
            Self::Config(_) => 3,
            _ => 1,
        }
    }

    pub(crate) fn script(index: usize, token: &str, message: impl Into<String>) -> Self {
        Self::Script {
            index,
            token: token.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes() {
        assert_eq!(DemoError::script(0, "x", "bad").exit_code(), 2);
        assert_eq!(
            DemoError::Config(ConfigError::Validation(vec!["x".into()])).exit_code(),
            3
        );
        assert_eq!(DemoError::Control(ControlError::SensorUnavailable).exit_code(), 1);
    }

    #[test]
    fn script_error_names_the_step() {
        let message = DemoError::script(3, "jump", "unknown step").to_string();
        assert!(message.contains("step 3"));
        assert!(message.contains("\"jump\""));
    }
}
