use thiserror::Error;

pub type Result<T> = std::result::Result<T, ControlError>;

/// Configuration faults of the control surface.
///
/// Ordinary rejections (lock taken, drag in progress) are not errors; they
/// come back as `Ok(None)` / `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("sensor api unavailable: no control sensor was registered with the context")]
    SensorUnavailable,
}
