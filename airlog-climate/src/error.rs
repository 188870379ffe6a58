//! Erros do sensor climático

use airlog_core::traits::SensorError;
use thiserror::Error;

pub type ClimateResult<T> = Result<T, ClimateError>;

/// Erros do módulo climático
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClimateError {
    #[error(transparent)]
    Source(#[from] SensorError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// Conversão para SensorError do core
impl From<ClimateError> for SensorError {
    fn from(err: ClimateError) -> Self {
        match err {
            ClimateError::Source(inner) => inner,
            ClimateError::InvalidConfig(msg) => SensorError::InvalidConfig(msg),
        }
    }
}
