//! Erros específicos do pipeline de gás

use airlog_core::traits::SensorError;
use thiserror::Error;

pub type GasResult<T> = Result<T, GasError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GasError {
    #[error("Analog source failed: {0}")]
    Source(#[from] SensorError),

    #[error("Calibration failed: {0}")]
    CalibrationFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// ADC no fundo de escala: Rs/Ro fora do domínio das curvas
    #[error("Sensor saturated: Rs/Ro = {0}")]
    Saturated(f64),
}

// Conversão para SensorError do core
impl From<GasError> for SensorError {
    fn from(err: GasError) -> Self {
        match err {
            GasError::Source(inner) => inner,
            GasError::CalibrationFailed(msg) => SensorError::CalibrationFailed(msg),
            GasError::InvalidConfig(msg) => SensorError::InvalidConfig(msg),
            err @ GasError::Saturated(_) => SensorError::ReadFailed(err.to_string()),
        }
    }
}
