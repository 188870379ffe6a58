//! # airlog-gas — Pipeline do Sensor MQ-2
//!
//! Converte a leitura ruidosa de um divisor de tensão em estimativas de ppm
//! para sete gases.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────┐   raw    ┌────────────┐   Rs    ┌──────────────┐
//! │ AnalogSource │ ───────▶ │  Sampler   │ ──────▶ │  Calibrator  │ ──▶ Ro
//! └──────────────┘ (n × Δt) │ (média Rs) │         └──────────────┘
//!                           └─────┬──────┘
//!                                 │ Rs / Ro
//!                                 ▼
//!                        ┌──────────────────┐
//!                        │ GasCurve × 7     │ ──▶ GasReading
//!                        │ (log-log → ppm)  │
//!                        └──────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use airlog_core::traits::NoDelay;
//! use airlog_gas::{Mq2Sensor, ScriptedAnalogSource};
//!
//! # fn main() -> Result<(), airlog_gas::GasError> {
//! let source = ScriptedAnalogSource::constant(32736);
//! let mut sensor = Mq2Sensor::new(source, NoDelay)?.calibrate()?;
//! let reading = sensor.read()?;
//! assert!(reading.lpg > 0.0);
//! # Ok(())
//! # }
//! ```

pub mod calibration;
pub mod curve;
pub mod error;
pub mod gas_sensor;
pub mod resistance;
pub mod sampler;
pub mod source;
pub mod types;

pub use calibration::Calibrator;
pub use curve::{percentage, percentage_by_id, GasCurve, GasSpecies};
pub use error::{GasError, GasResult};
pub use gas_sensor::{CalibratedMq2Sensor, GasSensorConfig, Mq2Sensor};
pub use resistance::{resistance, ResistanceModel};
pub use sampler::{SampleSummary, Sampler, SamplingPlan};
pub use source::{IioAnalogSource, ScriptedAnalogSource, SimulatedAnalogSource};
pub use types::{CalibrationConstant, GasMeasurement, GasReading, RawSample, Resistance};

/// Constantes de hardware e de amostragem do MQ-2
pub mod constants {
    /// Resistor de carga da placa (kΩ)
    pub const LOAD_RESISTANCE_KOHM: f64 = 10.0;

    /// Fundo de escala do ADC em 16 bits: 1023 << 6 (MCP3008 de 10 bits)
    pub const FULL_SCALE: f64 = 65472.0;

    /// Rs/Ro em ar limpo, do gráfico do datasheet
    pub const RO_CLEAN_AIR_FACTOR: f64 = 9.83;

    /// Amostras na calibração
    pub const CALIBRATION_SAMPLE_TIMES: u32 = 50;

    /// Intervalo entre amostras na calibração (ms)
    pub const CALIBRATION_SAMPLE_INTERVAL_MS: u64 = 50;

    /// Amostras por leitura normal
    pub const READ_SAMPLE_TIMES: u32 = 5;

    /// Intervalo entre amostras na leitura (ms)
    pub const READ_SAMPLE_INTERVAL_MS: u64 = 50;
}

#[cfg(test)]
mod tests;
