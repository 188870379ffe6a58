//! # airlog-climate — Sensor DHT22
//!
//! Temperatura e umidade para a estação airlog. O DHT22 é difícil de ler:
//! uma fração das leituras falha por checksum ou temporização, e ocasionalmente
//! o dispositivo trava e precisa ser reaberto. [`ClimateSensor`] absorve as
//! duas situações e nunca devolve erro; uma grandeza que falhou vira `None`.
//!
//! ## Exemplo
//!
//! ```
//! use airlog_climate::{ClimateSensor, ScriptedClimateSource};
//! use airlog_core::traits::NoDelay;
//!
//! let source = ScriptedClimateSource::constant(21.0, 60.0);
//! let mut sensor = ClimateSensor::new(source, NoDelay);
//! let reading = sensor.read();
//! assert_eq!(reading.temperature, Some(21.0));
//! ```

pub mod climate;
pub mod error;
pub mod source;
pub mod types;

pub use climate::{ClimateConfig, ClimateSensor, ClimateSource};
pub use error::{ClimateError, ClimateResult};
pub use source::{IioClimateSource, ScriptedClimateSource, SimulatedClimateSource};
pub use types::{ClimateReading, Quantity};
