//! # airlog-core — Portas Compartilhadas da Estação
//!
//! Define as abstrações de hardware e os tipos comuns usados pelos crates de
//! sensores (`airlog-gas`, `airlog-climate`), de armazenamento
//! (`airlog-store`) e pelo binário `airlog-station`.
//!
//! ## Exemplo
//!
//! ```
//! use airlog_core::prelude::*;
//! use std::time::Duration;
//!
//! let mut delay = NoDelay;
//! delay.delay(Duration::from_millis(50));
//!
//! let ts = Timestamp::now();
//! assert_eq!(ts.to_string().len(), "2026-10-16 09:57:00".len());
//! ```

pub mod prelude;
pub mod time;
pub mod traits;

pub use time::{Timestamp, TIMESTAMP_FORMAT};
pub use traits::{AnalogSource, Component, Delay, NoDelay, Sensor, SensorError, StdDelay};
