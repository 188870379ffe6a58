//! # airlog-station — Estação de Qualidade do Ar
//!
//! Configuração (`airlog.toml`) e o ciclo de medição usados pelo binário
//! `airlog`.

pub mod config;
pub mod station;

pub use config::{ConfigError, ConfigResult, StationConfig};
pub use station::{Station, TickReport};
