//! # 🎯 Traits — Portas de Hardware da Estação
//!
//! Abstrações que separam a lógica de sensoriamento do hardware concreto:
//!
//! | Porta | Papel | Implementações |
//! |:------|:------|:---------------|
//! | [`AnalogSource`] | Amostra bruta de um ADC | IIO, simulada, roteirizada |
//! | [`Delay`] | Pausa entre amostras | [`StdDelay`], [`NoDelay`] |
//! | [`Sensor`] | Leitura completa de um sensor | MQ-2 calibrado, DHT22 |
//!
//! > *"Trait no core, implementação no módulo."*

use std::io;
use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROS
// ═══════════════════════════════════════════════════════════════════════════════

/// Erro de sensor compartilhado por todas as portas
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("Sensor not initialized")]
    NotInitialized,
    #[error("Sensor read failed: {0}")]
    ReadFailed(String),
    #[error("Transient sensor error: {0}")]
    Transient(String),
    #[error("Calibration failed: {0}")]
    CalibrationFailed(String),
    #[error("Configuration invalid: {0}")]
    InvalidConfig(String),
    #[error("Hardware error: {0}")]
    Hardware(String),
    #[error("Timeout after {0}ms")]
    Timeout(u64),
}

impl SensorError {
    /// Erro passageiro: a próxima leitura provavelmente funciona
    pub fn is_transient(&self) -> bool {
        matches!(self, SensorError::Transient(_) | SensorError::Timeout(_))
    }
}

/// `EIO` no Linux (drivers IIO de DHT retornam isso quando o checksum falha)
const EIO: i32 = 5;

impl From<io::Error> for SensorError {
    fn from(err: io::Error) -> Self {
        if err.raw_os_error() == Some(EIO) {
            return SensorError::Transient(err.to_string());
        }

        match err.kind() {
            // TimedOut não informa a duração; vira Transient com a mensagem
            io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                SensorError::Transient(err.to_string())
            }
            io::ErrorKind::NotFound => SensorError::NotInitialized,
            io::ErrorKind::InvalidData => SensorError::ReadFailed(err.to_string()),
            _ => SensorError::Hardware(err.to_string()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAIT BASE
// ═══════════════════════════════════════════════════════════════════════════════

/// Trait base de todo componente da estação (sensores e adaptadores).
pub trait Component {
    /// Nome único do componente (para logs)
    fn name(&self) -> &str;

    /// Versão do componente
    fn version(&self) -> &str {
        "2026.1.16"
    }

    /// Componente está pronto para uso?
    fn is_ready(&self) -> bool {
        true
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PORTAS DE HARDWARE
// ═══════════════════════════════════════════════════════════════════════════════

/// Fonte analógica: expõe uma única operação, "ler amostra bruta".
///
/// O valor é sempre apresentado em 16 bits, independente da resolução nativa
/// do conversor (um ADC de 10 bits alinhado à esquerda vai até 65472).
///
/// # Exemplo
///
/// ```
/// use airlog_core::traits::{AnalogSource, SensorError};
///
/// struct MidScale;
///
/// impl AnalogSource for MidScale {
///     fn read_raw(&mut self) -> Result<u16, SensorError> {
///         Ok(32736)
///     }
/// }
///
/// assert_eq!(MidScale.read_raw(), Ok(32736));
/// ```
pub trait AnalogSource {
    /// Lê uma amostra bruta instantânea
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

impl<T: AnalogSource + ?Sized> AnalogSource for &mut T {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        (**self).read_raw()
    }
}

impl<T: AnalogSource + ?Sized> AnalogSource for Box<T> {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        (**self).read_raw()
    }
}

/// Capacidade de pausar a thread chamadora.
///
/// Injetável para que testes troquem o relógio real por um instantâneo.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

impl<T: Delay + ?Sized> Delay for Box<T> {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Pausa real de relógio de parede (`std::thread::sleep`)
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Não pausa; para testes e simulação
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn delay(&mut self, _duration: Duration) {}
}

// ═══════════════════════════════════════════════════════════════════════════════
// SENSORES
// ═══════════════════════════════════════════════════════════════════════════════

/// Sensor pronto para produzir leituras completas.
///
/// Implementado por sensores que já passaram por qualquer etapa de
/// preparação (o MQ-2 só implementa depois de calibrado).
pub trait Sensor: Component {
    /// Tipo da leitura produzida
    type Reading;

    /// Produz uma leitura
    fn read(&mut self) -> Result<Self::Reading, SensorError>;
}

impl<T: Component + ?Sized> Component for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn version(&self) -> &str {
        (**self).version()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

impl<T: Sensor + ?Sized> Sensor for Box<T> {
    type Reading = T::Reading;

    fn read(&mut self) -> Result<Self::Reading, SensorError> {
        (**self).read()
    }
}
