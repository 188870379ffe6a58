//! Fontes analógicas
//!
//! - [`IioAnalogSource`]: ADC exposto pelo subsistema IIO do Linux
//!   (ex.: driver `mcp320x` para o MCP3008).
//! - [`SimulatedAnalogSource`]: valores sintéticos para execução sem hardware.
//! - [`ScriptedAnalogSource`]: repete uma sequência fixa de resultados.

use std::fs;
use std::path::{Path, PathBuf};

use airlog_core::traits::{AnalogSource, SensorError};

use crate::constants::FULL_SCALE;
use crate::error::{GasError, GasResult};

// ═══════════════════════════════════════════════════════════════════════════════
// IIO
// ═══════════════════════════════════════════════════════════════════════════════

/// Canal de ADC lido de `in_voltageN_raw`.
///
/// O valor nativo é alinhado à esquerda em 16 bits: um MCP3008 (10 bits)
/// em 1023 vira `1023 << 6 = 65472`.
#[derive(Debug, Clone)]
pub struct IioAnalogSource {
    path: PathBuf,
    resolution_bits: u8,
}

impl IioAnalogSource {
    pub fn new(path: impl Into<PathBuf>, resolution_bits: u8) -> GasResult<Self> {
        if !(1..=16).contains(&resolution_bits) {
            return Err(GasError::InvalidConfig(format!(
                "ADC resolution must be between 1 and 16 bits, got {resolution_bits}"
            )));
        }

        Ok(Self {
            path: path.into(),
            resolution_bits,
        })
    }

    /// Canal `channel` de um dispositivo IIO (`/sys/bus/iio/devices/iio:deviceN`)
    pub fn channel(device_dir: &Path, channel: u8, resolution_bits: u8) -> GasResult<Self> {
        Self::new(
            device_dir.join(format!("in_voltage{channel}_raw")),
            resolution_bits,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn align(&self, value: u32) -> Result<u16, SensorError> {
        let max = (1u32 << self.resolution_bits) - 1;
        if value > max {
            return Err(SensorError::ReadFailed(format!(
                "raw value {value} exceeds {}-bit range",
                self.resolution_bits
            )));
        }

        Ok((value << (16 - u32::from(self.resolution_bits))) as u16)
    }
}

impl AnalogSource for IioAnalogSource {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let text = fs::read_to_string(&self.path)?;
        let value: u32 = text.trim().parse().map_err(|e| {
            SensorError::ReadFailed(format!("{}: {e}", self.path.display()))
        })?;
        self.align(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIMULADA
// ═══════════════════════════════════════════════════════════════════════════════

/// Fonte sintética: oscila suavemente em torno de um valor base
#[derive(Debug, Clone)]
pub struct SimulatedAnalogSource {
    base: u16,
    amplitude: u16,
    step: u64,
}

impl SimulatedAnalogSource {
    /// Sempre `base`
    pub fn new(base: u16) -> Self {
        Self {
            base,
            amplitude: 0,
            step: 0,
        }
    }

    /// Variação senoidal de ±`amplitude` contagens
    pub fn with_variation(mut self, amplitude: u16) -> Self {
        self.amplitude = amplitude;
        self
    }
}

impl Default for SimulatedAnalogSource {
    fn default() -> Self {
        // Meia escala: Rs = RL
        Self::new(32736).with_variation(400)
    }
}

impl AnalogSource for SimulatedAnalogSource {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        let phase = self.step as f64 * 0.1;
        self.step += 1;

        let value = f64::from(self.base) + f64::from(self.amplitude) * phase.sin();
        Ok(value.round().clamp(1.0, FULL_SCALE) as u16)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ROTEIRIZADA
// ═══════════════════════════════════════════════════════════════════════════════

/// Repete ciclicamente uma sequência de resultados
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnalogSource {
    script: Vec<Result<u16, SensorError>>,
    reads: usize,
}

impl ScriptedAnalogSource {
    /// Sempre o mesmo valor
    pub fn constant(raw: u16) -> Self {
        Self::from_values([raw])
    }

    pub fn from_values(values: impl IntoIterator<Item = u16>) -> Self {
        Self {
            script: values.into_iter().map(Ok).collect(),
            reads: 0,
        }
    }

    /// Acrescenta um resultado ao roteiro
    pub fn then(mut self, result: Result<u16, SensorError>) -> Self {
        self.script.push(result);
        self
    }

    /// Leituras feitas até agora
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl AnalogSource for ScriptedAnalogSource {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        if self.script.is_empty() {
            return Err(SensorError::NotInitialized);
        }

        let result = self.script[self.reads % self.script.len()].clone();
        self.reads += 1;
        result
    }
}
