//! Estimador de resistência (divisor de tensão)
//!
//! O sensor e o resistor de carga formam um divisor de tensão. Conhecendo a
//! tensão sobre a carga (a amostra bruta) e o valor da carga, obtém-se a
//! resistência do sensor:
//!
//! ```text
//! Rs = RL · (FullScale − raw) / raw
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{FULL_SCALE, LOAD_RESISTANCE_KOHM};
use crate::types::{RawSample, Resistance};

/// Parâmetros do divisor de tensão
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceModel {
    /// Resistor de carga (kΩ)
    pub load_resistance: f64,
    /// Valor bruto correspondente à tensão de referência
    pub full_scale: f64,
}

impl ResistanceModel {
    /// Placa MQ-2 com RL de 10 kΩ lida por um MCP3008 de 10 bits em 16 bits
    pub const MQ2_MCP3008: Self = Self {
        load_resistance: LOAD_RESISTANCE_KOHM,
        full_scale: FULL_SCALE,
    };

    pub const fn new(load_resistance: f64, full_scale: f64) -> Self {
        Self {
            load_resistance,
            full_scale,
        }
    }

    /// Converte uma amostra bruta em resistência do sensor (kΩ).
    ///
    /// `raw == 0` é tratado como `1`. Valores acima do fundo de escala
    /// resultam em `0.0`.
    #[inline]
    pub fn resistance(&self, raw: RawSample) -> Resistance {
        let raw = f64::from(raw.max(1));
        (self.load_resistance * (self.full_scale - raw) / raw).max(0.0)
    }
}

impl Default for ResistanceModel {
    fn default() -> Self {
        Self::MQ2_MCP3008
    }
}

/// Resistência do sensor com os parâmetros padrão da placa
#[inline]
pub fn resistance(raw: RawSample) -> Resistance {
    ResistanceModel::MQ2_MCP3008.resistance(raw)
}
