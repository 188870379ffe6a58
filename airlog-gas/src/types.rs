//! Tipos de dados do pipeline de gás

use serde::{Deserialize, Serialize};

use crate::curve::{percentage, GasSpecies};
use crate::error::{GasError, GasResult};

/// Amostra bruta do ADC, sempre em 16 bits
pub type RawSample = u16;

/// Resistência do sensor (kΩ)
pub type Resistance = f64;

/// Resistência de referência do sensor em ar limpo (Ro, kΩ).
///
/// Só existe com valor positivo e finito; produzida uma vez pela calibração
/// e imutável depois disso.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct CalibrationConstant(f64);

impl CalibrationConstant {
    pub fn new(ro: f64) -> GasResult<Self> {
        if ro.is_finite() && ro > 0.0 {
            Ok(Self(ro))
        } else {
            Err(GasError::CalibrationFailed(format!(
                "Ro must be positive and finite, got {ro}"
            )))
        }
    }

    /// Ro em kΩ
    pub fn ro(&self) -> f64 {
        self.0
    }

    /// Razão `Rs/Ro`
    #[inline]
    pub fn ratio(&self, resistance: Resistance) -> f64 {
        resistance / self.0
    }
}

/// Concentrações estimadas (ppm) dos sete gases, em ordem fixa
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GasReading {
    pub lpg: f64,
    pub co: f64,
    pub smoke: f64,
    pub propane: f64,
    pub hydrogen: f64,
    pub alcohol: f64,
    pub methane: f64,
}

impl GasReading {
    /// Avalia as sete curvas para a razão `Rs/Ro`
    pub fn from_ratio(ratio: f64) -> Self {
        Self::from_array(GasSpecies::ALL.map(|species| percentage(ratio, species)))
    }

    pub fn from_array(values: [f64; GasSpecies::COUNT]) -> Self {
        let [lpg, co, smoke, propane, hydrogen, alcohol, methane] = values;
        Self {
            lpg,
            co,
            smoke,
            propane,
            hydrogen,
            alcohol,
            methane,
        }
    }

    /// Valores na ordem LPG, CO, Smoke, Propane, Hydrogen, Alcohol, Methane
    pub fn as_array(&self) -> [f64; GasSpecies::COUNT] {
        [
            self.lpg,
            self.co,
            self.smoke,
            self.propane,
            self.hydrogen,
            self.alcohol,
            self.methane,
        ]
    }

    pub fn get(&self, species: GasSpecies) -> f64 {
        match species {
            GasSpecies::Lpg => self.lpg,
            GasSpecies::Co => self.co,
            GasSpecies::Smoke => self.smoke,
            GasSpecies::Propane => self.propane,
            GasSpecies::Hydrogen => self.hydrogen,
            GasSpecies::Alcohol => self.alcohol,
            GasSpecies::Methane => self.methane,
        }
    }

    /// Pares `(gás, ppm)` na ordem fixa
    pub fn iter(&self) -> impl Iterator<Item = (GasSpecies, f64)> {
        GasSpecies::ALL.into_iter().zip(self.as_array())
    }
}

/// Leitura com os valores intermediários do pipeline (diagnóstico)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasMeasurement {
    /// Concentrações estimadas
    pub reading: GasReading,
    /// Resistência média Rs (kΩ)
    pub resistance: Resistance,
    /// Razão Rs/Ro
    pub ratio: f64,
    /// Média das amostras brutas
    pub mean_raw: f64,
}
