//! Curvas de calibração por gás
//!
//! Cada gás tem uma reta aproximada no gráfico log-log do datasheet do MQ-2,
//! descrita por um ponto e uma inclinação `{ x0, y0, slope }`. Dado
//! `ratio = Rs/Ro`:
//!
//! ```text
//! log10(ppm) = (ln(ratio) − y0) / slope + x0
//! ppm        = 10 ^ log10(ppm)
//! ```
//!
//! O logaritmo natural sobre `ratio` e a potência de 10 no resultado são
//! propositais: as constantes foram ajustadas a esta fórmula exata.

use serde::{Deserialize, Serialize};

/// Gases estimados pelo MQ-2, na ordem fixa das colunas persistidas
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasSpecies {
    /// Gás liquefeito de petróleo
    Lpg = 0,
    /// Monóxido de carbono
    Co = 1,
    /// Fumaça
    Smoke = 2,
    /// Propano
    Propane = 3,
    /// Hidrogênio
    Hydrogen = 4,
    /// Álcool
    Alcohol = 5,
    /// Metano
    Methane = 6,
}

impl GasSpecies {
    /// Quantidade de gases
    pub const COUNT: usize = 7;

    /// Todos os gases, na ordem de persistência
    pub const ALL: [GasSpecies; Self::COUNT] = [
        GasSpecies::Lpg,
        GasSpecies::Co,
        GasSpecies::Smoke,
        GasSpecies::Propane,
        GasSpecies::Hydrogen,
        GasSpecies::Alcohol,
        GasSpecies::Methane,
    ];

    /// Identificador numérico (posição na ordem fixa)
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Gás pelo identificador numérico
    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Nome legível
    pub fn name(self) -> &'static str {
        match self {
            GasSpecies::Lpg => "LPG",
            GasSpecies::Co => "Carbon Monoxide",
            GasSpecies::Smoke => "Smoke",
            GasSpecies::Propane => "Propane",
            GasSpecies::Hydrogen => "Hydrogen",
            GasSpecies::Alcohol => "Alcohol",
            GasSpecies::Methane => "Methane",
        }
    }

    /// Nome da coluna na tabela `mq2_data`
    pub fn column(self) -> &'static str {
        match self {
            GasSpecies::Lpg => "lpg",
            GasSpecies::Co => "co",
            GasSpecies::Smoke => "smoke",
            GasSpecies::Propane => "propane",
            GasSpecies::Hydrogen => "hydrogen",
            GasSpecies::Alcohol => "alcohol",
            GasSpecies::Methane => "methane",
        }
    }

    /// Curva de calibração do gás
    pub fn curve(self) -> GasCurve {
        match self {
            GasSpecies::Lpg => GasCurve::LPG,
            GasSpecies::Co => GasCurve::CO,
            GasSpecies::Smoke => GasCurve::SMOKE,
            GasSpecies::Propane => GasCurve::PROPANE,
            GasSpecies::Hydrogen => GasCurve::HYDROGEN,
            GasSpecies::Alcohol => GasCurve::ALCOHOL,
            GasSpecies::Methane => GasCurve::METHANE,
        }
    }
}

/// Reta no espaço log-log: `{ x0, y0, slope }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasCurve {
    pub x0: f64,
    pub y0: f64,
    pub slope: f64,
}

impl GasCurve {
    // Pontos (lg200, y0) e (lg10000, y1) tirados das curvas do datasheet
    pub const LPG: Self = Self::new(2.3, 0.21, -0.47);
    pub const CO: Self = Self::new(2.3, 0.72, -0.34);
    pub const SMOKE: Self = Self::new(2.3, 0.53, -0.44);
    pub const PROPANE: Self = Self::new(2.3, 0.24, -0.47);
    pub const HYDROGEN: Self = Self::new(2.3, 0.33, -0.47);
    pub const ALCOHOL: Self = Self::new(2.3, 0.45, -0.37);
    pub const METHANE: Self = Self::new(2.3, 0.49, -0.38);

    pub const fn new(x0: f64, y0: f64, slope: f64) -> Self {
        Self { x0, y0, slope }
    }

    /// Concentração (ppm) para a razão `Rs/Ro`.
    ///
    /// Razões não positivas ou não finitas resultam em `0.0`.
    #[inline]
    pub fn ppm(&self, ratio: f64) -> f64 {
        if !(ratio.is_finite() && ratio > 0.0) {
            return 0.0;
        }

        let log10_ppm = (ratio.ln() - self.y0) / self.slope + self.x0;
        10f64.powf(log10_ppm)
    }
}

/// Concentração estimada (ppm) de um gás para a razão `Rs/Ro`
#[inline]
pub fn percentage(ratio: f64, species: GasSpecies) -> f64 {
    species.curve().ppm(ratio)
}

/// Como [`percentage`], mas pelo identificador numérico do gás.
///
/// Identificadores desconhecidos resultam em `0.0`.
pub fn percentage_by_id(ratio: f64, id: u8) -> f64 {
    GasSpecies::from_id(id).map_or(0.0, |species| percentage(ratio, species))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_fixed_order() {
        for (index, species) in GasSpecies::ALL.iter().enumerate() {
            assert_eq!(usize::from(species.id()), index);
            assert_eq!(GasSpecies::from_id(species.id()), Some(*species));
        }
        assert_eq!(GasSpecies::from_id(7), None);
    }

    #[test]
    fn test_lpg_at_unit_ratio() {
        let expected = 10f64.powf((0.0 - 0.21) / -0.47 + 2.3);
        let ppm = percentage(1.0, GasSpecies::Lpg);
        assert!((ppm - expected).abs() / expected < 1e-9);
        assert!((ppm - 558.3).abs() / 558.3 < 1e-3);
    }

    #[test]
    fn test_all_slopes_negative() {
        for species in GasSpecies::ALL {
            assert!(species.curve().slope < 0.0, "{}", species.name());
        }
    }

    #[test]
    fn test_invalid_ratio_is_zero() {
        assert_eq!(GasCurve::CO.ppm(0.0), 0.0);
        assert_eq!(GasCurve::CO.ppm(-1.0), 0.0);
        assert_eq!(GasCurve::CO.ppm(f64::NAN), 0.0);
        assert_eq!(GasCurve::CO.ppm(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_serde_names_match_columns() {
        for species in GasSpecies::ALL {
            let json = serde_json::to_string(&species).unwrap();
            assert_eq!(json, format!("\"{}\"", species.column()));
        }
    }
}
