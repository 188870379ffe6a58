//! Tipos de dados climáticos

use serde::{Deserialize, Serialize};

/// Grandeza medida pelo DHT22
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Temperature,
    Humidity,
}

impl Quantity {
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
        }
    }
}

/// Uma leitura do DHT22.
///
/// Cada campo é `None` quando aquela grandeza falhou neste ciclo; a linha
/// é gravada mesmo assim, com o campo vazio.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimateReading {
    /// Temperatura em °C
    pub temperature: Option<f64>,
    /// Umidade relativa em %
    pub humidity: Option<f64>,
}

impl ClimateReading {
    pub fn new(temperature: Option<f64>, humidity: Option<f64>) -> Self {
        Self {
            temperature,
            humidity,
        }
    }

    /// Ambas as grandezas presentes
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some()
    }

    pub fn get(&self, quantity: Quantity) -> Option<f64> {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
        }
    }
}
