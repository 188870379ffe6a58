//! Sensor climático DHT22
//!
//! O DHT22 falha com frequência (checksum, temporização). Falhas transitórias
//! viram `None` e a estação segue; qualquer outra falha reinicializa a fonte
//! antes de devolver `None`.

use std::time::Duration;

use airlog_core::traits::{Component, Delay, Sensor, SensorError};
use serde::{Deserialize, Serialize};

use crate::error::ClimateResult;
use crate::types::{ClimateReading, Quantity};

/// Porta de hardware do sensor de temperatura e umidade
pub trait ClimateSource {
    /// Temperatura em °C
    fn read_temperature(&mut self) -> Result<f64, SensorError>;

    /// Umidade relativa em %
    fn read_humidity(&mut self) -> Result<f64, SensorError>;

    /// Libera e reabre o dispositivo
    fn reinit(&mut self) -> Result<(), SensorError>;
}

impl<T: ClimateSource + ?Sized> ClimateSource for &mut T {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        (**self).read_humidity()
    }

    fn reinit(&mut self) -> Result<(), SensorError> {
        (**self).reinit()
    }
}

impl<T: ClimateSource + ?Sized> ClimateSource for Box<T> {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        (**self).read_humidity()
    }

    fn reinit(&mut self) -> Result<(), SensorError> {
        (**self).reinit()
    }
}

/// Configuração do sensor climático
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Pausa após reinicializar o dispositivo (ms)
    pub reinit_delay_ms: u64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            reinit_delay_ms: 1000,
        }
    }
}

impl ClimateConfig {
    pub fn reinit_delay(&self) -> Duration {
        Duration::from_millis(self.reinit_delay_ms)
    }
}

/// DHT22 com recuperação de falhas
#[derive(Debug)]
pub struct ClimateSensor<S, D> {
    config: ClimateConfig,
    source: S,
    delay: D,
    sample_count: u64,
    failure_count: u64,
    reinit_count: u64,
}

impl<S: ClimateSource, D: Delay> ClimateSensor<S, D> {
    /// Cria sensor com configuração padrão
    pub fn new(source: S, delay: D) -> Self {
        Self::with_config(source, delay, ClimateConfig::default())
    }

    /// Cria sensor com configuração específica
    pub fn with_config(source: S, delay: D, config: ClimateConfig) -> Self {
        Self {
            config,
            source,
            delay,
            sample_count: 0,
            failure_count: 0,
            reinit_count: 0,
        }
    }

    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Grandezas lidas com sucesso
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Grandezas que falharam (transitórias ou não)
    pub fn failure_count(&self) -> u64 {
        self.failure_count
    }

    /// Reinicializações feitas
    pub fn reinit_count(&self) -> u64 {
        self.reinit_count
    }

    /// Temperatura em °C, ou `None` se a leitura falhou
    pub fn temperature(&mut self) -> Option<f64> {
        self.sample(Quantity::Temperature)
    }

    /// Umidade relativa em %, ou `None` se a leitura falhou
    pub fn humidity(&mut self) -> Option<f64> {
        self.sample(Quantity::Humidity)
    }

    /// Temperatura e umidade, nesta ordem. Nunca falha.
    pub fn read(&mut self) -> ClimateReading {
        let temperature = self.temperature();
        let humidity = self.humidity();
        ClimateReading::new(temperature, humidity)
    }

    /// Leitura direta, sem recuperação
    pub fn try_read(&mut self, quantity: Quantity) -> ClimateResult<f64> {
        let value = match quantity {
            Quantity::Temperature => self.source.read_temperature()?,
            Quantity::Humidity => self.source.read_humidity()?,
        };
        Ok(value)
    }

    fn sample(&mut self, quantity: Quantity) -> Option<f64> {
        match self.try_read(quantity) {
            Ok(value) => {
                self.sample_count += 1;
                Some(value)
            }
            Err(err) => {
                self.failure_count += 1;
                let err = SensorError::from(err);
                if err.is_transient() {
                    tracing::warn!(quantity = quantity.name(), error = %err, "DHT22 read failed");
                } else {
                    tracing::error!(
                        quantity = quantity.name(),
                        error = %err,
                        "unexpected DHT22 error, re-initialising sensor"
                    );
                    self.reinitialize();
                }
                None
            }
        }
    }

    fn reinitialize(&mut self) {
        if let Err(err) = self.source.reinit() {
            tracing::error!(error = %err, "DHT22 re-initialisation failed");
        }
        self.reinit_count += 1;
        self.delay.delay(self.config.reinit_delay());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl<S, D> Component for ClimateSensor<S, D> {
    fn name(&self) -> &str {
        "DHT22"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }
}

impl<S: ClimateSource, D: Delay> Sensor for ClimateSensor<S, D> {
    type Reading = ClimateReading;

    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        Ok(ClimateSensor::read(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airlog_core::traits::NoDelay;

    struct Steady;

    impl ClimateSource for Steady {
        fn read_temperature(&mut self) -> Result<f64, SensorError> {
            Ok(23.4)
        }

        fn read_humidity(&mut self) -> Result<f64, SensorError> {
            Ok(51.0)
        }

        fn reinit(&mut self) -> Result<(), SensorError> {
            Ok(())
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClimateConfig::default();
        assert_eq!(config.reinit_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_steady_source() {
        let mut sensor = ClimateSensor::new(Steady, NoDelay);
        assert_eq!(sensor.read(), ClimateReading::new(Some(23.4), Some(51.0)));
        assert_eq!(sensor.sample_count(), 2);
        assert_eq!(sensor.failure_count(), 0);
        assert_eq!(sensor.name(), "DHT22");
        assert!(sensor.is_ready());
    }
}
