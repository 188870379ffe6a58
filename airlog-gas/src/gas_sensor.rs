//! Sensor de gás MQ-2
//!
//! O ciclo de vida é codificado nos tipos: [`Mq2Sensor`] ainda não tem Ro e
//! não sabe ler; [`Mq2Sensor::calibrate`] o consome e devolve um
//! [`CalibratedMq2Sensor`], o único que expõe `read()`.

use std::time::Duration;

use airlog_core::traits::{AnalogSource, Component, Delay, Sensor, SensorError};
use serde::{Deserialize, Serialize};

use crate::calibration::Calibrator;
use crate::constants::{
    CALIBRATION_SAMPLE_INTERVAL_MS, CALIBRATION_SAMPLE_TIMES, FULL_SCALE, LOAD_RESISTANCE_KOHM,
    READ_SAMPLE_INTERVAL_MS, READ_SAMPLE_TIMES, RO_CLEAN_AIR_FACTOR,
};
use crate::error::{GasError, GasResult};
use crate::resistance::ResistanceModel;
use crate::sampler::{Sampler, SamplingPlan};
use crate::types::{CalibrationConstant, GasMeasurement, GasReading};

/// Configuração do sensor MQ-2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSensorConfig {
    /// Resistor de carga da placa (kΩ)
    pub load_resistance: f64,
    /// Rs/Ro em ar limpo, do datasheet
    pub clean_air_factor: f64,
    /// Amostras na calibração
    pub calibration_samples: u32,
    /// Intervalo entre amostras na calibração (ms)
    pub calibration_interval_ms: u64,
    /// Amostras por leitura
    pub read_samples: u32,
    /// Intervalo entre amostras na leitura (ms)
    pub read_interval_ms: u64,
}

impl Default for GasSensorConfig {
    fn default() -> Self {
        Self {
            load_resistance: LOAD_RESISTANCE_KOHM,
            clean_air_factor: RO_CLEAN_AIR_FACTOR,
            calibration_samples: CALIBRATION_SAMPLE_TIMES,
            calibration_interval_ms: CALIBRATION_SAMPLE_INTERVAL_MS,
            read_samples: READ_SAMPLE_TIMES,
            read_interval_ms: READ_SAMPLE_INTERVAL_MS,
        }
    }
}

impl GasSensorConfig {
    pub fn validate(&self) -> GasResult<()> {
        if !(self.load_resistance.is_finite() && self.load_resistance > 0.0) {
            return Err(GasError::InvalidConfig(
                "Load resistance must be positive".into(),
            ));
        }

        if !(self.clean_air_factor.is_finite() && self.clean_air_factor > 0.0) {
            return Err(GasError::InvalidConfig(
                "Clean air factor must be positive".into(),
            ));
        }

        if self.calibration_samples == 0 || self.read_samples == 0 {
            return Err(GasError::InvalidConfig(
                "Sample counts must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    pub fn calibration_plan(&self) -> SamplingPlan {
        SamplingPlan::new(
            self.calibration_samples,
            Duration::from_millis(self.calibration_interval_ms),
        )
    }

    pub fn read_plan(&self) -> SamplingPlan {
        SamplingPlan::new(self.read_samples, Duration::from_millis(self.read_interval_ms))
    }

    pub fn resistance_model(&self) -> ResistanceModel {
        ResistanceModel::new(self.load_resistance, FULL_SCALE)
    }

    pub fn calibrator(&self) -> Calibrator {
        Calibrator::new(self.calibration_plan(), self.clean_air_factor)
    }
}

/// MQ-2 ainda sem calibração
#[derive(Debug)]
pub struct Mq2Sensor<A, D> {
    config: GasSensorConfig,
    sampler: Sampler<A, D>,
}

impl<A: AnalogSource, D: Delay> Mq2Sensor<A, D> {
    /// Cria sensor com configuração padrão
    pub fn new(source: A, delay: D) -> GasResult<Self> {
        Self::with_config(source, delay, GasSensorConfig::default())
    }

    /// Cria sensor com configuração específica
    pub fn with_config(source: A, delay: D, config: GasSensorConfig) -> GasResult<Self> {
        config.validate()?;
        let sampler = Sampler::with_model(source, delay, config.resistance_model());
        Ok(Self { config, sampler })
    }

    pub fn config(&self) -> &GasSensorConfig {
        &self.config
    }

    /// Calibra em ar limpo e habilita leituras.
    ///
    /// Deve ser chamado uma única vez, com o sensor em ar limpo.
    pub fn calibrate(mut self) -> GasResult<CalibratedMq2Sensor<A, D>> {
        let ro = self.config.calibrator().calibrate(&mut self.sampler)?;
        Ok(self.with_calibration(ro))
    }

    /// Usa um Ro já conhecido, sem rajada de calibração
    pub fn with_calibration(self, ro: CalibrationConstant) -> CalibratedMq2Sensor<A, D> {
        CalibratedMq2Sensor {
            config: self.config,
            sampler: self.sampler,
            ro,
            read_count: 0,
        }
    }
}

/// MQ-2 calibrado, pronto para estimar concentrações
#[derive(Debug)]
pub struct CalibratedMq2Sensor<A, D> {
    config: GasSensorConfig,
    sampler: Sampler<A, D>,
    ro: CalibrationConstant,
    read_count: u64,
}

impl<A: AnalogSource, D: Delay> CalibratedMq2Sensor<A, D> {
    /// Monta um sensor calibrado a partir de um Ro explícito
    pub fn with_constant(
        source: A,
        delay: D,
        config: GasSensorConfig,
        ro: CalibrationConstant,
    ) -> GasResult<Self> {
        Ok(Mq2Sensor::with_config(source, delay, config)?.with_calibration(ro))
    }

    pub fn config(&self) -> &GasSensorConfig {
        &self.config
    }

    /// Ro em uso
    pub fn calibration(&self) -> CalibrationConstant {
        self.ro
    }

    /// Leituras concluídas desde a calibração
    pub fn read_count(&self) -> u64 {
        self.read_count
    }

    /// Lê e devolve também Rs, Rs/Ro e a média bruta.
    ///
    /// Um ADC saturado (Rs = 0) resulta em [`GasError::Saturated`].
    pub fn read_detailed(&mut self) -> GasResult<GasMeasurement> {
        let summary = self.sampler.sample(self.config.read_plan())?;
        let ratio = self.ro.ratio(summary.mean_resistance);
        if !(ratio.is_finite() && ratio > 0.0) {
            tracing::warn!(mean_raw = summary.mean_raw, ratio, "MQ-2 saturated");
            return Err(GasError::Saturated(ratio));
        }
        let reading = GasReading::from_ratio(ratio);
        self.read_count += 1;

        tracing::debug!(
            resistance_kohm = summary.mean_resistance,
            ratio,
            "MQ-2 reading"
        );

        Ok(GasMeasurement {
            reading,
            resistance: summary.mean_resistance,
            ratio,
            mean_raw: summary.mean_raw,
        })
    }

    /// Estima as concentrações dos sete gases
    pub fn read(&mut self) -> GasResult<GasReading> {
        self.read_detailed().map(|measurement| measurement.reading)
    }

    /// Devolve a fonte e o relógio
    pub fn into_parts(self) -> (A, D) {
        self.sampler.into_parts()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl<A, D> Component for Mq2Sensor<A, D> {
    fn name(&self) -> &str {
        "MQ-2"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn is_ready(&self) -> bool {
        false
    }
}

impl<A, D> Component for CalibratedMq2Sensor<A, D> {
    fn name(&self) -> &str {
        "MQ-2"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }
}

impl<A: AnalogSource, D: Delay> Sensor for CalibratedMq2Sensor<A, D> {
    type Reading = GasReading;

    fn read(&mut self) -> Result<GasReading, SensorError> {
        self.read_detailed()
            .map(|measurement| measurement.reading)
            .map_err(SensorError::from)
    }
}
