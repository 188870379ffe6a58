//! Amostragem com média
//!
//! Lê `n` amostras da fonte analógica, pausando um intervalo fixo depois de
//! cada uma, e reduz a rajada à média das resistências. A média amortiza o
//! ruído do ADC; não há nova tentativa em caso de falha da fonte.

use std::time::Duration;

use airlog_core::traits::{AnalogSource, Delay};

use crate::constants::{
    CALIBRATION_SAMPLE_INTERVAL_MS, CALIBRATION_SAMPLE_TIMES, READ_SAMPLE_INTERVAL_MS,
    READ_SAMPLE_TIMES,
};
use crate::error::{GasError, GasResult};
use crate::resistance::ResistanceModel;
use crate::types::Resistance;

/// Quantidade de amostras e espaçamento de uma rajada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub samples: u32,
    pub interval: Duration,
}

impl SamplingPlan {
    /// Rajada de calibração: 50 amostras × 50 ms
    pub const CALIBRATION: Self = Self::new(
        CALIBRATION_SAMPLE_TIMES,
        Duration::from_millis(CALIBRATION_SAMPLE_INTERVAL_MS),
    );

    /// Rajada de leitura normal: 5 amostras × 50 ms
    pub const READ: Self = Self::new(
        READ_SAMPLE_TIMES,
        Duration::from_millis(READ_SAMPLE_INTERVAL_MS),
    );

    pub const fn new(samples: u32, interval: Duration) -> Self {
        Self { samples, interval }
    }

    /// Tempo total de bloqueio da rajada
    pub fn duration(&self) -> Duration {
        self.interval * self.samples
    }
}

/// Resultado de uma rajada
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Resistência média (kΩ)
    pub mean_resistance: Resistance,
    /// Média das amostras brutas
    pub mean_raw: f64,
    /// Amostras lidas
    pub samples: u32,
}

/// Amostrador sobre uma fonte analógica e um relógio injetáveis
#[derive(Debug)]
pub struct Sampler<A, D> {
    source: A,
    delay: D,
    model: ResistanceModel,
}

impl<A: AnalogSource, D: Delay> Sampler<A, D> {
    pub fn new(source: A, delay: D) -> Self {
        Self::with_model(source, delay, ResistanceModel::default())
    }

    pub fn with_model(source: A, delay: D, model: ResistanceModel) -> Self {
        Self {
            source,
            delay,
            model,
        }
    }

    pub fn model(&self) -> &ResistanceModel {
        &self.model
    }

    pub fn source(&self) -> &A {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut A {
        &mut self.source
    }

    /// Devolve a fonte e o relógio
    pub fn into_parts(self) -> (A, D) {
        (self.source, self.delay)
    }

    /// Executa uma rajada conforme o plano.
    ///
    /// A primeira falha da fonte interrompe a rajada e é propagada.
    pub fn sample(&mut self, plan: SamplingPlan) -> GasResult<SampleSummary> {
        if plan.samples == 0 {
            return Err(GasError::InvalidConfig(
                "Sample count must be greater than zero".into(),
            ));
        }

        let mut resistance_sum = 0.0;
        let mut raw_sum = 0.0;

        for _ in 0..plan.samples {
            let raw = self.source.read_raw()?;
            let resistance = self.model.resistance(raw);
            tracing::trace!(raw, resistance, "analog sample");

            resistance_sum += resistance;
            raw_sum += f64::from(raw);
            self.delay.delay(plan.interval);
        }

        let count = f64::from(plan.samples);
        Ok(SampleSummary {
            mean_resistance: resistance_sum / count,
            mean_raw: raw_sum / count,
            samples: plan.samples,
        })
    }

    /// Resistência média de `n` amostras espaçadas por `interval`
    pub fn average_resistance(&mut self, n: u32, interval: Duration) -> GasResult<Resistance> {
        self.sample(SamplingPlan::new(n, interval))
            .map(|summary| summary.mean_resistance)
    }
}
