//! Calibração em ar limpo
//!
//! Com o sensor em ar limpo (pré-condição garantida por quem chama), a
//! resistência média dividida pelo fator de ar limpo do datasheet dá Ro.

use airlog_core::traits::{AnalogSource, Delay};

use crate::constants::RO_CLEAN_AIR_FACTOR;
use crate::error::GasResult;
use crate::sampler::{Sampler, SamplingPlan};
use crate::types::CalibrationConstant;

/// Procedimento de calibração
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibrator {
    plan: SamplingPlan,
    clean_air_factor: f64,
}

impl Calibrator {
    pub fn new(plan: SamplingPlan, clean_air_factor: f64) -> Self {
        Self {
            plan,
            clean_air_factor,
        }
    }

    pub fn plan(&self) -> SamplingPlan {
        self.plan
    }

    pub fn clean_air_factor(&self) -> f64 {
        self.clean_air_factor
    }

    /// Deriva Ro a partir de uma rajada de calibração.
    ///
    /// Bloqueia durante toda a rajada (~2,5 s no plano padrão). Sem novas
    /// tentativas: qualquer falha é devolvida a quem chamou.
    pub fn calibrate<A, D>(&self, sampler: &mut Sampler<A, D>) -> GasResult<CalibrationConstant>
    where
        A: AnalogSource,
        D: Delay,
    {
        tracing::info!(
            samples = self.plan.samples,
            interval_ms = self.plan.interval.as_millis() as u64,
            "calibrating MQ-2 in clean air"
        );

        let summary = sampler.sample(self.plan)?;
        let ro = CalibrationConstant::new(summary.mean_resistance / self.clean_air_factor)?;

        tracing::info!(
            ro_kohm = ro.ro(),
            mean_raw = summary.mean_raw,
            "MQ-2 calibration done"
        );
        Ok(ro)
    }
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::new(SamplingPlan::CALIBRATION, RO_CLEAN_AIR_FACTOR)
    }
}
