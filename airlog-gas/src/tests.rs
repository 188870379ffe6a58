//! Testes do pipeline airlog-gas

use super::*;
use airlog_core::traits::{AnalogSource, Component, Delay, NoDelay, Sensor, SensorError};
use std::time::Duration;

/// Relógio que só registra as pausas pedidas
#[derive(Debug, Default)]
struct RecordingDelay {
    calls: Vec<Duration>,
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) {
        self.calls.push(duration);
    }
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = expected.abs().max(1.0) * 1e-9;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// ESTIMADOR DE RESISTÊNCIA
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_resistance_strictly_decreasing() {
    let mut previous = resistance(1);
    for raw in 2..=65471u16 {
        let current = resistance(raw);
        assert!(current < previous, "not decreasing at raw={raw}");
        previous = current;
    }
}

#[test]
fn test_resistance_zero_guard() {
    assert_eq!(resistance(0), resistance(1));
}

#[test]
fn test_resistance_keeps_hardware_offset() {
    // 65472, não 65535
    assert_eq!(resistance(65472), 0.0);
    assert_close(resistance(16368), 10.0 * (65472.0 - 16368.0) / 16368.0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// AMOSTRADOR
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_average_of_constant_sequence() {
    for raw in [1u16, 500, 32736, 60000] {
        let mut sampler = Sampler::new(ScriptedAnalogSource::constant(raw), NoDelay);
        let mean = sampler.average_resistance(7, Duration::ZERO).unwrap();
        assert_close(mean, resistance(raw));
    }
}

#[test]
fn test_average_is_arithmetic_mean() {
    let raws = [16368u16, 32736, 49104];
    let mut sampler = Sampler::new(ScriptedAnalogSource::from_values(raws), NoDelay);

    let summary = sampler.sample(SamplingPlan::new(3, Duration::ZERO)).unwrap();
    let expected = raws.iter().map(|&r| resistance(r)).sum::<f64>() / 3.0;

    assert_close(summary.mean_resistance, expected);
    assert_close(summary.mean_raw, 32736.0);
}

#[test]
fn test_sampler_pauses_after_each_sample() {
    let mut delay = RecordingDelay::default();
    let mut source = ScriptedAnalogSource::constant(1000);
    {
        let mut sampler = Sampler::new(&mut source, &mut delay);
        sampler.sample(SamplingPlan::READ).unwrap();
    }

    assert_eq!(source.reads(), 5);
    assert_eq!(delay.calls, vec![Duration::from_millis(50); 5]);
}

#[test]
fn test_sampler_propagates_source_failure() {
    let source = ScriptedAnalogSource::from_values([100, 200])
        .then(Err(SensorError::Hardware("spi bus error".into())));
    let mut sampler = Sampler::new(source, NoDelay);

    let result = sampler.average_resistance(5, Duration::ZERO);
    assert_eq!(
        result,
        Err(GasError::Source(SensorError::Hardware("spi bus error".into())))
    );
    // Sem nova tentativa: parou na terceira leitura
    assert_eq!(sampler.source().reads(), 3);
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODELO DE CURVAS
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_percentage_decreasing_in_ratio() {
    for species in GasSpecies::ALL {
        let mut previous = percentage(0.05, species);
        let mut ratio = 0.05;
        while ratio < 20.0 {
            ratio *= 1.1;
            let current = percentage(ratio, species);
            assert!(current < previous, "{} at ratio {ratio}", species.name());
            previous = current;
        }
    }
}

#[test]
fn test_unknown_species_is_zero() {
    for ratio in [0.1, 1.0, 9.83, 50.0] {
        for id in [7u8, 42, u8::MAX] {
            assert_eq!(percentage_by_id(ratio, id), 0.0);
        }
    }
}

#[test]
fn test_known_ids_match_enum() {
    for species in GasSpecies::ALL {
        assert_eq!(percentage_by_id(2.0, species.id()), percentage(2.0, species));
    }
}

#[test]
fn test_lpg_reference_value() {
    let expected = 10f64.powf((0.0 - 0.21) / -0.47 + 2.3);
    let ppm = percentage(1.0, GasSpecies::Lpg);
    assert!((ppm - expected).abs() / expected < 1e-3);
    assert!((ppm - 558.3).abs() / 558.3 < 1e-3);
}

#[test]
fn test_mixed_log_base_preserved() {
    // ln(ratio), não log10(ratio)
    let ratio: f64 = 3.0;
    let curve = GasCurve::CO;
    let expected = 10f64.powf((ratio.ln() - curve.y0) / curve.slope + curve.x0);
    let base10 = 10f64.powf((ratio.log10() - curve.y0) / curve.slope + curve.x0);

    assert_close(percentage(ratio, GasSpecies::Co), expected);
    assert!((percentage(ratio, GasSpecies::Co) - base10).abs() > 1.0);
}

// ═══════════════════════════════════════════════════════════════════════════════
// CALIBRADOR
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_calibration_mid_scale() {
    let mut delay = RecordingDelay::default();
    let mut source = ScriptedAnalogSource::constant(32736);

    let ro = {
        let mut sampler = Sampler::new(&mut source, &mut delay);
        Calibrator::default().calibrate(&mut sampler).unwrap()
    };

    assert_close(ro.ro(), resistance(32736) / 9.83);
    assert_eq!(source.reads(), 50);
    assert_eq!(delay.calls.len(), 50);
}

#[test]
fn test_calibration_failure_propagates() {
    let source = ScriptedAnalogSource::from_values([32736; 10])
        .then(Err(SensorError::Timeout(50)));
    let result = Mq2Sensor::new(source, NoDelay).unwrap().calibrate();
    assert!(matches!(result, Err(GasError::Source(SensorError::Timeout(50)))));
}

// ═══════════════════════════════════════════════════════════════════════════════
// ESTIMADOR DE CONCENTRAÇÃO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_read_with_known_ro() {
    let raw = 16368u16;
    let ro = CalibrationConstant::new(10.0).unwrap();
    let source = ScriptedAnalogSource::constant(raw);
    let mut sensor =
        CalibratedMq2Sensor::with_constant(source, NoDelay, GasSensorConfig::default(), ro)
            .unwrap();

    let measurement = sensor.read_detailed().unwrap();
    let ratio = resistance(raw) / 10.0;
    assert_close(measurement.ratio, ratio);
    assert_close(measurement.mean_raw, f64::from(raw));

    let values = measurement.reading.as_array();
    for (index, species) in GasSpecies::ALL.iter().enumerate() {
        assert_close(values[index], percentage(ratio, *species));
    }

    // Determinístico
    let again = sensor.read().unwrap();
    assert_eq!(again, measurement.reading);
    assert_eq!(sensor.read_count(), 2);
}

#[test]
fn test_read_uses_five_samples() {
    let ro = CalibrationConstant::new(10.0).unwrap();
    let mut source = ScriptedAnalogSource::constant(20000);
    let mut delay = RecordingDelay::default();
    {
        let mut sensor = CalibratedMq2Sensor::with_constant(
            &mut source,
            &mut delay,
            GasSensorConfig::default(),
            ro,
        )
        .unwrap();
        sensor.read().unwrap();
    }
    assert_eq!(source.reads(), 5);
    assert_eq!(delay.calls.len(), 5);
}

#[test]
fn test_read_fails_whole_on_source_error() {
    let ro = CalibrationConstant::new(10.0).unwrap();
    let source = ScriptedAnalogSource::from_values([20000, 20000])
        .then(Err(SensorError::Transient("crc".into())));
    let mut sensor =
        CalibratedMq2Sensor::with_constant(source, NoDelay, GasSensorConfig::default(), ro)
            .unwrap();

    assert!(matches!(sensor.read(), Err(GasError::Source(_))));
    assert_eq!(sensor.read_count(), 0);
}

#[test]
fn test_read_at_full_scale_is_saturated() {
    let ro = CalibrationConstant::new(10.0).unwrap();
    for raw in [65472u16, u16::MAX] {
        let source = ScriptedAnalogSource::constant(raw);
        let mut sensor =
            CalibratedMq2Sensor::with_constant(source, NoDelay, GasSensorConfig::default(), ro)
                .unwrap();

        assert_eq!(sensor.read(), Err(GasError::Saturated(0.0)), "raw={raw}");
        assert_eq!(sensor.read_count(), 0);
    }

    // Ainda abaixo do fundo de escala: leitura normal e maior que em ar limpo
    let source = ScriptedAnalogSource::constant(65471);
    let mut sensor =
        CalibratedMq2Sensor::with_constant(source, NoDelay, GasSensorConfig::default(), ro)
            .unwrap();
    let reading = sensor.read().unwrap();
    assert!(reading.lpg > GasReading::from_ratio(9.83).lpg);
}

#[test]
fn test_full_pipeline_clean_air_reads_back_ratio() {
    let source = ScriptedAnalogSource::constant(32736);
    let mut sensor = Mq2Sensor::new(source, NoDelay)
        .unwrap()
        .calibrate()
        .unwrap();

    // Mesmo ar da calibração: Rs/Ro = fator de ar limpo
    let measurement = sensor.read_detailed().unwrap();
    assert_close(measurement.ratio, 9.83);
    assert_close(measurement.reading.smoke, percentage(9.83, GasSpecies::Smoke));
}

#[test]
fn test_more_gas_means_higher_ppm() {
    let ro = CalibrationConstant::new(10.0).unwrap();
    let config = GasSensorConfig::default();

    let mut clean = CalibratedMq2Sensor::with_constant(
        ScriptedAnalogSource::constant(10000),
        NoDelay,
        config.clone(),
        ro,
    )
    .unwrap();
    // Mais tensão na carga = menor Rs = mais gás
    let mut smoky =
        CalibratedMq2Sensor::with_constant(ScriptedAnalogSource::constant(40000), NoDelay, config, ro)
            .unwrap();

    let clean = clean.read().unwrap();
    let smoky = smoky.read().unwrap();
    for species in GasSpecies::ALL {
        assert!(smoky.get(species) > clean.get(species));
    }
}

#[test]
fn test_sensor_trait_and_component() {
    let uncalibrated = Mq2Sensor::new(ScriptedAnalogSource::constant(32736), NoDelay).unwrap();
    assert_eq!(uncalibrated.name(), "MQ-2");
    assert!(!uncalibrated.is_ready());

    let mut sensor = uncalibrated.calibrate().unwrap();
    assert!(sensor.is_ready());

    let reading = Sensor::read(&mut sensor).unwrap();
    assert!(reading.as_array().iter().all(|ppm| *ppm >= 0.0));
}

#[test]
fn test_sensor_trait_maps_errors() {
    let ro = CalibrationConstant::new(10.0).unwrap();
    let source = ScriptedAnalogSource::default();
    let mut sensor =
        CalibratedMq2Sensor::with_constant(source, NoDelay, GasSensorConfig::default(), ro)
            .unwrap();

    assert_eq!(Sensor::read(&mut sensor), Err(SensorError::NotInitialized));
}

#[test]
fn test_custom_load_resistance_flows_through() {
    let config = GasSensorConfig {
        load_resistance: 5.0,
        ..Default::default()
    };
    let mut sensor = Mq2Sensor::with_config(ScriptedAnalogSource::constant(32736), NoDelay, config)
        .unwrap()
        .calibrate()
        .unwrap();

    assert_close(sensor.calibration().ro(), 5.0 / 9.83);
    assert!(sensor.read().is_ok());
}

#[test]
fn test_boxed_source() {
    let source: Box<dyn AnalogSource> = Box::new(SimulatedAnalogSource::new(32736));
    let mut sensor = Mq2Sensor::new(source, NoDelay).unwrap().calibrate().unwrap();
    assert_close(sensor.calibration().ro(), 10.0 / 9.83);
    assert!(sensor.read().is_ok());
}
