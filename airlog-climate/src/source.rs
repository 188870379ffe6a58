//! Fontes climáticas
//!
//! - [`IioClimateSource`]: driver `dht11` do kernel (cobre DHT22) via IIO.
//! - [`SimulatedClimateSource`]: ciclo diurno sintético.
//! - [`ScriptedClimateSource`]: sequências fixas de resultados.

use std::fs;
use std::path::{Path, PathBuf};

use airlog_core::traits::SensorError;

use crate::climate::ClimateSource;
use crate::error::{ClimateError, ClimateResult};

const TEMPERATURE_FILE: &str = "in_temp_input";
const HUMIDITY_FILE: &str = "in_humidityrelative_input";

// ═══════════════════════════════════════════════════════════════════════════════
// IIO
// ═══════════════════════════════════════════════════════════════════════════════

/// DHT22 exposto em `/sys/bus/iio/devices/iio:deviceN`.
///
/// O driver publica milésimos de °C e de %RH. Falhas de checksum chegam
/// como `EIO` e estouros de tempo como `ETIMEDOUT`, ambos transitórios.
#[derive(Debug, Clone)]
pub struct IioClimateSource {
    device_dir: PathBuf,
}

impl IioClimateSource {
    pub fn open(device_dir: impl Into<PathBuf>) -> ClimateResult<Self> {
        let device_dir = device_dir.into();
        if !device_dir.is_dir() {
            return Err(ClimateError::InvalidConfig(format!(
                "{} is not an IIO device directory",
                device_dir.display()
            )));
        }
        Ok(Self { device_dir })
    }

    pub fn device_dir(&self) -> &Path {
        &self.device_dir
    }

    fn read_milli(&self, file: &str) -> Result<f64, SensorError> {
        let path = self.device_dir.join(file);
        let text = fs::read_to_string(&path)?;
        let milli: i64 = text
            .trim()
            .parse()
            .map_err(|e| SensorError::ReadFailed(format!("{}: {e}", path.display())))?;
        Ok(milli as f64 / 1000.0)
    }
}

impl ClimateSource for IioClimateSource {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        self.read_milli(TEMPERATURE_FILE)
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        self.read_milli(HUMIDITY_FILE)
    }

    fn reinit(&mut self) -> Result<(), SensorError> {
        // O driver se recupera sozinho; basta o dispositivo continuar lá
        if self.device_dir.is_dir() {
            Ok(())
        } else {
            Err(SensorError::NotInitialized)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SIMULADA
// ═══════════════════════════════════════════════════════════════════════════════

/// Temperatura entre 18 e 26 °C, umidade entre 40 e 70 %, inversamente
/// correlacionadas
#[derive(Debug, Clone, Default)]
pub struct SimulatedClimateSource {
    step: u64,
}

impl SimulatedClimateSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn cycle(&self) -> f64 {
        (self.step as f64 * 0.1).sin()
    }
}

impl ClimateSource for SimulatedClimateSource {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        Ok(22.0 + 4.0 * self.cycle())
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        let humidity = 55.0 - 15.0 * self.cycle();
        // Avança depois do par temperatura/umidade
        self.step += 1;
        Ok(humidity)
    }

    fn reinit(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ROTEIRIZADA
// ═══════════════════════════════════════════════════════════════════════════════

/// Repete ciclicamente roteiros independentes para cada grandeza
#[derive(Debug, Clone, Default)]
pub struct ScriptedClimateSource {
    temperature: Vec<Result<f64, SensorError>>,
    humidity: Vec<Result<f64, SensorError>>,
    temperature_reads: usize,
    humidity_reads: usize,
    reinits: usize,
}

impl ScriptedClimateSource {
    /// Sempre os mesmos valores
    pub fn constant(temperature: f64, humidity: f64) -> Self {
        Self::default()
            .then_temperature(Ok(temperature))
            .then_humidity(Ok(humidity))
    }

    pub fn then_temperature(mut self, result: Result<f64, SensorError>) -> Self {
        self.temperature.push(result);
        self
    }

    pub fn then_humidity(mut self, result: Result<f64, SensorError>) -> Self {
        self.humidity.push(result);
        self
    }

    /// Reinicializações pedidas até agora
    pub fn reinits(&self) -> usize {
        self.reinits
    }

    fn next(script: &[Result<f64, SensorError>], reads: &mut usize) -> Result<f64, SensorError> {
        if script.is_empty() {
            return Err(SensorError::NotInitialized);
        }
        let result = script[*reads % script.len()].clone();
        *reads += 1;
        result
    }
}

impl ClimateSource for ScriptedClimateSource {
    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        Self::next(&self.temperature, &mut self.temperature_reads)
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        Self::next(&self.humidity, &mut self.humidity_reads)
    }

    fn reinit(&mut self) -> Result<(), SensorError> {
        self.reinits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_iio_milli_units() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(TEMPERATURE_FILE), "23400\n").unwrap();
        fs::write(dir.path().join(HUMIDITY_FILE), "-500").unwrap();

        let mut source = IioClimateSource::open(dir.path()).unwrap();
        assert_eq!(source.read_temperature(), Ok(23.4));
        assert_eq!(source.read_humidity(), Ok(-0.5));
        assert!(source.reinit().is_ok());
    }

    #[test]
    fn test_iio_missing_and_garbage() {
        let dir = TempDir::new().unwrap();
        let mut source = IioClimateSource::open(dir.path()).unwrap();
        assert_eq!(source.read_temperature(), Err(SensorError::NotInitialized));

        fs::write(dir.path().join(HUMIDITY_FILE), "--").unwrap();
        assert!(matches!(source.read_humidity(), Err(SensorError::ReadFailed(_))));
    }

    #[test]
    fn test_iio_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-device");
        fs::write(&file, "").unwrap();
        assert!(matches!(
            IioClimateSource::open(&file),
            Err(ClimateError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_simulated_ranges() {
        let mut source = SimulatedClimateSource::new();
        for _ in 0..100 {
            let temperature = source.read_temperature().unwrap();
            let humidity = source.read_humidity().unwrap();
            assert!((18.0..=26.0).contains(&temperature));
            assert!((40.0..=70.0).contains(&humidity));
        }
    }

    #[test]
    fn test_scripted_independent_cycles() {
        let mut source = ScriptedClimateSource::constant(20.0, 50.0)
            .then_temperature(Err(SensorError::Transient("checksum".into())));

        assert_eq!(source.read_temperature(), Ok(20.0));
        assert!(source.read_temperature().is_err());
        assert_eq!(source.read_temperature(), Ok(20.0));
        assert_eq!(source.read_humidity(), Ok(50.0));
        assert_eq!(source.read_humidity(), Ok(50.0));
    }
}
