//! Configuração da estação (`airlog.toml`)
//!
//! ```toml
//! [station]
//! interval_secs = 60
//!
//! [gas]
//! load_resistance = 10.0
//! clean_air_factor = 9.83
//! source = { kind = "iio", path = "/sys/bus/iio/devices/iio:device0/in_voltage0_raw", resolution_bits = 10 }
//!
//! [climate]
//! reinit_delay_ms = 1000
//! source = { kind = "simulated" }
//!
//! [store]
//! dir = "data"
//! ```
//!
//! Toda seção e todo campo é opcional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use airlog_climate::{
    ClimateConfig, ClimateResult, ClimateSource, IioClimateSource, SimulatedClimateSource,
};
use airlog_core::traits::AnalogSource;
use airlog_gas::{GasResult, GasSensorConfig, IioAnalogSource, SimulatedAnalogSource};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Nome procurado no diretório atual quando `--config` não é informado
pub const DEFAULT_CONFIG_FILE: &str = "airlog.toml";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse airlog.toml: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuração completa da estação
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub station: StationSection,
    pub gas: GasSection,
    pub climate: ClimateSection,
    pub store: StoreSection,
}

/// `[station]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationSection {
    /// Segundos entre ticks
    pub interval_secs: u64,
}

impl Default for StationSection {
    fn default() -> Self {
        Self { interval_secs: 60 }
    }
}

/// `[gas]`: parâmetros do MQ-2 e a fonte analógica
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSection {
    #[serde(flatten)]
    pub sensor: GasSensorConfig,
    pub source: AnalogSourceConfig,
}

/// Origem das amostras brutas do ADC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalogSourceConfig {
    Iio {
        path: PathBuf,
        #[serde(default = "default_resolution_bits")]
        resolution_bits: u8,
    },
    Simulated {
        #[serde(default = "default_simulated_raw")]
        raw: u16,
        #[serde(default)]
        variation: u16,
    },
}

impl Default for AnalogSourceConfig {
    fn default() -> Self {
        AnalogSourceConfig::Iio {
            path: PathBuf::from("/sys/bus/iio/devices/iio:device0/in_voltage0_raw"),
            resolution_bits: default_resolution_bits(),
        }
    }
}

impl AnalogSourceConfig {
    pub fn simulated() -> Self {
        AnalogSourceConfig::Simulated {
            raw: default_simulated_raw(),
            variation: 400,
        }
    }

    pub fn build(&self) -> GasResult<Box<dyn AnalogSource>> {
        let source: Box<dyn AnalogSource> = match self {
            AnalogSourceConfig::Iio {
                path,
                resolution_bits,
            } => Box::new(IioAnalogSource::new(path.clone(), *resolution_bits)?),
            AnalogSourceConfig::Simulated { raw, variation } => {
                Box::new(SimulatedAnalogSource::new(*raw).with_variation(*variation))
            }
        };
        Ok(source)
    }
}

fn default_resolution_bits() -> u8 {
    10
}

fn default_simulated_raw() -> u16 {
    32736
}

/// `[climate]`: parâmetros do DHT22 e a fonte
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateSection {
    #[serde(flatten)]
    pub sensor: ClimateConfig,
    pub source: ClimateSourceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ClimateSourceConfig {
    Iio { device_dir: PathBuf },
    Simulated,
}

impl Default for ClimateSourceConfig {
    fn default() -> Self {
        ClimateSourceConfig::Iio {
            device_dir: PathBuf::from("/sys/bus/iio/devices/iio:device1"),
        }
    }
}

impl ClimateSourceConfig {
    pub fn build(&self) -> ClimateResult<Box<dyn ClimateSource>> {
        let source: Box<dyn ClimateSource> = match self {
            ClimateSourceConfig::Iio { device_dir } => {
                Box::new(IioClimateSource::open(device_dir.clone())?)
            }
            ClimateSourceConfig::Simulated => Box::new(SimulatedClimateSource::new()),
        };
        Ok(source)
    }
}

/// `[store]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Diretório das tabelas
    pub dir: PathBuf,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

impl StationConfig {
    /// Parse a partir de texto TOML
    pub fn from_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Carrega de um arquivo
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(&content)
    }

    /// Arquivo informado, ou `airlog.toml` no diretório atual, ou padrões
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Serializa para TOML
    pub fn to_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.station.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "station.interval_secs must be greater than zero".into(),
            ));
        }
        self.gas
            .sensor
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.station.interval_secs)
    }

    /// Troca as duas fontes por versões simuladas
    pub fn simulate(&mut self) {
        self.gas.source = AnalogSourceConfig::simulated();
        self.climate.source = ClimateSourceConfig::Simulated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = StationConfig::from_str("").unwrap();
        assert_eq!(config, StationConfig::default());
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.gas.sensor, GasSensorConfig::default());
        assert_eq!(config.climate.sensor.reinit_delay_ms, 1000);
        assert_eq!(config.store.dir, PathBuf::from("data"));
    }

    #[test]
    fn test_parse_full_file() {
        let content = r#"
            [station]
            interval_secs = 30

            [gas]
            load_resistance = 4.7
            read_samples = 10
            source = { kind = "iio", path = "/tmp/in_voltage2_raw", resolution_bits = 12 }

            [climate]
            reinit_delay_ms = 2000
            source = { kind = "simulated" }

            [store]
            dir = "/var/lib/airlog"
        "#;

        let config = StationConfig::from_str(content).unwrap();
        assert_eq!(config.station.interval_secs, 30);
        assert_eq!(config.gas.sensor.load_resistance, 4.7);
        assert_eq!(config.gas.sensor.read_samples, 10);
        assert_eq!(config.gas.sensor.calibration_samples, 50);
        assert_eq!(
            config.gas.source,
            AnalogSourceConfig::Iio {
                path: PathBuf::from("/tmp/in_voltage2_raw"),
                resolution_bits: 12,
            }
        );
        assert_eq!(config.climate.sensor.reinit_delay_ms, 2000);
        assert_eq!(config.climate.source, ClimateSourceConfig::Simulated);
        assert_eq!(config.store.dir, PathBuf::from("/var/lib/airlog"));
    }

    #[test]
    fn test_simulated_source_defaults() {
        let config = StationConfig::from_str(
            r#"
            [gas]
            source = { kind = "simulated" }
            "#,
        )
        .unwrap();
        assert_eq!(
            config.gas.source,
            AnalogSourceConfig::Simulated {
                raw: 32736,
                variation: 0,
            }
        );
        assert!(config.gas.source.build().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            StationConfig::from_str("[station]\ninterval_secs = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StationConfig::from_str("[gas]\ncalibration_samples = 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            StationConfig::from_str("[gas]\nsource = { kind = \"spi\" }"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_to_string_parses_back() {
        let mut config = StationConfig::default();
        config.simulate();
        config.station.interval_secs = 5;

        let text = config.to_string().unwrap();
        assert!(text.contains("interval_secs = 5"));
        assert_eq!(StationConfig::from_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("airlog.toml");
        std::fs::write(&path, "[store]\ndir = \"readings\"\n").unwrap();

        let config = StationConfig::load(Some(&path)).unwrap();
        assert_eq!(config.store.dir, PathBuf::from("readings"));

        let missing = StationConfig::from_file(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_build_iio_sources() {
        let dir = TempDir::new().unwrap();
        let climate = ClimateSourceConfig::Iio {
            device_dir: dir.path().to_path_buf(),
        };
        assert!(climate.build().is_ok());

        let bad_gas = AnalogSourceConfig::Iio {
            path: dir.path().join("in_voltage0_raw"),
            resolution_bits: 20,
        };
        assert!(bad_gas.build().is_err());
    }
}
