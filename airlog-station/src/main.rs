//! airlog - estação de qualidade do ar
//!
//! Lê um DHT22 (temperatura e umidade) e um MQ-2 (sete gases) em intervalos
//! fixos e grava as leituras em `dht_data` e `mq2_data`.
//!
//! ## Variáveis de ambiente
//! - `AIRLOG_CONFIG`: arquivo de configuração (padrão: `./airlog.toml`, se existir)
//! - `AIRLOG_DATA_DIR`: diretório das tabelas (sobrepõe `[store] dir`)
//! - `RUST_LOG`: filtro de logs (padrão: `info` para os crates airlog)

use std::path::PathBuf;

use airlog_climate::ClimateSensor;
use airlog_core::traits::{AnalogSource, StdDelay};
use airlog_gas::{CalibratedMq2Sensor, Mq2Sensor};
use airlog_store::{JsonlStore, ReadingStore};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airlog_station::config::{StationConfig, DEFAULT_CONFIG_FILE};
use airlog_station::station::Station;

#[derive(Parser)]
#[command(name = "airlog")]
#[command(author = "Silvano Neto <dev@silvanoneto.com>")]
#[command(version = "2026.1.16")]
#[command(about = "Air quality station: DHT22 + MQ-2 readings at fixed intervals", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, env = "AIRLOG_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use simulated sensors instead of hardware
    #[arg(long, global = true, default_value_t = false)]
    simulate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calibrate the MQ-2 and record readings until interrupted
    Run {
        /// Seconds between readings
        #[arg(short, long, value_name = "SECS")]
        interval: Option<u64>,

        /// Directory for the data tables
        #[arg(short, long, env = "AIRLOG_DATA_DIR", value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Calibrate the MQ-2 in clean air and print Ro
    Calibrate,

    /// Print a default airlog.toml
    InitConfig {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "airlog=info,airlog_station=info,airlog_gas=info,airlog_climate=info,airlog_store=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { interval, data_dir } => {
            run(cli.config, cli.simulate, interval, data_dir).await
        }
        Commands::Calibrate => calibrate(cli.config, cli.simulate),
        Commands::InitConfig { output, force } => init_config(output, force),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

type GasSensor = CalibratedMq2Sensor<Box<dyn AnalogSource>, StdDelay>;

fn load_config(path: Option<PathBuf>, simulate: bool) -> Result<StationConfig> {
    let mut config = StationConfig::load(path.as_deref()).context("failed to load configuration")?;
    if simulate {
        config.simulate();
    }
    Ok(config)
}

/// Monta o MQ-2 e roda a calibração (bloqueia durante a rajada)
fn calibrated_gas_sensor(config: &StationConfig) -> Result<GasSensor> {
    let source = config
        .gas
        .source
        .build()
        .context("failed to open MQ-2 analog source")?;
    let sensor = Mq2Sensor::with_config(source, StdDelay, config.gas.sensor.clone())?;
    sensor.calibrate().context("MQ-2 calibration failed")
}

async fn run(
    config_path: Option<PathBuf>,
    simulate: bool,
    interval: Option<u64>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path, simulate)?;
    if let Some(secs) = interval {
        config.station.interval_secs = secs;
    }
    if let Some(dir) = data_dir {
        config.store.dir = dir;
    }
    config.validate()?;

    let mut store = JsonlStore::open(&config.store.dir)
        .with_context(|| format!("failed to open store at {}", config.store.dir.display()))?;
    store.init().context("failed to create tables")?;

    let climate_source = config
        .climate
        .source
        .build()
        .context("failed to open DHT22")?;
    let climate = ClimateSensor::with_config(climate_source, StdDelay, config.climate.sensor.clone());

    tracing::info!(
        samples = config.gas.sensor.calibration_samples,
        "keep the MQ-2 in clean air during calibration"
    );
    let gas = tokio::task::block_in_place(|| calibrated_gas_sensor(&config))?;

    let mut station = Station::new(climate, gas, store);

    tracing::info!(
        interval_secs = config.station.interval_secs,
        dir = %config.store.dir.display(),
        "station running"
    );

    station.run_until(config.interval(), shutdown_signal()).await;

    tracing::info!("closing tables before exit");
    station.close().context("failed to close store")?;
    Ok(())
}

/// SIGINT ou SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT"),
        _ = terminate => tracing::info!("received SIGTERM"),
    }
}

fn calibrate(config_path: Option<PathBuf>, simulate: bool) -> Result<()> {
    let config = load_config(config_path, simulate)?;

    println!(
        "{} MQ-2 in clean air ({} samples)...",
        "Calibrating".green().bold(),
        config.gas.sensor.calibration_samples
    );
    let mut sensor = calibrated_gas_sensor(&config)?;
    let measurement = sensor.read_detailed().context("MQ-2 read failed")?;

    println!(
        "{} Ro = {:.3} kΩ",
        "  Calibrated".green().bold(),
        sensor.calibration().ro()
    );
    println!(
        "{} Rs = {:.3} kΩ, Rs/Ro = {:.3}",
        "     Reading".cyan().bold(),
        measurement.resistance,
        measurement.ratio
    );
    for (species, ppm) in measurement.reading.iter() {
        println!("{:>12} {:.2} ppm", species.name(), ppm);
    }
    Ok(())
}

fn init_config(output: Option<PathBuf>, force: bool) -> Result<()> {
    let text = StationConfig::default().to_string()?;

    match output {
        None => print!("{text}"),
        Some(path) => {
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
            println!("{} {}", "   Created".green().bold(), name.cyan());
        }
    }
    Ok(())
}
