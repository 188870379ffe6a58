//! Ciclo de medição da estação
//!
//! Um tick carimba a hora, lê o DHT22, lê o MQ-2 e grava as duas linhas.
//! Falhas de gravação e de leitura do gás não interrompem a estação.

use std::future::Future;
use std::time::Duration;

use airlog_climate::ClimateReading;
use airlog_core::time::Timestamp;
use airlog_core::traits::Sensor;
use airlog_gas::GasReading;
use airlog_store::{ReadingStore, StoreResult};
use tokio::time::MissedTickBehavior;

/// Resultado de um tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub date: Timestamp,
    pub climate: ClimateReading,
    /// `None` quando a leitura do MQ-2 falhou
    pub gas: Option<GasReading>,
    /// `id` gravado em `dht_data`, se a gravação deu certo
    pub climate_id: Option<u64>,
    /// `id` gravado em `mq2_data`, se houve leitura e a gravação deu certo
    pub gas_id: Option<u64>,
}

/// Estação: sensores prontos e o destino das leituras
#[derive(Debug)]
pub struct Station<C, G, S> {
    climate: C,
    gas: G,
    store: S,
    ticks: u64,
}

impl<C, G, S> Station<C, G, S>
where
    C: Sensor<Reading = ClimateReading>,
    G: Sensor<Reading = GasReading>,
    S: ReadingStore,
{
    /// `store` já deve estar inicializado e `gas` já calibrado
    pub fn new(climate: C, gas: G, store: S) -> Self {
        Self {
            climate,
            gas,
            store,
            ticks: 0,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tick com a hora local atual
    pub fn tick(&mut self) -> TickReport {
        self.tick_at(Timestamp::now())
    }

    pub fn tick_at(&mut self, date: Timestamp) -> TickReport {
        self.ticks += 1;

        let climate = self.climate.read().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "climate read failed");
            ClimateReading::default()
        });

        let gas = match self.gas.read() {
            Ok(reading) => Some(reading),
            Err(err) => {
                tracing::error!(error = %err, "MQ-2 read failed, skipping gas row");
                None
            }
        };

        let climate_id = match self.store.record_climate_reading(date, &climate) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(error = %err, table = "dht_data", "failed to record reading");
                None
            }
        };

        let gas_id = gas.and_then(|reading| match self.store.record_gas_reading(date, &reading) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(error = %err, table = "mq2_data", "failed to record reading");
                None
            }
        });

        tracing::info!(
            tick = self.ticks,
            %date,
            temperature = ?climate.temperature,
            humidity = ?climate.humidity,
            lpg = ?gas.map(|g| g.lpg),
            co = ?gas.map(|g| g.co),
            smoke = ?gas.map(|g| g.smoke),
            "tick recorded"
        );

        TickReport {
            date,
            climate,
            gas,
            climate_id,
            gas_id,
        }
    }

    /// Um tick a cada `period` (o primeiro é imediato) até `shutdown` completar.
    ///
    /// `shutdown` é consultado antes do tick em cada volta, então qualquer
    /// tratador de sinal que ele instale já existe durante o primeiro tick.
    /// Um sinal recebido no meio de um tick só é atendido quando ele termina.
    /// Exige o runtime multi-thread do tokio.
    pub async fn run_until(&mut self, period: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    tokio::task::block_in_place(|| self.tick());
                }
            }
        }
    }

    /// Fecha o armazenamento
    pub fn close(mut self) -> StoreResult<S> {
        self.store.close()?;
        tracing::info!(ticks = self.ticks, "station stopped");
        Ok(self.store)
    }
}
