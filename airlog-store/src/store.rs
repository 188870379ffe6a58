//! Porta de persistência

use airlog_climate::ClimateReading;
use airlog_core::time::Timestamp;
use airlog_gas::GasReading;

use crate::error::StoreResult;

/// Destino das leituras da estação.
///
/// `init` cria as tabelas se ainda não existirem e deve vir antes de qualquer
/// gravação. Cada gravação devolve o `id` atribuído à linha.
pub trait ReadingStore {
    fn init(&mut self) -> StoreResult<()>;

    fn record_climate_reading(
        &mut self,
        date: Timestamp,
        reading: &ClimateReading,
    ) -> StoreResult<u64>;

    fn record_gas_reading(&mut self, date: Timestamp, reading: &GasReading) -> StoreResult<u64>;

    /// Libera os recursos; gravações posteriores falham
    fn close(&mut self) -> StoreResult<()>;
}

impl<T: ReadingStore + ?Sized> ReadingStore for &mut T {
    fn init(&mut self) -> StoreResult<()> {
        (**self).init()
    }

    fn record_climate_reading(
        &mut self,
        date: Timestamp,
        reading: &ClimateReading,
    ) -> StoreResult<u64> {
        (**self).record_climate_reading(date, reading)
    }

    fn record_gas_reading(&mut self, date: Timestamp, reading: &GasReading) -> StoreResult<u64> {
        (**self).record_gas_reading(date, reading)
    }

    fn close(&mut self) -> StoreResult<()> {
        (**self).close()
    }
}

impl<T: ReadingStore + ?Sized> ReadingStore for Box<T> {
    fn init(&mut self) -> StoreResult<()> {
        (**self).init()
    }

    fn record_climate_reading(
        &mut self,
        date: Timestamp,
        reading: &ClimateReading,
    ) -> StoreResult<u64> {
        (**self).record_climate_reading(date, reading)
    }

    fn record_gas_reading(&mut self, date: Timestamp, reading: &GasReading) -> StoreResult<u64> {
        (**self).record_gas_reading(date, reading)
    }

    fn close(&mut self) -> StoreResult<()> {
        (**self).close()
    }
}
