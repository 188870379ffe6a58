//! Armazenamento em memória

use airlog_climate::ClimateReading;
use airlog_core::time::Timestamp;
use airlog_gas::GasReading;

use crate::error::{StoreError, StoreResult};
use crate::rows::{ClimateRow, GasRow, Table};
use crate::store::ReadingStore;

/// Guarda as linhas em vetores; mesmas regras de ciclo de vida do JSONL
#[derive(Debug, Default)]
pub struct MemoryStore {
    climate: Vec<ClimateRow>,
    gas: Vec<GasRow>,
    initialized: bool,
    closed: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn climate_rows(&self) -> &[ClimateRow] {
        &self.climate
    }

    pub fn gas_rows(&self) -> &[GasRow] {
        &self.gas
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check(&self, table: Table) -> StoreResult<()> {
        if self.closed {
            Err(StoreError::Closed)
        } else if !self.initialized {
            Err(StoreError::NotInitialized(table.name()))
        } else {
            Ok(())
        }
    }
}

impl ReadingStore for MemoryStore {
    fn init(&mut self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        self.initialized = true;
        Ok(())
    }

    fn record_climate_reading(
        &mut self,
        date: Timestamp,
        reading: &ClimateReading,
    ) -> StoreResult<u64> {
        self.check(Table::Climate)?;
        let id = self.climate.len() as u64 + 1;
        self.climate.push(ClimateRow {
            id,
            date,
            reading: *reading,
        });
        Ok(id)
    }

    fn record_gas_reading(&mut self, date: Timestamp, reading: &GasReading) -> StoreResult<u64> {
        self.check(Table::Gas)?;
        let id = self.gas.len() as u64 + 1;
        self.gas.push(GasRow {
            id,
            date,
            reading: *reading,
        });
        Ok(id)
    }

    fn close(&mut self) -> StoreResult<()> {
        self.closed = true;
        Ok(())
    }
}
