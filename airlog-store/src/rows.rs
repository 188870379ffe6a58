//! Linhas das tabelas `dht_data` e `mq2_data`

use airlog_climate::ClimateReading;
use airlog_core::time::Timestamp;
use airlog_gas::GasReading;
use serde::{Deserialize, Serialize};

/// Tabelas da estação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Climate,
    Gas,
}

impl Table {
    pub const ALL: [Table; 2] = [Table::Climate, Table::Gas];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Climate => "dht_data",
            Table::Gas => "mq2_data",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.jsonl", self.name())
    }
}

/// `id, date, temperature, humidity`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateRow {
    pub id: u64,
    pub date: Timestamp,
    #[serde(flatten)]
    pub reading: ClimateReading,
}

/// `id, date, lpg, co, smoke, propane, hydrogen, alcohol, methane`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasRow {
    pub id: u64,
    pub date: Timestamp,
    #[serde(flatten)]
    pub reading: GasReading,
}

/// Só o `id`, para retomar a numeração de uma tabela existente
#[derive(Debug, Deserialize)]
pub(crate) struct RowId {
    pub id: u64,
}
