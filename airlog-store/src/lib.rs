//! # airlog-store — Persistência de Leituras
//!
//! Duas tabelas, com as colunas fixas da estação:
//!
//! | tabela     | colunas                                                          |
//! |------------|------------------------------------------------------------------|
//! | `dht_data` | `id, date, temperature, humidity`                                |
//! | `mq2_data` | `id, date, lpg, co, smoke, propane, hydrogen, alcohol, methane`  |
//!
//! [`JsonlStore`] grava cada tabela como um arquivo JSONL; [`MemoryStore`]
//! mantém as linhas em memória.

pub mod error;
pub mod jsonl;
pub mod memory;
pub mod rows;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use jsonl::{JsonlReader, JsonlStore};
pub use memory::MemoryStore;
pub use rows::{ClimateRow, GasRow, Table};
pub use store::ReadingStore;
