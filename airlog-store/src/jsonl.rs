//! # Tabelas em JSONL
//!
//! Uma linha JSON por registro, um arquivo por tabela. As gravações são
//! apenas de acréscimo e cada linha é descarregada no disco ao ser escrita,
//! de modo que uma queda de energia perde no máximo a linha em andamento.
//! Ao reabrir, uma última linha incompleta (sem `\n`) é descartada; dano no
//! meio do arquivo continua sendo [`StoreError::Corrupt`].

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use airlog_climate::ClimateReading;
use airlog_core::time::Timestamp;
use airlog_gas::GasReading;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::rows::{ClimateRow, GasRow, RowId, Table};
use crate::store::ReadingStore;

// ═══════════════════════════════════════════════════════════════════════════
// ESCRITA
// ═══════════════════════════════════════════════════════════════════════════

/// Arquivo de uma tabela aberto para acréscimo
#[derive(Debug)]
struct TableWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    next_id: u64,
}

impl TableWriter {
    /// Abre (ou cria) a tabela e retoma a numeração do maior `id` existente
    fn open(path: PathBuf) -> StoreResult<Self> {
        let mut next_id = 1;
        let mut torn_at = None;
        let mut unterminated = false;

        if path.exists() {
            let mut reader = JsonlReader::<RowId>::open(&path)?;
            loop {
                match reader.next_row() {
                    Ok(Some(row)) => next_id = next_id.max(row.id + 1),
                    Ok(None) => break,
                    // Sem `\n` só pode ser a última linha: gravação interrompida
                    Err(StoreError::Corrupt { line, message, .. })
                        if !reader.last_line_terminated() =>
                    {
                        tracing::warn!(
                            path = %path.display(),
                            line,
                            error = %message,
                            "dropping torn last line"
                        );
                        torn_at = Some(reader.line_start());
                        break;
                    }
                    Err(err) => return Err(err),
                }
            }
            unterminated = torn_at.is_none() && !reader.last_line_terminated();
        }

        if let Some(len) = torn_at {
            OpenOptions::new().write(true).open(&path)?.set_len(len)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = BufWriter::new(file);
        if unterminated {
            // Linha completa cujo `\n` não chegou ao disco
            writeln!(writer)?;
            writer.flush()?;
        }

        Ok(Self {
            path,
            writer,
            next_id,
        })
    }

    fn append<T: Serialize>(&mut self, build: impl FnOnce(u64) -> T) -> StoreResult<u64> {
        let id = self.next_id;
        let json = serde_json::to_string(&build(id))?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        self.next_id += 1;
        Ok(id)
    }
}

/// Armazenamento em diretório com `dht_data.jsonl` e `mq2_data.jsonl`
#[derive(Debug)]
pub struct JsonlStore {
    dir: PathBuf,
    climate: Option<TableWriter>,
    gas: Option<TableWriter>,
    closed: bool,
}

impl JsonlStore {
    /// Prepara o diretório; as tabelas só são abertas em [`ReadingStore::init`]
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            climate: None,
            gas: None,
            closed: false,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Caminho do arquivo de uma tabela
    pub fn table_path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    /// Todas as linhas gravadas em `dht_data`
    pub fn climate_rows(&self) -> StoreResult<Vec<ClimateRow>> {
        self.rows(Table::Climate)
    }

    /// Todas as linhas gravadas em `mq2_data`
    pub fn gas_rows(&self) -> StoreResult<Vec<GasRow>> {
        self.rows(Table::Gas)
    }

    fn rows<T: DeserializeOwned>(&self, table: Table) -> StoreResult<Vec<T>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }
        JsonlReader::open(&path)?.collect()
    }

    fn writer(&mut self, table: Table) -> StoreResult<&mut TableWriter> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        let slot = match table {
            Table::Climate => &mut self.climate,
            Table::Gas => &mut self.gas,
        };
        slot.as_mut().ok_or(StoreError::NotInitialized(table.name()))
    }
}

impl ReadingStore for JsonlStore {
    fn init(&mut self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        if self.climate.is_none() {
            self.climate = Some(TableWriter::open(self.table_path(Table::Climate))?);
        }
        if self.gas.is_none() {
            self.gas = Some(TableWriter::open(self.table_path(Table::Gas))?);
        }

        tracing::debug!(dir = %self.dir.display(), "tables ready");
        Ok(())
    }

    fn record_climate_reading(
        &mut self,
        date: Timestamp,
        reading: &ClimateReading,
    ) -> StoreResult<u64> {
        let reading = *reading;
        self.writer(Table::Climate)?
            .append(|id| ClimateRow { id, date, reading })
    }

    fn record_gas_reading(&mut self, date: Timestamp, reading: &GasReading) -> StoreResult<u64> {
        let reading = *reading;
        self.writer(Table::Gas)?
            .append(|id| GasRow { id, date, reading })
    }

    fn close(&mut self) -> StoreResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        for table in [self.climate.take(), self.gas.take()].into_iter().flatten() {
            let TableWriter {
                path, mut writer, ..
            } = table;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            tracing::debug!(path = %path.display(), "table closed");
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LEITURA
// ═══════════════════════════════════════════════════════════════════════════

/// Lê uma tabela linha a linha
pub struct JsonlReader<T> {
    path: PathBuf,
    reader: BufReader<File>,
    line_buffer: String,
    line: usize,
    offset: u64,
    line_start: u64,
    terminated: bool,
    _row: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn open(path: &Path) -> StoreResult<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(File::open(path)?),
            line_buffer: String::with_capacity(256),
            line: 0,
            offset: 0,
            line_start: 0,
            terminated: true,
            _row: PhantomData,
        })
    }

    /// Posição (em bytes) do início da última linha lida
    pub(crate) fn line_start(&self) -> u64 {
        self.line_start
    }

    /// A última linha lida terminava em `\n`
    pub(crate) fn last_line_terminated(&self) -> bool {
        self.terminated
    }

    /// Próxima linha não vazia
    pub fn next_row(&mut self) -> StoreResult<Option<T>> {
        loop {
            self.line_buffer.clear();
            let read = self.reader.read_line(&mut self.line_buffer)?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            self.line_start = self.offset;
            self.offset += read as u64;
            self.terminated = self.line_buffer.ends_with('\n');

            let text = self.line_buffer.trim();
            if text.is_empty() {
                continue;
            }

            return serde_json::from_str(text)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    path: self.path.clone(),
                    line: self.line,
                    message: e.to_string(),
                });
        }
    }
}

impl<T: DeserializeOwned> Iterator for JsonlReader<T> {
    type Item = StoreResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
