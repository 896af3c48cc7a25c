// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only job result ledger (JSON lines)

use pj_core::JobResult;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the ledger inside the output root
pub const LEDGER_FILE: &str = "ledger.jsonl";

/// Errors that can occur in ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One recorded job result
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LedgerEntry {
    pub seq: u64,
    pub result: JobResult,
}

/// Append-only record of every job result under an output root
pub struct Ledger {
    file: File,
    path: PathBuf,
    sequence: u64,
}

impl Ledger {
    /// Open or create the ledger at the given path
    pub fn open(path: &Path) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .read(true)
            .open(path)?;

        // Continue numbering after existing entries
        let reader = BufReader::new(File::open(path)?);
        let mut sequence = 0;
        for line in reader.lines() {
            if !line?.trim().is_empty() {
                sequence += 1;
            }
        }

        Ok(Self {
            file,
            path: path.to_path_buf(),
            sequence,
        })
    }

    /// Append a result; returns its sequence number
    pub fn append(&mut self, result: &JobResult) -> Result<u64, LedgerError> {
        let entry = LedgerEntry {
            seq: self.sequence + 1,
            result: result.clone(),
        };
        let line = serde_json::to_string(&entry).map_err(|source| LedgerError::Json {
            line: entry.seq as usize,
            source,
        })?;
        writeln!(self.file, "{}", line)?;
        self.file.sync_all()?;
        self.sequence = entry.seq;
        Ok(self.sequence)
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every entry; a missing ledger is empty
    pub fn replay(path: &Path) -> Result<Vec<LedgerEntry>, LedgerError> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let entry: LedgerEntry = serde_json::from_str(&line)
                .map_err(|source| LedgerError::Json { line: i + 1, source })?;
            entries.push(entry);
        }

        Ok(entries)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
