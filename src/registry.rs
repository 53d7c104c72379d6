// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Mines Outcome Analyzer - Process-wide Table Registry

//! Loads the payout table at most once per process and hands out shared
//! snapshots. `reload` swaps in a fresh table; readers holding an older
//! `Arc` keep using it until they drop it.

use log::info;
use once_cell::sync::Lazy;
use std::sync::{Arc, RwLock};

use crate::error::SourceError;
use crate::source::PayoutSource;
use crate::table::PayoutTable;

#[derive(Debug, Default)]
pub struct TableRegistry {
    table: RwLock<Option<Arc<PayoutTable>>>,
}

static GLOBAL: Lazy<TableRegistry> = Lazy::new(TableRegistry::default);

/// The process-wide registry.
pub fn registry() -> &'static TableRegistry {
    &GLOBAL
}

impl TableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached table, loading it from `source` on first use.
    pub fn get_or_load(&self, source: &dyn PayoutSource) -> Result<Arc<PayoutTable>, SourceError> {
        if let Some(table) = self.current()? {
            return Ok(table);
        }
        let mut slot = self.table.write().map_err(|_| SourceError::Poisoned)?;
        // Another caller may have loaded while we waited for the write lock.
        if let Some(table) = slot.as_ref() {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(source.load_payout_table()?);
        info!("loaded payout table from {} ({} hazard counts)", source.describe(), table.len());
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Replace the cached table. On failure the previous table stays in place.
    pub fn reload(&self, source: &dyn PayoutSource) -> Result<Arc<PayoutTable>, SourceError> {
        let table = Arc::new(source.load_payout_table()?);
        let mut slot = self.table.write().map_err(|_| SourceError::Poisoned)?;
        info!("reloaded payout table from {} ({} hazard counts)", source.describe(), table.len());
        *slot = Some(Arc::clone(&table));
        Ok(table)
    }

    /// Cached table without loading.
    pub fn current(&self) -> Result<Option<Arc<PayoutTable>>, SourceError> {
        let slot = self.table.read().map_err(|_| SourceError::Poisoned)?;
        Ok(slot.clone())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.current(), Ok(Some(_)))
    }
}
