// 📋 Roster Import - CSV → registered students
//
// Rows go through the normal owner-guarded registration path, so a roster
// can never bypass validation.

use crate::guard::Address;
use crate::shared::SharedRegistry;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One roster line (`name,age`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    pub name: String,
    pub age: u16,
}

pub fn load_roster(path: &Path) -> Result<Vec<RosterRow>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open roster file: {:?}", path))?;

    let mut rows = Vec::new();
    for (line, result) in rdr.deserialize().enumerate() {
        let row: RosterRow = result.with_context(|| format!("Failed to parse roster row {}", line + 1))?;
        rows.push(row);
    }

    Ok(rows)
}

/// Register every row in order, returning the assigned ids.
///
/// Stops at the first rejected row; rows before it stay registered.
pub fn seed_registry(registry: &SharedRegistry, caller: &Address, rows: &[RosterRow]) -> Result<Vec<u64>> {
    let mut ids = Vec::with_capacity(rows.len());

    for (line, row) in rows.iter().enumerate() {
        let id = registry
            .register_student(caller, &row.name, row.age)
            .with_context(|| format!("Roster row {} ({:?}) rejected", line + 1, row.name))?;
        ids.push(id);
    }

    tracing::info!(count = ids.len(), "roster seeded");
    Ok(ids)
}
