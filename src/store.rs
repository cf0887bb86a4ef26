use chrono::{DateTime, Local};
use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::grid::Grid;
use crate::saving;

/// One lead as it travels over the wire. Missing and explicitly-null fields
/// default to empty strings and unknown fields are ignored, so sloppy
/// producers still land.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadInput {
    #[serde(default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_to_default")]
    pub message: String,
}

fn null_to_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Translates between flat lead records and rows of the backing grid.
///
/// The timestamp on `append` is supplied by the caller, not by the client:
/// `date` is server-assigned at creation time.
pub trait RecordStore: Send + Sync {
    /// Adds one lead as the new last row, in header order.
    fn append(&self, lead: &LeadInput, date: DateTime<Local>) -> Result<(), StoreError>;

    /// Returns the full grid contents, header row included.
    fn read_all(&self) -> Result<Vec<Vec<String>>, StoreError>;
}

/// File-backed store: the grid lives in memory behind a mutex and is saved
/// to disk after every append.
pub struct SheetStore {
    path: PathBuf,
    grid: Mutex<Grid>,
}

impl SheetStore {
    /// Opens the sheet at `path`, loading a previously saved grid or
    /// starting a fresh header-only one.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let grid = if path.exists() {
            saving::load_grid(&path)?
        } else {
            Grid::with_header()
        };

        info!(
            "sheet store opened at {} ({} data rows)",
            path.display(),
            grid.data_rows().len()
        );

        Ok(SheetStore {
            path,
            grid: Mutex::new(grid),
        })
    }
}

impl RecordStore for SheetStore {
    fn append(&self, lead: &LeadInput, date: DateTime<Local>) -> Result<(), StoreError> {
        let mut grid = self.grid.lock().unwrap();

        grid.append_row(vec![
            lead.name.clone(),
            lead.email.clone(),
            lead.phone.clone(),
            lead.message.clone(),
            date.to_rfc3339(),
        ]);

        // keep memory and disk in step: a row that could not be saved
        // must not be readable either
        if let Err(e) = saving::save_grid(&grid, &self.path) {
            grid.rows.pop();
            return Err(e.into());
        }

        debug!("appended lead row ({} total)", grid.data_rows().len());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.grid.lock().unwrap().rows.clone())
    }
}
