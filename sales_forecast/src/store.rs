//! Named table storage
//!
//! The pipeline reads its input and publishes every intermediate table
//! through [`TableStore`]. Writes always replace a table wholesale; there is
//! no append or merge.

use crate::error::{ForecastError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A store of named tables with create-or-replace writes
pub trait TableStore {
    /// Read a whole table
    fn read_table(&self, name: &str) -> Result<DataFrame>;

    /// Replace (or create) a table; readers never observe a partial write
    fn replace_table(&mut self, name: &str, df: DataFrame) -> Result<()>;

    /// Whether the table exists
    fn has_table(&self, name: &str) -> bool;
}

fn missing_table(name: &str) -> ForecastError {
    ForecastError::DataError(format!("Table '{}' does not exist", name))
}

fn check_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid {
        return Err(ForecastError::InvalidParameter(format!(
            "Invalid table name '{}'",
            name
        )));
    }
    Ok(())
}

/// Tables kept as `<name>.csv` files inside one directory
#[derive(Debug, Clone)]
pub struct CsvTableStore {
    root: PathBuf,
}

impl CsvTableStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing a table
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.csv", name))
    }
}

impl TableStore for CsvTableStore {
    fn read_table(&self, name: &str) -> Result<DataFrame> {
        check_name(name)?;
        let path = self.table_path(name);
        if !path.exists() {
            return Err(missing_table(name));
        }

        let file = File::open(&path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        debug!(table = name, rows = df.height(), "read table");
        Ok(df)
    }

    fn replace_table(&mut self, name: &str, mut df: DataFrame) -> Result<()> {
        check_name(name)?;
        let target = self.table_path(name);
        let staging = self.root.join(format!(".{}.csv.tmp", name));

        let written = File::create(&staging)
            .map_err(ForecastError::from)
            .and_then(|mut file| {
                CsvWriter::new(&mut file)
                    .has_header(true)
                    .finish(&mut df)
                    .map_err(ForecastError::from)?;
                file.sync_all().map_err(ForecastError::from)
            });

        if let Err(err) = written {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }

        // rename within one directory swaps the table in one step
        fs::rename(&staging, &target)?;
        debug!(table = name, rows = df.height(), path = %target.display(), "replaced table");
        Ok(())
    }

    fn has_table(&self, name: &str) -> bool {
        check_name(name).is_ok() && self.table_path(name).exists()
    }
}

/// In-memory tables
#[derive(Debug, Clone, Default)]
pub struct MemoryTableStore {
    tables: HashMap<String, DataFrame>,
}

impl MemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl TableStore for MemoryTableStore {
    fn read_table(&self, name: &str) -> Result<DataFrame> {
        self.tables.get(name).cloned().ok_or_else(|| missing_table(name))
    }

    fn replace_table(&mut self, name: &str, df: DataFrame) -> Result<()> {
        check_name(name)?;
        self.tables.insert(name.to_string(), df);
        Ok(())
    }

    fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}
