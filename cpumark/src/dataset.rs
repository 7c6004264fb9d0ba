use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::Context;

use crate::common::NOT_AVAILABLE;
use crate::record::{CpuRecord, COLUMNS};

/// A previously written output file, reloaded so user-added columns survive
/// the next run.
pub struct PreviousData {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl PreviousData {
    /// Read the previous dataset from `path`. A missing file is not an
    /// error - there is simply nothing to carry over on the first run.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path)
            .with_context(|| format!("unable to read previous dataset '{}'", path.display()))?;
        Ok(Some(Self::read_csv(file)?))
    }

    pub fn read_csv<R: io::Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv = csv::Reader::from_reader(reader);
        let headers = csv.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for row in csv.records() {
            rows.push(row?.iter().map(|f| f.to_string()).collect());
        }
        Ok(Self { headers, rows })
    }

    /// Columns the scraper does not produce itself.
    pub fn auxiliary_columns(&self) -> impl Iterator<Item = &String> {
        self.headers
            .iter()
            .filter(|h| !COLUMNS.contains(&h.as_str()))
    }

    /// Value of `column` for the first row whose Name matches `name`.
    /// Duplicate names resolve to the first match; that is a documented
    /// limitation of name-keyed merging, not something to fix silently.
    pub fn value_for(&self, name: &str, column: &str) -> Option<&str> {
        let name_at = self.headers.iter().position(|h| h == "Name")?;
        let column_at = self.headers.iter().position(|h| h == column)?;
        self.rows
            .iter()
            .find(|row| row.get(name_at).map(String::as_str) == Some(name))
            .and_then(|row| row.get(column_at))
            .map(String::as_str)
    }
}

/// The assembled output dataset: one record per requested CPU plus the
/// auxiliary column names, in their original order.
pub struct Dataset {
    pub records: Vec<CpuRecord>,
    pub aux_columns: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<CpuRecord>) -> Self {
        Self {
            records,
            aux_columns: Vec::new(),
        }
    }

    /// Carry auxiliary columns forward from a previous dataset, matched by
    /// exact Name. Records without a matching old row get N/A.
    pub fn merge_previous(&mut self, previous: &PreviousData) {
        for column in previous.auxiliary_columns() {
            for record in &mut self.records {
                let value = previous
                    .value_for(&record.name, column)
                    .unwrap_or(NOT_AVAILABLE);
                record.aux.insert(column.clone(), value.to_string());
            }
            self.aux_columns.push(column.clone());
        }
    }

    /// Write the whole dataset: the declared columns in their fixed order,
    /// then the auxiliary columns.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let header: Vec<&str> = COLUMNS
            .iter()
            .copied()
            .chain(self.aux_columns.iter().map(String::as_str))
            .collect();
        csv.write_record(&header)?;

        for record in &self.records {
            let row: Vec<&str> = COLUMNS
                .iter()
                .map(|column| record.field(column))
                .chain(self.aux_columns.iter().map(|column| {
                    record
                        .aux
                        .get(column)
                        .map(String::as_str)
                        .unwrap_or(NOT_AVAILABLE)
                }))
                .collect();
            csv.write_record(&row)?;
        }

        csv.flush()?;
        Ok(())
    }
}
