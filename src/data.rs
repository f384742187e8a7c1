//! Time/absorbance input table.

use crate::config::InputConfig;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::{fs::File, io::Read, path::Path};

/// Ordered time/absorbance measurements.
///
/// Absorbance is guaranteed to be finite and strictly positive, so every
/// order transform is defined.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    headers: [String; 2],
    time: Vec<f64>,
    absorbance: Vec<f64>,
}

impl Table {
    /// Create a table from time and absorbance columns.
    ///
    /// # Errors
    /// Returns an error if the columns differ in length, have fewer than two
    /// rows, contain non-finite values or non-positive absorbance.
    pub fn new(time: Vec<f64>, absorbance: Vec<f64>) -> Result<Self> {
        let n_rows = time.len();
        if n_rows != absorbance.len() {
            bail!(
                "time and absorbance columns must have the same length, but have {n_rows} and {}",
                absorbance.len()
            );
        }
        if n_rows < 2 {
            bail!("table must have at least 2 rows, but has {n_rows}");
        }

        for (i_row, (&t, &a)) in time.iter().zip(&absorbance).enumerate() {
            let row = i_row + 1;
            if !t.is_finite() {
                bail!("time in row {row} must be finite, but is {t}");
            }
            if !a.is_finite() || a <= 0.0 {
                bail!("absorbance in row {row} must be finite and positive, but is {a}");
            }
        }

        if let Some(i_row) = time.windows(2).position(|pair| pair[1] <= pair[0]) {
            log::warn!(
                "time is not strictly increasing at row {}, continuing anyway",
                i_row + 2
            );
        }

        Ok(Self {
            headers: ["time".to_string(), "absorbance".to_string()],
            time,
            absorbance,
        })
    }

    /// Read a table from a delimited text file.
    ///
    /// Only the first two columns are used.
    pub fn from_path<P: AsRef<Path>>(file: P, cfg: &InputConfig) -> Result<Self> {
        let file = file.as_ref();
        let reader = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
        Self::from_reader(reader, cfg).with_context(|| format!("failed to read {file:?}"))
    }

    /// Read a table from any delimited text source.
    pub fn from_reader<R: Read>(reader: R, cfg: &InputConfig) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(cfg.has_headers)
            .delimiter(cfg.delimiter_byte()?)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut headers = None;
        if cfg.has_headers {
            let record = reader.headers().context("failed to read headers")?;
            if record.len() < 2 {
                bail!("table must have at least 2 columns, but has {}", record.len());
            }
            headers = Some([record[0].to_string(), record[1].to_string()]);
        }

        let mut time = Vec::new();
        let mut absorbance = Vec::new();
        for (i_row, record) in reader.records().enumerate() {
            let row = i_row + 1;
            let record = record.with_context(|| format!("failed to read row {row}"))?;
            if record.len() < 2 {
                bail!("row {row} must have at least 2 fields, but has {}", record.len());
            }
            time.push(parse_field(&record[0]).with_context(|| format!("invalid time in row {row}"))?);
            absorbance.push(
                parse_field(&record[1]).with_context(|| format!("invalid absorbance in row {row}"))?,
            );
        }

        let mut table = Self::new(time, absorbance)?;
        if let Some(headers) = headers {
            table.headers = headers;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String; 2] {
        &self.headers
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn absorbance(&self) -> &[f64] {
        &self.absorbance
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }
}

fn parse_field(field: &str) -> Result<f64> {
    field
        .parse()
        .with_context(|| format!("{field:?} is not a number"))
}
