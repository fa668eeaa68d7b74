//! CSV codec for already-loaded extract content.
//!
//! - [`read_csv_rows`] deserializes raw rows (e.g. [`SalesRow`](crate::source::cosmos::SalesRow))
//!   from any reader
//! - [`write_csv_rows`] serializes output records, header first, in field order
//!
//! Locating and opening files stays with the caller.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};

/// Read CSV content with a header row into a typed `Vec<T>`.
///
/// Fields are trimmed; columns not named by `T` are ignored.
///
/// # Errors
/// Returns an error naming the record number if any row fails to deserialize.
pub fn read_csv_rows<T: DeserializeOwned, R: Read>(reader: R, delimiter: u8) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::<T>::new();
    for (i, rec) in rdr.deserialize::<T>().enumerate() {
        let v = rec.with_context(|| format!("parse CSV record #{}", i + 1))?;
        out.push(v);
    }
    Ok(out)
}

/// Write `data` as CSV with a header row.
///
/// # Returns
/// The number of rows written.
///
/// # Errors
/// Returns an error if any row fails to serialize or the writer fails to flush.
pub fn write_csv_rows<T: Serialize, W: Write>(writer: W, data: &[T]) -> Result<usize> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for (i, row) in data.iter().enumerate() {
        wtr.serialize(row)
            .with_context(|| format!("serialize CSV row #{}", i + 1))?;
    }
    wtr.flush().context("flush CSV writer")?;
    Ok(data.len())
}
