//! CSV directory store: one `<segment>.csv` file per segment, header first.
//!
//! Appends write one fully encoded record with a single `write_all`; updates
//! rewrite the file into a temporary sibling and rename it over the original,
//! so a failure never leaves a half-written row behind.

use super::{ActivityLog, LogEntry, RowStore, now_stamp, validate_segment};
use crate::errors::{AppError, AppResult};
use csv::{ByteRecord, ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const LOG_FILE: &str = ".activity.csv";

#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn open(dir: &Path) -> AppResult<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// File backing `segment`.
    pub fn segment_path(&self, segment: &str) -> AppResult<PathBuf> {
        validate_segment(segment)?;
        Ok(self.dir.join(format!("{segment}.csv")))
    }

    fn log_path(&self) -> PathBuf {
        self.dir.join(LOG_FILE)
    }
}

/// Encode one record exactly as it will appear on disk.
fn encode_record(row: &[String]) -> AppResult<Vec<u8>> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    wtr.write_record(row)?;
    wtr.into_inner()
        .map_err(|e| AppError::Io(io::Error::other(e.to_string())))
}

/// Every record of a file as raw bytes, header included.
fn read_raw(path: &Path) -> AppResult<Vec<ByteRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut out = Vec::new();
    for rec in rdr.byte_records() {
        out.push(rec?);
    }
    Ok(out)
}

/// Fields of one record. A record that is not valid UTF-8 decodes to an
/// empty row, which keeps its position but never matches anything.
fn decode(rec: &ByteRecord) -> Vec<String> {
    rec.iter()
        .map(|field| std::str::from_utf8(field).map(String::from))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_default()
}

/// Every record of a file, header included.
fn read_records(path: &Path) -> AppResult<Vec<Vec<String>>> {
    Ok(read_raw(path)?.iter().map(decode).collect())
}

fn append_line(path: &Path, row: &[String]) -> AppResult<()> {
    let bytes = encode_record(row)?;
    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(&bytes)?;
    file.sync_data()?;
    Ok(())
}

impl RowStore for CsvStore {
    fn read_all(&self, segment: &str) -> AppResult<Vec<Vec<String>>> {
        let path = self.segment_path(segment)?;
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut records = read_records(&path)?;
        if !records.is_empty() {
            records.remove(0);
        }
        Ok(records)
    }

    fn append_row(&self, segment: &str, row: &[String]) -> AppResult<()> {
        let path = self.segment_path(segment)?;
        if !path.exists() {
            return Err(AppError::SegmentNotFound(segment.to_string()));
        }
        append_line(&path, row)
    }

    fn update_row(&self, segment: &str, index: usize, row: &[String]) -> AppResult<()> {
        let path = self.segment_path(segment)?;
        if !path.exists() {
            return Err(AppError::SegmentNotFound(segment.to_string()));
        }

        // Raw bytes, so rows that do not decode are written back untouched.
        let mut records = read_raw(&path)?;
        // records[0] is the header, so data row N sits at records[N].
        if index == 0 || index >= records.len() {
            return Err(AppError::RowNotFound {
                segment: segment.to_string(),
                index,
            });
        }
        records[index] = ByteRecord::from(row.to_vec());

        let tmp = self.dir.join(format!(".{segment}.csv.tmp"));
        {
            let mut wtr = WriterBuilder::new().flexible(true).from_path(&tmp)?;
            for rec in &records {
                wtr.write_byte_record(rec)?;
            }
            wtr.flush()?;
        }
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn segment_exists(&self, segment: &str) -> AppResult<bool> {
        Ok(self.segment_path(segment)?.exists())
    }

    fn create_segment(&self, segment: &str, header: &[String]) -> AppResult<()> {
        let path = self.segment_path(segment)?;
        let bytes = encode_record(header)?;

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(&bytes)?;
                file.sync_data()?;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn segments(&self) -> AppResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && !stem.starts_with('.')
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl ActivityLog for CsvStore {
    fn record(&self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        let path = self.log_path();
        if !path.exists() {
            fs::File::create(&path)?;
        }
        let row = [
            now_stamp(),
            operation.to_string(),
            target.to_string(),
            message.to_string(),
        ];
        append_line(&path, &row)
    }

    fn entries(&self) -> AppResult<Vec<LogEntry>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let entries = read_records(&path)?
            .into_iter()
            .enumerate()
            .map(|(i, mut rec)| {
                rec.resize(4, String::new());
                LogEntry {
                    id: i as i64 + 1,
                    date: rec[0].clone(),
                    operation: rec[1].clone(),
                    target: rec[2].clone(),
                    message: rec[3].clone(),
                }
            })
            .collect();
        Ok(entries)
    }
}
