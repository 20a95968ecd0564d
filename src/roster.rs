//! People who may check in, merged from a flat file and/or a roster segment.

use crate::errors::{AppError, AppResult};
use crate::store::RowStore;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

pub trait RosterSource {
    fn list_people(&self) -> AppResult<BTreeSet<String>>;
}

/// One name per line; blank lines are ignored and a missing file is empty.
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RosterSource for FileRoster {
    fn list_people(&self) -> AppResult<BTreeSet<String>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeSet::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// First column of every row of a roster segment (e.g. `TEACHER_NAMES`).
pub struct SegmentRoster<S: ?Sized> {
    store: Arc<S>,
    segment: String,
}

impl<S: RowStore + ?Sized> SegmentRoster<S> {
    pub fn new(store: Arc<S>, segment: impl Into<String>) -> Self {
        Self {
            store,
            segment: segment.into(),
        }
    }
}

impl<S: RowStore + ?Sized> RosterSource for SegmentRoster<S> {
    fn list_people(&self) -> AppResult<BTreeSet<String>> {
        let rows = self
            .store
            .read_all(&self.segment)
            .map_err(AppError::into_store_unavailable)?;

        Ok(rows
            .iter()
            .filter_map(|row| row.first())
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Union of every source, deduplicated and sorted.
pub fn merged(sources: &[&dyn RosterSource]) -> AppResult<BTreeSet<String>> {
    let mut people = BTreeSet::new();
    for src in sources {
        people.extend(src.list_people()?);
    }
    Ok(people)
}

/// Accept `person` if it is non-empty and, when the roster has entries,
/// listed in it.
pub fn admit(roster: &BTreeSet<String>, person: &str) -> AppResult<String> {
    let person = person.trim();
    if person.is_empty() {
        return Err(AppError::EmptyPerson);
    }
    if !roster.is_empty() && !roster.contains(person) {
        return Err(AppError::UnknownPerson(person.to_string()));
    }
    Ok(person.to_string())
}
