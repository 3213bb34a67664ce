use crate::domain::form::FormState;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Reads a saved form from JSON.
///
/// Fields left out of the file are treated as not yet filled in, and
/// `childAge` may be written as text or as a number.
pub fn read_draft<R: Read>(source: R) -> Result<FormState> {
    Ok(serde_json::from_reader(source)?)
}

pub fn load_draft(path: &Path) -> Result<FormState> {
    let file = File::open(path)?;
    read_draft(BufReader::new(file))
}
