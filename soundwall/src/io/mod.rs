//! File input and output helpers for alignment data and computed layouts.

use std::fs::File;
use std::io::{self, Read, Write};

use crate::wall::WallLayout;

pub mod landxml;

/// Reads a file to string.
pub fn read_to_string(path: &str) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes the provided string slice to the given file path, overwriting any
/// existing contents.
pub fn write_string(path: &str, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Writes a computed [`WallLayout`] to a JSON file for downstream emitters.
pub fn write_layout_json(path: &str, layout: &WallLayout) -> io::Result<()> {
    let json = serde_json::to_string_pretty(layout)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_string(path, &json)
}

/// Reads a [`WallLayout`] back from a JSON file.
pub fn read_layout_json(path: &str) -> io::Result<WallLayout> {
    let contents = read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
