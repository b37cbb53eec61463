//! ASCII tile map
//!
//! One row per non-empty line, `#` marks a blocked tile, anything else is
//! walkable. Rows may be ragged; everything past the end of a short row is
//! treated as blocked, as is anything outside the grid.

use std::fs;
use std::path::Path;

pub struct Map {
    rows: Vec<String>,
}

impl Map {
    /// Load a map from a plain-text file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let text = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("failed to read map {}: {}", path.as_ref().display(), e))?;
        Self::parse(&text)
    }

    /// Parse map rows from text (non-empty lines only)
    pub fn parse(text: &str) -> Result<Self, String> {
        let rows: Vec<String> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect();

        if rows.is_empty() {
            return Err("map contains no rows".to_owned());
        }

        Ok(Self { rows })
    }

    /// True when (x, y) cannot be walked through or seen through
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || y >= self.rows.len() as i32 {
            return true;
        }
        let row = &self.rows[y as usize];
        match row.as_bytes().get(x as usize) {
            Some(&cell) => cell == b'#',
            None => true,
        }
    }

    /// Width of the first row (the nominal grid width)
    pub fn width(&self) -> i32 {
        self.rows.first().map_or(0, |row| row.len() as i32)
    }

    pub fn height(&self) -> i32 {
        self.rows.len() as i32
    }
}
