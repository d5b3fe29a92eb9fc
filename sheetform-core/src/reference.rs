//! Cell and range references in A1 notation

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Cell reference with 1-based row and column (e.g., B3 is row 3, col 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Build a reference from 0-based source coordinates
    pub fn from_zero_based(row: u32, col: u32) -> Self {
        Self::new(row + 1, col + 1)
    }

    /// 0-based (row, col), as used by calamine
    pub fn to_zero_based(self) -> (u32, u32) {
        (self.row.saturating_sub(1), self.col.saturating_sub(1))
    }

    /// Convert to Excel-style reference (e.g., "A1")
    pub fn to_excel_ref(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row)
    }

    /// Parse a reference like "AA10". Absolute markers (`$`) are ignored.
    pub fn parse(cell_ref: &str) -> Option<Self> {
        let cell_ref = cell_ref.trim();
        let mut col = 0u32;
        let mut row_str = String::new();

        for ch in cell_ref.chars() {
            if ch == '$' {
                continue;
            }
            if ch.is_ascii_alphabetic() {
                // Letters after digits are not a cell reference
                if !row_str.is_empty() {
                    return None;
                }
                col = col
                    .checked_mul(26)?
                    .checked_add(ch.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
            } else if ch.is_ascii_digit() {
                row_str.push(ch);
            } else {
                return None;
            }
        }

        if col == 0 || row_str.is_empty() {
            return None;
        }

        let row = row_str.parse::<u32>().ok()?;
        if row == 0 {
            return None;
        }

        Some(Self::new(row, col))
    }
}

/// Convert a 1-based column number to letters (1 -> A, 26 -> Z, 27 -> AA)
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

impl PartialOrd for CellRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then_with(|| self.col.cmp(&other.col))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_excel_ref())
    }
}

/// Rectangular block of cells shown as one logical cell (e.g., "A1:C1")
///
/// Serialized as its string form so reports read the same whatever the
/// source format was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MergedRange {
    pub top_left: CellRef,
    pub bottom_right: CellRef,
}

impl MergedRange {
    pub fn new(top_left: CellRef, bottom_right: CellRef) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Build a range from 0-based (start_row, start_col) and (end_row, end_col)
    pub fn from_zero_based(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(
            CellRef::from_zero_based(start.0, start.1),
            CellRef::from_zero_based(end.0, end.1),
        )
    }

    /// Parse a range like "A1:B2". A single reference is a 1x1 range.
    pub fn parse(range: &str) -> Option<Self> {
        match range.split_once(':') {
            Some((start, end)) => Some(Self::new(CellRef::parse(start)?, CellRef::parse(end)?)),
            None => {
                let cell = CellRef::parse(range)?;
                Some(Self::new(cell, cell))
            }
        }
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.row >= self.top_left.row
            && cell.row <= self.bottom_right.row
            && cell.col >= self.top_left.col
            && cell.col <= self.bottom_right.col
    }
}

impl fmt::Display for MergedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top_left == self.bottom_right {
            write!(f, "{}", self.top_left)
        } else {
            write!(f, "{}:{}", self.top_left, self.bottom_right)
        }
    }
}

impl From<MergedRange> for String {
    fn from(range: MergedRange) -> Self {
        range.to_string()
    }
}

impl TryFrom<String> for MergedRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MergedRange::parse(&value).ok_or_else(|| format!("invalid merged range: {}", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(53), "BA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
    }

    #[test]
    fn test_zero_based_normalization() {
        assert_eq!(CellRef::from_zero_based(0, 0).to_string(), "A1");
        assert_eq!(CellRef::from_zero_based(2, 1).to_string(), "B3");
        assert_eq!(CellRef::from_zero_based(0, 26).to_string(), "AA1");
        assert_eq!(CellRef::new(3, 2).to_zero_based(), (2, 1));
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(CellRef::parse("A1"), Some(CellRef::new(1, 1)));
        assert_eq!(CellRef::parse("B2"), Some(CellRef::new(2, 2)));
        assert_eq!(CellRef::parse("AA1"), Some(CellRef::new(1, 27)));
        assert_eq!(CellRef::parse("$AB$10"), Some(CellRef::new(10, 28)));
        assert_eq!(CellRef::parse("A0"), None);
        assert_eq!(CellRef::parse("12"), None);
        assert_eq!(CellRef::parse("A1B"), None);
    }

    #[test]
    fn test_merged_range() {
        let range = MergedRange::parse("A1:C1").unwrap();
        assert_eq!(range.top_left, CellRef::new(1, 1));
        assert_eq!(range.bottom_right, CellRef::new(1, 3));
        assert_eq!(range.to_string(), "A1:C1");
        assert!(range.contains(CellRef::new(1, 2)));
        assert!(!range.contains(CellRef::new(2, 2)));

        assert_eq!(
            MergedRange::from_zero_based((2, 0), (4, 0)).to_string(),
            "A3:A5"
        );
        assert_eq!(MergedRange::parse("D4").unwrap().to_string(), "D4");
        assert_eq!(MergedRange::parse("D4:D4").unwrap().to_string(), "D4");
        assert!(MergedRange::parse("A1:").is_none());
    }

    #[test]
    fn test_merged_range_serializes_as_string() {
        let range = MergedRange::parse("B2:AA3").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "\"B2:AA3\"");
        let back: MergedRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut refs = vec![CellRef::new(2, 1), CellRef::new(1, 3), CellRef::new(1, 1)];
        refs.sort();
        assert_eq!(
            refs,
            vec![CellRef::new(1, 1), CellRef::new(1, 3), CellRef::new(2, 1)]
        );
    }
}
