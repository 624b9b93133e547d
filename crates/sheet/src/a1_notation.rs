use crate::error::{QueryError, Result};

/// A 0-based (row, column) position in a sheet
pub type CellIndex = (usize, usize);

/// Parse A1-style cell notation (e.g., "A1", "z99", "$AA$1")
/// Returns (row, column) as 0-based indices
pub fn resolve_cell(notation: &str) -> Result<CellIndex> {
    let invalid = || QueryError::InvalidReference(notation.to_string());

    let body = notation.strip_prefix('$').unwrap_or(notation);
    let split_pos = body
        .find(|c: char| !c.is_ascii_alphabetic())
        .ok_or_else(invalid)?;

    let (col_part, rest) = body.split_at(split_pos);
    let row_part = rest.strip_prefix('$').unwrap_or(rest);

    if col_part.is_empty() || row_part.is_empty() || !row_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let col = column_letters_to_index(col_part).map_err(|_| invalid())?;
    let row = row_part.parse::<usize>().map_err(|_| invalid())?;

    // Row numbers are 1-based in notation
    if row == 0 {
        return Err(invalid());
    }

    Ok((row - 1, col))
}

/// Parse A1-style range notation (e.g., "A1:C3")
/// Returns ((start_row, start_col), (end_row, end_col)) as 0-based indices.
///
/// Ends are returned as written; an inverted range such as "C3:A1" is not
/// reordered. A reference without a colon is a 1x1 range.
pub fn resolve_range(notation: &str) -> Result<(CellIndex, CellIndex)> {
    let parts: Vec<&str> = notation.split(':').collect();

    match parts.as_slice() {
        [single] => {
            let cell = resolve_cell(single)?;
            Ok((cell, cell))
        }
        [start, end] => Ok((resolve_cell(start)?, resolve_cell(end)?)),
        _ => Err(QueryError::InvalidReference(notation.to_string())),
    }
}

/// Shift a position by a signed (rows, cols) delta.
///
/// No bounds checking against any sheet happens here; `None` only means the
/// result would lie above row 0 or left of column 0.
pub fn offset(base: CellIndex, delta: (isize, isize)) -> Option<CellIndex> {
    let row = base.0.checked_add_signed(delta.0)?;
    let col = base.1.checked_add_signed(delta.1)?;
    Some((row, col))
}

/// Convert column letters to 0-based column index
/// A=0, B=1, ... Z=25, AA=26, AB=27, ... (case-insensitive)
pub fn column_letters_to_index(letters: &str) -> Result<usize> {
    let invalid = || QueryError::InvalidReference(letters.to_string());

    if letters.is_empty() {
        return Err(invalid());
    }

    let mut col: usize = 0;
    for b in letters.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = usize::from(b.to_ascii_uppercase() - b'A') + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    Ok(col - 1)
}

/// Convert 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_index_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    col += 1;

    while col > 0 {
        col -= 1;
        result.insert(0, char::from((col % 26) as u8 + b'A'));
        col /= 26;
    }

    result
}

/// Convert (row, col) to A1 notation
/// (0, 0) = "A1", (0, 1) = "B1", etc.
pub fn to_a1_notation(row: usize, col: usize) -> String {
    format!("{}{}", column_index_to_letters(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_cell() {
        assert_eq!(resolve_cell("A1").unwrap(), (0, 0));
        assert_eq!(resolve_cell("B3").unwrap(), (2, 1));
        assert_eq!(resolve_cell("A2").unwrap(), (1, 0));
        assert_eq!(resolve_cell("Z1").unwrap(), (0, 25));
        assert_eq!(resolve_cell("AA1").unwrap(), (0, 26));
        assert_eq!(resolve_cell("AZ1").unwrap(), (0, 51));
        assert_eq!(resolve_cell("BA1").unwrap(), (0, 52));
        assert_eq!(resolve_cell("ZZ1").unwrap(), (0, 701));
        assert_eq!(resolve_cell("XFD1048576").unwrap(), (1_048_575, 16_383));

        // Case insensitive
        assert_eq!(resolve_cell("a1").unwrap(), (0, 0));
        assert_eq!(resolve_cell("aA1").unwrap(), (0, 26));
    }

    #[test]
    fn test_resolve_cell_absolute_markers() {
        assert_eq!(resolve_cell("$B$3").unwrap(), (2, 1));
        assert_eq!(resolve_cell("$B3").unwrap(), (2, 1));
        assert_eq!(resolve_cell("B$3").unwrap(), (2, 1));
        assert!(resolve_cell("B$$3").is_err());
    }

    #[test]
    fn test_resolve_cell_errors() {
        for bad in ["", "A", "1", "A0", "123", "ABC", "A1B", "1A", "A-1", "A 1", "Ä1"] {
            assert!(
                matches!(resolve_cell(bad), Err(QueryError::InvalidReference(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_resolve_cell_overflowing_column() {
        let letters = "Z".repeat(40);
        assert!(resolve_cell(&format!("{letters}1")).is_err());
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range("A1:B2").unwrap(), ((0, 0), (1, 1)));
        assert_eq!(resolve_range("C5").unwrap(), ((4, 2), (4, 2)));
        assert_eq!(resolve_range("b2:d10").unwrap(), ((1, 1), (9, 3)));
    }

    #[test]
    fn test_resolve_range_keeps_inverted_order() {
        assert_eq!(resolve_range("C3:A1").unwrap(), ((2, 2), (0, 0)));
    }

    #[test]
    fn test_resolve_range_errors() {
        assert!(resolve_range("A1:B2:C3").is_err());
        assert!(resolve_range("A1:").is_err());
        assert!(resolve_range(":B2").is_err());
        assert!(resolve_range("A1:2B").is_err());
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset((1, 1), (0, 1)), Some((1, 2)));
        assert_eq!(offset((1, 1), (-1, -1)), Some((0, 0)));
        assert_eq!(offset((4, 0), (10, 3)), Some((14, 3)));
        assert_eq!(offset((0, 3), (-1, 0)), None);
        assert_eq!(offset((3, 0), (0, -1)), None);
    }

    #[test]
    fn test_column_letters_to_index() {
        assert_eq!(column_letters_to_index("A").unwrap(), 0);
        assert_eq!(column_letters_to_index("c").unwrap(), 2);
        assert_eq!(column_letters_to_index("AA").unwrap(), 26);
        assert!(column_letters_to_index("").is_err());
        assert!(column_letters_to_index("A1").is_err());
    }

    #[test]
    fn test_column_index_to_letters() {
        assert_eq!(column_index_to_letters(0), "A");
        assert_eq!(column_index_to_letters(25), "Z");
        assert_eq!(column_index_to_letters(26), "AA");
        assert_eq!(column_index_to_letters(701), "ZZ");
        assert_eq!(column_index_to_letters(702), "AAA");
    }

    #[test]
    fn test_to_a1_notation() {
        assert_eq!(to_a1_notation(0, 0), "A1");
        assert_eq!(to_a1_notation(99, 25), "Z100");
        assert_eq!(to_a1_notation(0, 26), "AA1");
    }

    #[test]
    fn test_roundtrip() {
        for row in 0..10 {
            for col in 0..800 {
                let notation = to_a1_notation(row, col);
                assert_eq!(resolve_cell(&notation).unwrap(), (row, col));
                assert_eq!(
                    resolve_cell(&notation.to_lowercase()).map(|(r, c)| to_a1_notation(r, c)).unwrap(),
                    notation
                );
            }
        }
    }
}
