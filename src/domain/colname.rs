use std::fmt;

const ALPHABET_LEN: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnNameError {
    Empty,
    InvalidCharacter(char),
    Overflow,
}

impl fmt::Display for ColumnNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnNameError::Empty => write!(f, "column name is empty"),
            ColumnNameError::InvalidCharacter(c) => {
                write!(f, "column name contains invalid character: {c:?}")
            }
            ColumnNameError::Overflow => {
                write!(f, "column name exceeds the representable index range")
            }
        }
    }
}

impl std::error::Error for ColumnNameError {}

fn letter(digit: usize) -> char {
    (b'A' + digit as u8) as char
}

/// Spreadsheet-style letter name for a 0-indexed column (0 -> "A", 25 -> "Z",
/// 26 -> "AA"). Bijective base-26: there is no letter for zero, so the most
/// significant base-26 digit is decremented by one before mapping.
pub fn column_index_to_name(j: usize) -> String {
    if j < ALPHABET_LEN {
        return letter(j).to_string();
    }

    // Base-26 expansion of j, least significant digit first.
    let mut j = j;
    let mut digits = Vec::new();
    while j >= ALPHABET_LEN {
        digits.push(j % ALPHABET_LEN);
        j /= ALPHABET_LEN;
    }
    digits.push(j);

    let last = digits.len() - 1;
    let mut name = String::with_capacity(digits.len());
    name.push(letter(digits[last] - 1));
    for &digit in digits[..last].iter().rev() {
        name.push(letter(digit));
    }
    name
}

/// Exact inverse of [`column_index_to_name`]. The leading letter counts as
/// its alphabet position plus one, every subsequent letter as its raw
/// position, summed most significant first.
pub fn name_to_column_index(name: &str) -> Result<usize, ColumnNameError> {
    if name.is_empty() {
        return Err(ColumnNameError::Empty);
    }

    let mut digits = Vec::with_capacity(name.len());
    for c in name.chars() {
        if !c.is_ascii_uppercase() {
            return Err(ColumnNameError::InvalidCharacter(c));
        }
        digits.push(c as usize - 'A' as usize);
    }

    if digits.len() == 1 {
        return Ok(digits[0]);
    }

    digits[0] += 1;
    let mut index = 0usize;
    for &digit in &digits {
        index = index
            .checked_mul(ALPHABET_LEN)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or(ColumnNameError::Overflow)?;
    }
    Ok(index)
}
