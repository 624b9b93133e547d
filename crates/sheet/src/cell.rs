use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a cell value in a sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// True for `Null` and the empty string
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Value equality used by searches.
    ///
    /// Identical to `==` except that integers and floats compare
    /// numerically, so a typed `5` finds a cell loaded as `5.0`. The
    /// comparison is exact: a float only equals an integer it converts
    /// back to without rounding.
    #[must_use]
    pub fn matches(&self, other: &CellValue) -> bool {
        match (self, other) {
            (CellValue::Int(a), CellValue::Float(b)) | (CellValue::Float(b), CellValue::Int(a)) => {
                int_equals_float(*a, *b)
            }
            _ => self == other,
        }
    }

    /// Try to get the value as an integer
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => Some(*f as i64),
            CellValue::Bool(b) => Some(i64::from(*b)),
            CellValue::String(s) => s.parse().ok(),
            CellValue::Null => None,
        }
    }

    /// Get the value as a string
    #[must_use]
    pub fn as_str(&self) -> String {
        self.to_string()
    }

    /// Parse a string into a `CellValue` with type inference
    /// Tries: null -> bool -> int -> float -> string
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        // "1"/"0" stay integers; only the literal words become booleans
        match trimmed.to_lowercase().as_str() {
            "true" => return CellValue::Bool(true),
            "false" => return CellValue::Bool(false),
            _ => {}
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            return CellValue::Float(f);
        }

        CellValue::String(s.to_string())
    }
}

// i64::MIN as f64 is exactly -2^63; 2^63 itself is out of range.
fn int_equals_float(i: i64, f: f64) -> bool {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("  "), CellValue::Null);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(CellValue::parse("true"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("FALSE"), CellValue::Bool(false));
        assert_eq!(
            CellValue::parse("yes"),
            CellValue::String("yes".to_string())
        );
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse("-123"), CellValue::Int(-123));
        assert_eq!(CellValue::parse("2.5"), CellValue::Float(2.5));
    }

    #[test]
    fn test_parse_string_keeps_original_text() {
        assert_eq!(
            CellValue::parse(" hello "),
            CellValue::String(" hello ".to_string())
        );
    }

    #[test]
    fn test_matches_numeric_across_types() {
        assert!(CellValue::Int(5).matches(&CellValue::Float(5.0)));
        assert!(CellValue::Float(5.0).matches(&CellValue::Int(5)));
        assert!(!CellValue::Int(5).matches(&CellValue::Float(5.5)));
        assert!(!CellValue::Int(1).matches(&CellValue::Bool(true)));
        assert!(!CellValue::from("5").matches(&CellValue::Int(5)));
    }

    #[test]
    fn test_matches_large_integers_exactly() {
        let big = 9_007_199_254_740_993_i64; // 2^53 + 1, not representable as f64
        assert!(!CellValue::Int(big).matches(&CellValue::Float(9_007_199_254_740_992.0)));
        assert!(!CellValue::Float(9_007_199_254_740_992.0).matches(&CellValue::Int(big)));
        assert!(CellValue::Int(big - 1).matches(&CellValue::Float(9_007_199_254_740_992.0)));
        assert!(CellValue::Int(i64::MIN).matches(&CellValue::Float(-9_223_372_036_854_775_808.0)));
        assert!(!CellValue::Int(i64::MAX).matches(&CellValue::Float(9_223_372_036_854_775_808.0)));
        assert!(!CellValue::Int(0).matches(&CellValue::Float(f64::NAN)));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(CellValue::from("Total").matches(&CellValue::from("Total")));
        assert!(!CellValue::from("Total").matches(&CellValue::from("total")));
    }

    #[test]
    fn test_is_empty() {
        assert!(CellValue::Null.is_empty());
        assert!(CellValue::from("").is_empty());
        assert!(!CellValue::from(" ").is_empty());
        assert!(!CellValue::Int(0).is_empty());
        assert!(!CellValue::Bool(false).is_empty());
    }

    #[test]
    fn test_json_shape() {
        let row = vec![
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Int(1),
            CellValue::Float(2.5),
            CellValue::from("a"),
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"[null,true,1,2.5,"a"]"#);

        let back: Vec<CellValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::Float(3.9).as_int(), Some(3));
        assert_eq!(CellValue::Bool(true).as_int(), Some(1));
        assert_eq!(CellValue::String("42".to_string()).as_int(), Some(42));
        assert_eq!(CellValue::Null.as_int(), None);
        assert_eq!(CellValue::from(Some(7)), CellValue::Int(7));
        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
    }
}
