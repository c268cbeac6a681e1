use std::fmt::Display;

/// A single untyped scalar cell value from a raw grid.
///
/// Loaders reduce every source cell to one of these four shapes; the parsers
/// never see richer types. Dates and times arrive as ISO-formatted text.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Builds a text value from anything string-like.
    pub fn text<S: Into<String>>(value: S) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for the blank/null cell.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Interprets the value as a boolean flag.
    ///
    /// Accepts native booleans and case-insensitive "true"/"false" text, the
    /// two shapes flag cells take in practice. Everything else (including
    /// `Empty`, whose default is decided by the caller) yields `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            Self::Text(value) if value.eq_ignore_ascii_case("true") => Some(true),
            Self::Text(value) if value.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    /// Returns the numeric content, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns borrowed text content, if the value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Renders the value as a column-name string, `None` when blank.
    ///
    /// Header cells may hold numbers or booleans; column names are always
    /// strings, so they render through `Display`.
    pub fn to_header_name(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => {
                // Integer-valued numbers print without a trailing ".0" so that
                // integer-like codes survive a round trip through text
                if value.fract() == 0.0 && value.is_finite() && value.abs() < 1e15 {
                    write!(f, "{}", *value as i64)
                } else {
                    write!(f, "{}", value)
                }
            }
            Self::Text(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_boolean_coercion() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::from("TRUE").as_bool(), Some(true));
        assert_eq!(Value::from("false").as_bool(), Some(false));
        assert_eq!(Value::Empty.as_bool(), None);
        assert_eq!(Value::from("yes").as_bool(), None);
        assert_eq!(Value::Number(1.0).as_bool(), None);
    }

    #[test]
    fn value_display_integer_like() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(1.5).to_string(), "1.5");
        assert_eq!(Value::Number(-3.0).to_string(), "-3");
        assert_eq!(Value::Empty.to_string(), "");
    }

    #[test]
    fn value_header_name() {
        assert_eq!(Value::from("Survey ID").to_header_name(), Some("Survey ID".to_owned()));
        assert_eq!(Value::Number(2024.0).to_header_name(), Some("2024".to_owned()));
        assert_eq!(Value::Empty.to_header_name(), None);
    }
}
