use serde::{Deserialize, Serialize};

/// Filter value meaning "apply no constraint".
pub const ALL: &str = "All";

/// One entry of a dropdown or filter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// The "no constraint" entry shown first in every filter.
    pub fn all() -> Self {
        Self::new(ALL, "All")
    }
}

/// True when `value` is the sentinel (or empty, which screens treat the same).
pub fn is_unconstrained(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ALL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_detection() {
        assert!(is_unconstrained("All"));
        assert!(is_unconstrained(""));
        assert!(is_unconstrained("  "));
        assert!(!is_unconstrained("all"));
        assert!(!is_unconstrained("Active"));
    }
}
