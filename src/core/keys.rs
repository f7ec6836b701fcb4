use indexmap::IndexSet;

use crate::error::ScanResult;

/// Ordered set of KVM names to look for. Duplicates in the input keep their
/// first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyList {
    keys: IndexSet<String>,
}

impl KeyList {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a JSON array such as `["kvm1", "kvm2"]`.
    pub fn parse(raw: &str) -> ScanResult<Self> {
        let keys: Vec<String> = serde_json::from_str(raw.trim())?;
        Ok(Self::new(keys))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for KeyList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn parses_json_array_in_order() {
        let keys = KeyList::parse(r#"[ "zeta", "alpha", "mid" ]"#).unwrap();
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicates_keep_first_position() {
        let keys = KeyList::parse(r#"["a", "b", "a"]"#).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_unterminated_array() {
        let err = KeyList::parse("[alpha").unwrap_err();
        assert!(matches!(err, ScanError::MalformedKeyList(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn rejects_non_string_elements() {
        assert!(KeyList::parse("[1, 2]").is_err());
        assert!(KeyList::parse(r#"{"a": "b"}"#).is_err());
    }

    #[test]
    fn empty_array_is_valid() {
        let keys = KeyList::parse("[]").unwrap();
        assert!(keys.is_empty());
    }
}
