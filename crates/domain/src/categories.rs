//! Category labels and their delimited storage encoding.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Separator used when categories are stored as a single string.
///
/// Labels are not escaped, so a label containing the delimiter does not
/// survive a round trip.
pub const CATEGORY_DELIMITER: char = ',';

/// Ordered list of free-text labels attached to a task.
///
/// Stored as one comma-joined string; an empty list is stored as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Categories(Vec<String>);

impl Categories {
    /// Empty labels are dropped, matching what [`Categories::decode`] yields.
    #[must_use]
    pub fn new(mut labels: Vec<String>) -> Self {
        labels.retain(|label| !label.is_empty());
        Self(labels)
    }

    /// Splits a stored string, dropping empty elements.
    #[must_use]
    pub fn decode(encoded: &str) -> Self {
        Self(
            encoded
                .split(CATEGORY_DELIMITER)
                .filter(|label| !label.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    #[must_use]
    pub fn decode_optional(encoded: Option<&str>) -> Self {
        encoded.map(Self::decode).unwrap_or_default()
    }

    /// Joins the labels for storage, `None` when there are none.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.join(&CATEGORY_DELIMITER.to_string()))
        }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|candidate| candidate == label)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds the label if missing, removes it if present.
    pub fn toggle(&mut self, label: &str) {
        if let Some(position) = self.0.iter().position(|candidate| candidate == label) {
            self.0.remove(position);
        } else {
            self.0.push(label.to_string());
        }
    }
}

impl From<Vec<String>> for Categories {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl<'a> IntoIterator for &'a Categories {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        Ok(Self::decode_optional(encoded.as_deref()))
    }
}
