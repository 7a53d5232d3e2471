//! Multi-valued query and form parameters

use compact_str::{CompactString, ToCompactString};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Ordered, multi-valued request parameters
///
/// A key may repeat with several values; insertion order is preserved on the
/// wire. Serializes as a sequence of key/value pairs, so the same value works
/// as a query string or as a form-urlencoded body.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(CompactString, CompactString)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single key/value pair
    pub fn push(&mut self, key: impl Into<CompactString>, value: impl ToCompactString) {
        self.pairs.push((key.into(), value.to_compact_string()));
    }

    /// Append all values for a key, preserving their order
    pub fn push_all<I>(&mut self, key: impl Into<CompactString>, values: I)
    where
        I: IntoIterator,
        I::Item: ToCompactString,
    {
        let key = key.into();
        for value in values {
            self.pairs.push((key.clone(), value.to_compact_string()));
        }
    }

    /// Fluent variant of [`QueryParams::push`]
    pub fn with(mut self, key: impl Into<CompactString>, value: impl ToCompactString) -> Self {
        self.push(key, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Key/value pairs in wire order
    pub fn pairs(&self) -> &[(CompactString, CompactString)] {
        &self.pairs
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.pairs.len()))?;
        for pair in &self.pairs {
            seq.serialize_element(pair)?;
        }
        seq.end()
    }
}

/// Typed form body, mirroring the parameter style of the GitLab API
///
/// Parameters flatten to ordered key/value pairs; optional parameters are
/// skipped when absent. Sent as a form-urlencoded request body.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct GitlabForm {
    params: QueryParams,
}

impl GitlabForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter
    pub fn with_param(mut self, key: impl Into<CompactString>, value: impl ToCompactString) -> Self {
        self.params.push(key, value);
        self
    }

    /// Add a parameter if the value is present
    pub fn with_optional_param<T: ToCompactString>(
        self,
        key: impl Into<CompactString>,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.with_param(key, value),
            None => self,
        }
    }

    /// The flattened key/value pairs in wire order
    pub fn params(&self) -> &QueryParams {
        &self.params
    }
}

impl Serialize for GitlabForm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.params.serialize(serializer)
    }
}
