use crate::Value;

/// What the builder knows about the columns of the next statement.
///
/// The variant is picked by the caller: a plain list renders as `a, b, c`, an assignment
/// list renders as `a = 1, b = 'x'`. Nothing is inferred from the shape of the data.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnSpec {
    /// Already formatted text, emitted verbatim.
    Raw(String),
    /// Column names (or values) joined by `, `.
    List(Vec<Value>),
    /// `column = value` pairs joined by `, `.
    Assignments(Vec<(String, Value)>),
}

impl ColumnSpec {
    pub fn raw(text: impl Into<String>) -> Self {
        ColumnSpec::Raw(text.into())
    }

    pub fn list<V: Into<Value>>(items: impl IntoIterator<Item = V>) -> Self {
        ColumnSpec::List(items.into_iter().map(Into::into).collect())
    }

    pub fn assignments<K: Into<String>, V: Into<Value>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        ColumnSpec::Assignments(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// True when rendering would produce an empty string.
    pub fn is_empty(&self) -> bool {
        match self {
            ColumnSpec::Raw(v) => v.is_empty(),
            ColumnSpec::List(v) => v.is_empty(),
            ColumnSpec::Assignments(v) => v.is_empty(),
        }
    }

    /// Number of entries (a raw spec counts as one).
    pub fn len(&self) -> usize {
        match self {
            ColumnSpec::Raw(v) => !v.is_empty() as usize,
            ColumnSpec::List(v) => v.len(),
            ColumnSpec::Assignments(v) => v.len(),
        }
    }

    /// The values carried by the spec, without the keys of an assignment list.
    pub fn values(&self) -> Vec<&Value> {
        match self {
            ColumnSpec::Raw(..) => Vec::new(),
            ColumnSpec::List(v) => v.iter().collect(),
            ColumnSpec::Assignments(v) => v.iter().map(|(_, v)| v).collect(),
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(value: &str) -> Self {
        ColumnSpec::Raw(value.into())
    }
}

impl From<String> for ColumnSpec {
    fn from(value: String) -> Self {
        ColumnSpec::Raw(value)
    }
}

impl From<Vec<Value>> for ColumnSpec {
    fn from(value: Vec<Value>) -> Self {
        ColumnSpec::List(value)
    }
}

impl From<Vec<&str>> for ColumnSpec {
    fn from(value: Vec<&str>) -> Self {
        ColumnSpec::list(value)
    }
}

impl<const N: usize> From<[&str; N]> for ColumnSpec {
    fn from(value: [&str; N]) -> Self {
        ColumnSpec::list(value)
    }
}

impl<K: Into<String>> From<Vec<(K, Value)>> for ColumnSpec {
    fn from(value: Vec<(K, Value)>) -> Self {
        ColumnSpec::assignments(value)
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for ColumnSpec {
    fn from(value: [(K, Value); N]) -> Self {
        ColumnSpec::assignments(value)
    }
}
