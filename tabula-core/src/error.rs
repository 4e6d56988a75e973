/// Boxed source error coming from a driver.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type used by the public API.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the connection manager, the query builder and the column formatter.
///
/// Drivers report failures through `anyhow`, the [`Database`](crate::Database) converts them
/// into [`Error::Connection`] or [`Error::Query`] at the boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection could not be established.
    #[error("Could not connect to `{target}`")]
    Connection {
        target: String,
        #[source]
        source: BoxError,
    },

    /// Statement preparation or execution failed.
    #[error("Error while running the query:\n{sql}")]
    Query {
        sql: String,
        #[source]
        source: BoxError,
    },

    /// The builder was asked to run before its required state was set.
    #[error(transparent)]
    Precondition(#[from] Precondition),

    /// The column formatter cannot render this value.
    #[error("Value {0} cannot be rendered as a column or literal")]
    UnsupportedValue(String),

    /// A connection option has a value that cannot be parsed.
    #[error("Invalid value `{value}` for connection option `{key}`")]
    InvalidOption { key: String, value: String },
}

impl Error {
    pub fn connection(target: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connection {
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn query(sql: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Query {
            sql: sql.into(),
            source: source.into(),
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(..))
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query { .. })
    }

    /// The precondition that failed, if this is a precondition error.
    pub fn precondition(&self) -> Option<Precondition> {
        match self {
            Self::Precondition(v) => Some(*v),
            _ => None,
        }
    }
}

/// Builder state missing when an operation was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("Table is not set")]
    TableNotSet,
    #[error("Columns are not set")]
    ColumnsNotSet,
    /// `delete` always needs a condition.
    #[error("Refusing to delete without a condition")]
    EmptyCondition,
    #[error("There are no rows to insert")]
    NoRows,
}
