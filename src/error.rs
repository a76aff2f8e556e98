// Errors surfaced by the /proc parsers.  Queries that return text fall back to their defaults
// instead; these are for numeric derivations that cannot proceed.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The file or directory could not be opened or read.
    #[error("Unable to read {path}")]
    NotFound { path: String },

    /// A required key or column is absent.
    #[error("Could not find {field} in {path}")]
    MissingField { field: String, path: String },

    /// A token was present but could not be converted to a number.
    #[error("Could not parse {field} in {path}: {value:?}")]
    Parse {
        field: String,
        path: String,
        value: String,
    },
}

impl Error {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn missing(field: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            path: path.into(),
        }
    }

    pub fn parse(
        field: impl Into<String>,
        path: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Parse {
            field: field.into(),
            path: path.into(),
            value: value.into(),
        }
    }
}

#[test]
pub fn error_display_test() {
    assert!(Error::not_found("/proc/meminfo").to_string() == "Unable to read /proc/meminfo");
    assert!(
        Error::missing("MemTotal:", "/proc/meminfo").to_string()
            == "Could not find MemTotal: in /proc/meminfo"
    );
    assert!(
        Error::parse("processes", "/proc/stat", "abc").to_string()
            == "Could not parse processes in /proc/stat: \"abc\""
    );
}
