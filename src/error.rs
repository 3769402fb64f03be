use core::fmt;

/// Malformed flag or pronoun data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataError {
    /// Document is not valid JSON of the expected shape
    Parse,
    /// Document holds no entries
    Empty,
    /// A flag has no colors
    EmptyPalette,
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "malformed data document"),
            Self::Empty => write!(f, "data document has no entries"),
            Self::EmptyPalette => write!(f, "flag has an empty palette"),
        }
    }
}

/// Failure loading or saving the config document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError<E> {
    /// Backing storage failed
    Storage(E),
    /// Stored document could not be parsed
    Parse,
    /// Document does not fit the serialization buffer
    Serialize,
}

impl<E: fmt::Debug> fmt::Display for ConfigError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "config storage error: {:?}", e),
            Self::Parse => write!(f, "malformed config document"),
            Self::Serialize => write!(f, "config document does not fit its buffer"),
        }
    }
}

/// Errors surfaced by the top-level [`Badge`](crate::Badge)
///
/// `B` is the LED bus error, `P` the display pin error and `S` the
/// config storage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeError<B, P, S> {
    Bus(B),
    Pin(P),
    Config(ConfigError<S>),
    Data(DataError),
}

impl<B: fmt::Debug, P: fmt::Debug, S: fmt::Debug> fmt::Display for BadgeError<B, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "LED bus error: {:?}", e),
            Self::Pin(e) => write!(f, "display pin error: {:?}", e),
            Self::Config(e) => write!(f, "{}", e),
            Self::Data(e) => write!(f, "{}", e),
        }
    }
}
