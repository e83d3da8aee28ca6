use std::fmt::{self, Display, Formatter};

/// The kind of error that occurred while settling a chat request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend answered with a non-success status.
    Rejected,
    /// The backend could not be reached.
    Connection,
    /// The backend answered, but the answer could not be understood.
    Malformed,
}

impl ErrorKind {
    /// Returns `true` if the backend itself reported the failure.
    ///
    /// Every other kind is treated as a transport failure by the widget.
    #[inline]
    pub fn is_server_reported(&self) -> bool {
        matches!(self, ErrorKind::Rejected)
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Rejected => write!(f, "Rejected"),
            ErrorKind::Connection => write!(f, "Connection error"),
            ErrorKind::Malformed => write!(f, "Malformed response"),
        }
    }
}
