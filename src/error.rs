use std::fmt;

/// A convenient result type wrapping [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub struct ExtentsError {
    pub map_width: f32,
    pub map_height: f32,
    pub resolution: f32,
}

#[derive(Debug)]
pub struct OutOfRangeError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug)]
pub struct SettingsError {
    pub reason: String,
}

impl fmt::Display for ExtentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cannot build a smooth mesh over degenerate extents {}x{} at resolution {}!",
            self.map_width, self.map_height, self.resolution
        )
    }
}

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mesh index {} is out of range for a buffer of {} corners!",
            self.index, self.len
        )
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load smooth mesh settings! {}", self.reason)
    }
}

impl std::error::Error for ExtentsError {}

impl std::error::Error for OutOfRangeError {}

impl std::error::Error for SettingsError {}

#[derive(Debug)]
pub enum Error {
    ExtentsError(ExtentsError),
    OutOfRangeError(OutOfRangeError),
    SettingsError(SettingsError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ExtentsError(err) => err.fmt(f),
            Error::OutOfRangeError(err) => err.fmt(f),
            Error::SettingsError(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ExtentsError(err) => Some(err),
            Error::OutOfRangeError(err) => Some(err),
            Error::SettingsError(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        return Error::SettingsError(SettingsError {
            reason: value.to_string(),
        });
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        return Error::SettingsError(SettingsError {
            reason: value.to_string(),
        });
    }
}
