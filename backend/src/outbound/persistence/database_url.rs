//! Database URL resolution shared by the maintenance binaries.

use std::io;

/// Environment variable consulted when no URL is passed explicitly.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Pick the explicit URL, else the environment's.
///
/// # Errors
/// Returns [`io::ErrorKind::InvalidInput`] when the chosen value is blank or
/// neither source is set.
pub fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    match from_env {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        )),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )),
    }
}
