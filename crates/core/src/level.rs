//! Academic level tags used to scope the catalog.
//!
//! Levels are a fixed enumeration (100/200/300/400). Stored as `SMALLINT` in
//! the `audios.level` column, guarded by a CHECK constraint with the same set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Level {
    L100,
    L200,
    L300,
    L400,
}

impl Level {
    /// Every level, in ascending order.
    pub const ALL: [Level; 4] = [Level::L100, Level::L200, Level::L300, Level::L400];

    pub fn as_i16(self) -> i16 {
        match self {
            Level::L100 => 100,
            Level::L200 => 200,
            Level::L300 => 300,
            Level::L400 => 400,
        }
    }

    /// Parse a level from a form field such as `"200"`.
    ///
    /// Anything other than one of the four known levels is an
    /// [`CoreError::InvalidFormat`].
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        raw.trim()
            .parse::<i32>()
            .ok()
            .and_then(|n| Level::try_from(n).ok())
            .ok_or_else(|| {
                CoreError::InvalidFormat(format!(
                    "Level must be one of 100, 200, 300, 400 (got '{raw}')"
                ))
            })
    }
}

impl TryFrom<i32> for Level {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(Level::L100),
            200 => Ok(Level::L200),
            300 => Ok(Level::L300),
            400 => Ok(Level::L400),
            other => Err(format!("unknown level {other}")),
        }
    }
}

impl From<Level> for i32 {
    fn from(level: Level) -> Self {
        i32::from(level.as_i16())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i16())
    }
}
