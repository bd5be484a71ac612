//! Friendship edge status.
//!
//! A friendship is a directed edge between two users. A one-sided add
//! creates a PENDING edge; once the other side adds back, both directed
//! edges become CONFIRMED. Removing an edge returns it to absent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Status of a directed friendship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FriendshipStatus {
    Pending,
    Confirmed,
}

impl FriendshipStatus {
    /// Database representation of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "PENDING",
            FriendshipStatus::Confirmed => "CONFIRMED",
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FriendshipStatus {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(FriendshipStatus::Pending),
            "CONFIRMED" => Ok(FriendshipStatus::Confirmed),
            other => Err(crate::error::CoreError::Internal(format!(
                "Unknown friendship status in storage: '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_storage_form() {
        for status in [FriendshipStatus::Pending, FriendshipStatus::Confirmed] {
            assert_eq!(status.as_str().parse::<FriendshipStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_storage_form_is_an_internal_error() {
        assert!("FROZEN".parse::<FriendshipStatus>().is_err());
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&FriendshipStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }
}
