use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::DomainError;

/// Team name value object
///
/// # Invariants
/// - Not empty once surrounding whitespace is removed
/// - Stored trimmed, so "Team A" and " Team A " are the same name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a new TeamName
    ///
    /// # Example
    /// ```
    /// use leaderboard_api::domain::team::TeamName;
    ///
    /// let name = TeamName::new("  Team A ").expect("valid name");
    /// assert_eq!(name.as_str(), "Team A");
    /// assert!(TeamName::new("   ").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Team name cannot be empty"));
        }

        Ok(TeamName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_name() {
        assert_eq!(TeamName::new("Team A").unwrap().as_str(), "Team A");
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(TeamName::new("\tTeam B  ").unwrap().as_str(), "Team B");
    }

    #[test]
    fn empty_name_rejected() {
        assert!(TeamName::new("").is_err());
    }

    #[test]
    fn whitespace_name_rejected() {
        let error = TeamName::new("   ").unwrap_err();
        assert!(error.to_string().contains("Team name cannot be empty"));
    }

    #[test]
    fn name_display() {
        let name = TeamName::new("Team C").unwrap();
        assert_eq!(format!("{}", name), "Team C");
    }
}
