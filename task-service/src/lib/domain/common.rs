use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error for Name validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for WorkStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown status '{0}': expected one of 'To Do', 'In Progress', 'Completed', 'Blocked'")]
pub struct WorkStatusError(pub String);

/// Human-readable name of a user, project, team or task.
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    const MAX_LENGTH: usize = 200;

    pub fn new(name: String) -> Result<Self, NameError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Progress state shared by projects and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkStatus {
    #[default]
    ToDo,
    InProgress,
    Completed,
    Blocked,
}

impl WorkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::ToDo => "To Do",
            WorkStatus::InProgress => "In Progress",
            WorkStatus::Completed => "Completed",
            WorkStatus::Blocked => "Blocked",
        }
    }
}

impl FromStr for WorkStatus {
    type Err = WorkStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "To Do" => Ok(WorkStatus::ToDo),
            "In Progress" => Ok(WorkStatus::InProgress),
            "Completed" => Ok(WorkStatus::Completed),
            "Blocked" => Ok(WorkStatus::Blocked),
            other => Err(WorkStatusError(other.to_string())),
        }
    }
}

impl fmt::Display for WorkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        let name = Name::new("  Website redesign ".to_string()).unwrap();
        assert_eq!(name.as_str(), "Website redesign");
    }

    #[test]
    fn test_name_rejects_blank() {
        assert_eq!(Name::new("   ".to_string()), Err(NameError::Empty));
    }

    #[test]
    fn test_name_rejects_too_long() {
        let result = Name::new("x".repeat(201));
        assert_eq!(
            result,
            Err(NameError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            WorkStatus::ToDo,
            WorkStatus::InProgress,
            WorkStatus::Completed,
            WorkStatus::Blocked,
        ] {
            assert_eq!(status.as_str().parse::<WorkStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_label() {
        assert!("Done".parse::<WorkStatus>().is_err());
        assert_eq!(WorkStatus::default(), WorkStatus::ToDo);
    }
}
