//! Validation of user-supplied habit fields.

use regex::Regex;
use std::sync::OnceLock;

/// Errors produced when validating user input.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Habit name missing or empty after trimming
    #[error("habit name must not be empty")]
    EmptyName,

    /// Habit name over the length limit
    #[error("habit name must be at most {max} characters (got {actual})")]
    NameTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length supplied
        actual: usize,
    },

    /// Description over the length limit
    #[error("description must be at most {max} characters (got {actual})")]
    DescriptionTooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length supplied
        actual: usize,
    },

    /// Target count below one
    #[error("target count must be at least 1")]
    InvalidTargetCount,

    /// Reminder time not in HH:MM format
    #[error("reminder time must be in HH:MM format (e.g. 09:00, 14:30): {0:?}")]
    InvalidReminderTime(String),
}

const MAX_NAME_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;

fn reminder_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("valid reminder-time regex")
    })
}

/// Validate a reminder time string (HH:MM, 24-hour clock).
pub fn validate_reminder_time(value: &str) -> Result<(), ValidationError> {
    if reminder_time_re().is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidReminderTime(value.to_string()))
    }
}

/// Validate the user-supplied habit fields together.
pub fn validate_habit_fields(
    name: &str,
    description: Option<&str>,
    reminder_time: Option<&str>,
    target_count: u32,
) -> Result<(), ValidationError> {
    if target_count == 0 {
        return Err(ValidationError::InvalidTargetCount);
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_LEN,
            actual: name.chars().count(),
        });
    }

    if let Some(description) = description {
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LEN,
                actual: description.chars().count(),
            });
        }
    }

    if let Some(reminder) = reminder_time {
        validate_reminder_time(reminder)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_reminder_times() {
        for time in ["09:00", "23:59", "0:05", "14:30"] {
            assert!(validate_reminder_time(time).is_ok(), "{time} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_reminder_times() {
        for time in ["24:00", "9", "foo", "12:60", ""] {
            assert!(validate_reminder_time(time).is_err(), "{time} should be invalid");
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(101);
        assert!(matches!(
            validate_habit_fields(&name, None, None, 1),
            Err(ValidationError::NameTooLong { .. })
        ));
    }

    #[test]
    fn accepts_full_valid_fields() {
        assert!(validate_habit_fields("Meditate", Some("Ten quiet minutes"), Some("07:30"), 1).is_ok());
    }
}
