//! Title content rules applied before a task is submitted.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("Title is required")]
    Empty,
    #[error("Title should not contain special characters.")]
    SpecialCharacters,
}

/// Accepts titles made of ASCII letters, ASCII digits and whitespace only.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for a blank title and
/// [`TitleError::SpecialCharacters`] for any other character.
pub fn validate_title(title: &str) -> Result<(), TitleError> {
    if title.trim().is_empty() {
        return Err(TitleError::Empty);
    }

    if title
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || character.is_whitespace())
    {
        Ok(())
    } else {
        Err(TitleError::SpecialCharacters)
    }
}
