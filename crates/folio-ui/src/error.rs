//! Error types for folder operations.

use std::fmt;

use crate::event::FolderEventKind;
use crate::folder::FolderId;

/// Errors surfaced by the folder coordinator and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderError {
    /// The requested folder name was empty or whitespace only.
    ///
    /// Rejected before the storage collaborator is consulted.
    InvalidFolderName {
        /// The rejected name, as given.
        name: String,
    },

    /// The storage collaborator refused a create, rename, remove or insert.
    DuplicateOrMissingFolder {
        /// The folder involved, when the failure concerns an existing id.
        id: Option<FolderId>,
        /// Description from the storage layer.
        message: String,
    },

    /// An event listener returned an error or panicked.
    ///
    /// Contained by the dispatcher: logged and recorded, never propagated.
    ListenerFault {
        /// The event being delivered when the listener failed.
        kind: FolderEventKind,
        /// Description of the failure.
        message: String,
    },
}

impl FolderError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        FolderError::InvalidFolderName { name: name.into() }
    }

    pub fn storage(id: Option<FolderId>, message: impl Into<String>) -> Self {
        FolderError::DuplicateOrMissingFolder {
            id,
            message: message.into(),
        }
    }

    pub fn is_invalid_name(&self) -> bool {
        matches!(self, FolderError::InvalidFolderName { .. })
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, FolderError::DuplicateOrMissingFolder { .. })
    }

    pub fn is_listener_fault(&self) -> bool {
        matches!(self, FolderError::ListenerFault { .. })
    }
}

impl fmt::Display for FolderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderError::InvalidFolderName { name } => {
                write!(f, "Invalid folder name: {:?}", name)
            }
            FolderError::DuplicateOrMissingFolder { id, message } => match id {
                Some(id) => write!(f, "Folder storage error for {}: {}", id, message),
                None => write!(f, "Folder storage error: {}", message),
            },
            FolderError::ListenerFault { kind, message } => {
                write!(f, "Listener for {} failed: {}", kind, message)
            }
        }
    }
}

impl std::error::Error for FolderError {}

/// Result type alias for folder operations.
pub type FolderResult<T> = Result<T, FolderError>;

/// Check a folder name before it reaches storage. Returns the trimmed name.
pub fn validate_name(name: &str) -> FolderResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(FolderError::invalid_name(name));
    }
    Ok(trimmed.to_string())
}
