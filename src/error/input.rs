use thiserror::Error;

use crate::ast::NodeKind;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid syntax document '{source_name}': {message}")]
    InvalidDocument {
        source_name: String,
        message: String,
    },

    #[error("expected a translation unit at the document root, found {found}")]
    UnexpectedRoot { found: NodeKind },
}

impl InputError {
    pub fn invalid_document(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn unexpected_root(found: NodeKind) -> Self {
        Self::UnexpectedRoot { found }
    }
}
