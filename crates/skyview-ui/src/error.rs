use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("no field named '{name}'")]
    UnknownControl { name: String },

    #[error("field '{name}' expects a {expected} value")]
    KindMismatch { name: String, expected: &'static str },

    #[error("control '{name}' is already registered")]
    Duplicate { name: String },
}
