use invoicer_types::ModelError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("unknown invoice field '{0}'")]
    UnknownField(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}
