//! Error types

mod data;
mod load;
mod template;

pub use data::*;
pub use load::*;
pub use template::*;

/// Top-level error type covering every failure the component can hit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Data loading failed (network, HTTP status, body decoding).
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Template lookup or placeholder substitution failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The payload was not a valid tabular data set.
    #[error(transparent)]
    Data(#[from] DataError),
}
