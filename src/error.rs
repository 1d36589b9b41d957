use crate::api::error::ApiError;
use crate::export::error::ExportError;
use crate::types::filters::FilterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InmetError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    InvalidFilters(#[from] FilterError),

    #[error(transparent)]
    Export(#[from] ExportError),

    /// A newer load was started before this one finished; its result was dropped.
    #[error("Load for station '{station}' was superseded by a newer request")]
    Superseded { station: String },
}
