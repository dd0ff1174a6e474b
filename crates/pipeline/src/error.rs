use foundernest_core::error::CoreError;
use foundernest_db::StoreError;

/// Failure of a pipeline operation: either a domain rule or the store.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
