use intern_model::EntityKind;
use intern_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("failed to load {kind}")]
    Load {
        kind: EntityKind,
        #[source]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
