//! Voice Query Context - Errors

use thiserror::Error;

use super::PipelineStage;

#[derive(Debug, Error)]
pub enum VoiceQueryError {
    #[error("Stage {attempted:?} recorded before {missing:?}")]
    OutOfOrder {
        attempted: PipelineStage,
        missing: PipelineStage,
    },

    #[error("Stage {0:?} already recorded")]
    AlreadyRecorded(PipelineStage),
}
