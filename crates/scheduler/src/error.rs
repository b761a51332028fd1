use huntbot_notify::NotifyError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("channel resolution failed: {0}")]
    ChannelResolution(#[from] NotifyError),

    #[error("pass panicked: {0}")]
    Panicked(String),
}
