use thiserror::Error;

/// Failures of the underlying sheet store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The sheet file is unreachable or misconfigured. Always propagated to
    /// the ingress handler as a request failure, never as partial data.
    #[error("sheet store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

/// Failures the ingress handler converts into the uniform
/// `{"success":false,"error"}` response shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures a caller of the lead endpoint can run into, classified so the
/// presentation layer can show distinct messages without inspecting causes.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out, please try again")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error: status {0}")]
    HttpStatus(u16),

    /// The endpoint answered with a document instead of data, which means
    /// the deployment itself is broken.
    #[error("endpoint returned an error page, check the deployment")]
    UpstreamConfiguration,

    /// The endpoint explicitly reported a failure of its own.
    #[error("endpoint reported an error: {0}")]
    UpstreamLogic(String),
}
