use thiserror::Error;

/// Failures of the outbound mail transport.
#[derive(Error, Debug)]
pub enum MailError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Mail provider rejected message with status {status}: {body}")]
    Rejected {
        status: u16,
        /// Raw response body as returned by the provider
        body: String,
    },
}
