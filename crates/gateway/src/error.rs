use thiserror::Error;

use crate::data_api::DataApiError;

/// Failures of a proxy function
///
/// The `Display` text is the `error` field of the response envelope.
#[derive(Error, Debug)]
pub enum FunctionError {
    #[error("Missing required parameters: {0}")]
    MissingParameters(&'static str),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Agent not found")]
    AgentNotFound,

    /// A primary write was refused; `detail` is the backend's response body
    #[error("{context}: {detail}")]
    Downstream { context: &'static str, detail: String },

    #[error("Failed to fetch pool statistics")]
    PoolStatisticsUnavailable,

    #[error(transparent)]
    DataApi(#[from] DataApiError),
}

impl FunctionError {
    pub fn downstream(context: &'static str, err: DataApiError) -> Self {
        FunctionError::Downstream {
            context,
            detail: err.detail(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FunctionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FunctionError::MissingParameters("userWallet and agentId").to_string(),
            "Missing required parameters: userWallet and agentId"
        );
        assert_eq!(
            FunctionError::MissingParameter("userWallet").to_string(),
            "Missing required parameter: userWallet"
        );
        assert_eq!(
            FunctionError::from(DataApiError::MissingCredentials).to_string(),
            "Missing data API credentials"
        );
    }

    #[test]
    fn test_downstream_carries_body() {
        let err = FunctionError::downstream(
            "Failed to create deposit",
            DataApiError::Rejected {
                status: 400,
                body: "bad amount".to_string(),
            },
        );
        assert_eq!(err.to_string(), "Failed to create deposit: bad amount");
    }
}
