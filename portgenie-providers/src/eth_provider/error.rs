use thiserror::Error;

/// EIP-1193 `4001`: the user rejected the request.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// EIP-1193 `4100`: the requested account or method is not authorised.
pub const UNAUTHORIZED: i64 = 4100;
/// EIP-3326 `4902`: the chain has not been added to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Transport error: `{0}`")]
    Transport(String),
    #[error("Invalid response to `{method}`: {reason}")]
    InvalidResponse { method: String, reason: String },
}

impl ProviderError {
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code() == Some(USER_REJECTED_REQUEST)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code() == Some(UNRECOGNIZED_CHAIN)
    }
}

impl From<crate::http_client::Error> for ProviderError {
    fn from(value: crate::http_client::Error) -> Self {
        Self::Transport(value.to_string())
    }
}
