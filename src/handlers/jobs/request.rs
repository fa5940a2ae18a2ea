//! Job request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{DEFAULT_ECHO_MESSAGE, MAX_ECHO_MESSAGE_LENGTH};

/// Echo job request
#[derive(Debug, Deserialize, Validate)]
pub struct EchoRequest {
    #[serde(default = "default_message")]
    #[validate(length(max = MAX_ECHO_MESSAGE_LENGTH))]
    pub message: String,
}

fn default_message() -> String {
    DEFAULT_ECHO_MESSAGE.to_string()
}

impl Default for EchoRequest {
    fn default() -> Self {
        Self {
            message: default_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_defaults_to_ping() {
        let req: EchoRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.message, "ping");
        assert_eq!(EchoRequest::default().message, "ping");
    }
}
