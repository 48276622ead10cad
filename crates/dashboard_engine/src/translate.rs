use crate::FailureKind;

/// User-facing sentence for a failure, as shown in toasts and empty states.
pub fn translate(kind: &FailureKind) -> String {
    let message = match kind {
        FailureKind::HttpStatus(400) => {
            "The request was invalid. Please check the input and try again."
        }
        FailureKind::HttpStatus(401) => "Your session has expired. Please sign in again.",
        FailureKind::HttpStatus(403) => "You do not have permission to perform this action.",
        FailureKind::HttpStatus(404) => "The requested resource was not found.",
        FailureKind::HttpStatus(409) => "The resource was changed by someone else. Please reload.",
        FailureKind::HttpStatus(422) => "Some of the submitted data is not valid.",
        FailureKind::HttpStatus(429) => "Too many requests. Please wait a moment and try again.",
        FailureKind::HttpStatus(code) if *code >= 500 => {
            "The server encountered an error. Please try again later."
        }
        FailureKind::HttpStatus(_) => "The server rejected the request.",
        FailureKind::Timeout => "The server took too long to respond.",
        FailureKind::Network => "Could not reach the server. Check your connection.",
        FailureKind::Decode => "The server sent a response that could not be read.",
        FailureKind::InvalidUrl => "The request address is not valid.",
    };
    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_failure_has_a_message() {
        let kinds = [
            FailureKind::HttpStatus(400),
            FailureKind::HttpStatus(404),
            FailureKind::HttpStatus(418),
            FailureKind::HttpStatus(503),
            FailureKind::Timeout,
            FailureKind::Network,
            FailureKind::Decode,
            FailureKind::InvalidUrl,
        ];
        for kind in kinds {
            assert!(!translate(&kind).is_empty(), "{kind}");
        }
    }

    #[test]
    fn server_errors_share_one_message() {
        assert_eq!(
            translate(&FailureKind::HttpStatus(500)),
            translate(&FailureKind::HttpStatus(502))
        );
    }
}
