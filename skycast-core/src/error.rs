use thiserror::Error;

use crate::fetch::FetchError;

/// Everything that can go wrong between a user action and its completion.
///
/// Each operation on the controllers is atomic: an error means the previous
/// state was kept in full. The distinct kinds exist for logs and tests; the
/// user only ever sees [`ActivityError::user_message`].
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("the download could not be completed")]
    Transport(#[source] FetchError),

    #[error("the response was empty or not a weather payload")]
    EmptyResponse,

    #[error("malformed weather payload: {0}")]
    MalformedPayload(String),

    #[error("unknown weather condition code {0}")]
    UnknownConditionCode(u16),

    #[error("the weather service rejected the request (code {0})")]
    ServiceRejected(String),

    #[error("the selected city is not in the current results")]
    NotFound,

    #[error("no city is selected")]
    NoSelection,
}

impl ActivityError {
    /// The single generic notification shown to the user, whatever went
    /// wrong underneath.
    pub fn user_message(&self) -> &'static str {
        "There was a problem with the download"
    }
}

impl From<FetchError> for ActivityError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Empty => ActivityError::EmptyResponse,
            other => ActivityError::Transport(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fetch_maps_to_empty_response() {
        let err = ActivityError::from(FetchError::Empty);
        assert!(matches!(err, ActivityError::EmptyResponse));
    }

    #[test]
    fn user_message_is_uniform() {
        let errors = [
            ActivityError::EmptyResponse,
            ActivityError::NotFound,
            ActivityError::NoSelection,
            ActivityError::UnknownConditionCode(999),
        ];
        for err in errors {
            assert_eq!(err.user_message(), "There was a problem with the download");
        }
    }
}
