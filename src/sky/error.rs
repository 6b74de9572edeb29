use thiserror::Error;

/// Errors raised by the sky toolkit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SkyError {
    #[error("Altitudes and time guesses have incompatible lengths: {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("{body} altitude calculation not converging after {iterations} iterations")]
    NotConverging { body: &'static str, iterations: usize },

    #[error("{body} never reaches the altitude needed for {event}")]
    NoCrossing {
        body: &'static str,
        event: &'static str,
    },

    #[error("Julian date {0} cannot be represented as a UTC timestamp")]
    TimeOutOfRange(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_body() {
        let err = SkyError::NotConverging {
            body: "Sun",
            iterations: 10,
        };
        assert_eq!(
            err.to_string(),
            "Sun altitude calculation not converging after 10 iterations"
        );

        let err = SkyError::NoCrossing {
            body: "Moon",
            event: "moonrise",
        };
        assert_eq!(err.to_string(), "Moon never reaches the altitude needed for moonrise");
    }

    #[test]
    fn length_mismatch_message() {
        let err = SkyError::LengthMismatch { left: 2, right: 3 };
        assert!(err.to_string().contains("2 and 3"));
    }
}
