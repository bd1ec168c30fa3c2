//! Structured logging setup.
//!
//! Logs go to stderr so stdout stays reserved for the report and ASCII charts.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, EXIT_RUNTIME};

/// Install the global subscriber with the given `EnvFilter` directive string.
pub fn init_logging(filter: &str) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_new(filter)
        .map_err(|e| AppError::input(format!("Invalid log filter '{filter}': {e}")))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter)
        .try_init()
        .map_err(|e| AppError::new(EXIT_RUNTIME, format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_filter_is_an_input_error() {
        let err = init_logging("sales_forecast=notalevel").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
