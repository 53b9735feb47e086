use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::handlers::AppState;

pub async fn handle(state: &AppState, output_format: OutputFormat) -> anyhow::Result<()> {
    match state.onboarding.ping().await {
        Ok(()) => output_success(&output_format, "Database reachable", None),
        Err(e) => {
            output_error(&output_format, "Database unavailable", Some("SERVICE_UNAVAILABLE"))?;
            Err(e.into())
        }
    }
}
