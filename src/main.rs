use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    gatecloud_utils::infra::logging::init();

    let cfg = gatecloud_utils::Config::from_env();
    tracing::debug!(
        mode = %cfg.mode,
        timeout_secs = cfg.http.timeout.as_secs(),
        body_limit = cfg.http.body_limit,
        "BOOT gatecloud-utils"
    );

    gatecloud_utils::cli::run().await
}
