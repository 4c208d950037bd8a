use anyhow::Context;
use petstore_e2e::configuration::get_configuration;
use petstore_e2e::scenarios::ScenarioRunner;
use petstore_e2e::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("petstore-e2e".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let client = configuration
        .petstore
        .client()
        .context("Failed to build the pet store client.")?;
    tracing::info!(
        base_url = client.base_url(),
        log_http_traffic = client.logs_traffic(),
        "Running pet store scenarios"
    );

    let runner = ScenarioRunner::new(client, configuration.scenarios.read_after_create());
    let report = runner.run().await;
    report.log_summary();

    if !report.passed() {
        anyhow::bail!(
            "{} failure(s):\n{}",
            report.failures().len(),
            report.failures().join("\n")
        );
    }
    Ok(())
}
