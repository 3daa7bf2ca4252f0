use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use zfsmon_agent::config::AgentConfig;
use zfsmon_agent::reporter::{host_description, Reporter};
use zfsmon_collector::mount::MountCollector;
use zfsmon_collector::pool::PoolCollector;
use zfsmon_collector::Collector;
use zfsmon_common::diag::{DiagnosticSink, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("zfsmon=info".parse()?)
                .add_directive("zfsmon_agent=info".parse()?),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/agent.toml".to_string());
    let config = AgentConfig::load(&config_path)?;
    let server = config.endpoint();
    let hostname = config.reported_hostname();

    tracing::info!(hostname = %hostname, server = %server, "zfsmon-agent starting");

    let diag: Arc<dyn DiagnosticSink> = Arc::new(TracingSink);
    let collectors: Vec<Box<dyn Collector>> = vec![
        Box::new(PoolCollector::new(diag.clone())),
        Box::new(MountCollector::new(diag.clone())),
    ];
    let reporter = Reporter::new(
        &server,
        &hostname,
        Duration::from_secs(config.http_timeout_secs),
        diag.clone(),
    )?;

    reporter
        .ensure_host_registered(&host_description(diag.as_ref()))
        .await;

    tracing::info!(
        interval_secs = config.update_interval_secs,
        "starting update loop"
    );

    loop {
        for collector in &collectors {
            let resources = match collector.collect() {
                Ok(resources) => resources,
                Err(e) => {
                    diag.error(&format!(
                        "the {} listing failed: {e:#}",
                        collector.name()
                    ));
                    Vec::new()
                }
            };
            if !reporter.report(&resources).await {
                diag.warning(&format!("not all {}s could be updated", collector.name()));
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(config.update_interval_secs)) => {}
            _ = signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}
