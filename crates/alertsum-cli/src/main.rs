mod cli;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use alertsum_adapters::mail::SmtpMailer;
use alertsum_adapters::render::HtmlReportRenderer;
use alertsum_adapters::zabbix::ZabbixClient;
use alertsum_app::pipeline::ReportPipeline;
use alertsum_app::report_service::ReportService;

use crate::cli::Cli;
use crate::config::{AppConfig, CONFIG_ENV, DEFAULT_CONFIG_PATH};

const DEFAULT_LOG_DIRECTIVES: &str = "alertsum=info,alertsum_app=info,alertsum_adapters=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES)),
        )
        .init();

    let config_path: PathBuf = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = AppConfig::load(&config_path)?;

    run(&config, cli.days).await
}

async fn run(config: &AppConfig, days: f64) -> Result<()> {
    let mut client = ZabbixClient::new(&config.zabbix_config())?;
    client
        .login(&config.zabbix.user, &config.zabbix.password)
        .await
        .context("zabbix login failed")?;

    let renderer = HtmlReportRenderer::new(config.report.title.clone());
    let mailer = SmtpMailer::new(&config.smtp_config())?;
    let pipeline = ReportPipeline::new(
        ReportService::new(client),
        renderer,
        mailer,
        config.delivery_settings(),
    );

    let outcome = pipeline.run(days, Utc::now()).await;

    let mut client = pipeline.into_reports().into_client();
    if let Err(e) = client.logout().await {
        tracing::warn!(error = %e, "zabbix logout failed");
    }

    let receipt = outcome.context("alert report run failed")?;
    tracing::info!(
        days,
        recipients = receipt.recipients,
        response = receipt.response.as_deref().unwrap_or("-"),
        "done"
    );
    Ok(())
}
