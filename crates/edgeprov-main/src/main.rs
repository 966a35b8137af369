// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of EdgeProv.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands, TableFormatter};
use config::AppConfig;
use edgeprov_core::{ComponentConfigurator, EdgeGateway};
use edgeprov_rpc::{AddAppInstanceStep, EdgeRpcClient, EdgeRpcGateway};
use edgeprov_types::ConfigurationStatus;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing with env filter support
    // Respects RUST_LOG environment variable
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install tracing subscriber: {e}");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config)?;
    let client = Arc::new(build_client(&config)?);
    let gateway = Arc::new(EdgeRpcGateway::new(client.clone()));

    match cli.command {
        Commands::Snapshot => snapshot(gateway.as_ref()).await,
        Commands::Plan => plan(&config, gateway).await,
        Commands::Apply => apply(&config, client, gateway).await,
    }
}

fn build_client(config: &AppConfig) -> Result<EdgeRpcClient> {
    let connection = &config.connection;
    let mut client = EdgeRpcClient::new(
        connection.base_url.as_str(),
        connection.username.as_str(),
        connection.password.as_str(),
    )
    .context("Failed to create Edge client")?;
    if let Some(edge_id) = &connection.edge_id {
        client = client.with_edge_id(edge_id.as_str());
    }

    info!(
        "🔌 Edge: {} (edge id: {})",
        connection.base_url,
        connection.edge_id.as_deref().unwrap_or("-")
    );
    Ok(client)
}

/// Build a configurator over the live Edge with every planned component registered
async fn configurator_for(
    config: &AppConfig,
    gateway: Arc<EdgeRpcGateway>,
) -> Result<ComponentConfigurator> {
    let configurator = ComponentConfigurator::from_gateway(
        gateway,
        config.scheduler.required_controllers.clone(),
    )
    .await
    .context("Failed to read Edge configuration")?
    .with_pacing(config.pacing.to_pacing())
    .with_app_manager(config.scheduler.app_manager_available);

    for component in &config.components {
        configurator.add(component.clone())?;
    }
    Ok(configurator)
}

async fn snapshot(gateway: &dyn EdgeGateway) -> Result<()> {
    let snapshot = gateway
        .fetch_config_snapshot()
        .await
        .context("Failed to read Edge configuration")?;
    print!("{}", TableFormatter::format_snapshot(&snapshot));
    Ok(())
}

async fn plan(config: &AppConfig, gateway: Arc<EdgeRpcGateway>) -> Result<()> {
    let configurator = configurator_for(config, gateway).await?;

    println!("{}", TableFormatter::format_objects(&configurator.objects()));

    let pre_configured = configurator
        .objects()
        .into_iter()
        .filter(|object| object.status == ConfigurationStatus::PreConfigured)
        .count();
    println!(
        "{} of {} component(s) already exist on the Edge and will be removed first",
        pre_configured,
        configurator.len()
    );
    println!(
        "Scheduler must run: [{}]",
        configurator.required_controller_ids().join(", ")
    );
    for app in &config.apps {
        println!("App to install: {} ('{}')", app.app_id, app.alias);
    }
    Ok(())
}

async fn apply(
    config: &AppConfig,
    client: Arc<EdgeRpcClient>,
    gateway: Arc<EdgeRpcGateway>,
) -> Result<()> {
    let configurator = configurator_for(config, gateway).await?;
    for app in &config.apps {
        configurator.add_install_app_step(Arc::new(
            AddAppInstanceStep::new(client.clone(), app.app_id.as_str(), app.alias.as_str())
                .with_key(app.key.as_str())
                .with_properties(app.properties.clone()),
        ));
    }

    info!(
        "🚀 Provisioning {} component(s), pacing {:?}",
        configurator.len(),
        configurator.pacing()
    );
    let result = configurator.start().await;

    println!("{}", TableFormatter::format_objects(&configurator.objects()));
    let report = result.context("Provisioning failed")?;
    print!("{}", TableFormatter::format_report(&report));
    Ok(())
}
