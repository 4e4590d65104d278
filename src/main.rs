use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sandbox_orchestrator::{
    config::Args,
    manager::{Manager, ProvisionSettings},
    registry::ConsulClient,
    status::StatusMap,
    tasks::docker::DockerClient,
    worker::{ApiServer, EventReconciler},
};
use tokio::{signal, sync::watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    info!("starting the orchestrator service");

    let docker = DockerClient::new().context("failed to connect to docker")?;
    docker
        .ensure_network(&args.network)
        .await
        .context("failed to prepare the shared network")?;
    info!(network = %args.network, "docker manager initialized");

    let consul = ConsulClient::new(&args.consul_addr);
    info!(consul = consul.base_url(), "consul client initialized");

    let runtime = Arc::new(docker);
    let store = Arc::new(StatusMap::new());
    let manager = Manager::new(
        runtime.clone(),
        Arc::new(consul),
        store.clone(),
        ProvisionSettings::from_args(&args),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reconciler = tokio::spawn(EventReconciler::new(runtime, store).run(shutdown_rx));

    let server = ApiServer::new(manager, &args.listen, args.behind_proxy);
    server
        .start_server(async move {
            shutdown_signal().await;
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        })
        .await
        .context("server failed")?;

    reconciler.await.context("event listener panicked")?;
    info!("orchestrator stopped");
    Ok(())
}
