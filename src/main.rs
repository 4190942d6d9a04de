use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use katy::{config, KubeAccessor, PodQuery};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Ask the cluster how a pod is doing
#[derive(Parser, Debug)]
#[command(name = "katy", version, about)]
struct Args {
    /// Namespace to look in
    #[arg(short, long, default_value = "")]
    namespace: String,

    /// Kubeconfig to use, instead of $KUBE_CONFIG_PATH or ~/.kube/config
    #[arg(long)]
    kubeconfig: Option<PathBuf>,

    /// Pod to summarise. Without it, the pods in the namespace are counted
    #[arg(value_name = "POD")]
    pod: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,kube=warn")))
        .with_writer(std::io::stderr)
        .init();

    let path = match args.kubeconfig {
        Some(path) => path,
        None => config::kubeconfig_path()?,
    };
    let accessor = KubeAccessor::from_kubeconfig(&path).await?;
    let query = PodQuery::new(accessor);

    match args.pod {
        Some(pod) => {
            let summary = query
                .summary(&args.namespace, &pod)
                .await
                .with_context(|| format!("querying pod {pod}"))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        None => {
            let count = query
                .count_pods(&args.namespace)
                .await
                .context("counting pods")?;
            info!("counted pods in {}", katy::query::namespace_or_default(&args.namespace));
            println!("{count}");
        }
    }
    Ok(())
}
