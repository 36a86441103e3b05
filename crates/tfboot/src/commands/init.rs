use colored::Colorize;

const DEFAULT_NAME_PREFIX: &str = "tf-bootstrap";

pub async fn handle(cloud: &str, region: &str, name_prefix: Option<String>) -> anyhow::Result<()> {
    let prefix = match name_prefix.filter(|prefix| !prefix.is_empty()) {
        Some(prefix) => prefix,
        None => {
            println!(
                "No name prefix provided, using default: {}",
                DEFAULT_NAME_PREFIX.cyan()
            );
            DEFAULT_NAME_PREFIX.to_string()
        }
    };

    let provider = super::provider_for(cloud, region).await?;

    println!(
        "{}",
        format!(
            "Bootstrapping the Terraform state backend on {}...",
            provider.name()
        )
        .blue()
        .bold()
    );

    // The wait loop may run for minutes; Ctrl-C drops it instead of
    // sleeping to completion. The stack itself keeps creating remotely.
    let bucket = tokio::select! {
        result = provider.ensure_backend(&prefix) => result?,
        _ = tokio::signal::ctrl_c() => {
            anyhow::bail!("interrupted; stack creation may still finish on the provider side")
        }
    };

    println!("{} {}", "Backend bucket:".bold(), bucket.green());
    Ok(())
}
