pub async fn handle(cloud: &str, region: &str) -> anyhow::Result<()> {
    let provider = super::provider_for(cloud, region).await?;

    // Bare bucket name on stdout so the output stays scriptable.
    let bucket = provider.show_backend().await?;
    println!("{bucket}");
    Ok(())
}
