/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Parse a `--attributes` argument into the map the create call expects.
/// The value must be a JSON object; field types are dictated by the
/// model's schema on the server and are not checked here.
pub fn parse_attributes(raw: &str) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| anyhow::anyhow!("--attributes is not valid JSON: {}", e))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!(
            "--attributes must be a JSON object, got: {}",
            other
        )),
    }
}
