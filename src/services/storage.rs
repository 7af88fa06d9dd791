use std::path::PathBuf;

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")?;
    Ok(PathBuf::from(home).join(".config/binledger"))
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Best-effort JSON-lines journal; never fails the caller.
pub fn audit(action: &str, data: serde_json::Value) {
    let Ok(dir) = config_dir() else {
        return;
    };
    let path = dir.join("audit.jsonl");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::debug!(error = %e, "audit journal unavailable");
        return;
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    if let Err(e) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()))
    {
        tracing::debug!(error = %e, path = %path.display(), "audit write failed");
    }
}

fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ts.to_string()
}
