use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde_json::Value;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }
    println!("{}", render_text(&serde_json::to_value(value)?));
    Ok(())
}

/// `key: value` lines for top-level fields; nulls are skipped.
fn render_text(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        other => other.to_string(),
    }
}
