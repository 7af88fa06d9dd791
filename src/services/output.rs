use crate::domain::models::{ErrorBody, JsonErr, JsonOut};
use crate::services::hasher::HashError;
use crate::services::ledger::LedgerError;
use crate::services::settings::ConfigError;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Stable machine-readable code for the `--json` error envelope.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<HashError>() {
            return match e {
                HashError::Command { .. } => "HASH_COMMAND_FAILED",
                HashError::Parse { .. } => "HASH_PARSE_FAILED",
                HashError::Io { .. } => "ARTIFACT_IO",
            };
        }
        if cause.downcast_ref::<LedgerError>().is_some() {
            return "LEDGER_IO";
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "CONFIG_INVALID";
        }
    }
    "INTERNAL"
}

pub fn print_error(err: &anyhow::Error) {
    let out = JsonErr {
        ok: false,
        error: ErrorBody {
            code: error_code(err).to_string(),
            message: format!("{:#}", err),
        },
    };
    match serde_json::to_string_pretty(&out) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to render error: {}", e),
    }
}
