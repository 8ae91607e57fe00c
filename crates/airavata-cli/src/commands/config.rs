use chrono::{TimeDelta, Utc};

use crate::cli::{ConfigKeyArgs, ConfigSetArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::render_value;

pub(crate) async fn handle_config_get(
    ctx: &AppContext,
    args: ConfigKeyArgs,
    format: OutputFormat,
) -> CliResult<String> {
    let value = ctx
        .registry
        .configuration()
        .get_configuration(&args.key)
        .await?;
    render_value(&args.key, value.as_deref(), format)
}

pub(crate) async fn handle_config_set(ctx: &AppContext, args: ConfigSetArgs) -> CliResult<String> {
    if args.key.trim().is_empty() {
        return Err(CliError::validation("configuration key cannot be empty"));
    }
    if args.ttl_days == 0 {
        return Err(CliError::validation("--ttl-days must be at least 1"));
    }

    let expires_at = TimeDelta::try_days(i64::from(args.ttl_days))
        .and_then(|ttl| Utc::now().checked_add_signed(ttl))
        .ok_or_else(|| CliError::validation("--ttl-days is too large"))?;
    ctx.registry
        .configuration()
        .set_configuration(&args.key, &args.value, expires_at)
        .await?;
    Ok(format!(
        "Configuration '{}' saved until {}.",
        args.key,
        expires_at.format("%Y-%m-%d")
    ))
}
