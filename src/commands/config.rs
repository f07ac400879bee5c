//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::config::{Config, mask_sensitive_value};
use crate::error::{HelpdeskError, Result};

/// Show current configuration. The anon key is masked.
pub fn cmd_config_show() -> Result<CommandOutput> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;

    let url = config.backend_url();
    let key = config.anon_key().map(|k| mask_sensitive_value(&k));

    let json_output = json!({
        "backend": {
            "url": url,
            "anon_key": key,
        },
        "dashboard": {
            "poll_interval_secs": config.dashboard.poll_interval_secs,
            "refresh_hold_ms": config.dashboard.refresh_hold_ms,
            "splash_ms": config.dashboard.splash_ms,
        },
        "transitions": config.transitions.to_string(),
        "config_file": config_path.to_string_lossy(),
    });

    let not_configured = || "not configured".dimmed().to_string();

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}:\n", "backend".cyan()));
    text.push_str(&format!(
        "  url: {}\n",
        url.unwrap_or_else(not_configured)
    ));
    text.push_str(&format!(
        "  anon_key: {}\n",
        key.unwrap_or_else(not_configured)
    ));
    text.push('\n');

    text.push_str(&format!("{}:\n", "dashboard".cyan()));
    text.push_str(&format!(
        "  poll_interval_secs: {}\n",
        config.dashboard.poll_interval_secs
    ));
    text.push_str(&format!(
        "  refresh_hold_ms: {}\n",
        config.dashboard.refresh_hold_ms
    ));
    text.push_str(&format!("  splash_ms: {}\n", config.dashboard.splash_ms));
    text.push('\n');

    text.push_str(&format!("{}: {}\n\n", "transitions".cyan(), config.transitions));
    text.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    Ok(CommandOutput::new(json_output).with_text(text))
}

/// Print a single configuration value
pub fn cmd_config_get(key: &str) -> Result<CommandOutput> {
    let config = Config::load()?;
    let value = config.get_value(key)?;
    let text = value
        .clone()
        .unwrap_or_else(|| "not configured".dimmed().to_string());
    Ok(CommandOutput::new(json!({ "key": key, "value": value })).with_text(text))
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str) -> Result<CommandOutput> {
    if !key.contains('.')
        && let Some(pos) = key.find('_')
    {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(HelpdeskError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }

    let mut config = Config::load()?;
    config.set_value(key, value)?;
    config.save()?;

    let shown = config.get_value(key)?.unwrap_or_default();
    Ok(CommandOutput::new(json!({ "key": key, "value": shown, "action": "set" }))
        .with_text(format!("Set {} = {}", key.cyan(), shown)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutputOptions;
    use crate::config::ANON_KEY_ENV;
    use crate::paths::HOME_ENV;
    use crate::test_guards::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_then_show_masks_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let _home = unsafe { EnvGuard::set(HOME_ENV, dir.path()) };
        let _key = unsafe { EnvGuard::remove(ANON_KEY_ENV) };

        cmd_config_set("backend.anon_key", "eyJhbGciOiJIUzI1NiJ9").unwrap();
        let shown = cmd_config_show().unwrap();
        assert_eq!(shown.json()["backend"]["anon_key"], "ey...J9");

        let rendered = shown.render(OutputOptions { json: true }).unwrap();
        assert!(!rendered.contains("eyJhbGciOiJIUzI1NiJ9"));
    }

    #[test]
    #[serial]
    fn test_set_rejects_underscore_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let _home = unsafe { EnvGuard::set(HOME_ENV, dir.path()) };
        let err = cmd_config_set("backend_url", "https://x.supabase.co").unwrap_err();
        assert!(err.to_string().contains("backend.url"));
    }

    #[test]
    #[serial]
    fn test_get_poll_interval() {
        let dir = tempfile::TempDir::new().unwrap();
        let _home = unsafe { EnvGuard::set(HOME_ENV, dir.path()) };
        cmd_config_set("dashboard.poll_interval_secs", "15").unwrap();
        let output = cmd_config_get("dashboard.poll_interval_secs").unwrap();
        assert_eq!(output.json()["value"], "15");
    }
}
