use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use calcgate_core::modules::config as core_config;
use calcgate_types::models::{GatewayConfig, RateLimitRule};

use crate::server_utils::bind_address;

pub fn show_config(path: Option<&Path>, json: bool) -> Result<()> {
    let config = core_config::load_config(path)?.redacted();

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    println!("{}", "Server:".cyan().bold());
    println!("  Listen: {}:{}", config.server.host, config.server.port);

    println!("{}", "Allowed Origins:".cyan().bold());
    for origin in &config.allowed_origins {
        println!("  {}", origin);
    }

    println!("{}", "Rate Limits:".cyan().bold());
    let limits = &config.rate_limits;
    for (name, rule) in [
        ("text", limits.text),
        ("image", limits.image),
        ("video", limits.video),
        ("feedback", limits.feedback),
    ] {
        println!("  {:<9} {}", name, describe_rule(rule));
    }

    println!("{}", "Providers:".cyan().bold());
    println!("  Text:     {} ({})", config.text.base_url, credential(config.text.api_key.as_deref()));
    println!("            {}", config.text.models.join(" -> "));
    println!("  Image:    {} [{}]", config.image.base_url, config.image.models.join(", "));
    println!("  Video:    {} [{}]", config.video.base_url, config.video.models.join(", "));
    println!(
        "  Feedback: {} ({})",
        config.feedback.endpoint,
        credential(config.feedback.access_key.as_deref())
    );
    Ok(())
}

pub fn check_config(path: Option<&Path>) -> Result<()> {
    let config = core_config::load_config(path)?;
    bind_address(&config.server)?;

    for warning in missing_credentials(&config) {
        println!("{} {}", "!".yellow(), warning);
    }
    println!("{} Configuration is valid", "✓".green());
    Ok(())
}

fn describe_rule(rule: RateLimitRule) -> String {
    format!("{} requests / {}s", rule.max_requests, rule.window_secs)
}

fn credential(value: Option<&str>) -> colored::ColoredString {
    match value {
        Some(_) => "key set".green(),
        None => "no key".red(),
    }
}

/// Endpoints that will answer 500 until their credential is provided.
pub fn missing_credentials(config: &GatewayConfig) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if config.text.api_key.is_none() {
        missing.push("Text API key not set: /api/generate-text will fail");
    }
    if config.feedback.access_key.is_none() {
        missing.push("Feedback access key not set: /api/feedback will fail");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_credentials_lists_both() {
        let config = GatewayConfig::default();
        assert_eq!(missing_credentials(&config).len(), 2);

        let mut config = GatewayConfig::default();
        config.text.api_key = Some("k".to_string());
        config.feedback.access_key = Some("f".to_string());
        assert!(missing_credentials(&config).is_empty());
    }

    #[test]
    fn test_check_rejects_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"server": {"host": "not-an-ip", "port": 8787}}"#).unwrap();
        assert!(check_config(Some(file.path())).is_err());
    }

    #[test]
    fn test_describe_rule() {
        assert_eq!(describe_rule(RateLimitRule::new(3, 300)), "3 requests / 300s");
    }
}
