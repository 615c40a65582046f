use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if cfg.database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    }

    if cfg.database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if cfg.database.min_idle > cfg.database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            cfg.database.min_idle, cfg.database.max_connections
        ));
    }

    if let Some(url) = cfg.frontend.api_base_url.as_deref() {
        let url = url.trim();
        if url.is_empty() {
            errors.push("frontend.api_base_url must not be empty when set".to_string());
        } else if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(format!(
                "frontend.api_base_url ({url}) must start with http:// or https://"
            ));
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::AppConfig;

    #[test]
    fn accepts_default_config() {
        validate(&AppConfig::default()).expect("defaults should be valid");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database.url = String::new();
        cfg.database.min_idle = 20;

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("general.host"));
        assert!(message.contains("database.url"));
        assert!(message.contains("database.min_idle (20)"));
    }

    #[test]
    fn rejects_non_http_api_base_url() {
        let mut cfg = AppConfig::default();
        cfg.frontend.api_base_url = Some("ftp://localhost".to_string());

        let err = validate(&cfg).expect_err("config should be rejected");
        assert!(err.to_string().contains("frontend.api_base_url"));
    }

    #[test]
    fn api_base_url_falls_back_to_listen_address() {
        let mut cfg = AppConfig::default();
        cfg.general.port = 8080;
        assert_eq!(cfg.api_base_url(), "http://127.0.0.1:8080");

        cfg.frontend.api_base_url = Some("http://api.internal:9000/".to_string());
        assert_eq!(cfg.api_base_url(), "http://api.internal:9000");
    }
}
