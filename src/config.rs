use dioxus::prelude::*;
use serde::Deserialize;

const EMBEDDED_CONFIG: &str = include_str!("../assets/site.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub owner: String,
    pub site_title: String,
    pub prompt_user: String,
    pub prompt_host: String,
    pub working_directory: String,
    pub contact_email: String,
    pub security_email: String,
    pub github: String,
    pub linkedin: String,
    pub share_blurb: String,
    pub pgp_key: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: "Ranjit Pandey".to_string(),
            site_title: "Lykos | Cybersecurity Portfolio".to_string(),
            prompt_user: "user".to_string(),
            prompt_host: "portfolio".to_string(),
            working_directory: "/home/Lykos/cybersecurity-portfolio".to_string(),
            contact_email: "contact@pandeyranjit.com.np".to_string(),
            security_email: "info@pandeyranjit.com.np".to_string(),
            github: "github.com/lykos3".to_string(),
            linkedin: "linkedin.com/in/lykos3".to_string(),
            share_blurb: "Check out this cybersecurity analysis by Ranjit Pandey".to_string(),
            pgp_key: String::new(),
        }
    }
}

impl SiteConfig {
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.prompt_user, self.prompt_host)
    }
}

pub fn parse_site_config(raw: &str) -> Result<SiteConfig, String> {
    serde_json::from_str::<SiteConfig>(raw).map_err(|err| format!("config decode failed: {err}"))
}

pub fn load_site_config() -> SiteConfig {
    match parse_site_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(message) => {
            tracing::warn!("config: {message}, using defaults");
            SiteConfig::default()
        }
    }
}

pub fn use_site_config() -> SiteConfig {
    use_context::<SiteConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn embedded_config_parses() {
        let config = parse_site_config(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.prompt(), "user@portfolio:~$");
        assert!(config.pgp_key.contains("BEGIN PGP PUBLIC KEY BLOCK"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = parse_site_config(r#"{"owner":"Someone Else"}"#).unwrap();
        assert_eq!(config.owner, "Someone Else");
        assert_eq!(config.prompt_host, "portfolio");
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_site_config("{not json").unwrap_err().starts_with("config decode failed"));
    }
}
