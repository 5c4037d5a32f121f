use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// expanded, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders first, then deserializes and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot address the service or the
    /// user agent is blank
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_base_url()?;
        self.validate_user_agent()?;
        Ok(())
    }

    fn validate_base_url(&self) -> anyhow::Result<()> {
        let url = &self.client.base_url;

        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("client.base_url must use http or https, got '{}'", url.scheme());
        }

        if url.host_str().is_none_or(str::is_empty) {
            anyhow::bail!("client.base_url must include a host");
        }

        if url.query().is_some() || url.fragment().is_some() {
            anyhow::bail!("client.base_url must not carry a query string or fragment");
        }

        Ok(())
    }

    fn validate_user_agent(&self) -> anyhow::Result<()> {
        if let Some(ref user_agent) = self.client.user_agent
            && user_agent.trim().is_empty()
        {
            anyhow::bail!("client.user_agent must not be empty when set");
        }

        Ok(())
    }
}
