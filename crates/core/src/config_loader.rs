use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering TOML and environment variables over
    /// built-in defaults, so the harness runs without any config file.
    ///
    /// # Errors
    ///
    /// Returns an error if a present configuration file cannot be parsed or
    /// a value has the wrong type.
    pub fn load() -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file("config/Config.toml"))
            .merge(Env::prefixed("QUANTBENCH_").split("__"))
            .extract()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_config_file_uses_defaults() {
        let config = ConfigLoader::load().unwrap();

        assert_eq!(config.analytics.window, 20);
        assert_eq!(config.data.ingest_iterations, 3);
        assert!(config.parallel.workers.is_none());
        assert_eq!(config.report.output_path, "performance_report.md");
    }
}
