use config::{Config, ConfigError, Environment, File};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Name of the required settings file inside a configuration directory.
pub const BASE_CONFIG_FILE: &str = "base.yaml";

/// Load settings from `<config_dir>/base.yaml`, overridden by `APP_` variables.
///
/// Nested keys use a double underscore, e.g. `APP_API__SIGNUP_URL`.
/// A `.env` file in the working directory is loaded first if present.
pub fn load_settings<T: DeserializeOwned>(config_dir: &Path) -> Result<T, ConfigError> {
    dotenvy::dotenv().ok();

    let settings = Config::builder()
        .add_source(File::from(config_dir.join(BASE_CONFIG_FILE)).required(true))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct Sample {
        server: SampleServer,
    }

    #[derive(Debug, Deserialize)]
    struct SampleServer {
        host: String,
        #[serde(default = "default_port")]
        port: u16,
    }

    fn default_port() -> u16 {
        8080
    }

    #[test]
    fn test_load_settings_reads_base_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(BASE_CONFIG_FILE)).unwrap();
        writeln!(file, "server:\n  host: \"127.0.0.1\"").unwrap();

        let sample: Sample = load_settings(dir.path()).unwrap();
        assert_eq!(sample.server.host, "127.0.0.1");
        assert_eq!(sample.server.port, 8080);
    }

    #[test]
    fn test_load_settings_requires_base_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample, _> = load_settings(dir.path());
        assert!(result.is_err());
    }
}
