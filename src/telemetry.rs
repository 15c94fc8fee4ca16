use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    // stdout is reserved for the review report
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder
            .json()
            .try_init()
            .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    } else {
        builder
            .try_init()
            .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_an_error_not_a_panic() {
        let config = Config {
            api_url: "http://localhost:8000/api".to_string(),
            token_path: ".tugas-token".into(),
            log_level: "debug".to_string(),
            log_json: false,
        };

        assert!(init_tracing(&config).is_ok());
        assert!(init_tracing(&config).is_err());
    }
}
