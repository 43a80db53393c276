use autoip6_domain::{AutoIp6Config, CliOverrides, Config, ConfigError};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    directives_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let mut config = Config::load(config_path, cli_overrides)?;

    if let Some(path) = directives_path {
        let block = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        config.autoip6 = AutoIp6Config::from_directives(&block).map_err(ConfigError::from)?;
    }

    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        directives = directives_path.unwrap_or("none"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        "Configuration loaded"
    );

    Ok(config)
}
