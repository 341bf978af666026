//! `config`

use anyhow::Result;

use storefront::presentation::output::render_config;
use storefront::presentation::OutputFormat;
use storefront::Config;

pub fn cmd_config(config: &Config, format: OutputFormat) -> Result<()> {
    let network = config.network_config()?;
    print!("{}", render_config(config, &network, format));
    Ok(())
}
