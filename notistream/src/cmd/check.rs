use anyhow::Result;
use notistream_api::Registry;
use tracing::info;

use crate::Cli;

use super::load;

pub fn command(cli: &Cli) -> Result<()> {
    let config = load(cli)?;
    let notistream = Registry::new().build(&config.actstream)?;
    info!(mode = ?notistream.mode(), "Config file {:?} valid", cli.config);
    Ok(())
}
