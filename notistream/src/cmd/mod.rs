use anyhow::Result;
use notistream_api::{
    Notistream, Registry,
    config::{self, Config},
    sea_orm::DatabaseConnection,
};
use tracing::debug;

use crate::{Cli, db};

pub mod check;
pub mod list;
pub mod migrate;
pub mod notification;

fn load(cli: &Cli) -> Result<Config> {
    let config = config::load_file(cli.config.to_string_lossy())?;
    debug!("Config file {:?} loaded", cli.config);
    Ok(config)
}

async fn init(cli: &Cli) -> Result<(Notistream, DatabaseConnection)> {
    let config = load(cli)?;
    let notistream = Registry::new().build(&config.actstream)?;

    let db = db::connect(&config.database.dsn).await?;
    debug!("DB connected");
    Ok((notistream, db))
}
