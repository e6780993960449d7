use anyhow::Result;

use crate::{Cli, db};

use super::load;

pub async fn command(cli: &Cli) -> Result<()> {
    let config = load(cli)?;
    let db = db::connect(&config.database.dsn).await?;
    db::migrate(&db).await
}
