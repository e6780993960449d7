use anyhow::Result;
use notistream_api::{
    Condition, Notistream, PaginationParam,
    entity::notifications::Column,
    sea_orm::{ColumnTrait, IntoSimpleExpr, Order, TransactionTrait},
};
use tracing::info;

use crate::{Cli, ListArgs};

use super::init;

/// Translate the list flags into a narrowed collection.
fn condition(notistream: &Notistream, args: &ListArgs) -> Result<Condition> {
    let qs = notistream.queryset();
    let mut cond = Condition::default()
        .add_option(args.recipient.map(|x| Column::Recipient.eq(x)))
        .add_option(args.level.map(|x| Column::Level.eq(x)))
        .add_sort(Column::CreatedAt.into_simple_expr(), Order::Desc)
        .add_page(PaginationParam {
            page: args.page.max(1),
            size: args.size.clamp(1, 100),
        });
    if args.deleted {
        cond = qs.deleted(cond)?;
    } else if qs.mode().is_soft() {
        cond = qs.active(cond)?;
    }
    if args.unread {
        cond = qs.unread(cond);
    } else if args.read {
        cond = qs.read(cond);
    }
    Ok(cond)
}

pub async fn command(cli: &Cli, args: &ListArgs) -> Result<()> {
    let (notistream, db) = init(cli).await?;
    let cond = condition(&notistream, args)?;

    let tx = db.begin().await?;
    let (items, total) = notistream.notification.find(&tx, cond).await?;
    tx.commit().await?;
    for i in &items {
        println!("{}", serde_json::to_string(i)?);
    }
    info!(total, page = args.page, shown = items.len(), "Notifications listed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use notistream_api::{
        DeleteMode, Registry, config::ActstreamSettings, entity::notifications::NotificationLevel,
    };

    use super::*;
    use crate::Commands;

    fn parse(args: &[&str]) -> ListArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::List(x) => x,
            _ => panic!("not a list command"),
        }
    }

    fn notistream(mode: DeleteMode) -> Notistream {
        let settings = ActstreamSettings {
            notifications_soft_delete: mode.is_soft(),
            ..Default::default()
        };
        Registry::new().build(&settings).unwrap()
    }

    #[test]
    fn flags_parse() {
        let args = parse(&["notistream", "list", "--unread", "-l", "warning", "--size", "500"]);
        assert!(args.unread);
        assert_eq!(args.level, Some(NotificationLevel::Warning));
        let cond = condition(&notistream(DeleteMode::Hard), &args).unwrap();
        assert_eq!(cond.page, Some(PaginationParam { page: 1, size: 100 }));

        assert!(Cli::try_parse_from(["notistream", "list", "--read", "--unread"]).is_err());
        assert!(Cli::try_parse_from(["notistream", "list", "--deleted", "--read"]).is_err());
    }

    #[test]
    fn deleted_needs_soft_mode() {
        let args = parse(&["notistream", "list", "--deleted"]);
        let err = condition(&notistream(DeleteMode::Hard), &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<notistream_api::Error>(),
            Some(notistream_api::Error::SoftDeleteDisabled)
        ));
        assert!(condition(&notistream(DeleteMode::Soft), &args).is_ok());
    }
}
