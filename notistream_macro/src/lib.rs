use proc_macro::TokenStream;
use quote::quote;
use syn::{Expr, Ident, ImplItem, ItemImpl, ItemTrait, TraitItem, parse_macro_input, parse_quote};

/// Default timestamp generator.
///
/// Set `created_at` and `updated_at` (unix milliseconds) on insert, only `updated_at` on update.
///
/// # Examples
/// ```ignore
/// #[entity_timestamp]
/// impl ActiveModel {}
/// ```
#[proc_macro_attribute]
pub fn entity_timestamp(_: TokenStream, input: TokenStream) -> TokenStream {
    let mut entity = parse_macro_input!(input as ItemImpl);
    entity.items.push(parse_quote!(
        fn entity_timestamp(&self, e: &mut Self, insert: bool) {
            let tm: ::notistream_api::sea_orm::ActiveValue<i64> =
                ::notistream_api::sea_orm::ActiveValue::set(::notistream_api::now_millis());
            if insert {
                e.created_at = tm.clone();
            }
            e.updated_at = tm;
        }
    ));
    quote! {
        #entity
    }
    .into()
}

/// Id generator, the attribute is the expression producing a fresh id.
///
/// The id is only generated on insert when not set by the caller.
///
/// # Examples
/// ```ignore
/// #[entity_id(Uuid::new_v4())]
/// impl ActiveModel {}
/// ```
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, input: TokenStream) -> TokenStream {
    let generator = parse_macro_input!(attr as Expr);
    let mut entity = parse_macro_input!(input as ItemImpl);
    entity.items.push(parse_quote!(
        fn entity_id(&self, e: &mut Self, insert: bool) {
            if insert && e.id.is_not_set() {
                e.id = ::notistream_api::sea_orm::ActiveValue::set(#generator);
            }
        }
    ));
    quote! {
        #entity
    }
    .into()
}

/// Default entity behavior:
/// - `entity_id`
/// - `entity_timestamp`
///
/// # Examples
/// ```ignore
/// #[entity_behavior]
/// impl ActiveModelBehavior for ActiveModel {}
/// ```
#[proc_macro_attribute]
pub fn entity_behavior(_: TokenStream, input: TokenStream) -> TokenStream {
    let mut entity = parse_macro_input!(input as ItemImpl);

    entity.items.push(parse_quote!(
        async fn before_save<C>(
            self,
            _: &C,
            insert: bool,
        ) -> Result<Self, ::notistream_api::sea_orm::DbErr>
        where
            C: ::notistream_api::sea_orm::ConnectionTrait,
        {
            let mut new = self.clone();
            self.entity_id(&mut new, insert);
            self.entity_timestamp(&mut new, insert);
            Ok(new)
        }
    ));
    quote! {
        #[::notistream_api::async_trait::async_trait]
        #entity
    }
    .into()
}

fn trait_fn_names(input: &ItemTrait) -> Vec<String> {
    input
        .items
        .iter()
        .filter_map(|x| match x {
            TraitItem::Fn(x) => Some(x.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

fn impl_fn_names(input: &ItemImpl) -> Vec<String> {
    input
        .items
        .iter()
        .filter_map(|x| match x {
            ImplItem::Fn(x) => Some(x.sig.ident.to_string()),
            _ => None,
        })
        .collect()
}

/// Add the default read methods (`find`, `find_by_id`, `count`) to a manager trait.
/// Methods already declared by the trait are left alone.
///
/// # Examples
/// ```ignore
/// #[default_manager(notifications)]
/// #[async_trait]
/// pub trait NotificationManager: Send + Sync {
/// ...
/// }
/// ```
#[proc_macro_attribute]
pub fn default_manager(attr: TokenStream, input: TokenStream) -> TokenStream {
    let attr = parse_macro_input!(attr as Ident);
    let mut input = parse_macro_input!(input as ItemTrait);
    let func = trait_fn_names(&input);
    let contains = |name: &str| func.iter().any(|x| x == name);

    if !contains("find") {
        input.items.push(parse_quote! {
            /// Find records matching `cond`, with the total count.
            async fn find(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                cond: ::notistream_api::Condition,
            ) -> ::notistream_api::anyhow::Result<(Vec<#attr::Model>, u64)>;
        });
    }
    if !contains("find_by_id") {
        input.items.push(parse_quote! {
            /// Find record by `id`.
            async fn find_by_id(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                id: &::notistream_api::uuid::Uuid,
            ) -> ::notistream_api::anyhow::Result<Option<#attr::Model>>;
        });
    }
    if !contains("count") {
        input.items.push(parse_quote! {
            /// Count records matching `cond`.
            async fn count(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                cond: ::notistream_api::Condition,
            ) -> ::notistream_api::anyhow::Result<u64>;
        });
    }

    quote! {
        #input
    }
    .into()
}

/// Implement the methods added by `default_manager`.
///
/// # Examples
/// ```ignore
/// #[default_manager_impl(notifications)]
/// #[async_trait]
/// impl NotificationManager for DefaultNotificationManager {
/// ...
/// }
/// ```
#[proc_macro_attribute]
pub fn default_manager_impl(attr: TokenStream, input: TokenStream) -> TokenStream {
    let attr = parse_macro_input!(attr as Ident);
    let mut input = parse_macro_input!(input as ItemImpl);
    let func = impl_fn_names(&input);
    let contains = |name: &str| func.iter().any(|x| x == name);

    if !contains("find") {
        input.items.push(parse_quote! {
            async fn find(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                cond: ::notistream_api::Condition,
            ) -> ::notistream_api::anyhow::Result<(Vec<#attr::Model>, u64)> {
                use ::notistream_api::sea_orm::{EntityTrait, PaginatorTrait};

                let (q, page) = cond.build(#attr::Entity::find());
                if let Some(page) = page {
                    ::notistream_api::validator::Validate::validate(&page)
                        .map_err(::notistream_api::Error::from)?;
                    let q = q.paginate(db, page.size);
                    Ok((q.fetch_page(page.page - 1).await?, q.num_items().await?))
                } else {
                    let res = q.all(db).await?;
                    let cnt = res.len() as u64;
                    Ok((res, cnt))
                }
            }
        });
    }
    if !contains("find_by_id") {
        input.items.push(parse_quote! {
            async fn find_by_id(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                id: &::notistream_api::uuid::Uuid,
            ) -> ::notistream_api::anyhow::Result<Option<#attr::Model>> {
                use ::notistream_api::sea_orm::EntityTrait;

                #attr::Entity::find_by_id(*id)
                    .one(db)
                    .await
                    .map_err(::notistream_api::anyhow::Error::from)
            }
        });
    }
    if !contains("count") {
        input.items.push(parse_quote! {
            async fn count(
                &self,
                db: &::notistream_api::sea_orm::DatabaseTransaction,
                cond: ::notistream_api::Condition,
            ) -> ::notistream_api::anyhow::Result<u64> {
                use ::notistream_api::sea_orm::{EntityTrait, PaginatorTrait};

                Ok(cond.build(#attr::Entity::find()).0.count(db).await?)
            }
        });
    }

    quote! {
        #input
    }
    .into()
}
