use axum::{
    extract::{rejection::QueryRejection, FromRequestParts, Path, Query},
    http::{request::Parts, StatusCode},
    response::Json,
};
use sqlx::Connection;

use crate::context::RequestContext;
use crate::db;
use crate::error::ApiError;
use crate::models::{CreateItemQuery, Item, ItemList};

/// Item id taken from the path. Only plain decimal digits match; anything
/// else is treated as an unknown route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| super::not_found())?;

        parse_item_id(&raw).map(ItemId).ok_or_else(super::not_found)
    }
}

fn parse_item_id(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// POST /items?name=widget - Create an item
pub async fn create_item(
    mut ctx: RequestContext,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Query(pairs) = query.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;

    let name = CreateItemQuery::from_pairs(pairs)
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("Name is required".to_string()))?;

    let mut tx = ctx.conn().await?.begin().await?;

    let inserted = db::insert_item(&mut tx, &name).await;
    match inserted {
        Ok(item) => {
            tx.commit().await?;
            tracing::info!(id = item.id, "Created item");
            Ok((StatusCode::CREATED, Json(item)))
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {}", rollback_err);
            }
            Err(err.into())
        }
    }
}

// DELETE /items/:id - Delete an item and return it
pub async fn delete_item(
    mut ctx: RequestContext,
    ItemId(id): ItemId,
) -> Result<Json<Item>, ApiError> {
    let mut tx = ctx.conn().await?.begin().await?;

    let deleted = db::delete_item(&mut tx, id).await;
    match deleted {
        Ok(Some(item)) => {
            tx.commit().await?;
            tracing::info!(id = item.id, "Deleted item");
            Ok(Json(item))
        }
        // Nothing changed; dropping the transaction discards it
        Ok(None) => Err(ApiError::NotFound("Item not found".to_string())),
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback failed: {}", rollback_err);
            }
            Err(err.into())
        }
    }
}

// GET /items - List all items
pub async fn list_items(mut ctx: RequestContext) -> Result<Json<ItemList>, ApiError> {
    let items = db::list_items(ctx.conn().await?).await?;

    Ok(Json(ItemList { items }))
}
