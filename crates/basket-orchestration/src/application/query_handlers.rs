//! Query handlers for the basket context.

use basket_core::basket::{Basket, BasketId};
use basket_core::error::DomainError;
use basket_core::product::ProductClient;
use basket_core::repository::BasketRepository;
use tracing::{error, instrument, warn};

use crate::application::response::BasketView;

/// Retrieves a basket by id and decorates its lines with product metadata.
///
/// No ownership check is made on this path.
///
/// # Errors
///
/// Returns `DomainError::BasketNotFound` if no basket has this id.
/// Returns `DomainError::Processing` if the basket cannot be loaded or the
/// product lookup fails.
#[instrument(skip_all, fields(basket_id = %basket_id))]
pub async fn get_basket_by_id(
    basket_id: &BasketId,
    repo: &dyn BasketRepository,
    products: &dyn ProductClient,
) -> Result<BasketView, DomainError> {
    let basket = match repo.get_basket_by_id(basket_id).await {
        Ok(Some(basket)) => basket,
        Ok(None) => {
            warn!("could not find basket");
            return Err(DomainError::BasketNotFound(basket_id.clone()));
        }
        Err(err) => {
            error!(error = %err, "could not load basket");
            return Err(DomainError::Processing(format!(
                "could not load basket {basket_id}: {err}"
            )));
        }
    };

    resolve_basket_view(&basket, products).await
}

/// Resolves every product referenced by the basket in one batched call and
/// assembles the view. A basket without lines needs no lookup.
pub(crate) async fn resolve_basket_view(
    basket: &Basket,
    products: &dyn ProductClient,
) -> Result<BasketView, DomainError> {
    if basket.lines.is_empty() {
        return Ok(BasketView::new(basket, &[]));
    }

    let product_ids = basket.product_ids();
    let resolved = products.get_by_ids(&product_ids).await.map_err(|err| {
        error!(
            basket_id = %basket.id,
            products = product_ids.len(),
            error = %err,
            "could not get products from product service"
        );
        DomainError::Processing(format!(
            "could not resolve products of basket {}: {err}",
            basket.id
        ))
    })?;

    Ok(BasketView::new(basket, &resolved))
}
