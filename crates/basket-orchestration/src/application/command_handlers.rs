//! Command handlers for the basket context.
//!
//! Each handler is a strictly sequential walk over the repository and the
//! remote services. Any step can short-circuit the call; nothing is retried
//! and nothing already written is rolled back, except for the optional
//! reservation compensation governed by `ReservationPolicy`.

use basket_core::basket::{Basket, BasketId, NewBasket, NewBasketLine, ProductId, UserId};
use basket_core::clock::Clock;
use basket_core::command::Command;
use basket_core::error::{DomainError, RepositoryError};
use basket_core::id::IdGenerator;
use basket_core::product::ProductClient;
use basket_core::repository::BasketRepository;
use basket_core::stock::StockClient;
use tracing::{error, info, instrument, warn};

use crate::application::query_handlers::{get_basket_by_id, resolve_basket_view};
use crate::application::response::BasketView;
use crate::domain::commands::{AddBulkProductToBasket, AddProductToBasket, CreateBasket};

/// What to do when the stock reservation fails after the line was written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReservationPolicy {
    /// Keep the written line and report a processing error. Basket and stock
    /// are left inconsistent.
    #[default]
    LeaveLine,
    /// Remove the written line before reporting the error. If the removal
    /// fails too, report `DomainError::Reconciliation`.
    Compensate,
}

/// Handles the `CreateBasket` command: generates an id and persists an empty
/// basket for the user.
///
/// A "no rows" answer from the repository is not treated as a failure; the
/// empty basket is returned as if the insert had succeeded.
///
/// # Errors
///
/// Returns `DomainError::Processing` for any other persistence failure.
#[instrument(skip_all, fields(
    command = command.command_type(),
    correlation_id = %command.correlation_id(),
    user_id = %command.user_id,
))]
pub async fn handle_create_basket(
    command: &CreateBasket,
    ids: &dyn IdGenerator,
    clock: &dyn Clock,
    repo: &dyn BasketRepository,
) -> Result<BasketView, DomainError> {
    let basket_id = ids.next_basket_id();
    let new_basket = NewBasket {
        id: basket_id.clone(),
        user_id: command.user_id.clone(),
    };

    let basket = match repo.create_basket(&new_basket).await {
        Ok(basket) => basket,
        Err(RepositoryError::NoRows) => {
            warn!(basket_id = %basket_id, "basket insert returned no rows, answering with an empty basket");
            Basket::empty(basket_id, command.user_id.clone(), clock.now())
        }
        Err(err) => {
            error!(basket_id = %basket_id, error = %err, "could not create basket");
            return Err(DomainError::Processing(format!(
                "could not create basket {basket_id}: {err}"
            )));
        }
    };

    info!(basket_id = %basket.id, "basket created");
    Ok(BasketView::new(&basket, &[]))
}

/// Handles the `AddProductToBasket` command.
///
/// Steps: load and ownership-check the basket, resolve the product, check
/// availability, write the line, reserve the stock, then resolve all products
/// of the reloaded basket and assemble the view. Availability is checked
/// before the write; the reservation after it is the final arbiter.
///
/// # Errors
///
/// - `DomainError::BasketNotFound` if the basket is missing, cannot be loaded,
///   or belongs to another user.
/// - `DomainError::ProductNotHasEnoughStock` if the stock service reports the
///   quantity unavailable. No line is written in that case.
/// - `DomainError::Processing` if the product lookup, the availability query,
///   the write, the reservation, or the final product resolution fails. A
///   failed reservation leaves the line in place under
///   `ReservationPolicy::LeaveLine`.
/// - `DomainError::Reconciliation` under `ReservationPolicy::Compensate` when
///   the line could not be removed after a failed reservation.
#[instrument(skip_all, fields(
    command = command.command_type(),
    correlation_id = %command.correlation_id(),
    basket_id = %command.basket_id,
    user_id = %command.user_id,
    product_id = %command.product_id,
    quantity = command.quantity,
))]
pub async fn handle_add_product_to_basket(
    command: &AddProductToBasket,
    policy: ReservationPolicy,
    repo: &dyn BasketRepository,
    products: &dyn ProductClient,
    stock: &dyn StockClient,
) -> Result<BasketView, DomainError> {
    let basket = load_owned_basket(repo, &command.basket_id, &command.user_id).await?;

    if let Err(err) = products.get_by_id(&command.product_id).await {
        error!(
            product_id = %command.product_id,
            error = %err,
            "could not get product from product service"
        );
        return Err(DomainError::Processing(format!(
            "could not get product {}: {err}",
            command.product_id
        )));
    }

    let available = stock
        .is_available(&command.product_id, command.quantity)
        .await
        .map_err(|err| {
            error!(
                product_id = %command.product_id,
                quantity = command.quantity,
                error = %err,
                "could not check product availability in stock"
            );
            DomainError::Processing(format!(
                "could not check stock of product {}: {err}",
                command.product_id
            ))
        })?;

    if !available {
        warn!(
            product_id = %command.product_id,
            quantity = command.quantity,
            "product does not have enough stock"
        );
        return Err(DomainError::ProductNotHasEnoughStock {
            product_id: command.product_id.clone(),
            quantity: command.quantity,
        });
    }

    let added = repo
        .add_product_to_basket(&NewBasketLine {
            basket_id: basket.id.clone(),
            product_id: command.product_id.clone(),
            quantity: command.quantity,
        })
        .await
        .map_err(|err| {
            error!(basket_id = %basket.id, error = %err, "could not add product to basket");
            DomainError::Processing(format!(
                "could not add product {} to basket {}: {err}",
                command.product_id, basket.id
            ))
        })?;

    if let Err(err) = stock.reserve(&command.product_id, command.quantity).await {
        error!(
            basket_id = %basket.id,
            product_id = %command.product_id,
            quantity = command.quantity,
            line_id = added.line_id,
            error = %err,
            "could not reserve stock"
        );
        return Err(match policy {
            ReservationPolicy::LeaveLine => DomainError::Processing(format!(
                "could not reserve stock for product {}: {err}",
                command.product_id
            )),
            ReservationPolicy::Compensate => {
                compensate_line(repo, &basket.id, added.line_id, &command.product_id).await
            }
        });
    }

    info!(line_id = added.line_id, "product added to basket");
    resolve_basket_view(&added.basket, products).await
}

/// Handles the `AddBulkProductToBasket` command: ownership-checks the basket,
/// writes every line in input order, and returns the reloaded view.
///
/// No product lookup and no stock check or reservation happens here. A
/// failed write aborts the loop; lines written before it stay committed.
///
/// # Errors
///
/// - `DomainError::BasketNotFound` if the basket is missing, cannot be loaded,
///   or belongs to another user.
/// - `DomainError::Processing` if any write or the final read fails.
#[instrument(skip_all, fields(
    command = command.command_type(),
    correlation_id = %command.correlation_id(),
    basket_id = %command.basket_id,
    user_id = %command.user_id,
    lines = command.products.len(),
))]
pub async fn handle_add_bulk_product_to_basket(
    command: &AddBulkProductToBasket,
    repo: &dyn BasketRepository,
    products: &dyn ProductClient,
) -> Result<BasketView, DomainError> {
    let basket = load_owned_basket(repo, &command.basket_id, &command.user_id).await?;

    for (position, item) in command.products.iter().enumerate() {
        repo.add_product_to_basket(&NewBasketLine {
            basket_id: basket.id.clone(),
            product_id: item.product_id.clone(),
            quantity: item.quantity,
        })
        .await
        .map_err(|err| {
            error!(
                basket_id = %basket.id,
                product_id = %item.product_id,
                position,
                error = %err,
                "could not add product to basket"
            );
            DomainError::Processing(format!(
                "could not add product {} to basket {}: {err}",
                item.product_id, basket.id
            ))
        })?;
    }

    info!("bulk products added to basket");
    get_basket_by_id(&basket.id, repo, products).await
}

/// Loads a basket and checks it belongs to `user_id`. Every failure, including
/// a storage error, is reported as `BasketNotFound`.
async fn load_owned_basket(
    repo: &dyn BasketRepository,
    basket_id: &BasketId,
    user_id: &UserId,
) -> Result<Basket, DomainError> {
    match repo.get_basket_by_id(basket_id).await {
        Ok(Some(basket)) if basket.is_owned_by(user_id) => Ok(basket),
        Ok(Some(basket)) => {
            error!(
                basket_id = %basket_id,
                owner = %basket.user_id,
                "could not find basket: owned by another user"
            );
            Err(DomainError::BasketNotFound(basket_id.clone()))
        }
        Ok(None) => {
            error!(basket_id = %basket_id, "could not find basket");
            Err(DomainError::BasketNotFound(basket_id.clone()))
        }
        Err(err) => {
            error!(basket_id = %basket_id, error = %err, "could not find basket");
            Err(DomainError::BasketNotFound(basket_id.clone()))
        }
    }
}

/// Best-effort removal of a line whose reservation failed.
async fn compensate_line(
    repo: &dyn BasketRepository,
    basket_id: &BasketId,
    line_id: i64,
    product_id: &ProductId,
) -> DomainError {
    match repo.remove_line(basket_id, line_id).await {
        Ok(()) => {
            warn!(line_id, "line removed after failed reservation");
            DomainError::Processing(format!(
                "could not reserve stock for product {product_id}; line {line_id} was removed"
            ))
        }
        Err(err) => {
            error!(line_id, error = %err, "could not remove line after failed reservation");
            DomainError::Reconciliation {
                basket_id: basket_id.clone(),
                line_id,
                product_id: product_id.clone(),
            }
        }
    }
}
