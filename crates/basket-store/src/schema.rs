//! SQL statements issued by the basket repository.
//!
//! The tables themselves are created by the migrations in `migrations/` at the
//! workspace root.

/// Inserts a basket row. Timestamps default to the database clock.
pub const INSERT_BASKET: &str = r"
INSERT INTO baskets (id, user_id)
VALUES ($1, $2)
";

/// Reads one basket row.
pub const SELECT_BASKET: &str = r"
SELECT id, user_id, created_at, updated_at
FROM baskets
WHERE id = $1
";

/// Reads every line of a basket in insertion order.
pub const SELECT_BASKET_LINES: &str = r"
SELECT id, basket_id, product_id, quantity, created_at, updated_at
FROM basket_products
WHERE basket_id = $1
ORDER BY id
";

/// Appends one line and returns its surrogate id.
pub const INSERT_BASKET_LINE: &str = r"
INSERT INTO basket_products (basket_id, product_id, quantity)
VALUES ($1, $2, $3)
RETURNING id
";

/// Bumps the basket modification timestamp.
pub const TOUCH_BASKET: &str = r"
UPDATE baskets
SET updated_at = NOW()
WHERE id = $1
";

/// Deletes exactly one line of a basket.
pub const DELETE_BASKET_LINE: &str = r"
DELETE FROM basket_products
WHERE basket_id = $1 AND id = $2
";
