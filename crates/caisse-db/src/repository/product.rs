//! # Product Repository
//!
//! Database operations for product reference data.
//!
//! The engine treats products as external reference data: it reads them to
//! validate and display, and mutates stock only as the side effect of a
//! stock-purchase expense (see the session repository's
//! `insert_stock_purchase`). The relative-delta update here exists for the
//! surrounding catalog tooling (seeding, warehouse transfers).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use caisse_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product.
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, restaurant_id, name, stock_quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&product.id)
        .bind(&product.restaurant_id)
        .bind(&product.name)
        .bind(product.stock_quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a product by ID, scoped to a restaurant.
    pub async fn get_by_id(&self, restaurant_id: &str, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, restaurant_id, name, stock_quantity, created_at, updated_at
            FROM products
            WHERE id = ?1 AND restaurant_id = ?2
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products for a restaurant, by name.
    pub async fn list_for_restaurant(&self, restaurant_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, restaurant_id, name, stock_quantity, created_at, updated_at
            FROM products
            WHERE restaurant_id = ?1
            ORDER BY name
            "#,
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Adjusts product stock by a relative delta.
    ///
    /// ## Why Relative?
    /// `stock_quantity = stock_quantity + delta` is race-safe under
    /// concurrent writers; read-then-write absolute updates are not.
    pub async fn adjust_stock(&self, restaurant_id: &str, id: &str, delta: i64) -> DbResult<()> {
        debug!(id = %id, delta, "Adjusting product stock");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                stock_quantity = stock_quantity + ?3,
                updated_at = ?4
            WHERE id = ?1 AND restaurant_id = ?2
            "#,
        )
        .bind(id)
        .bind(restaurant_id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use uuid::Uuid;

    fn product(restaurant_id: &str, name: &str, stock: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            stock_quantity: stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let p = product("resto-1", "Poulet braisé", 12);
        repo.insert(&p).await.unwrap();

        let loaded = repo.get_by_id("resto-1", &p.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Poulet braisé");
        assert_eq!(loaded.stock_quantity, 12);

        // Tenant scoping
        assert!(repo.get_by_id("resto-2", &p.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_adjust_stock() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let p = product("resto-1", "Riz 25kg", 10);
        repo.insert(&p).await.unwrap();

        repo.adjust_stock("resto-1", &p.id, 24).await.unwrap();
        repo.adjust_stock("resto-1", &p.id, -4).await.unwrap();

        let loaded = repo.get_by_id("resto-1", &p.id).await.unwrap().unwrap();
        assert_eq!(loaded.stock_quantity, 30);

        let err = repo.adjust_stock("resto-1", "ghost", 1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
