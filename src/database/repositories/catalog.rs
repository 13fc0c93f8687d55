//! Catalog repository implementation
//!
//! CRUD for categories, products, payment methods, banners, checkout input
//! fields, and the single-row store profile.

use sqlx::PgPool;
use crate::models::catalog::*;
use crate::utils::errors::StoreError;

#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- categories ---

    pub async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, total_sold, sort_order, active, created_at FROM categories \
             WHERE ($1 = FALSE OR active) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, icon, total_sold, sort_order, active, created_at \
             FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn create_category(
        &self,
        request: UpsertCategoryRequest,
    ) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, icon, sort_order, active) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, icon, total_sold, sort_order, active, created_at",
        )
        .bind(&request.name)
        .bind(&request.icon)
        .bind(request.sort_order)
        .bind(request.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: i64,
        request: UpsertCategoryRequest,
    ) -> Result<Category, StoreError> {
        let category = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, icon = $3, sort_order = $4, active = $5 \
             WHERE id = $1 \
             RETURNING id, name, icon, total_sold, sort_order, active, created_at",
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.icon)
        .bind(request.sort_order)
        .bind(request.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("category {}", id)))?;

        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }

    // --- products ---

    pub async fn list_products(
        &self,
        category_id: Option<i64>,
        active_only: bool,
    ) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, category_id, name, amount, price, currency, total_sold, sort_order, \
             active, created_at FROM products \
             WHERE ($1::bigint IS NULL OR category_id = $1) AND ($2 = FALSE OR active) \
             ORDER BY sort_order, id",
        )
        .bind(category_id)
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, category_id, name, amount, price, currency, total_sold, sort_order, \
             active, created_at FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn create_product(
        &self,
        request: UpsertProductRequest,
        default_currency: &str,
    ) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (category_id, name, amount, price, currency, sort_order, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, category_id, name, amount, price, currency, total_sold, sort_order, \
             active, created_at",
        )
        .bind(request.category_id)
        .bind(&request.name)
        .bind(&request.amount)
        .bind(request.price)
        .bind(request.currency.as_deref().unwrap_or(default_currency))
        .bind(request.sort_order)
        .bind(request.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpsertProductRequest,
        default_currency: &str,
    ) -> Result<Product, StoreError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET category_id = $2, name = $3, amount = $4, price = $5, \
             currency = $6, sort_order = $7, active = $8 WHERE id = $1 \
             RETURNING id, category_id, name, amount, price, currency, total_sold, sort_order, \
             active, created_at",
        )
        .bind(id)
        .bind(request.category_id)
        .bind(&request.name)
        .bind(&request.amount)
        .bind(request.price)
        .bind(request.currency.as_deref().unwrap_or(default_currency))
        .bind(request.sort_order)
        .bind(request.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::ProductNotFound { product_id: id })?;

        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::ProductNotFound { product_id: id });
        }
        Ok(())
    }

    // --- payment methods ---

    pub async fn list_payment_methods(
        &self,
        active_only: bool,
    ) -> Result<Vec<PaymentMethod>, StoreError> {
        let methods = sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, name, account_name, account_number, instructions, active, created_at \
             FROM payment_methods WHERE ($1 = FALSE OR active) ORDER BY id",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(methods)
    }

    pub async fn find_payment_method(&self, id: i64) -> Result<Option<PaymentMethod>, StoreError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "SELECT id, name, account_name, account_number, instructions, active, created_at \
             FROM payment_methods WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(method)
    }

    pub async fn create_payment_method(
        &self,
        request: UpsertPaymentMethodRequest,
    ) -> Result<PaymentMethod, StoreError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "INSERT INTO payment_methods (name, account_name, account_number, instructions, active) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, name, account_name, account_number, instructions, active, created_at",
        )
        .bind(&request.name)
        .bind(&request.account_name)
        .bind(&request.account_number)
        .bind(&request.instructions)
        .bind(request.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(method)
    }

    pub async fn update_payment_method(
        &self,
        id: i64,
        request: UpsertPaymentMethodRequest,
    ) -> Result<PaymentMethod, StoreError> {
        let method = sqlx::query_as::<_, PaymentMethod>(
            "UPDATE payment_methods SET name = $2, account_name = $3, account_number = $4, \
             instructions = $5, active = $6 WHERE id = $1 \
             RETURNING id, name, account_name, account_number, instructions, active, created_at",
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.account_name)
        .bind(&request.account_number)
        .bind(&request.instructions)
        .bind(request.active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::PaymentMethodNotFound {
            payment_method_id: id,
        })?;

        Ok(method)
    }

    pub async fn delete_payment_method(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM payment_methods WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::PaymentMethodNotFound {
                payment_method_id: id,
            });
        }
        Ok(())
    }

    // --- banners ---

    pub async fn list_banners(&self, active_only: bool) -> Result<Vec<Banner>, StoreError> {
        let banners = sqlx::query_as::<_, Banner>(
            "SELECT id, image_file_id, caption, sort_order, active, created_at FROM banners \
             WHERE ($1 = FALSE OR active) ORDER BY sort_order, id",
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(banners)
    }

    pub async fn create_banner(&self, request: UpsertBannerRequest) -> Result<Banner, StoreError> {
        let banner = sqlx::query_as::<_, Banner>(
            "INSERT INTO banners (image_file_id, caption, sort_order, active) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, image_file_id, caption, sort_order, active, created_at",
        )
        .bind(&request.image_file_id)
        .bind(&request.caption)
        .bind(request.sort_order)
        .bind(request.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(banner)
    }

    pub async fn delete_banner(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("banner {}", id)));
        }
        Ok(())
    }

    // --- checkout input fields ---

    pub async fn list_input_fields(
        &self,
        category_id: Option<i64>,
    ) -> Result<Vec<InputField>, StoreError> {
        let fields = sqlx::query_as::<_, InputField>(
            "SELECT id, category_id, field_key, label, placeholder, required, sort_order \
             FROM input_fields WHERE ($1::bigint IS NULL OR category_id = $1) \
             ORDER BY sort_order, id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fields)
    }

    pub async fn create_input_field(
        &self,
        request: UpsertInputFieldRequest,
    ) -> Result<InputField, StoreError> {
        let field = sqlx::query_as::<_, InputField>(
            "INSERT INTO input_fields (category_id, field_key, label, placeholder, required, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, category_id, field_key, label, placeholder, required, sort_order",
        )
        .bind(request.category_id)
        .bind(&request.field_key)
        .bind(&request.label)
        .bind(&request.placeholder)
        .bind(request.required)
        .bind(request.sort_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(field)
    }

    pub async fn delete_input_field(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM input_fields WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("input field {}", id)));
        }
        Ok(())
    }

    // --- store profile ---

    pub async fn get_store_profile(&self) -> Result<StoreProfile, StoreError> {
        let profile = sqlx::query_as::<_, StoreProfile>(
            "SELECT id, store_name, welcome_text, support_contact, maintenance_mode, updated_at \
             FROM store_profile WHERE id = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }

    pub async fn update_store_profile(
        &self,
        request: UpdateStoreProfileRequest,
    ) -> Result<StoreProfile, StoreError> {
        let profile = sqlx::query_as::<_, StoreProfile>(
            "UPDATE store_profile SET \
             store_name = COALESCE($1, store_name), \
             welcome_text = COALESCE($2, welcome_text), \
             support_contact = COALESCE($3, support_contact), \
             maintenance_mode = COALESCE($4, maintenance_mode), \
             updated_at = now() \
             WHERE id = 1 \
             RETURNING id, store_name, welcome_text, support_contact, maintenance_mode, updated_at",
        )
        .bind(&request.store_name)
        .bind(&request.welcome_text)
        .bind(&request.support_contact)
        .bind(request.maintenance_mode)
        .fetch_one(&self.pool)
        .await?;

        Ok(profile)
    }
}
