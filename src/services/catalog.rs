//! Catalog management service
//!
//! Thin orchestration over the catalog repository: buyers see only active
//! entries, admins see and edit everything. Product currency defaults to
//! the store currency when a request omits it.

use tracing::{info, instrument};
use crate::config::Settings;
use crate::database::repositories::CatalogRepository;
use crate::models::catalog::*;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct CatalogService {
    catalog: CatalogRepository,
    settings: Settings,
}

impl CatalogService {
    pub fn new(catalog: CatalogRepository, settings: Settings) -> Self {
        Self { catalog, settings }
    }

    // --- categories ---

    pub async fn list_categories(&self, active_only: bool) -> Result<Vec<Category>> {
        self.catalog.list_categories(active_only).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(&self, request: UpsertCategoryRequest) -> Result<Category> {
        let category = self.catalog.create_category(request).await?;
        info!(category_id = category.id, "Category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: i64, request: UpsertCategoryRequest) -> Result<Category> {
        let category = self.catalog.update_category(id, request).await?;
        info!(category_id = id, "Category updated");
        Ok(category)
    }

    pub async fn delete_category(&self, id: i64) -> Result<()> {
        self.catalog.delete_category(id).await?;
        info!(category_id = id, "Category deleted");
        Ok(())
    }

    // --- products ---

    pub async fn list_products(
        &self,
        category_id: Option<i64>,
        active_only: bool,
    ) -> Result<Vec<Product>> {
        self.catalog.list_products(category_id, active_only).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: UpsertProductRequest) -> Result<Product> {
        let product = self
            .catalog
            .create_product(request, &self.settings.store.currency)
            .await?;
        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    pub async fn update_product(&self, id: i64, request: UpsertProductRequest) -> Result<Product> {
        let product = self
            .catalog
            .update_product(id, request, &self.settings.store.currency)
            .await?;
        info!(product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn delete_product(&self, id: i64) -> Result<()> {
        self.catalog.delete_product(id).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    // --- payment methods ---

    pub async fn list_payment_methods(&self, active_only: bool) -> Result<Vec<PaymentMethod>> {
        self.catalog.list_payment_methods(active_only).await
    }

    pub async fn create_payment_method(
        &self,
        request: UpsertPaymentMethodRequest,
    ) -> Result<PaymentMethod> {
        let method = self.catalog.create_payment_method(request).await?;
        info!(payment_method_id = method.id, "Payment method created");
        Ok(method)
    }

    pub async fn update_payment_method(
        &self,
        id: i64,
        request: UpsertPaymentMethodRequest,
    ) -> Result<PaymentMethod> {
        let method = self.catalog.update_payment_method(id, request).await?;
        info!(payment_method_id = id, "Payment method updated");
        Ok(method)
    }

    pub async fn delete_payment_method(&self, id: i64) -> Result<()> {
        self.catalog.delete_payment_method(id).await?;
        info!(payment_method_id = id, "Payment method deleted");
        Ok(())
    }

    // --- banners ---

    pub async fn list_banners(&self, active_only: bool) -> Result<Vec<Banner>> {
        self.catalog.list_banners(active_only).await
    }

    pub async fn create_banner(&self, request: UpsertBannerRequest) -> Result<Banner> {
        let banner = self.catalog.create_banner(request).await?;
        info!(banner_id = banner.id, "Banner created");
        Ok(banner)
    }

    pub async fn delete_banner(&self, id: i64) -> Result<()> {
        self.catalog.delete_banner(id).await?;
        info!(banner_id = id, "Banner deleted");
        Ok(())
    }

    // --- checkout input fields ---

    pub async fn list_input_fields(&self, category_id: Option<i64>) -> Result<Vec<InputField>> {
        self.catalog.list_input_fields(category_id).await
    }

    pub async fn create_input_field(&self, request: UpsertInputFieldRequest) -> Result<InputField> {
        let field = self.catalog.create_input_field(request).await?;
        info!(field_id = field.id, "Input field created");
        Ok(field)
    }

    pub async fn delete_input_field(&self, id: i64) -> Result<()> {
        self.catalog.delete_input_field(id).await?;
        info!(field_id = id, "Input field deleted");
        Ok(())
    }

    // --- store profile ---

    pub async fn get_store_profile(&self) -> Result<StoreProfile> {
        self.catalog.get_store_profile().await
    }

    pub async fn update_store_profile(
        &self,
        request: UpdateStoreProfileRequest,
    ) -> Result<StoreProfile> {
        let profile = self.catalog.update_store_profile(request).await?;
        info!("Store profile updated");
        Ok(profile)
    }
}
