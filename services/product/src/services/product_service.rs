use mercato_cache::CacheAside;
use mercato_clients::{Availability, ShopClient};
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};
use tracing::info;

use crate::models::{CreateProductRequest, Product, ProductDetails, ProductFilter};
use crate::repository::ProductRepository;

#[derive(Clone)]
pub struct ProductService {
    products: ProductRepository,
    shops: ShopClient,
    cache: CacheAside,
}

fn not_found() -> HttpError {
    HttpError::NotFound("Product not found".into())
}

fn positive(quantity: i64) -> Result<(), HttpError> {
    if quantity < 1 {
        return Err(HttpError::BadRequest("Quantity must be at least 1".into()));
    }
    Ok(())
}

impl ProductService {
    pub fn new(products: ProductRepository, shops: ShopClient, cache: CacheAside) -> Self {
        Self {
            products,
            shops,
            cache,
        }
    }

    /// Cached read keyed by `product:{id}`.
    pub async fn get(&self, id: i64) -> Result<Product, HttpError> {
        self.cache
            .get_or_load(&id.to_string(), || async {
                self.products.find_by_id(id).await?.ok_or_else(not_found)
            })
            .await
    }

    pub async fn search(
        &self,
        filter: &ProductFilter,
        pageable: &Pageable,
    ) -> Result<Page<Product>, HttpError> {
        let (products, total) = self.products.search(filter, pageable).await?;
        Ok(Page::new(products, pageable, total))
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        req: CreateProductRequest,
    ) -> Result<Product, HttpError> {
        user.require_any_role(&[Role::Seller, Role::Admin])?;
        self.require_shop_owner(user, req.shop_id).await?;
        let product = self.products.insert(req.shop_id, &req.details).await?;
        info!(product_id = product.id, shop_id = product.shop_id, "Product created");
        Ok(product)
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        id: i64,
        details: ProductDetails,
    ) -> Result<Product, HttpError> {
        let existing = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        self.require_shop_owner(user, existing.shop_id).await?;
        let product = self.products.update(id, &details).await?;
        self.cache.evict(&id.to_string()).await;
        info!(product_id = id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), HttpError> {
        let existing = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        self.require_shop_owner(user, existing.shop_id).await?;
        self.products.delete(id).await?;
        self.cache.evict(&id.to_string()).await;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    pub async fn availability(&self, id: i64, quantity: i64) -> Result<Availability, HttpError> {
        positive(quantity)?;
        let product = self.products.find_by_id(id).await?.ok_or_else(not_found)?;
        Ok(Availability {
            product_id: id,
            available: product.stock >= quantity,
            stock: product.stock,
        })
    }

    pub async fn decrease_stock(&self, id: i64, quantity: i64) -> Result<(), HttpError> {
        positive(quantity)?;
        if !self.products.decrease_stock(id, quantity).await? {
            // Distinguish a missing product from a short one.
            self.products.find_by_id(id).await?.ok_or_else(not_found)?;
            return Err(HttpError::Conflict("Insufficient stock".into()));
        }
        self.cache.evict(&id.to_string()).await;
        info!(product_id = id, quantity, "Stock decreased");
        Ok(())
    }

    pub async fn increase_stock(&self, id: i64, quantity: i64) -> Result<(), HttpError> {
        positive(quantity)?;
        if !self.products.increase_stock(id, quantity).await? {
            return Err(not_found());
        }
        self.cache.evict(&id.to_string()).await;
        info!(product_id = id, quantity, "Stock increased");
        Ok(())
    }

    async fn require_shop_owner(&self, user: &CurrentUser, shop_id: i64) -> Result<(), HttpError> {
        let shop = self.shops.get_shop(shop_id).await?;
        user.require_owner_or_admin(shop.owner_id)
    }
}
