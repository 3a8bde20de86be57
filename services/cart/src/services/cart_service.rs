use mercato_clients::{CartLine, CartView, ProductClient};
use mercato_core::HttpError;
use tracing::info;

use crate::models::CartItemRow;
use crate::repository::CartRepository;

#[derive(Clone)]
pub struct CartService {
    carts: CartRepository,
    products: ProductClient,
}

impl CartService {
    pub fn new(carts: CartRepository, products: ProductClient) -> Self {
        Self { carts, products }
    }

    /// The user's cart; an empty one when nothing was ever added.
    pub async fn view(&self, user_id: i64) -> Result<CartView, HttpError> {
        let items = self
            .carts
            .items(user_id)
            .await?
            .into_iter()
            .map(|r| CartLine::new(r.product_id, r.product_name, r.unit_price, r.quantity))
            .collect();
        let (promo_code, discount) = match self.carts.cart(user_id).await? {
            Some(cart) => (cart.promo_code, cart.discount),
            None => (None, 0.0),
        };
        Ok(CartView::new(user_id, items, promo_code, discount))
    }

    pub async fn add_item(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartView, HttpError> {
        let existing = self
            .carts
            .item(user_id, product_id)
            .await?
            .map(|i| i.quantity)
            .unwrap_or(0);
        self.put_line(user_id, product_id, existing + quantity).await?;
        info!(user_id, product_id, quantity, "Item added to cart");
        self.view(user_id).await
    }

    pub async fn update_item(
        &self,
        user_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<CartView, HttpError> {
        if self.carts.item(user_id, product_id).await?.is_none() {
            return Err(HttpError::NotFound("Item not in cart".into()));
        }
        if quantity == 0 {
            return self.remove_item(user_id, product_id).await;
        }
        self.put_line(user_id, product_id, quantity).await?;
        info!(user_id, product_id, quantity, "Cart item updated");
        self.view(user_id).await
    }

    pub async fn remove_item(&self, user_id: i64, product_id: i64) -> Result<CartView, HttpError> {
        if !self.carts.remove_item(user_id, product_id).await? {
            return Err(HttpError::NotFound("Item not in cart".into()));
        }
        info!(user_id, product_id, "Item removed from cart");
        self.view(user_id).await
    }

    pub async fn clear(&self, user_id: i64) -> Result<(), HttpError> {
        self.carts.clear(user_id).await?;
        info!(user_id, "Cart cleared");
        Ok(())
    }

    pub async fn apply_promotion(
        &self,
        user_id: i64,
        code: &str,
        discount: f64,
    ) -> Result<CartView, HttpError> {
        if self.carts.items(user_id).await?.is_empty() {
            return Err(HttpError::BadRequest("Cart is empty".into()));
        }
        self.carts.set_promotion(user_id, code, discount).await?;
        info!(user_id, code, discount, "Promotion applied to cart");
        self.view(user_id).await
    }

    pub async fn clear_promotion(&self, user_id: i64) -> Result<CartView, HttpError> {
        self.carts.clear_promotion(user_id).await?;
        self.view(user_id).await
    }

    /// Price the line from the product service and check the requested quantity.
    async fn put_line(&self, user_id: i64, product_id: i64, quantity: i64) -> Result<(), HttpError> {
        let product = self.products.get_product(product_id).await?;
        if quantity > product.stock {
            return Err(HttpError::BadRequest(format!(
                "Only {} unit(s) of '{}' in stock",
                product.stock, product.name
            )));
        }
        let item = CartItemRow {
            product_id,
            product_name: product.name,
            unit_price: product.price,
            quantity,
        };
        self.carts.upsert_item(user_id, &item).await?;
        Ok(())
    }
}
