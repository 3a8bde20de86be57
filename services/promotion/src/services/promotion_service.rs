use chrono::Utc;
use mercato_clients::money::round_cents;
use mercato_clients::{CartClient, CartView, ProductClient};
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use tracing::{info, warn};

use crate::models::{DiscountType, Promotion, PromotionQuote, PromotionRequest};
use crate::repository::PromotionRepository;

#[derive(Clone)]
pub struct PromotionService {
    promotions: PromotionRepository,
    carts: CartClient,
    products: ProductClient,
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

fn not_found() -> HttpError {
    HttpError::NotFound("Promotion not found".into())
}

fn check_request(req: &PromotionRequest) -> Result<String, HttpError> {
    let code = normalize(&req.code);
    if !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(HttpError::BadRequest(
            "Code may only contain letters, digits, '-' and '_'".into(),
        ));
    }
    if req.ends_at <= req.starts_at {
        return Err(HttpError::BadRequest("ends_at must be after starts_at".into()));
    }
    if req.discount_type == DiscountType::Percentage && req.discount_value > 100.0 {
        return Err(HttpError::BadRequest("Percentage cannot exceed 100".into()));
    }
    Ok(code)
}

impl PromotionService {
    pub fn new(promotions: PromotionRepository, carts: CartClient, products: ProductClient) -> Self {
        Self {
            promotions,
            carts,
            products,
        }
    }

    pub async fn get(&self, id: i64) -> Result<Promotion, HttpError> {
        self.promotions.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Promotion, HttpError> {
        self.promotions
            .find_by_code(&normalize(code))
            .await?
            .ok_or_else(not_found)
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Promotion>, HttpError> {
        let (promos, total) = self.promotions.list(pageable).await?;
        Ok(Page::new(promos, pageable, total))
    }

    pub async fn create(&self, req: PromotionRequest) -> Result<Promotion, HttpError> {
        let code = check_request(&req)?;
        if self.promotions.find_by_code(&code).await?.is_some() {
            return Err(HttpError::Conflict(format!("Promotion code {code} already exists")));
        }
        let promo = self.promotions.insert(&code, &req).await?;
        info!(promotion_id = promo.id, code = %promo.code, "Promotion created");
        Ok(promo)
    }

    pub async fn update(&self, id: i64, req: PromotionRequest) -> Result<Promotion, HttpError> {
        let code = check_request(&req)?;
        if let Some(other) = self.promotions.find_by_code(&code).await? {
            if other.id != id {
                return Err(HttpError::Conflict(format!("Promotion code {code} already exists")));
            }
        }
        let promo = self
            .promotions
            .update(id, &code, &req)
            .await?
            .ok_or_else(not_found)?;
        info!(promotion_id = id, "Promotion updated");
        Ok(promo)
    }

    pub async fn delete(&self, id: i64) -> Result<(), HttpError> {
        if !self.promotions.delete(id).await? {
            return Err(not_found());
        }
        info!(promotion_id = id, "Promotion deleted");
        Ok(())
    }

    /// Price `code` against the user's cart without writing anything.
    pub async fn validate(&self, user_id: i64, code: &str) -> Result<PromotionQuote, HttpError> {
        let (_, _, quote) = self.quote(user_id, code).await?;
        Ok(quote)
    }

    /// Write the discount to the cart, then count the use.
    pub async fn apply(&self, user_id: i64, code: &str) -> Result<PromotionQuote, HttpError> {
        let (promo, cart, quote) = self.quote(user_id, code).await?;
        if cart.promo_code.as_deref() == Some(promo.code.as_str()) {
            return Err(HttpError::Conflict("Promotion already applied to this cart".into()));
        }

        self.carts
            .apply_promotion(user_id, &promo.code, quote.discount)
            .await?;

        let failure = match self.promotions.increment_usage(promo.id).await {
            Ok(true) => None,
            Ok(false) => {
                warn!(promotion_id = promo.id, user_id, "Usage limit reached concurrently, rolling back cart");
                Some(HttpError::BadRequest("Promotion usage limit reached".into()))
            }
            Err(e) => {
                warn!(promotion_id = promo.id, user_id, error = %e, "Usage not counted, rolling back cart");
                Some(e.into())
            }
        };
        if let Some(err) = failure {
            if let Err(e) = self.carts.clear_promotion(user_id).await {
                warn!(user_id, error = %e, "Failed to roll back cart promotion");
            }
            return Err(err);
        }

        info!(promotion_id = promo.id, user_id, discount = quote.discount, "Promotion applied");
        Ok(quote)
    }

    async fn quote(
        &self,
        user_id: i64,
        code: &str,
    ) -> Result<(Promotion, CartView, PromotionQuote), HttpError> {
        let promo = self.get_by_code(code).await?;
        if let Some(reason) = promo.unusable_reason(Utc::now()) {
            return Err(HttpError::BadRequest(reason.into()));
        }

        let cart = self.carts.get_cart(user_id).await?;
        if cart.is_empty() {
            return Err(HttpError::BadRequest("Cart is empty".into()));
        }

        let eligible = self.eligible_subtotal(&promo, &cart).await?;
        if eligible <= 0.0 {
            return Err(HttpError::BadRequest(
                "No items in the cart are eligible for this promotion".into(),
            ));
        }
        if eligible < promo.min_order_amount {
            return Err(HttpError::BadRequest(format!(
                "Minimum order amount of {:.2} not reached",
                promo.min_order_amount
            )));
        }

        let discount = promo.discount_for(eligible);
        let quote = PromotionQuote {
            code: promo.code.clone(),
            subtotal: cart.subtotal,
            eligible_subtotal: eligible,
            discount,
            total: round_cents(cart.subtotal - discount),
        };
        Ok((promo, cart, quote))
    }

    async fn eligible_subtotal(&self, promo: &Promotion, cart: &CartView) -> Result<f64, HttpError> {
        if !promo.is_restricted() {
            return Ok(cart.subtotal);
        }
        let mut eligible = 0.0;
        for line in &cart.items {
            let product = match self.products.get_product(line.product_id).await {
                Ok(product) => product,
                // Delisted products never qualify.
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };
            if promo.matches(product.shop_id, &product.category) {
                eligible += line.line_total;
            }
        }
        Ok(round_cents(eligible))
    }
}
