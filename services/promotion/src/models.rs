use chrono::{DateTime, Utc};
use garde::Validate;
use mercato_clients::money::round_cents;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    FixedAmount,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Promotion {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_amount: f64,
    pub usage_limit: Option<i64>,
    pub usage_count: i64,
    pub shop_id: Option<i64>,
    pub category: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Promotion {
    /// Why the promotion cannot be used at `now`, if it cannot.
    pub fn unusable_reason(&self, now: DateTime<Utc>) -> Option<&'static str> {
        if !self.active {
            Some("Promotion is not active")
        } else if now < self.starts_at {
            Some("Promotion has not started yet")
        } else if now > self.ends_at {
            Some("Promotion has expired")
        } else if self.usage_limit.is_some_and(|limit| self.usage_count >= limit) {
            Some("Promotion usage limit reached")
        } else {
            None
        }
    }

    /// Only lines matching these conditions count towards the discount.
    pub fn is_restricted(&self) -> bool {
        self.shop_id.is_some() || self.category.is_some()
    }

    pub fn matches(&self, shop_id: i64, category: &str) -> bool {
        let shop_ok = self.shop_id.map_or(true, |s| s == shop_id);
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| c.eq_ignore_ascii_case(category));
        shop_ok && category_ok
    }

    /// Discount on `eligible`, capped by `max_discount` and by `eligible` itself.
    pub fn discount_for(&self, eligible: f64) -> f64 {
        let raw = match self.discount_type {
            DiscountType::Percentage => eligible * self.discount_value / 100.0,
            DiscountType::FixedAmount => self.discount_value,
        };
        let capped = match self.max_discount {
            Some(max) => raw.min(max),
            None => raw,
        };
        round_cents(capped.min(eligible).max(0.0))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PromotionRequest {
    #[garde(length(min = 3, max = 50))]
    pub code: String,
    #[garde(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[garde(length(max = 2000))]
    pub description: String,
    #[garde(skip)]
    pub discount_type: DiscountType,
    #[garde(range(min = 0.01))]
    pub discount_value: f64,
    #[garde(inner(range(min = 0.0)))]
    pub max_discount: Option<f64>,
    #[serde(default)]
    #[garde(range(min = 0.0))]
    pub min_order_amount: f64,
    #[garde(inner(range(min = 1)))]
    pub usage_limit: Option<i64>,
    #[garde(inner(range(min = 1)))]
    pub shop_id: Option<i64>,
    #[garde(inner(length(min = 1, max = 100)))]
    pub category: Option<String>,
    #[garde(skip)]
    pub starts_at: DateTime<Utc>,
    #[garde(skip)]
    pub ends_at: DateTime<Utc>,
    #[serde(default = "enabled")]
    #[garde(skip)]
    pub active: bool,
}

fn enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct CodeRequest {
    #[garde(length(min = 1, max = 50))]
    pub code: String,
}

/// What a code is worth against the caller's current cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionQuote {
    pub code: String,
    pub subtotal: f64,
    pub eligible_subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn promo(discount_type: DiscountType, value: f64, max: Option<f64>) -> Promotion {
        let now = Utc::now();
        Promotion {
            id: 1,
            code: "SPRING".into(),
            name: "Spring".into(),
            description: String::new(),
            discount_type,
            discount_value: value,
            max_discount: max,
            min_order_amount: 0.0,
            usage_limit: Some(2),
            usage_count: 0,
            shop_id: None,
            category: None,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(1),
            active: true,
            created_at: now,
        }
    }

    #[test]
    fn percentage_is_rounded_and_capped() {
        let p = promo(DiscountType::Percentage, 12.5, None);
        assert_eq!(p.discount_for(99.99), 12.5);
        let p = promo(DiscountType::Percentage, 50.0, Some(10.0));
        assert_eq!(p.discount_for(100.0), 10.0);
    }

    #[test]
    fn fixed_amount_never_exceeds_eligible() {
        let p = promo(DiscountType::FixedAmount, 25.0, None);
        assert_eq!(p.discount_for(100.0), 25.0);
        assert_eq!(p.discount_for(12.4), 12.4);
    }

    #[test]
    fn usability_checks() {
        let now = Utc::now();
        let mut p = promo(DiscountType::FixedAmount, 5.0, None);
        assert_eq!(p.unusable_reason(now), None);
        p.usage_count = 2;
        assert_eq!(p.unusable_reason(now), Some("Promotion usage limit reached"));
        p.usage_count = 0;
        p.ends_at = now - Duration::hours(1);
        assert_eq!(p.unusable_reason(now), Some("Promotion has expired"));
        p.active = false;
        assert_eq!(p.unusable_reason(now), Some("Promotion is not active"));
    }

    #[test]
    fn restrictions_match_shop_and_category() {
        let mut p = promo(DiscountType::FixedAmount, 5.0, None);
        assert!(!p.is_restricted());
        p.shop_id = Some(3);
        p.category = Some("Kitchen".into());
        assert!(p.matches(3, "kitchen"));
        assert!(!p.matches(4, "kitchen"));
        assert!(!p.matches(3, "garden"));
    }
}
