use mercato_clients::ProductClient;
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::CurrentUser;
use tracing::info;

use crate::models::{RatingSummary, Review, ReviewBody};
use crate::repository::ReviewRepository;

#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    products: ProductClient,
}

impl ReviewService {
    pub fn new(reviews: ReviewRepository, products: ProductClient) -> Self {
        Self { reviews, products }
    }

    async fn find(&self, id: i64) -> Result<Review, HttpError> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| HttpError::NotFound("Review not found".into()))
    }

    pub async fn create(
        &self,
        user: &CurrentUser,
        product_id: i64,
        body: &ReviewBody,
    ) -> Result<Review, HttpError> {
        self.products.get_product(product_id).await?;
        if self.reviews.exists(user.id, product_id).await? {
            return Err(HttpError::Conflict("You have already reviewed this product".into()));
        }
        let review = self.reviews.insert(user.id, product_id, body).await?;
        info!(review_id = review.id, product_id, user_id = user.id, rating = review.rating, "Review created");
        Ok(review)
    }

    pub async fn list_for_product(
        &self,
        product_id: i64,
        pageable: &Pageable,
    ) -> Result<Page<Review>, HttpError> {
        let (reviews, total) = self.reviews.list_for_product(product_id, pageable).await?;
        Ok(Page::new(reviews, pageable, total))
    }

    pub async fn summary(&self, product_id: i64) -> Result<RatingSummary, HttpError> {
        let (average, count) = self.reviews.rating_stats(product_id).await?;
        Ok(RatingSummary::new(product_id, average, count))
    }

    pub async fn update(&self, user: &CurrentUser, id: i64, body: &ReviewBody) -> Result<Review, HttpError> {
        let review = self.find(id).await?;
        if review.user_id != user.id {
            return Err(HttpError::Forbidden("Only the author can edit a review".into()));
        }
        Ok(self.reviews.update(id, body).await?)
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), HttpError> {
        let review = self.find(id).await?;
        user.require_owner_or_admin(review.user_id)?;
        self.reviews.delete(id).await?;
        info!(review_id = id, by = user.id, "Review deleted");
        Ok(())
    }
}
