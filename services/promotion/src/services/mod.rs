mod promotion_service;

pub use promotion_service::PromotionService;
