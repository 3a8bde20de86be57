use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};
use tracing::info;

use crate::models::{Shop, ShopRequest};
use crate::repository::ShopRepository;

#[derive(Clone)]
pub struct ShopService {
    shops: ShopRepository,
}

impl ShopService {
    pub fn new(shops: ShopRepository) -> Self {
        Self { shops }
    }

    pub async fn get(&self, id: i64) -> Result<Shop, HttpError> {
        self.shops
            .find_by_id(id)
            .await?
            .ok_or_else(|| HttpError::NotFound("Shop not found".into()))
    }

    pub async fn get_by_owner(&self, owner_id: i64) -> Result<Shop, HttpError> {
        self.shops
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| HttpError::NotFound("Shop not found".into()))
    }

    pub async fn list(&self, pageable: &Pageable) -> Result<Page<Shop>, HttpError> {
        let (shops, total) = self.shops.list(pageable).await?;
        Ok(Page::new(shops, pageable, total))
    }

    pub async fn create(&self, user: &CurrentUser, req: ShopRequest) -> Result<Shop, HttpError> {
        user.require_any_role(&[Role::Seller, Role::Admin])?;
        if self.shops.find_by_owner(user.id).await?.is_some() {
            return Err(HttpError::Conflict("User already owns a shop".into()));
        }
        if self.shops.name_taken(req.name.trim(), None).await? {
            return Err(HttpError::Conflict("Shop name already taken".into()));
        }
        let shop = self.shops.insert(user.id, &req).await?;
        info!(shop_id = shop.id, owner_id = user.id, "Shop created");
        Ok(shop)
    }

    pub async fn update(
        &self,
        user: &CurrentUser,
        id: i64,
        req: ShopRequest,
    ) -> Result<Shop, HttpError> {
        let shop = self.get(id).await?;
        user.require_owner_or_admin(shop.owner_id)?;
        if self.shops.name_taken(req.name.trim(), Some(id)).await? {
            return Err(HttpError::Conflict("Shop name already taken".into()));
        }
        let shop = self.shops.update(id, &req).await?;
        info!(shop_id = id, "Shop updated");
        Ok(shop)
    }

    pub async fn delete(&self, user: &CurrentUser, id: i64) -> Result<(), HttpError> {
        let shop = self.get(id).await?;
        user.require_owner_or_admin(shop.owner_id)?;
        self.shops.delete(id).await?;
        info!(shop_id = id, "Shop deleted");
        Ok(())
    }
}
