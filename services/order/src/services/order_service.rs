use mercato_clients::{NotificationKind, NotificationRequest, OrderStatus};
use mercato_core::HttpError;
use mercato_data::{Page, Pageable};
use mercato_security::{CurrentUser, Role};
use tracing::{info, warn};

use crate::models::Order;
use crate::repository::{OrderRepository, OrderScope};
use crate::state::OrderClients;

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    clients: OrderClients,
}

fn not_found() -> HttpError {
    HttpError::NotFound("Order not found".into())
}

impl OrderService {
    pub fn new(orders: OrderRepository, clients: OrderClients) -> Self {
        Self { orders, clients }
    }

    pub async fn get(&self, id: i64) -> Result<Order, HttpError> {
        self.orders.find_by_id(id).await?.ok_or_else(not_found)
    }

    pub async fn get_for(&self, user: &CurrentUser, id: i64) -> Result<Order, HttpError> {
        let order = self.get(id).await?;
        user.require_owner_or_admin(order.user_id)?;
        Ok(order)
    }

    pub async fn list(&self, scope: OrderScope, pageable: &Pageable) -> Result<Page<Order>, HttpError> {
        let (orders, total) = self.orders.list(scope, pageable).await?;
        Ok(Page::new(orders, pageable, total))
    }

    /// Check out the user's cart.
    ///
    /// Stock is taken line by line after the order row exists. If any line
    /// cannot be taken, lines already taken are put back and the order ends
    /// up CANCELLED.
    pub async fn create(&self, user: &CurrentUser, shipping_address: &str) -> Result<Order, HttpError> {
        let cart = self.clients.carts.get_cart(user.id).await?;
        if cart.is_empty() {
            return Err(HttpError::BadRequest("Cart is empty".into()));
        }

        for line in &cart.items {
            let availability = self
                .clients
                .products
                .check_availability(line.product_id, line.quantity)
                .await?;
            if !availability.available {
                return Err(HttpError::Conflict(format!(
                    "Insufficient stock for '{}'",
                    line.product_name
                )));
            }
        }

        let order_id = self
            .orders
            .insert_from_cart(&cart, shipping_address.trim())
            .await?;

        let mut taken = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            match self
                .clients
                .products
                .decrease_stock(line.product_id, line.quantity)
                .await
            {
                Ok(()) => taken.push((line.product_id, line.quantity)),
                Err(e) => {
                    warn!(order_id, product_id = line.product_id, error = %e, "Stock reservation failed, compensating");
                    self.restock(order_id, taken).await;
                    self.orders
                        .update_status(order_id, OrderStatus::Pending, OrderStatus::Cancelled)
                        .await?;
                    return Err(match e {
                        HttpError::Conflict(_) => HttpError::Conflict(format!(
                            "Insufficient stock for '{}'",
                            line.product_name
                        )),
                        other => other,
                    });
                }
            }
        }

        if let Err(e) = self.clients.carts.clear_cart(user.id).await {
            warn!(order_id, user_id = user.id, error = %e, "Cart not cleared after checkout");
        }
        self.clients
            .notifications
            .notify(NotificationRequest::new(
                user.id,
                NotificationKind::OrderCreated,
                "Order placed",
                format!("Your order #{order_id} of {:.2} has been placed.", cart.total),
            ))
            .await;

        info!(order_id, user_id = user.id, total = cart.total, "Order created");
        self.get(order_id).await
    }

    pub async fn cancel(&self, user: &CurrentUser, id: i64) -> Result<Order, HttpError> {
        let order = self.get_for(user, id).await?;
        self.transition(order, OrderStatus::Cancelled).await
    }

    pub async fn update_status(
        &self,
        user: &CurrentUser,
        id: i64,
        next: OrderStatus,
    ) -> Result<Order, HttpError> {
        user.require_any_role(&[Role::Admin, Role::Seller])?;
        let order = self.get(id).await?;
        self.transition(order, next).await
    }

    /// Status change requested by another service (payment).
    pub async fn update_status_internal(&self, id: i64, next: OrderStatus) -> Result<Order, HttpError> {
        let order = self.get(id).await?;
        self.transition(order, next).await
    }

    async fn transition(&self, order: Order, next: OrderStatus) -> Result<Order, HttpError> {
        if !order.status.can_transition_to(next) {
            return Err(HttpError::Conflict(format!(
                "Cannot change order status from {} to {}",
                order.status, next
            )));
        }
        if !self.orders.update_status(order.id, order.status, next).await? {
            return Err(HttpError::Conflict("Order was modified concurrently".into()));
        }
        info!(order_id = order.id, from = %order.status, to = %next, "Order status changed");

        if next == OrderStatus::Cancelled {
            let lines = order.items.iter().map(|i| (i.product_id, i.quantity)).collect();
            self.restock(order.id, lines).await;
        }

        self.clients
            .notifications
            .notify(NotificationRequest::new(
                order.user_id,
                NotificationKind::OrderStatusChanged,
                "Order updated",
                format!("Your order #{} is now {next}.", order.id),
            ))
            .await;

        self.get(order.id).await
    }

    /// Best effort: a failed restock is logged and left for manual repair.
    async fn restock(&self, order_id: i64, lines: Vec<(i64, i64)>) {
        for (product_id, quantity) in lines {
            if let Err(e) = self.clients.products.increase_stock(product_id, quantity).await {
                warn!(order_id, product_id, quantity, error = %e, "Restock failed");
            }
        }
    }
}
