use mercato_clients::{NotificationClient, NotificationKind, NotificationRequest, OrderClient, OrderStatus};
use mercato_core::HttpError;
use mercato_security::CurrentUser;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Payment, PaymentMethod, PaymentStatus};
use crate::repository::PaymentRepository;

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    orders: OrderClient,
    notifications: NotificationClient,
}

impl PaymentService {
    pub fn new(
        payments: PaymentRepository,
        orders: OrderClient,
        notifications: NotificationClient,
    ) -> Self {
        Self {
            payments,
            orders,
            notifications,
        }
    }

    pub async fn get(&self, user: &CurrentUser, id: i64) -> Result<Payment, HttpError> {
        let payment = self
            .payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| HttpError::NotFound("Payment not found".into()))?;
        user.require_owner_or_admin(payment.user_id)?;
        Ok(payment)
    }

    pub async fn list_for_order(&self, user: &CurrentUser, order_id: i64) -> Result<Vec<Payment>, HttpError> {
        let order = self.orders.get_order(order_id).await?;
        user.require_owner_or_admin(order.user_id)?;
        Ok(self.payments.find_by_order(order_id).await?)
    }

    /// Capture the full order total. The gateway is simulated: every attempt
    /// succeeds unless the order service refuses the move to PAID, in which
    /// case the payment is kept as FAILED.
    pub async fn pay(
        &self,
        user: &CurrentUser,
        order_id: i64,
        method: PaymentMethod,
    ) -> Result<Payment, HttpError> {
        let order = self.orders.get_order(order_id).await?;
        user.require_owner_or_admin(order.user_id)?;
        if order.status != OrderStatus::Pending {
            return Err(HttpError::Conflict(format!(
                "Order #{order_id} is {} and cannot be paid",
                order.status
            )));
        }
        if self.payments.has_completed(order_id).await? {
            return Err(HttpError::Conflict(format!("Order #{order_id} is already paid")));
        }

        let reference = Uuid::new_v4().to_string();
        let payment = self
            .payments
            .insert(
                order_id,
                order.user_id,
                order.total,
                method,
                PaymentStatus::Completed,
                &reference,
            )
            .await?;

        if let Err(e) = self.orders.update_status(order_id, OrderStatus::Paid).await {
            warn!(payment_id = payment.id, order_id, error = %e, "Order not marked paid, failing payment");
            self.payments.set_status(payment.id, PaymentStatus::Failed).await?;
            return Err(e);
        }

        info!(payment_id = payment.id, order_id, amount = payment.amount, "Payment completed");
        self.notifications
            .notify(NotificationRequest::new(
                order.user_id,
                NotificationKind::PaymentCompleted,
                "Payment received",
                format!("We received {:.2} for order #{order_id}.", payment.amount),
            ))
            .await;
        Ok(payment)
    }

    /// Refund a completed payment. The order is cancelled first so that a
    /// refund is never recorded for an order that kept its goods. An order
    /// the customer already cancelled is left as is.
    pub async fn refund(&self, user: &CurrentUser, id: i64) -> Result<Payment, HttpError> {
        let payment = self.get(user, id).await?;
        if payment.status != PaymentStatus::Completed {
            return Err(HttpError::Conflict("Only completed payments can be refunded".into()));
        }

        let order = self.orders.get_order(payment.order_id).await?;
        if order.status == OrderStatus::Cancelled {
            info!(order_id = order.id, "Order already cancelled, refunding payment only");
        } else {
            self.orders
                .update_status(payment.order_id, OrderStatus::Cancelled)
                .await?;
        }
        let refunded = self.payments.set_status(payment.id, PaymentStatus::Refunded).await?;

        info!(payment_id = payment.id, order_id = payment.order_id, "Payment refunded");
        self.notifications
            .notify(NotificationRequest::new(
                payment.user_id,
                NotificationKind::PaymentRefunded,
                "Payment refunded",
                format!(
                    "{:.2} for order #{} has been refunded.",
                    payment.amount, payment.order_id
                ),
            ))
            .await;
        Ok(refunded)
    }
}
