//! Typed clients for service-to-service calls.
//!
//! Each client wraps a [`ServiceClient`](mercato_core::ServiceClient) bound to
//! one upstream and exposes one method per remote endpoint. The request and
//! response types double as the wire contract of that endpoint, so the
//! serving side uses the same structs.

pub mod cart;
pub mod money;
pub mod notification;
pub mod order;
pub mod product;
pub mod shop;

pub use cart::{ApplyPromotion, CartClient, CartLine, CartView};
pub use notification::{NotificationClient, NotificationKind, NotificationRequest};
pub use order::{OrderClient, OrderStatus, OrderView, StatusUpdate};
pub use product::{Availability, ProductClient, ProductInfo, StockChange};
pub use shop::{ShopClient, ShopInfo};
