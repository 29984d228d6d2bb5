//! Order handlers. Both routes require a bearer token.
//!
//! ```text
//! GET  /orders/myOrders
//! POST /orders/addOrder {"product":"PE膜","quantity":3,"price":9.5}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{DomainError, OrderDraft, OrderValidationError, OrderView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::Authenticated;
use crate::inbound::http::state::HttpState;

/// Message returned after an order is stored.
pub const ORDER_SUCCESS_MESSAGE: &str = "订单提交成功";

/// Request body for `POST /orders/addOrder`. Any owner field the client sends
/// is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AddOrderRequest {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl TryFrom<AddOrderRequest> for OrderDraft {
    type Error = OrderValidationError;

    fn try_from(value: AddOrderRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(value.product.as_deref(), value.quantity, value.price)
    }
}

fn map_order_validation_error(err: OrderValidationError) -> DomainError {
    let (field, code) = match err {
        OrderValidationError::EmptyProduct => ("product", "empty_product"),
        OrderValidationError::MissingQuantity => ("quantity", "missing_quantity"),
        OrderValidationError::NonPositiveQuantity => ("quantity", "non_positive_quantity"),
        OrderValidationError::MissingPrice => ("price", "missing_price"),
        OrderValidationError::InvalidPrice => ("price", "invalid_price"),
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

#[derive(Debug, Serialize)]
struct OrderPlaced {
    message: &'static str,
    order: OrderView,
}

/// Orders placed by the caller, oldest first.
#[get("/orders/myOrders")]
pub async fn my_orders(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<web::Json<Vec<OrderView>>> {
    let orders = state.orders_query.list_for(caller.identity()).await?;
    Ok(web::Json(orders))
}

/// Place an order owned by the caller.
#[post("/orders/addOrder")]
pub async fn add_order(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<AddOrderRequest>,
) -> ApiResult<HttpResponse> {
    let draft = OrderDraft::try_from(payload.into_inner()).map_err(map_order_validation_error)?;
    let order = state.orders.place(caller.identity(), draft).await?;
    Ok(HttpResponse::Created().json(OrderPlaced {
        message: ORDER_SUCCESS_MESSAGE,
        order,
    }))
}
