//! Orders submitted by authenticated accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AccountId;

/// Validation errors for order input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderValidationError {
    /// Product label missing or blank.
    #[error("product must not be empty")]
    EmptyProduct,
    /// Quantity missing.
    #[error("quantity is required")]
    MissingQuantity,
    /// Quantity zero or negative.
    #[error("quantity must be positive")]
    NonPositiveQuantity,
    /// Price missing.
    #[error("price is required")]
    MissingPrice,
    /// Price negative, infinite, or NaN.
    #[error("price must be a finite, non-negative number")]
    InvalidPrice,
}

/// Validated order content. The owner comes from the caller's identity.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    product: String,
    quantity: i64,
    price: f64,
}

impl OrderDraft {
    /// Validate raw order input.
    ///
    /// # Examples
    /// ```
    /// use factory_backend::domain::OrderDraft;
    ///
    /// let draft = OrderDraft::try_from_parts(Some("PE膜"), Some(3), Some(9.5)).unwrap();
    /// assert_eq!(draft.quantity(), 3);
    /// assert!(OrderDraft::try_from_parts(Some("PE膜"), Some(0), Some(9.5)).is_err());
    /// ```
    pub fn try_from_parts(
        product: Option<&str>,
        quantity: Option<i64>,
        price: Option<f64>,
    ) -> Result<Self, OrderValidationError> {
        let product = product
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(OrderValidationError::EmptyProduct)?;
        let quantity = quantity.ok_or(OrderValidationError::MissingQuantity)?;
        if quantity <= 0 {
            return Err(OrderValidationError::NonPositiveQuantity);
        }
        let price = price.ok_or(OrderValidationError::MissingPrice)?;
        if !price.is_finite() || price < 0.0 {
            return Err(OrderValidationError::InvalidPrice);
        }
        Ok(Self {
            product: product.to_owned(),
            quantity,
            price,
        })
    }

    /// Product label.
    pub fn product(&self) -> &str {
        self.product.as_str()
    }

    /// Units ordered.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price.
    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Storage identifier; never exposed to callers.
    pub id: Uuid,
    /// Owning account.
    pub owner: AccountId,
    /// Product label.
    pub product: String,
    /// Units ordered.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Stamp a draft with its owner and submission time.
    pub fn from_draft(draft: OrderDraft, owner: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            product: draft.product,
            quantity: draft.quantity,
            price: draft.price,
            created_at: now,
        }
    }

    /// Public projection of the order.
    pub fn to_view(&self) -> OrderView {
        OrderView {
            user_id: self.owner,
            product: self.product.clone(),
            quantity: self.quantity,
            price: self.price,
            created_at: self.created_at,
        }
    }
}

/// Public view of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    /// Owning account.
    pub user_id: AccountId,
    /// Product label.
    pub product: String,
    /// Units ordered.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Some(1), Some(1.0), OrderValidationError::EmptyProduct)]
    #[case(Some(" "), Some(1), Some(1.0), OrderValidationError::EmptyProduct)]
    #[case(Some("film"), None, Some(1.0), OrderValidationError::MissingQuantity)]
    #[case(Some("film"), Some(0), Some(1.0), OrderValidationError::NonPositiveQuantity)]
    #[case(Some("film"), Some(-2), Some(1.0), OrderValidationError::NonPositiveQuantity)]
    #[case(Some("film"), Some(1), None, OrderValidationError::MissingPrice)]
    #[case(Some("film"), Some(1), Some(-0.5), OrderValidationError::InvalidPrice)]
    #[case(Some("film"), Some(1), Some(f64::NAN), OrderValidationError::InvalidPrice)]
    fn rejects_invalid_orders(
        #[case] product: Option<&str>,
        #[case] quantity: Option<i64>,
        #[case] price: Option<f64>,
        #[case] expected: OrderValidationError,
    ) {
        let err = OrderDraft::try_from_parts(product, quantity, price)
            .expect_err("invalid order rejected");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn view_exposes_owner_but_not_storage_id() {
        let owner = AccountId::random();
        let draft = OrderDraft::try_from_parts(Some(" film "), Some(2), Some(0.0)).expect("valid");
        let order = Order::from_draft(draft, owner, Utc::now());

        let value = serde_json::to_value(order.to_view()).expect("view serialises");

        assert_eq!(value["userId"], owner.to_string());
        assert_eq!(value["product"], "film");
        assert!(value.get("id").is_none());
    }
}
