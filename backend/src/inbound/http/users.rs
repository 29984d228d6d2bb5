//! Account API handlers.
//!
//! ```text
//! POST /users/create {"account":"alice","password":"pw","phone":"555","age":30}
//! GET  /users/getInfo?name=ali
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    AccountDetails, AccountFilter, AccountProfile, AccountValidationError, DomainError,
    NewAccount,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /users/create`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
}

impl TryFrom<CreateAccountRequest> for NewAccount {
    type Error = AccountValidationError;

    fn try_from(value: CreateAccountRequest) -> Result<Self, Self::Error> {
        let details = AccountDetails {
            phone: value.phone,
            gender: value.gender,
            age: value.age,
        };
        Self::try_from_parts(
            value.account.as_deref(),
            value.password.as_deref(),
            details,
        )
    }
}

fn map_account_validation_error(err: AccountValidationError) -> DomainError {
    let (field, code) = match err {
        AccountValidationError::EmptyAccount => ("account", "empty_account"),
        AccountValidationError::EmptyPassword => ("password", "empty_password"),
        AccountValidationError::NegativeAge => ("age", "negative_age"),
        AccountValidationError::InvalidId => ("id", "invalid_id"),
    };
    DomainError::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Create an account. Duplicate names are rejected with `400 conflict`.
#[post("/users/create")]
pub async fn create_account(
    state: web::Data<HttpState>,
    payload: web::Json<CreateAccountRequest>,
) -> ApiResult<HttpResponse> {
    let input = NewAccount::try_from(payload.into_inner()).map_err(map_account_validation_error)?;
    let profile = state.accounts.create(input).await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Query string for `GET /users/getInfo`.
#[derive(Debug, Default, Deserialize)]
pub struct AccountLookupQuery {
    pub name: Option<String>,
}

/// List accounts whose name contains `name`, ignoring case.
#[get("/users/getInfo")]
pub async fn lookup_accounts(
    state: web::Data<HttpState>,
    query: web::Query<AccountLookupQuery>,
) -> ApiResult<web::Json<Vec<AccountProfile>>> {
    let filter = AccountFilter::new(query.name.as_deref());
    let profiles = state.accounts_query.lookup(&filter).await?;
    Ok(web::Json(profiles))
}
