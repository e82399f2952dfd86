//! Request body extraction.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use usus_core::errors::ValidationError;

use crate::error::ApiError;

/// JSON body whose rejections (bad syntax, unknown enum values, wrong
/// types) come back as a 400 `{code,message}` body instead of axum's
/// plain-text 4xx.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::from(usus_core::Error::from(ValidationError::InvalidInput(
                    rejection.body_text(),
                )))
            })?;
        Ok(Self(value))
    }
}
