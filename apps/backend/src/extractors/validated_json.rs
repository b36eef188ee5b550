use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// JSON body extractor with standardized error handling.
///
/// Deserialization failures (missing fields included) become a 400
/// problem response with the canonical validation code instead of
/// actix's default error shape.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    AppError::bad_request(
                        ErrorCode::ValidationError,
                        format!("Failed to read request body: {e}"),
                    )
                })?;
                body.extend_from_slice(&chunk);
            }

            let value = serde_json::from_slice::<T>(&body).map_err(|e| {
                AppError::bad_request(ErrorCode::ValidationError, format!("Invalid JSON body: {e}"))
            })?;

            Ok(ValidatedJson(value))
        })
    }
}
