//! Browser calls to the gallery API
//!
//! Requests go to the same-origin `/api` proxy. Calls behind the session
//! carry the persisted token as `Authorization: Bearer <token>`. On the
//! server these calls are stubs that fail with [`ApiError::Network`].

use crate::core::api::{
    ApiError, LoginRequest, ResetPasswordRequest, SignupRequest, UpdateOrderRequest,
};
#[cfg(not(feature = "ssr"))]
use crate::core::api::{Endpoint, ImageListResponse};
use crate::core::gallery::ImageRef;
use crate::core::session::LoginPayload;

#[cfg(not(feature = "ssr"))]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::de::DeserializeOwned;

    use crate::core::api::{ApiError, Endpoint};
    use crate::ui::storage;

    pub fn request(endpoint: &Endpoint) -> RequestBuilder {
        let url = endpoint.url();
        let builder = match endpoint {
            Endpoint::Images => Request::get(&url),
            _ => Request::post(&url),
        };

        if !endpoint.requires_auth() {
            return builder;
        }
        match storage::bearer_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        }
    }

    pub async fn send(request: Result<Request, gloo_net::Error>) -> Result<Response, ApiError> {
        let response = request
            .map_err(|e| ApiError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::rejected(status, &body))
    }

    pub async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// `POST /login`. The payload is returned as the server sent it.
#[cfg(not(feature = "ssr"))]
pub async fn login(request: &LoginRequest) -> Result<LoginPayload, ApiError> {
    let response = http::send(http::request(&Endpoint::Login).json(request)).await?;
    http::decode(response).await
}

/// `POST /signup`. The created-user body is not used.
#[cfg(not(feature = "ssr"))]
pub async fn signup(request: &SignupRequest) -> Result<(), ApiError> {
    http::send(http::request(&Endpoint::Signup).json(request)).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub async fn reset_password(user_id: &str, request: &ResetPasswordRequest) -> Result<(), ApiError> {
    let endpoint = Endpoint::ResetPassword {
        user_id: user_id.to_string(),
    };
    http::send(http::request(&endpoint).json(request)).await?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
pub async fn fetch_images() -> Result<Vec<ImageRef>, ApiError> {
    let response = http::send(http::request(&Endpoint::Images).build()).await?;
    let list: ImageListResponse = http::decode(response).await?;
    Ok(list.into_refs())
}

/// `POST /image` with every selected file under the upload field.
/// Returns the full list as the server now stores it.
#[cfg(not(feature = "ssr"))]
pub async fn upload_images(files: &[web_sys::File]) -> Result<Vec<ImageRef>, ApiError> {
    use crate::core::api::UPLOAD_FIELD;

    let form = web_sys::FormData::new().map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    for file in files {
        form.append_with_blob_and_filename(UPLOAD_FIELD, file, &file.name())
            .map_err(|e| ApiError::Network(format!("{:?}", e)))?;
    }

    let response = http::send(http::request(&Endpoint::Upload).body(form)).await?;
    let list: ImageListResponse = http::decode(response).await?;
    Ok(list.into_refs())
}

#[cfg(not(feature = "ssr"))]
pub async fn update_image_order(request: &UpdateOrderRequest) -> Result<(), ApiError> {
    http::send(http::request(&Endpoint::UpdateOrder).json(request)).await?;
    Ok(())
}

/// SSR stubs - the API is only called from the browser
#[cfg(feature = "ssr")]
fn server_side() -> ApiError {
    ApiError::Network("not available on server".to_string())
}

#[cfg(feature = "ssr")]
pub async fn login(_request: &LoginRequest) -> Result<LoginPayload, ApiError> {
    Err(server_side())
}

#[cfg(feature = "ssr")]
pub async fn signup(_request: &SignupRequest) -> Result<(), ApiError> {
    Err(server_side())
}

#[cfg(feature = "ssr")]
pub async fn reset_password(
    _user_id: &str,
    _request: &ResetPasswordRequest,
) -> Result<(), ApiError> {
    Err(server_side())
}

#[cfg(feature = "ssr")]
pub async fn fetch_images() -> Result<Vec<ImageRef>, ApiError> {
    Err(server_side())
}

#[cfg(feature = "ssr")]
pub async fn update_image_order(_request: &UpdateOrderRequest) -> Result<(), ApiError> {
    Err(server_side())
}
