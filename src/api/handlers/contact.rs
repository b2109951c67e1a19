//! Handler for the contact submission endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use metrics::counter;
use validator::Validate;

use crate::api::dto::contact::{ContactRequest, ContactResponse, RECEIVED_MESSAGE};
use crate::error::AppError;
use crate::state::AppState;

/// Accepts a contact form submission.
///
/// # Endpoint
///
/// `POST /api/contact`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "John Doe",
///   "email": "john@example.com",
///   "message": "I would like to know more about your services."
/// }
/// ```
///
/// # Responses
///
/// - **200 OK**: `{"success": true, "message": "..."}`
/// - **400 Bad Request**: `{"error": "Validation failed", "details": [...]}`
///   with one entry per violated constraint, so form UIs can highlight
///   every offending field at once
/// - **500 Internal Server Error**: the body could not be parsed. The
///   response text is always the same generic message; the underlying cause
///   is logged in development only.
///
/// Accepted submissions are handed to the configured
/// [`ContactSink`](crate::delivery::ContactSink). A sink failure is logged
/// and does not change the acknowledgment.
pub async fn contact_handler(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        if state.config.environment.is_development() {
            tracing::error!(error = %rejection, "Contact request body could not be read");
        }
        AppError::Internal
    })?;

    payload.validate()?;

    if let Err(e) = state
        .contact_sink
        .deliver(&payload.name, &payload.email, &payload.message)
        .await
    {
        tracing::warn!(error = %e, "Contact delivery failed, acknowledging anyway");
    }

    counter!("contact_submissions_total").increment(1);

    Ok(Json(ContactResponse {
        success: true,
        message: RECEIVED_MESSAGE.to_string(),
    }))
}
