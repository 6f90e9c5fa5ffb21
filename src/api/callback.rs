use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    types::{CallbackOutcome, PendingAuthorization},
    warning,
};

pub const CALLBACK_PATH: &str = "/callback";

const SUCCESS_PAGE: &str = "<html><body><h1>Authorization successful!</h1>\
<p>You can close this window and return to your terminal.</p></body></html>";

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(pending): Extension<Arc<PendingAuthorization>>,
) -> Response {
    if let Some(code) = params.get("code") {
        let stored = pending.complete(CallbackOutcome::Authorized {
            code: code.clone(),
            state: params.get("state").cloned(),
        });
        if !stored {
            warning!("Ignoring repeated authorization callback.");
        }

        return (StatusCode::OK, Html(SUCCESS_PAGE.to_string())).into_response();
    }

    if let Some(error) = params.get("error") {
        let description = params.get("error_description").cloned();
        let message = description.clone().unwrap_or_else(|| error.clone());
        pending.complete(CallbackOutcome::Denied {
            error: error.clone(),
            description,
        });

        return (StatusCode::BAD_REQUEST, Html(error_page(&message))).into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Html(error_page("missing authorization code")),
    )
        .into_response()
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn error_page(message: &str) -> String {
    format!(
        "<html><body><h1>Authorization failed!</h1><p>Error: {}</p></body></html>",
        html_escape::encode_safe(message)
    )
}
