use classdesk_shared::wire::{cookie_value, ActionRequest, ActionResponse};
use gloo_net::http::Request;
use wasm_bindgen::JsCast;

// Endpoint path of the registration status API. Overridable at compile time
// for deployments where the dashboard is not served from the site root.
pub const API_ENDPOINT: &str = match option_env!("CLASSDESK_API_ENDPOINT") {
    Some(url) => url,
    None => "/update-user-status/",
};

/// Apply one approve/reject batch on the server.
///
/// Collapses every failure (transport, HTTP status, parse, non-success
/// body) into `false`; nothing escapes this boundary. The in-flight lock is
/// deliberately NOT managed here — the caller sequences lock-acquire →
/// call → lock-release around its own validation.
pub async fn update_user_status(request: &ActionRequest) -> bool {
    match post_status_update(request).await {
        Ok(response) if response.is_success() => true,
        Ok(response) => {
            web_sys::console::error_1(
                &format!("Status update refused: {}", response.status).into(),
            );
            false
        },
        Err(err) => {
            web_sys::console::error_1(&format!("Status update failed: {err}").into());
            false
        },
    }
}

async fn post_status_update(request: &ActionRequest) -> Result<ActionResponse, String> {
    let token = csrf_token().unwrap_or_default();

    let response = Request::post(API_ENDPOINT)
        .header("X-CSRFToken", &token)
        .json(request)
        .map_err(|e| format!("Encode error: {e:?}"))?
        .send()
        .await
        .map_err(|e| format!("Network error: {e:?}"))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<ActionResponse>()
        .await
        .map_err(|e| format!("Parse error: {e:?}"))
}

// Django echoes the csrftoken cookie back in the X-CSRFToken header.
fn csrf_token() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let cookies = document
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?
        .cookie()
        .ok()?;
    cookie_value(&cookies, "csrftoken")
}
