//! Gateway route handlers.
//!
//! Every handler takes the service name as its first path segment and
//! validates it against the registry before anything else; an unregistered
//! name yields 404 with zero upstream calls. Each call is a single
//! resolve → (translate) → forward → map-response pipeline with no state
//! retained across requests.
//!
//! Write handlers answer with a 303 redirect to the service's listing view;
//! the created or updated representation is never inspected. Deletes are
//! treated as idempotent at the gateway: an upstream 404 still redirects.

use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};

use crate::http::error::GatewayError;
use crate::http::render;
use crate::http::server::AppState;
use crate::translate::{self, FormFields};
use crate::upstream::UpstreamError;

type PageResult = Result<Html<String>, GatewayError>;
type RedirectResult = Result<Redirect, GatewayError>;

/// `GET /` — list registered service names.
pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render::index(state.registry.service_names()))
}

/// `GET /{service}/` — fetch the collection and render the listing.
pub async fn list_service(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> PageResult {
    let (kind, base) = state.registry.resolve(&service)?;
    let items = state.upstream.list(base, kind).await?;
    Ok(Html(render::listing(kind, &items)))
}

/// `GET /{service}/create` — render the creation form.
pub async fn create_form(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> PageResult {
    let (kind, _) = state.registry.resolve(&service)?;
    Ok(Html(render::create_form(kind)))
}

/// `POST /{service}/create` — translate, create upstream, redirect to listing.
pub async fn create_item(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Form(form): Form<FormFields>,
) -> RedirectResult {
    let (kind, base) = state.registry.resolve(&service)?;
    let payload = translate::translate(kind, &form)?;
    state.upstream.create(base, kind, &payload).await?;
    tracing::info!(service = %kind, "Created item");
    Ok(listing_redirect(&service))
}

/// `GET /{service}/edit/{id}` — fetch the item and render the edit form.
pub async fn edit_form(
    State(state): State<AppState>,
    Path((service, id)): Path<(String, i64)>,
) -> PageResult {
    let (kind, base) = state.registry.resolve(&service)?;
    let item = state.upstream.get(base, kind, id).await?;
    Ok(Html(render::edit_form(kind, id, &item)))
}

/// `POST /{service}/edit/{id}` — translate, full-replace upstream, redirect.
pub async fn edit_item(
    State(state): State<AppState>,
    Path((service, id)): Path<(String, i64)>,
    Form(form): Form<FormFields>,
) -> RedirectResult {
    let (kind, base) = state.registry.resolve(&service)?;
    let payload = translate::translate(kind, &form)?;
    state.upstream.update(base, kind, id, &payload).await?;
    tracing::info!(service = %kind, id, "Updated item");
    Ok(listing_redirect(&service))
}

/// `GET /{service}/delete/{id}` — delete upstream, redirect to listing.
///
/// An upstream 404 is folded into the redirect; see the module docs.
pub async fn delete_item(
    State(state): State<AppState>,
    Path((service, id)): Path<(String, i64)>,
) -> RedirectResult {
    let (kind, base) = state.registry.resolve(&service)?;
    match state.upstream.delete(base, kind, id).await {
        Ok(()) => {
            tracing::info!(service = %kind, id, "Deleted item");
        }
        Err(UpstreamError::NotFound) => {
            tracing::warn!(service = %kind, id, "Delete target did not exist");
        }
        Err(err) => return Err(err.into()),
    }
    Ok(listing_redirect(&service))
}

/// `GET /{service}/{id}` — fetch the item and render the detail view.
pub async fn view_item(
    State(state): State<AppState>,
    Path((service, id)): Path<(String, i64)>,
) -> PageResult {
    let (kind, base) = state.registry.resolve(&service)?;
    let item = state.upstream.get(base, kind, id).await?;
    Ok(Html(render::detail(kind, &item)))
}

/// 303 See Other back to the service's listing view.
fn listing_redirect(service: &str) -> Redirect {
    Redirect::to(&format!("/{service}/"))
}
