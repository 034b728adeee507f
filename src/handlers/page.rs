use axum::{extract::State, response::Html};

use crate::page::{DocumentHead, render_landing};
use crate::router::ShelfState;

/// GET / -> landing page.
pub async fn landing_handler<S, C>(State(state): State<ShelfState<S, C>>) -> Html<String> {
    Html(render_landing(&DocumentHead::new(state.page_title.to_string())))
}
