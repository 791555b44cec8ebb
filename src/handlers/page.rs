use axum::response::Html;

/// The whole front-end: one embedded page, no static-file serving.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
