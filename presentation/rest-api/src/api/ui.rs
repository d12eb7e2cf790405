use poem_openapi::{OpenApi, payload::Html};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Browser front end for the pipeline.
pub struct UiApi;

#[OpenApi]
impl UiApi {
    #[oai(path = "/", method = "get", hidden)]
    async fn index(&self) -> Html<String> {
        Html(INDEX_HTML.to_string())
    }
}
