//! CORS policy for the browser client.

use salvo::{
    cors::{Cors, CorsHandler},
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
};

/// Allow `origin` to call the API with bearer tokens and JSON bodies.
pub(crate) fn cors_handler(origin: &str) -> CorsHandler {
    Cors::new()
        .allow_origin(origin)
        .allow_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(vec![AUTHORIZATION, CONTENT_TYPE])
        .into_handler()
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};
    use testresult::TestResult;

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed() -> TestResult {
        let service = Service::new(Router::with_path("ping").get(ok))
            .hoop(cors_handler("http://localhost:3000"));

        let res = TestClient::get("http://example.com/ping")
            .add_header("origin", "http://localhost:3000", true)
            .send(&service)
            .await;

        let allowed = res
            .headers()
            .get("access-control-allow-origin")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        assert_eq!(allowed.as_deref(), Some("http://localhost:3000"));

        Ok(())
    }
}
