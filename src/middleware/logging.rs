use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// One request line per response: method, path, status, elapsed time.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    println!(
        "{} {} -> {} in {}ms",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );

    response
}
