use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, Instrument};
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청 단위 식별자 (request extension)
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// 요청마다 span을 열고 `x-request-id`를 응답에 되돌려 줍니다.
///
/// 클라이언트가 보낸 값이 있으면 그대로 쓰고, 없으면 UUID를 발급합니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            duration_ms = duration_ms,
            status = response.status().as_u16(),
            "request completed"
        );

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            request_id
                .parse()
                .unwrap_or_else(|_| axum::http::HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}
