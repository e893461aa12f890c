use axum::response::Json as ResponseJson;
use utils::response::ApiResponse;

/// GET /api/health - Liveness check
pub async fn health_check() -> ResponseJson<ApiResponse<String>> {
    ResponseJson(ApiResponse::success("OK".to_string()))
}
