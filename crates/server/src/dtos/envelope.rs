use axum::{Json, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;

/// Every successful body is wrapped in this
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            count: None,
            pagination: None,
            data,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        Self {
            count: Some(data.len()),
            ..Self::new(data)
        }
    }

    pub fn page(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::list(data)
        }
    }
}

/// Serializes as `{}`
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct Empty {}

pub type Envelope<T> = Json<ApiResponse<T>>;

pub fn ok<T>(data: T) -> Envelope<T> {
    Json(ApiResponse::new(data))
}

pub fn created<T>(data: T) -> (StatusCode, Envelope<T>) {
    (StatusCode::CREATED, ok(data))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, per_page: u64, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(per_page.max(1));
        Self {
            page,
            per_page,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(2, 3, 7);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(meta.has_prev);

        let meta = PaginationMeta::new(1, 25, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "success": true, "count": 2, "data": [1, 2] }));

        let body = serde_json::to_value(ApiResponse::new(Empty {})).unwrap();
        assert_eq!(body, json!({ "success": true, "data": {} }));
    }
}
