//! Response helpers shared by the resource handlers.

use axum::{
    http::{header::LOCATION, StatusCode},
    Json,
};
use serde::Serialize;

/// 201 with `Location: /{resource}/{id}` and the created resource as body.
pub fn created<T: Serialize>(resource: &str, id: i32, data: T) -> (StatusCode, [(axum::http::HeaderName, String); 1], Json<T>) {
    (StatusCode::CREATED, [(LOCATION, location(resource, id))], Json(data))
}

pub fn location(resource: &str, id: i32) -> String {
    format!("/{}/{}", resource, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn created_sets_location() {
        let res = created("filme", 12, serde_json::json!({"id": 12})).into_response();
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[LOCATION], "/filme/12");
    }
}
