//! HTTP-level integration tests for `/cinema`.

mod common;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::Router;
use common::{body_json, create, delete, get, patch_json, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn endereco(app: &Router, logradouro: &str, numero: i32) -> i32 {
    create(app.clone(), "/endereco", json!({"logradouro": logradouro, "numero": numero})).await
}

#[sqlx::test(migrations = false)]
async fn create_returns_cinema_with_address(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let e = endereco(&app, "Rua Frei Caneca", 569).await;

    let response = post_json(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": e})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()[LOCATION].to_str().unwrap().to_string();
    let json = body_json(response).await;
    assert_eq!(json["endereco"], json!({"id": e, "logradouro": "Rua Frei Caneca", "numero": 569}));

    let read = body_json(get(app, &location).await).await;
    assert_eq!(read, json);
}

#[sqlx::test(migrations = false)]
async fn missing_fields_are_422(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = post_json(app, "/cinema", json!({"enderecoId": 0})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert!(json["error"]["details"]["nome"].is_array());
    assert!(json["error"]["details"]["enderecoId"].is_array());
}

#[sqlx::test(migrations = false)]
async fn unknown_address_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = post_json(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": 404})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(get(app, "/cinema").await).await, json!([]));
}

#[sqlx::test(migrations = false)]
async fn address_is_held_by_one_cinema(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let e = endereco(&app, "Rua A", 1).await;
    create(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": e})).await;

    let response = post_json(app, "/cinema", json!({"nome": "Cine Lua", "enderecoId": e})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = false)]
async fn list_filters_by_address_and_windows(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let mut ids = Vec::new();
    for n in 1..=3 {
        let e = endereco(&app, "Rua", n).await;
        create(app.clone(), "/cinema", json!({"nome": format!("Cine {n}"), "enderecoId": e})).await;
        ids.push(e);
    }

    let all = body_json(get(app.clone(), "/cinema").await).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
    assert_eq!(all[2]["endereco"]["numero"], 3);

    let page = body_json(get(app.clone(), "/cinema?skip=2").await).await;
    assert_eq!(page.as_array().unwrap().len(), 1);

    let one = body_json(get(app, &format!("/cinema?enderecoId={}", ids[1])).await).await;
    assert_eq!(one.as_array().unwrap().len(), 1);
    assert_eq!(one[0]["nome"], "Cine 2");
}

#[sqlx::test(migrations = false)]
async fn put_moves_cinema_to_new_address(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let old = endereco(&app, "Rua Velha", 1).await;
    let new = endereco(&app, "Rua Nova", 2).await;
    let id = create(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": old})).await;

    let response = put_json(app.clone(), &format!("/cinema/{id}"), json!({"nome": "Cine Sol 2", "enderecoId": new})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let read = body_json(get(app, &format!("/cinema/{id}")).await).await;
    assert_eq!(read["nome"], "Cine Sol 2");
    assert_eq!(read["endereco"]["logradouro"], "Rua Nova");
}

#[sqlx::test(migrations = false)]
async fn patch_renames_cinema(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let e = endereco(&app, "Rua A", 1).await;
    let id = create(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": e})).await;

    let response = patch_json(
        app.clone(),
        &format!("/cinema/{id}"),
        json!([{"op": "replace", "path": "/nome", "value": "Cine Lua"}]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let removed = patch_json(app.clone(), &format!("/cinema/{id}"), json!([{"op": "remove", "path": "/nome"}])).await;
    assert_eq!(removed.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let read = body_json(get(app, &format!("/cinema/{id}")).await).await;
    assert_eq!(read["nome"], "Cine Lua");
}

#[sqlx::test(migrations = false)]
async fn delete_keeps_address(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let e = endereco(&app, "Rua A", 1).await;
    let id = create(app.clone(), "/cinema", json!({"nome": "Cine Sol", "enderecoId": e})).await;

    assert_eq!(delete(app.clone(), &format!("/cinema/{id}")).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(app.clone(), &format!("/cinema/{id}")).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(app.clone(), &format!("/endereco/{e}")).await.status(), StatusCode::OK);
    assert_eq!(delete(app, &format!("/endereco/{e}")).await.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = false)]
async fn missing_cinema_is_404_for_read_put_and_patch(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let e = endereco(&app, "Rua A", 1).await;

    assert_eq!(get(app.clone(), "/cinema/999").await.status(), StatusCode::NOT_FOUND);

    let put = put_json(app.clone(), "/cinema/999", json!({"nome": "Cine Sol", "enderecoId": e})).await;
    assert_eq!(put.status(), StatusCode::NOT_FOUND);

    let patch = patch_json(
        app.clone(),
        "/cinema/999",
        json!([{"op": "replace", "path": "/nome", "value": "Cine Lua"}]),
    )
    .await;
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(patch).await["error"]["code"], "not_found");

    assert_eq!(body_json(get(app, "/cinema").await).await, json!([]));
}
