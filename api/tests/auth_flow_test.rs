//! Sign-in, refresh and logout over HTTP

mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use serde_json::json;

use common::{bearer, refresh_cookie_of, TestContext, PASSWORD};
use fg_api::create_app;

#[actix_web::test]
async fn test_sign_in_returns_access_token_and_refresh_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(json!({ "login": "alice", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "refresh_token")
        .expect("refresh cookie");
    assert_eq!(cookie.path(), Some("/auth"));
    assert_eq!(cookie.http_only(), Some(true));
    let refresh_token = cookie.value().to_string();

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 900);

    let access_token = body["access_token"].as_str().unwrap();
    let claims = ctx.state.token_service.verify(access_token).await.unwrap();
    assert_eq!(claims.sub, ctx.member.id.to_string());
    assert!(ctx.state.token_service.verify(&refresh_token).await.is_ok());
}

#[actix_web::test]
async fn test_sign_in_rejects_bad_credentials() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for (login, password) in [("alice", "wrong-password"), ("nobody", PASSWORD)] {
        let req = test::TestRequest::post()
            .uri("/auth/sign-in")
            .set_json(json!({ "login": login, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(refresh_cookie_of(&resp).is_none());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "WRONG_LOGIN_OR_PASSWORD");
    }
}

#[actix_web::test]
async fn test_sign_in_rejects_invalid_body() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .set_json(json!({ "login": "", "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/auth/sign-in")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_refresh_rotates_cookie_and_rejects_replay() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let pair = ctx
        .state
        .token_service
        .issue_pair(&ctx.member.id.to_string())
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let rotated = refresh_cookie_of(&resp).expect("rotated cookie");
    assert_ne!(rotated, pair.refresh_token);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["access_token"].as_str().is_some());

    // The consumed refresh token cannot be used again
    let req = test::TestRequest::get()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", rotated))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_without_cookie_is_forbidden() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let access_token = ctx.access_token_for(&ctx.member);

    let req = test::TestRequest::get()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_logout_revokes_tokens_and_clears_cookie() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let pair = ctx
        .state
        .token_service
        .issue_pair(&ctx.member.id.to_string())
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(bearer(&pair.access_token))
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(refresh_cookie_of(&resp).as_deref(), Some(""));

    assert!(ctx.store.contains_marker(&pair.access_token).await);
    assert!(ctx.store.contains_marker(&pair.refresh_token).await);

    let req = test::TestRequest::get()
        .uri("/films")
        .insert_header(bearer(&pair.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");

    let req = test::TestRequest::get()
        .uri("/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_logout_leaves_other_users_refresh_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let access_token = ctx.access_token_for(&ctx.member);
    let foreign = ctx
        .state
        .token_service
        .issue_pair(&ctx.admin.id.to_string())
        .unwrap();

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(bearer(&access_token))
        .cookie(Cookie::new("refresh_token", foreign.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(!ctx.store.contains_marker(&foreign.refresh_token).await);
}

#[actix_web::test]
async fn test_logout_clears_cookie_when_store_write_fails() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;
    let pair = ctx
        .state
        .token_service
        .issue_pair(&ctx.member.id.to_string())
        .unwrap();
    ctx.store.set_writes_failing(true);

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(bearer(&pair.access_token))
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(refresh_cookie_of(&resp).as_deref(), Some(""));
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "STORE_UNAVAILABLE");

    assert!(!ctx.store.contains_marker(&pair.refresh_token).await);
    assert!(!ctx.store.contains_marker(&pair.access_token).await);
}

#[actix_web::test]
async fn test_logout_requires_token() {
    let ctx = TestContext::new().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
