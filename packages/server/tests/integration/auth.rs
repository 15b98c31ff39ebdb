use serde_json::json;

use crate::common::{OPERATOR_EMAIL, OPERATOR_PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn operator_can_sign_in_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["email"], OPERATOR_EMAIL);
        assert!(res.body["expires_at"].is_string());
    }

    #[tokio::test]
    async fn sign_in_sets_the_session_cookie() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD}),
            )
            .await;

        let cookie = res
            .headers
            .get("set-cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(cookie.starts_with("adease_session="), "cookie: {cookie}");
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected_with_a_generic_message() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": OPERATOR_EMAIL, "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
        assert_eq!(res.body["message"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn unknown_email_gets_the_same_rejection() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "nobody@example.com", "password": OPERATOR_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["message"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn empty_fields_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": "", "password": ""}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": OPERATOR_EMAIL}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn seeding_twice_keeps_the_original_password() {
        let app = TestApp::spawn().await;

        adease_server::seed::ensure_operator(&app.db, OPERATOR_EMAIL, "a-different-password")
            .await
            .unwrap();

        let token = app.login().await;
        assert!(!token.is_empty());
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn bearer_token_identifies_the_operator() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app.get_with_token(routes::SESSION, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], OPERATOR_EMAIL);
        assert!(res.body["operator_id"].is_number());
    }

    #[tokio::test]
    async fn protected_routes_require_a_session() {
        let app = TestApp::spawn().await;

        for path in [routes::SESSION, routes::SCREENS, routes::ADS, routes::OVERVIEW] {
            let res = app.get_without_token(path).await;
            assert_eq!(res.status, 401, "{path} should require a session");
            assert_eq!(res.body["code"], "TOKEN_MISSING");
        }
    }

    #[tokio::test]
    async fn forged_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::SESSION, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn cookie_session_works_until_sign_out() {
        let app = TestApp::spawn().await;
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap();

        let login = client
            .post(app.url(routes::LOGIN))
            .json(&json!({"email": OPERATOR_EMAIL, "password": OPERATOR_PASSWORD}))
            .send()
            .await
            .unwrap();
        assert_eq!(login.status(), 200);

        let session = client.get(app.url(routes::SESSION)).send().await.unwrap();
        assert_eq!(session.status(), 200);

        let logout = client.post(app.url(routes::LOGOUT)).send().await.unwrap();
        assert_eq!(logout.status(), 204);

        let after = client.get(app.url(routes::SESSION)).send().await.unwrap();
        assert_eq!(after.status(), 401);
    }
}
