use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn new_screen_starts_inactive() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .post_with_token(
                routes::SCREENS,
                &json!({"title": "Lobby", "location": "1F", "type": "Landscape"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["title"], "Lobby");
        assert_eq!(res.body["location"], "1F");
        assert_eq!(res.body["type"], "Landscape");
        assert_eq!(res.body["active"], false);
        assert!(res.body["id"].is_string());
        assert!(res.body["created_at"].is_string());
    }

    #[tokio::test]
    async fn active_in_the_request_body_is_ignored() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .post_with_token(
                routes::SCREENS,
                &json!({"title": "Lobby", "type": "Portrait", "active": true}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["active"], false);
        assert_eq!(res.body["location"], "");
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .post_with_token(
                routes::SCREENS,
                &json!({"title": "   ", "type": "Landscape"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let list = app.get_with_token(routes::SCREENS, &token).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn unknown_type_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .post_with_token(
                routes::SCREENS,
                &json!({"title": "Lobby", "type": "Square"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod list {
    use super::*;

    #[tokio::test]
    async fn screens_are_listed_newest_first() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let first = app.create_screen(&token, "First").await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        let second = app.create_screen(&token, "Second").await;

        let res = app.get_with_token(routes::SCREENS, &token).await;

        assert_eq!(res.status, 200);
        let ids: Vec<&str> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    }
}

mod activation {
    use super::*;

    #[tokio::test]
    async fn toggling_twice_restores_the_original_state() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        app.set_active(&token, &id, true).await;
        assert_eq!(app.find_screen(&token, &id).await.unwrap()["active"], true);

        app.set_active(&token, &id, false).await;
        assert_eq!(app.find_screen(&token, &id).await.unwrap()["active"], false);
    }

    #[tokio::test]
    async fn setting_the_current_value_is_accepted() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        app.set_active(&token, &id, false).await;

        assert_eq!(app.find_screen(&token, &id).await.unwrap()["active"], false);
    }

    #[tokio::test]
    async fn missing_screen_is_a_no_op() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        app.set_active(&token, "0193a1b2-7c4d-7e8f-9a0b-1c2d3e4f5a6b", true)
            .await;
        app.set_active(&token, "not-a-uuid", true).await;
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn only_provided_fields_change() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        let res = app
            .patch_with_token(
                &routes::screen(&id),
                &json!({"title": "Main Lobby", "type": "Portrait"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 204);

        let screen = app.find_screen(&token, &id).await.unwrap();
        assert_eq!(screen["title"], "Main Lobby");
        assert_eq!(screen["type"], "Portrait");
        assert_eq!(screen["location"], "1F");
        assert_eq!(screen["active"], false);
    }

    #[tokio::test]
    async fn update_of_deleted_screen_is_a_no_op() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;
        app.delete_with_token(&routes::screen(&id), &token).await;

        let res = app
            .patch_with_token(&routes::screen(&id), &json!({"title": "Ghost"}), &token)
            .await;

        assert_eq!(res.status, 204);
        assert!(app.find_screen(&token, &id).await.is_none());
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        let res = app
            .patch_with_token(&routes::screen(&id), &json!({"title": ""}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.find_screen(&token, &id).await.unwrap()["title"], "Lobby");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleted_screen_leaves_the_list() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        let res = app.delete_with_token(&routes::screen(&id), &token).await;

        assert_eq!(res.status, 204);
        assert!(app.find_screen(&token, &id).await.is_none());
    }

    #[tokio::test]
    async fn deleting_twice_is_a_no_op() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let id = app.create_screen(&token, "Lobby").await;

        app.delete_with_token(&routes::screen(&id), &token).await;
        let res = app.delete_with_token(&routes::screen(&id), &token).await;

        assert_eq!(res.status, 204);
    }
}
