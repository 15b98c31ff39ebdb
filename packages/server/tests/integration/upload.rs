use serde_json::json;

use crate::common::{MAX_UPLOAD_SIZE, TestApp, routes};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

mod upload {
    use super::*;

    #[tokio::test]
    async fn upload_returns_a_public_url_under_the_ads_prefix() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .upload_with_token("summer sale.png", PNG_BYTES.to_vec(), &token)
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let path = res.body["path"].as_str().unwrap();
        assert!(path.starts_with("ads/"));
        assert!(path.ends_with("_summer_sale.png"));
        assert_eq!(
            res.body["url"],
            format!("{}/media/{path}", app.public_url)
        );
        assert_eq!(res.body["content_type"], "image/png");
        assert_eq!(res.body["size"], PNG_BYTES.len());
    }

    #[tokio::test]
    async fn same_filename_uploads_never_share_a_key() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let first = app
            .upload_with_token("sale.png", b"first".to_vec(), &token)
            .await;
        let second = app
            .upload_with_token("sale.png", b"second".to_vec(), &token)
            .await;

        let first_path = first.body["path"].as_str().unwrap();
        let second_path = second.body["path"].as_str().unwrap();
        assert_ne!(first_path, second_path);

        let res = app.get_without_token(&routes::media(first_path)).await;
        assert_eq!(res.text, "first");
    }

    #[tokio::test]
    async fn uploaded_image_is_served_publicly() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let upload = app
            .upload_with_token("banner.png", PNG_BYTES.to_vec(), &token)
            .await;
        let path = upload.body["path"].as_str().unwrap();

        let res = app
            .client
            .get(app.url(&routes::media(path)))
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 200);
        assert_eq!(res.headers()["content-type"], "image/png");
        let etag = res.headers()["etag"].to_str().unwrap().to_string();
        assert_eq!(res.bytes().await.unwrap().as_ref(), PNG_BYTES);

        let cached = app
            .client
            .get(app.url(&routes::media(path)))
            .header("If-None-Match", etag)
            .send()
            .await
            .unwrap();
        assert_eq!(cached.status(), 304);
    }

    #[tokio::test]
    async fn upload_then_create_then_play() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let upload = app
            .upload_with_token("banner.png", PNG_BYTES.to_vec(), &token)
            .await;
        let url = upload.body["url"].as_str().unwrap();

        let ad_id = app.create_ad(&token, "Banner", "Lobby", url).await;

        let page = app.get_without_token(&routes::playback(&ad_id)).await;
        assert_eq!(page.status, 200);
        assert!(page.text.contains(url));
    }

    #[tokio::test]
    async fn upload_requires_a_session() {
        let app = TestApp::spawn().await;

        let res = app
            .upload_with_token("banner.png", PNG_BYTES.to_vec(), "bogus")
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .upload_with_token(
                "huge.png",
                vec![0u8; (MAX_UPLOAD_SIZE + 1) as usize],
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn hidden_filename_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let res = app
            .upload_with_token(".htaccess", PNG_BYTES.to_vec(), &token)
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn request_without_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.login().await;

        let form = reqwest::multipart::Form::new().text("note", "no file here");
        let res = app
            .client
            .post(app.url(routes::UPLOADS))
            .header("Authorization", format!("Bearer {token}"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body, json!({"code": "VALIDATION_ERROR", "message": "Missing 'file' field"}));
    }
}

mod media {
    use super::*;

    #[tokio::test]
    async fn missing_object_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::media("ads/nothing.png")).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn wildcard_if_none_match_needs_a_stored_object() {
        let app = TestApp::spawn().await;
        let token = app.login().await;
        let upload = app
            .upload_with_token("banner.png", PNG_BYTES.to_vec(), &token)
            .await;
        let path = upload.body["path"].as_str().unwrap();

        let missing = app
            .client
            .get(app.url(&routes::media("ads/never_stored.png")))
            .header("If-None-Match", "*")
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), 404);

        let stored = app
            .client
            .get(app.url(&routes::media(path)))
            .header("If-None-Match", "*")
            .send()
            .await
            .unwrap();
        assert_eq!(stored.status(), 304);
    }
}
