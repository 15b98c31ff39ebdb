use crate::common::{TestApp, routes};

const IMAGE: &str = "https://x/img.png";

#[tokio::test]
async fn deleting_a_screen_orphans_its_ads() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let screen_id = app.create_screen(&token, "Lobby").await;
    app.set_active(&token, &screen_id, true).await;
    let by_id = app.create_ad(&token, "By id", &screen_id, IMAGE).await;
    let by_title = app.create_ad(&token, "By title", "Lobby", IMAGE).await;

    app.delete_with_token(&routes::screen(&screen_id), &token)
        .await;

    let res = app.get_with_token(routes::OVERVIEW, &token).await;
    assert_eq!(res.status, 200);

    let views = res.body["advertisements"].as_array().unwrap();
    assert_eq!(views.len(), 2);
    for id in [&by_id, &by_title] {
        let view = views.iter().find(|v| v["id"] == id.as_str()).unwrap();
        assert_eq!(view["screen_title"], "Unknown Screen");
        assert_eq!(view["screen_status"], false);
    }

    // Still listable through the registry.
    let ads = app.get_with_token(routes::ADS, &token).await;
    assert_eq!(ads.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn summaries_count_resolved_screens_only() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    let lobby = app.create_screen(&token, "Lobby").await;
    app.create_screen(&token, "Cafe").await;
    app.set_active(&token, &lobby, true).await;

    app.create_ad(&token, "One", "Lobby", IMAGE).await;
    app.create_ad(&token, "Two", &lobby, IMAGE).await;
    app.create_ad(&token, "Three", "Nowhere", IMAGE).await;

    let res = app.get_with_token(routes::OVERVIEW, &token).await;

    let ads = &res.body["ad_summary"];
    assert_eq!(ads["total_ads"], 3);
    assert_eq!(ads["ads_on_active_screens"], 2);
    assert_eq!(ads["screens_with_ads"], 1);
    assert_eq!(ads["total_screens"], 2);

    let screens = &res.body["screen_summary"];
    assert_eq!(screens["total"], 2);
    assert_eq!(screens["active"], 1);
    assert_eq!(screens["inactive"], 1);
}

#[tokio::test]
async fn recent_screens_are_capped_at_five() {
    let app = TestApp::spawn().await;
    let token = app.login().await;
    for i in 0..7 {
        app.create_screen(&token, &format!("Screen {i}")).await;
    }

    let res = app.get_with_token(routes::OVERVIEW, &token).await;

    assert_eq!(res.body["recent_screens"].as_array().unwrap().len(), 5);
    assert_eq!(res.body["screen_summary"]["total"], 7);
}
