//! Integration tests for the DeoVR video data endpoint.

mod common;

use common::{rich_vr_scene, scene_at, TestHarness};
use sv_core::config::{Config, StreamMode};

#[tokio::test]
async fn vr_scene_video_data() {
    let (h, addr) = TestHarness::with_server().await;
    h.catalog.insert(rich_vr_scene("1"));

    let resp = reqwest::get(format!("http://{addr}/deovr/1")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let json: serde_json::Value = resp.json().await.unwrap();

    assert_eq!(json["id"], "1");
    assert_eq!(json["title"], "mkx200 - Beach");
    assert_eq!(json["videoLength"], 120);
    assert_eq!(json["is3d"], false);
    assert_eq!(json["screenType"], "");
    assert_eq!(json["stereoMode"], "");
    assert_eq!(json["skipIntro"], 0);
    assert_eq!(json["chromaKey"]["hasAlpha"], true);
    assert_eq!(json["thumbnailUrl"], "http://stash/scene/1/screenshot");

    let encodings = json["encodings"].as_array().unwrap();
    assert_eq!(encodings.len(), 2);
    assert_eq!(encodings[0]["name"], "Studio - Beach_MKX200");
    assert_eq!(
        encodings[0]["videoSources"][0]["url"],
        "/media/VR/Studio - Beach_MKX200.mp4"
    );
    assert_eq!(encodings[1]["name"], "mp4");
    let resolutions: Vec<u64> = encodings[1]["videoSources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["resolution"].as_u64().unwrap())
        .collect();
    assert_eq!(resolutions, [2880, 1080, 720]);

    let stamps = json["timeStamps"].as_array().unwrap();
    assert_eq!(stamps.len(), 3);
    assert_eq!(stamps[1]["name"], "Intro:Hello");
    assert_eq!(stamps[1]["ts"], 10);
}

#[tokio::test]
async fn post_is_accepted() {
    let (h, addr) = TestHarness::with_server().await;
    h.catalog.insert(scene_at("2", "/media/clips/clip.mp4", 720));

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/deovr/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["title"], "Scene 2");
    assert!(json["chromaKey"].is_null());
    assert!(json.get("timeStamps").is_none());
}

#[tokio::test]
async fn direct_stream_mode() {
    let mut config = Config::default();
    config.synthesis.stream_mode = StreamMode::DirectStream;
    let (h, addr) = TestHarness::with_server_config(config).await;
    h.catalog.insert(rich_vr_scene("3"));

    let json: serde_json::Value = reqwest::get(format!("http://{addr}/deovr/3"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        json["encodings"][0]["videoSources"][0]["url"],
        "http://stash/scene/3/stream.mp4"
    );
    assert_eq!(json["title"], "mkx200 - Beach");
}

#[tokio::test]
async fn unknown_scene_is_404() {
    let (_h, addr) = TestHarness::with_server().await;
    let resp = reqwest::get(format!("http://{addr}/deovr/missing")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "not_found");
    assert!(json["request_id"].is_string());
}

#[tokio::test]
async fn scene_without_files_is_500() {
    let (h, addr) = TestHarness::with_server().await;
    let mut scene = scene_at("4", "/media/a.mp4", 720);
    scene.files.clear();
    h.catalog.insert(scene);

    let resp = reqwest::get(format!("http://{addr}/deovr/4")).await.unwrap();
    assert_eq!(resp.status(), 500);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["code"], "malformed_scene");
}

#[tokio::test]
async fn catalog_outage_is_502() {
    let (h, addr) = TestHarness::with_server().await;
    h.catalog.set_failing(true);
    let resp = reqwest::get(format!("http://{addr}/deovr/1")).await.unwrap();
    assert_eq!(resp.status(), 502);
}
