//! Integration tests for the HereSphere video data endpoint.

mod common;

use common::{rich_vr_scene, scene_at, TestHarness};
use sv_core::StreamDescriptor;

async fn post_json(addr: std::net::SocketAddr, id: &str) -> (reqwest::StatusCode, serde_json::Value) {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/heresphere/{id}"))
        .json(&serde_json::json!({"username": "", "password": ""}))
        .send()
        .await
        .unwrap();
    let status = resp.status();
    assert_eq!(resp.headers()["heresphere-json-version"], "1");
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn vr_scene_video_data() {
    let (h, addr) = TestHarness::with_server().await;
    h.catalog.insert(rich_vr_scene("1"));

    let (status, json) = post_json(addr, "1").await;
    assert_eq!(status, 200);

    assert_eq!(json["access"], 1);
    assert_eq!(json["title"], "Beach");
    assert_eq!(json["duration"], 120_000.0);
    assert_eq!(json["rating"], 4.0);
    assert_eq!(json["favorites"], 4);
    assert_eq!(json["isFavorite"], true);
    assert_eq!(json["dateReleased"], "2023-07-14");
    assert_eq!(json["projection"], "fisheye");
    assert_eq!(json["stereo"], "sbs");
    assert_eq!(json["fov"], 200.0);
    assert_eq!(json["lens"], "MKX200");
    assert_eq!(json["writeFavorite"], false);

    let media = json["media"].as_array().unwrap();
    assert_eq!(media[0]["name"], "Studio - Beach_MKX200.mp4");
    assert_eq!(media[0]["sources"][0]["height"], 2880);
    assert_eq!(media[1]["name"], "mp4");
    assert_eq!(media[1]["sources"][0]["resolution"], 720);

    let tags = json["tags"].as_array().unwrap();
    let summary: Vec<(String, f64, f64, u64)> = tags
        .iter()
        .map(|t| {
            (
                t["name"].as_str().unwrap().to_string(),
                t["start"].as_f64().unwrap(),
                t["end"].as_f64().unwrap(),
                t["track"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        [
            ("#:Intro:Hello".to_string(), 10_000.0, 40_000.0, 0),
            ("#:Swim".to_string(), 40_000.0, 90_000.0, 0),
            ("#:Walk".to_string(), 90_000.0, 0.0, 0),
            ("#:Outdoor".to_string(), 0.0, 120_000.0, 1),
            ("#:PASSTHROUGH".to_string(), 0.0, 120_000.0, 2),
            ("Studio:Acme".to_string(), 0.0, 60_000.0, 3),
            ("Performer:Ann".to_string(), 60_000.0, 120_000.0, 3),
        ]
    );
    assert_eq!(tags[5]["rating"], 5.0);
    assert_eq!(tags[6]["rating"], 3.0);
}

#[tokio::test]
async fn non_vr_scene_is_flat_with_enhanced_stream() {
    let (h, addr) = TestHarness::with_server().await;
    let mut scene = scene_at("2", "C:\\media\\clips\\clip_180_mono.mp4", 480);
    scene.streams = vec![StreamDescriptor::new("MP4 Topaz", "http://stash/scene/2/topaz.mp4")];
    h.catalog.insert(scene);

    let (status, json) = post_json(addr, "2").await;
    assert_eq!(status, 200);
    assert_eq!(json["projection"], "perspective");
    assert_eq!(json["stereo"], "mono");
    assert_eq!(json["fov"], 0.0);

    let media = json["media"].as_array().unwrap();
    assert_eq!(media.len(), 2);
    assert_eq!(media[0]["sources"][0]["url"], "C:/media/clips/clip_180_mono.mp4");
    assert_eq!(media[1]["name"], "Topaz");
    assert_eq!(media[1]["sources"][0]["resolution"], 1080);
    assert!(json["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn get_is_accepted() {
    let (h, addr) = TestHarness::with_server().await;
    h.catalog.insert(scene_at("3", "/media/VR/clip.mp4", 1440));
    let resp = reqwest::get(format!("http://{addr}/heresphere/3")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["projection"], "equirectangular");
    assert_eq!(json["fov"], 180.0);
    assert_eq!(json["lens"], "Linear");
}

#[tokio::test]
async fn scene_without_files_is_500() {
    let (h, addr) = TestHarness::with_server().await;
    let mut scene = scene_at("4", "/media/a.mp4", 720);
    scene.files.clear();
    h.catalog.insert(scene);
    let resp = reqwest::get(format!("http://{addr}/heresphere/4")).await.unwrap();
    assert_eq!(resp.status(), 500);
}
