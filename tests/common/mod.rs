//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which builds an [`AppContext`] over an
//! in-memory [`SceneCatalog`] and can start Axum on a random port for
//! HTTP-level testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use sv_core::config::Config;
use sv_core::{Error, Marker, Performer, Result, Scene, StreamDescriptor, Studio, Tag, VideoFile};
use sv_server::{build_router, AppContext};
use sv_stash::SceneCatalog;

/// In-memory catalog keyed by scene id.
#[derive(Default)]
pub struct MemoryCatalog {
    scenes: RwLock<HashMap<String, Scene>>,
    failing: RwLock<bool>,
}

impl MemoryCatalog {
    pub fn insert(&self, scene: Scene) {
        self.scenes
            .write()
            .expect("catalog lock poisoned")
            .insert(scene.id.clone(), scene);
    }

    /// Make every lookup fail as if Stash were unreachable.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.write().expect("catalog lock poisoned") = failing;
    }
}

#[async_trait]
impl SceneCatalog for MemoryCatalog {
    async fn find_scene(&self, id: &str) -> Result<Scene> {
        if *self.failing.read().expect("catalog lock poisoned") {
            return Err(Error::catalog("connection refused"));
        }
        self.scenes
            .read()
            .expect("catalog lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found("scene", id))
    }
}

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub catalog: Arc<MemoryCatalog>,
}

impl TestHarness {
    /// Create a new harness with default configuration and an empty catalog.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let catalog = Arc::new(MemoryCatalog::default());
        let ctx = AppContext::new(config, catalog.clone());
        Self { ctx, catalog }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config);
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A scene with one file at `path`, 2 minutes long.
pub fn scene_at(id: &str, path: &str, height: u32) -> Scene {
    let basename = path.rsplit(['/', '\\']).next().unwrap_or(path);
    Scene {
        id: id.into(),
        title: format!("Scene {id}"),
        details: "Fixture scene".into(),
        files: vec![VideoFile {
            basename: basename.into(),
            path: path.into(),
            height,
            duration: 120.0,
        }],
        ..Default::default()
    }
}

/// A VR scene with markers, tags, a studio and performers.
pub fn rich_vr_scene(id: &str) -> Scene {
    let mut scene = scene_at(id, "/media/VR/Studio - Beach_MKX200.mp4", 2880);
    scene.title = "Beach".into();
    scene.rating100 = Some(80);
    scene.o_counter = 4;
    scene.date = Some("2023-07-14".into());
    scene.tags = vec![Tag::new("FAVORITE"), Tag::new("Outdoor"), Tag::new("PASSTHROUGH")];
    scene.markers = vec![
        Marker {
            primary_tag: "Walk".into(),
            title: String::new(),
            seconds: 90.0,
        },
        Marker {
            primary_tag: "Intro".into(),
            title: "Hello".into(),
            seconds: 10.0,
        },
        Marker {
            primary_tag: "Swim".into(),
            title: String::new(),
            seconds: 40.0,
        },
    ];
    scene.studio = Some(Studio {
        name: "Acme".into(),
        rating100: Some(100),
    });
    scene.performers = vec![Performer {
        name: "Ann".into(),
        rating100: Some(60),
    }];
    scene.streams = vec![
        StreamDescriptor::new("Direct stream", format!("http://stash/scene/{id}/stream")),
        StreamDescriptor::new("MP4 (1080p)", format!("http://stash/scene/{id}/stream.mp4?resolution=STANDARD_HD")),
        StreamDescriptor::new("MP4 (720p)", format!("http://stash/scene/{id}/stream.mp4?resolution=STANDARD")),
    ];
    scene.paths.screenshot = Some(format!("http://stash/scene/{id}/screenshot"));
    scene.paths.preview = Some(format!("http://stash/scene/{id}/preview"));
    scene
}
