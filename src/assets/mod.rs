//! Background asset loading
//!
//! Each request decodes on its own short-lived thread and reports back over
//! a channel. Workers only produce CPU-side data; the render driver drains
//! the channel once per frame and is the only one touching the scene.
//!
//! ```no_run
//! use neighborhood::assets::{AssetLoader, AssetRequest};
//!
//! let mut loader = AssetLoader::new("resources");
//! loader.request(AssetRequest::Texture { key: "grass.jpg".into() });
//! for loaded in loader.poll() {
//!     println!("{} -> {}", loaded.key, loaded.result.is_ok());
//! }
//! ```

pub mod image;
pub mod model;

use std::{
    any::Any,
    collections::HashMap,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, RecvTimeoutError, Sender},
    thread,
    time::{Duration, Instant},
};

use crate::error::AssetError;

pub use self::image::{load_image, load_skybox, DecodedImage, SkyboxImages};
pub use self::model::{load_model, ModelData, ModelMaterial, ModelMesh};

/// Identifies one request; returned by [`AssetLoader::request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// Paths are relative to the loader's root unless absolute.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetRequest {
    Texture { key: String },
    Model { key: String },
    Skybox { faces: [PathBuf; 6] },
}

impl AssetRequest {
    pub fn key(&self) -> String {
        match self {
            AssetRequest::Texture { key } | AssetRequest::Model { key } => key.clone(),
            AssetRequest::Skybox { .. } => "skybox".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum AssetPayload {
    Texture(DecodedImage),
    Model(ModelData),
    Skybox(SkyboxImages),
}

#[derive(Debug)]
pub struct LoadedAsset {
    pub ticket: Ticket,
    pub key: String,
    pub result: Result<AssetPayload, AssetError>,
}

pub struct AssetLoader {
    root: PathBuf,
    sender: Sender<LoadedAsset>,
    receiver: Receiver<LoadedAsset>,
    next_ticket: u64,
    /// Outstanding tickets and their keys.
    in_flight: HashMap<Ticket, String>,
}

impl AssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            root: root.into(),
            sender,
            receiver,
            next_ticket: 0,
            in_flight: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Starts loading in the background. Never blocks.
    pub fn request(&mut self, request: AssetRequest) -> Ticket {
        let job = match &request {
            AssetRequest::Texture { key } => Job::Texture(self.resolve(Path::new(key))),
            AssetRequest::Model { key } => Job::Model(self.resolve(Path::new(key))),
            AssetRequest::Skybox { faces } => {
                Job::Skybox(faces.clone().map(|face| self.resolve(&face)))
            }
        };
        self.dispatch(request.key(), move || job.run())
    }

    /// Runs `work` on a fresh thread. Every ticket reports exactly once, even
    /// when `work` panics or the thread cannot be spawned.
    fn dispatch<F>(&mut self, key: String, work: F) -> Ticket
    where
        F: FnOnce() -> Result<AssetPayload, AssetError> + Send + 'static,
    {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        log::debug!("Requesting {} ({:?})", key, ticket);
        self.in_flight.insert(ticket, key.clone());

        let sender = self.sender.clone();
        let worker_key = key.clone();
        let spawned = thread::Builder::new()
            .name(format!("asset-{}", ticket.0))
            .spawn(move || {
                let key = worker_key;
                let outcome = panic::catch_unwind(AssertUnwindSafe(work));
                let result = outcome.unwrap_or_else(|payload| {
                    let message = panic_message(payload.as_ref());
                    log::error!("Loader for {} panicked: {}", key, message);
                    Err(AssetError::LoaderPanicked {
                        key: key.clone(),
                        message,
                    })
                });
                // The loader may have been dropped; nobody is waiting then.
                let _ = sender.send(LoadedAsset { ticket, key, result });
            });

        if let Err(e) = spawned {
            log::error!("Failed to spawn loader thread for {:?}: {}", ticket, e);
            let _ = self.sender.send(LoadedAsset {
                ticket,
                key: key.clone(),
                result: Err(AssetError::LoaderDisconnected { key }),
            });
        }

        ticket
    }

    /// Returns every result that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<LoadedAsset> {
        let mut loaded = Vec::new();
        while let Ok(asset) = self.receiver.try_recv() {
            self.in_flight.remove(&asset.ticket);
            loaded.push(asset);
        }
        loaded
    }

    /// Blocks until every outstanding request reported or `timeout` passed.
    pub fn wait(&mut self, timeout: Duration) -> Vec<LoadedAsset> {
        let deadline = Instant::now() + timeout;
        let mut loaded = Vec::new();

        while !self.in_flight.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(asset) => {
                    self.in_flight.remove(&asset.ticket);
                    loaded.push(asset);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        loaded
    }

    /// Number of requests that have not reported yet.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }
}

enum Job {
    Texture(PathBuf),
    Model(PathBuf),
    Skybox([PathBuf; 6]),
}

impl Job {
    fn run(self) -> Result<AssetPayload, AssetError> {
        match self {
            Job::Texture(path) => load_image(&path).map(AssetPayload::Texture),
            Job::Model(path) => load_model(&path).map(AssetPayload::Model),
            Job::Skybox(faces) => load_skybox(&faces).map(AssetPayload::Skybox),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("neighborhood-loader-tests").join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut loader = AssetLoader::new(temp_root("missing"));
        let ticket = loader.request(AssetRequest::Texture {
            key: "nope.jpg".to_string(),
        });
        assert_eq!(loader.pending(), 1);

        let loaded = loader.wait(Duration::from_secs(10));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].ticket, ticket);
        assert_eq!(loaded[0].key, "nope.jpg");
        assert!(matches!(loaded[0].result, Err(AssetError::Image { .. })));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_model_loads_in_background() {
        let root = temp_root("models");
        std::fs::write(root.join("tri.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();

        let mut loader = AssetLoader::new(&root);
        loader.request(AssetRequest::Model {
            key: "tri.obj".to_string(),
        });
        let loaded = loader.wait(Duration::from_secs(10));

        match &loaded[0].result {
            Ok(AssetPayload::Model(model)) => assert_eq!(model.triangle_count(), 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_tickets_are_unique() {
        let mut loader = AssetLoader::new(temp_root("tickets"));
        let texture = |key: &str| AssetRequest::Texture { key: key.into() };
        let a = loader.request(texture("a.png"));
        let b = loader.request(texture("b.png"));
        assert_ne!(a, b);
        let loaded = loader.wait(Duration::from_secs(10));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_resolve_keeps_absolute_paths() {
        let loader = AssetLoader::new("resources");
        assert_eq!(
            loader.resolve(Path::new("grass.jpg")),
            PathBuf::from("resources/grass.jpg")
        );
        let absolute = std::env::temp_dir().join("x.jpg");
        assert_eq!(loader.resolve(&absolute), absolute);
    }

    #[test]
    fn test_panicking_worker_still_reports() {
        let mut loader = AssetLoader::new(temp_root("panic"));
        let ticket = loader.dispatch("broken.obj".to_string(), || panic!("decoder bug"));

        let loaded = loader.wait(Duration::from_secs(10));
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].ticket, ticket);
        match &loaded[0].result {
            Err(AssetError::LoaderPanicked { key, message }) => {
                assert_eq!(key, "broken.obj");
                assert_eq!(message, "decoder bug");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_out_of_range_face_loads_without_panic() {
        let root = temp_root("bad-faces");
        std::fs::write(root.join("bad.obj"), "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").unwrap();

        let mut loader = AssetLoader::new(&root);
        loader.request(AssetRequest::Model {
            key: "bad.obj".to_string(),
        });
        let loaded = loader.wait(Duration::from_secs(10));

        assert_eq!(loaded.len(), 1);
        assert!(!matches!(
            loaded[0].result,
            Err(AssetError::LoaderPanicked { .. })
        ));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_poll_is_non_blocking() {
        let mut loader = AssetLoader::new(temp_root("poll"));
        assert!(loader.poll().is_empty());
    }
}
