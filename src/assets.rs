//! Image catalogue and load tracking
//!
//! The frame loop may only start once the four gameplay sprites have loaded.
//! The background is nice to have; if it never arrives the renderer paints a
//! flat fill instead.

use std::collections::HashMap;
use std::fmt;

/// Every image the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Background,
    Player,
    Enemy,
    Heart,
    Projectile,
}

impl Sprite {
    pub const ALL: [Sprite; 5] = [
        Sprite::Background,
        Sprite::Player,
        Sprite::Enemy,
        Sprite::Heart,
        Sprite::Projectile,
    ];

    /// Path relative to the page
    pub fn path(&self) -> &'static str {
        match self {
            Sprite::Background => "images/space-background.jpg",
            Sprite::Player => "images/stitch.png",
            Sprite::Enemy => "images/aliens.png",
            Sprite::Heart => "images/heart.png",
            Sprite::Projectile => "images/bullet.png",
        }
    }

    /// Whether the loop must wait for this image
    pub fn is_required(&self) -> bool {
        !matches!(self, Sprite::Background)
    }

    /// Colour painted in place of the image when it is unavailable
    pub fn placeholder_color(&self) -> &'static str {
        match self {
            Sprite::Background => "#000010",
            Sprite::Player => "#3a7bd5",
            Sprite::Enemy => "#4caf50",
            Sprite::Heart => "#e53935",
            Sprite::Projectile => "#ffeb3b",
        }
    }
}

/// Asset loading failures. None of these stop the game on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Creating the DOM element failed
    CreateElement { path: &'static str, reason: String },
    /// The browser reported an error event for the resource
    LoadFailed { path: &'static str },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateElement { path, reason } => {
                write!(f, "failed to create element for {}: {}", path, reason)
            }
            Self::LoadFailed { path } => write!(f, "failed to load {}", path),
        }
    }
}

impl std::error::Error for AssetError {}

/// Per-sprite load outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded,
    Failed,
}

/// Tracks which sprites have finished loading
#[derive(Debug, Clone)]
pub struct AssetTracker {
    status: HashMap<Sprite, LoadStatus>,
    ready_fired: bool,
}

impl Default for AssetTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetTracker {
    pub fn new() -> Self {
        Self {
            status: Sprite::ALL
                .iter()
                .map(|&sprite| (sprite, LoadStatus::Pending))
                .collect(),
            ready_fired: false,
        }
    }

    pub fn status(&self, sprite: Sprite) -> LoadStatus {
        self.status
            .get(&sprite)
            .copied()
            .unwrap_or(LoadStatus::Pending)
    }

    /// Record a successful load.
    ///
    /// Returns true exactly once: on the call that completes the required set.
    pub fn mark_loaded(&mut self, sprite: Sprite) -> bool {
        log::info!("Image loaded: {}", sprite.path());
        self.status.insert(sprite, LoadStatus::Loaded);

        if !self.ready_fired && self.all_required_ready() {
            self.ready_fired = true;
            return true;
        }
        false
    }

    /// Record a failed load. Never flips readiness.
    pub fn mark_failed(&mut self, sprite: Sprite, err: &AssetError) {
        log::error!("{}", err);
        if sprite.is_required() {
            log::error!("Required image {} unavailable, game cannot start", sprite.path());
        }
        self.status.insert(sprite, LoadStatus::Failed);
    }

    /// Record either outcome; returns true when readiness fires
    pub fn record(&mut self, sprite: Sprite, result: Result<(), AssetError>) -> bool {
        match result {
            Ok(()) => self.mark_loaded(sprite),
            Err(err) => {
                self.mark_failed(sprite, &err);
                false
            }
        }
    }

    pub fn all_required_ready(&self) -> bool {
        Sprite::ALL
            .iter()
            .filter(|s| s.is_required())
            .all(|&s| self.status(s) == LoadStatus::Loaded)
    }
}

/// Browser image loading
#[cfg(target_arch = "wasm32")]
pub mod web {
    use std::collections::HashMap;

    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::{AssetError, Sprite};

    /// Loaded (or still loading) image elements by sprite
    pub type ImageSet = HashMap<Sprite, HtmlImageElement>;

    /// Create an image element and start fetching the sprite's file
    pub fn create_image(sprite: Sprite) -> Result<HtmlImageElement, AssetError> {
        HtmlImageElement::new().map_err(|e| AssetError::CreateElement {
            path: sprite.path(),
            reason: format!("{:?}", e),
        })
    }

    /// Point the image at its file and wait for the load or error event
    pub async fn load(sprite: Sprite, image: &HtmlImageElement) -> Result<(), AssetError> {
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            image.set_onload(Some(&resolve));
            image.set_onerror(Some(&reject));
        });
        image.set_src(sprite.path());

        let result = JsFuture::from(promise).await;
        image.set_onload(None);
        image.set_onerror(None);

        result
            .map(|_| ())
            .map_err(|_| AssetError::LoadFailed { path: sprite.path() })
    }

    /// Create elements for every sprite
    pub fn create_all() -> Result<ImageSet, AssetError> {
        Sprite::ALL
            .iter()
            .map(|&sprite| create_image(sprite).map(|img| (sprite, img)))
            .collect()
    }
}
