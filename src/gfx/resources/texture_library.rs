//! Textures keyed by their asset path
//!
//! Decoded images arrive from the loader threads at any time; they wait here
//! until the next `upload_pending` call turns them into GPU textures.

use std::collections::HashMap;

use super::texture_resource::TextureResource;
use crate::assets::DecodedImage;

#[derive(Default)]
pub struct TextureLibrary {
    uploaded: HashMap<String, TextureResource>,
    pending: HashMap<String, DecodedImage>,
    white: Option<TextureResource>,
}

impl TextureLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an image for upload, replacing any earlier image under `key`.
    pub fn insert_image(&mut self, key: &str, image: DecodedImage) {
        self.uploaded.remove(key);
        self.pending.insert(key.to_string(), image);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.uploaded.contains_key(key) || self.pending.contains_key(key)
    }

    pub fn is_uploaded(&self, key: &str) -> bool {
        self.uploaded.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&TextureResource> {
        self.uploaded.get(key)
    }

    pub fn white(&self) -> Option<&TextureResource> {
        self.white.as_ref()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn len(&self) -> usize {
        self.uploaded.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Uploads every queued image and returns their keys.
    pub fn upload_pending(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) -> Vec<String> {
        if self.white.is_none() {
            self.white = Some(TextureResource::white(device, queue));
        }

        let mut uploaded = Vec::with_capacity(self.pending.len());
        for (key, image) in self.pending.drain() {
            log::debug!(
                "Uploading texture {} ({}x{})",
                key, image.width, image.height
            );
            let texture = TextureResource::from_image(device, queue, &image, &key);
            self.uploaded.insert(key.clone(), texture);
            uploaded.push(key);
        }
        uploaded
    }
}
