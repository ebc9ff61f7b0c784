//! Ownership of the on-screen preview resource.
//!
//! A preview handle (a Blob object URL in the browser) must be released
//! exactly once: when a newer selection replaces it, or when its owner
//! goes away. [`PreviewSlot`] enforces both.

/// A preview resource that must be released explicitly.
pub trait ReleasePreview {
    /// Free the underlying resource. Called exactly once per handle.
    fn release(&mut self);
}

/// Holds at most one live preview handle.
#[derive(Debug)]
pub struct PreviewSlot<H: ReleasePreview> {
    current: Option<(u64, H)>,
}

impl<H: ReleasePreview> Default for PreviewSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H: ReleasePreview> PreviewSlot<H> {
    /// An empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the handle for image `image_id`, releasing the previous one.
    pub fn replace(&mut self, image_id: u64, handle: H) {
        if let Some((_, mut old)) = self.current.replace((image_id, handle)) {
            old.release();
        }
    }

    /// Release and forget the current handle, if any.
    pub fn clear(&mut self) {
        if let Some((_, mut old)) = self.current.take() {
            old.release();
        }
    }

    /// The live handle.
    #[must_use]
    pub fn get(&self) -> Option<&H> {
        self.current.as_ref().map(|(_, h)| h)
    }

    /// Image the live handle belongs to.
    #[must_use]
    pub fn image_id(&self) -> Option<u64> {
        self.current.as_ref().map(|(id, _)| *id)
    }
}

impl<H: ReleasePreview> Drop for PreviewSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}
