use tokio_util::sync::CancellationToken;
use tracing::debug;
use crate::domain::models::{event::EventDraft, patch::DraftPatch};
use crate::domain::services::media::{extract_images, image_to_data_url, Upload};
use crate::domain::wizard::FormContext;
use crate::error::AppError;

/// Result of a finished file read, applied against whatever the draft looks
/// like at the time it lands.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaUpdate {
    Cover(String),
    Poster(String),
    Gallery(Vec<String>),
}

impl MediaUpdate {
    pub fn into_patch(self, draft: &EventDraft) -> DraftPatch {
        match self {
            MediaUpdate::Cover(url) => DraftPatch { cover_image: Some(url), ..Default::default() },
            MediaUpdate::Poster(url) => DraftPatch { poster: Some(url), ..Default::default() },
            MediaUpdate::Gallery(urls) => {
                let mut gallery = draft.gallery_images.clone();
                gallery.extend(urls);
                DraftPatch { gallery_images: Some(gallery), ..Default::default() }
            }
        }
    }
}

/// Cover, poster and gallery uploads.
///
/// File reads run off the async executor and are tied to this editor's
/// lifetime: once the editor is unmounted (dropped) or `cancel_pending` is
/// called, reads still in flight resolve to `None` and never touch the draft.
#[derive(Debug, Default)]
pub struct MediaEditor {
    cancel: CancellationToken,
    preview: Option<usize>,
}

impl MediaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that outstanding reads observe; cloned so a caller can run the
    /// read without holding the editor.
    pub fn cancellation(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel_pending(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
    }

    pub async fn read_cover(&self, upload: Upload) -> Result<Option<MediaUpdate>, AppError> {
        read_image(self.cancellation(), upload).await.map(|url| url.map(MediaUpdate::Cover))
    }

    pub async fn read_poster(&self, upload: Upload) -> Result<Option<MediaUpdate>, AppError> {
        read_image(self.cancellation(), upload).await.map(|url| url.map(MediaUpdate::Poster))
    }

    pub async fn read_gallery(&self, uploads: Vec<Upload>) -> Result<Option<MediaUpdate>, AppError> {
        read_gallery(self.cancellation(), uploads).await
    }

    pub async fn read_archive(&self, archive: Vec<u8>, max_entry_bytes: u64) -> Result<Option<MediaUpdate>, AppError> {
        read_archive(self.cancellation(), archive, max_entry_bytes).await
    }

    pub fn apply(&mut self, ctx: &mut dyn FormContext, update: MediaUpdate) {
        let patch = update.into_patch(ctx.draft());
        ctx.update_form_data(patch);
    }

    /// Applies a read issued under `issued`, unless that token has been
    /// cancelled since. Returns whether the draft was patched.
    pub fn apply_if_current(
        &mut self,
        ctx: &mut dyn FormContext,
        issued: &CancellationToken,
        update: MediaUpdate,
    ) -> bool {
        if issued.is_cancelled() {
            debug!("Dropping media update from a cancelled read");
            return false;
        }
        self.apply(ctx, update);
        true
    }

    pub fn remove_gallery_image(&mut self, ctx: &mut dyn FormContext, index: usize) {
        let mut gallery = ctx.draft().gallery_images.clone();
        if index >= gallery.len() {
            return;
        }
        gallery.remove(index);
        if self.preview.is_some_and(|p| p >= gallery.len()) {
            self.preview = None;
        }
        ctx.update_form_data(DraftPatch { gallery_images: Some(gallery), ..Default::default() });
    }

    pub fn clear_cover(&mut self, ctx: &mut dyn FormContext) {
        ctx.update_form_data(DraftPatch { cover_image: Some(String::new()), ..Default::default() });
    }

    pub fn open_preview(&mut self, index: usize) {
        self.preview = Some(index);
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn preview(&self) -> Option<usize> {
        self.preview
    }
}

impl Drop for MediaEditor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

pub async fn read_image(cancel: CancellationToken, upload: Upload) -> Result<Option<String>, AppError> {
    let work = tokio::task::spawn_blocking(move || image_to_data_url(&upload));
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Image read cancelled");
            Ok(None)
        }
        joined = work => {
            let url = joined.map_err(|e| AppError::InternalWithMsg(format!("Image read task failed: {}", e)))??;
            Ok(Some(url))
        }
    }
}

pub async fn read_gallery(cancel: CancellationToken, uploads: Vec<Upload>) -> Result<Option<MediaUpdate>, AppError> {
    let work = tokio::task::spawn_blocking(move || {
        uploads.iter().map(image_to_data_url).collect::<Result<Vec<_>, _>>()
    });
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Gallery read cancelled");
            Ok(None)
        }
        joined = work => {
            let urls = joined.map_err(|e| AppError::InternalWithMsg(format!("Gallery read task failed: {}", e)))??;
            Ok(Some(MediaUpdate::Gallery(urls)))
        }
    }
}

pub async fn read_archive(
    cancel: CancellationToken,
    archive: Vec<u8>,
    max_entry_bytes: u64,
) -> Result<Option<MediaUpdate>, AppError> {
    let work = tokio::task::spawn_blocking(move || -> Result<Vec<String>, AppError> {
        let images = extract_images(&archive, max_entry_bytes)?;
        images.iter().map(image_to_data_url).collect()
    });
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("Archive extraction cancelled");
            Ok(None)
        }
        joined = work => {
            let urls = joined.map_err(|e| AppError::InternalWithMsg(format!("Archive task failed: {}", e)))??;
            Ok(Some(MediaUpdate::Gallery(urls)))
        }
    }
}
