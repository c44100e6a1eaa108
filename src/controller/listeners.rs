//! Repository stream listeners
//!
//! The song store publishes every change on `watch` channels; these tasks
//! copy each new value into the model until the app quits.

use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::model::{AppModel, ContentState};

use super::AppController;

impl AppController {
    /// Start mirroring the repository's song and album streams. Idempotent.
    pub async fn start_listeners(&self) {
        let mut started = self.listeners_started.lock().await;
        if *started {
            return;
        }
        *started = true;
        drop(started);

        tracing::info!("Starting repository listeners");

        spawn_mirror(self.repository.songs_stream(), Arc::clone(&self.model), "songs", ContentState::set_songs);
        spawn_mirror(self.repository.albums_stream(), Arc::clone(&self.model), "albums", ContentState::set_albums);
    }
}

fn spawn_mirror<T, F>(mut rx: watch::Receiver<T>, model: Arc<Mutex<AppModel>>, stream: &'static str, apply: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&mut ContentState, T) + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let value = rx.borrow_and_update().clone();
            {
                let model_guard = model.lock().await;
                if model_guard.should_quit().await {
                    tracing::debug!(stream, "Repository listener shutting down");
                    break;
                }
                let mut content = model_guard.content_state.lock().await;
                apply(&mut *content, value);
            }
            tracing::trace!(stream, "Repository stream mirrored into model");

            if rx.changed().await.is_err() {
                tracing::debug!(stream, "Repository stream closed");
                break;
            }
        }
    });
}
