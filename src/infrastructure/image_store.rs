//! In-memory store for captured Glowbie images.
//!
//! Images live for a fixed retention period. A [`Sweeper`] task owned by the
//! caller removes expired entries on an interval; until it runs, expired
//! entries are already hidden from [`ImageStore::get`].

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

pub const DEFAULT_RETENTION_HOURS: i64 = 14 * 24;
pub const DEFAULT_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub id: String,
    pub image_data: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
}

impl StoredImage {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

pub struct ImageStore {
    images: Mutex<HashMap<String, StoredImage>>,
    retention: Duration,
}

impl ImageStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            images: Mutex::new(HashMap::new()),
            retention,
        }
    }

    fn images(&self) -> MutexGuard<'_, HashMap<String, StoredImage>> {
        self.images.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store base64 image data and return its id.
    pub fn store(&self, image_data: impl Into<String>) -> String {
        self.store_at(image_data, Utc::now())
    }

    pub fn store_at(&self, image_data: impl Into<String>, now: DateTime<Utc>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let image = StoredImage {
            id: id.clone(),
            image_data: image_data.into(),
            created_at: now,
            expires_at: now
                .checked_add_signed(self.retention)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        self.images().insert(id.clone(), image);
        debug!("Stored Glowbie {id}");
        id
    }

    pub fn get(&self, id: &str) -> Option<StoredImage> {
        self.get_at(id, Utc::now())
    }

    pub fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<StoredImage> {
        self.images()
            .get(id)
            .filter(|image| !image.is_expired_at(now))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.images().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove everything that expired before `now`. Returns the number removed.
    pub fn sweep_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut images = self.images();
        let before = images.len();
        images.retain(|id, image| {
            let expired = image.is_expired_at(now);
            if expired {
                info!("Deleted expired Glowbie: {id}");
            }
            !expired
        });
        before - images.len()
    }

    /// Start the periodic sweep. The task stops when the returned handle is
    /// shut down or dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: std::time::Duration) -> Sweeper {
        let store = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let removed = store.sweep_expired_at(Utc::now());
                if removed > 0 {
                    debug!("Glowbie sweep removed {removed} images");
                }
            }
        });

        Sweeper { handle }
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_RETENTION_HOURS))
    }
}

/// Handle to the background sweep task.
pub struct Sweeper {
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub fn shutdown(self) {
        // Drop aborts the task.
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_image_is_retrievable_until_expiry() {
        let store = ImageStore::new(Duration::hours(1));
        let now = Utc::now();
        let id = store.store_at("data:image/png;base64,AAAA", now);

        let image = store.get_at(&id, now).unwrap();
        assert_eq!(image.image_data, "data:image/png;base64,AAAA");
        assert_eq!(image.expires_at, now + Duration::hours(1));

        assert!(store.get_at(&id, now + Duration::hours(2)).is_none());
        assert!(store.get_at("unknown", now).is_none());
    }

    #[test]
    fn sweep_removes_only_expired_images() {
        let store = ImageStore::new(Duration::hours(1));
        let now = Utc::now();
        let old = store.store_at("old", now - Duration::hours(3));
        let fresh = store.store_at("fresh", now);

        let removed = store.sweep_expired_at(now);

        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert!(store.get_at(&old, now).is_none());
        assert!(store.get_at(&fresh, now).is_some());
    }

    #[test]
    fn huge_retention_saturates_expiry() {
        let store = ImageStore::new(Duration::try_hours(2_500_000_000).unwrap());
        let now = Utc::now();
        let id = store.store_at("kept", now);

        let image = store.get_at(&id, now).unwrap();
        assert_eq!(image.expires_at, DateTime::<Utc>::MAX_UTC);
        assert_eq!(store.sweep_expired_at(now), 0);
        assert!(serde_json::to_value(&image).is_ok());
    }

    #[test]
    fn serializes_timestamps_as_epoch_millis() {
        let store = ImageStore::default();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let id = store.store_at("x", now);

        let json = serde_json::to_value(store.get_at(&id, now).unwrap()).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert_eq!(json["imageData"], "x");
    }

    #[tokio::test]
    async fn sweeper_runs_and_stops_on_shutdown() {
        let store = Arc::new(ImageStore::new(Duration::zero()));
        store.store_at("gone", Utc::now() - Duration::seconds(5));

        let sweeper = store.spawn_sweeper(std::time::Duration::from_millis(10));
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        assert!(store.is_empty());
        assert!(!sweeper.is_finished());
        sweeper.shutdown();
    }
}
