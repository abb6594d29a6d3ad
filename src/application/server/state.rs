use std::sync::Arc;

use crate::domain::Diary;
use crate::infrastructure::ImageStore;

pub struct AppState {
    pub diary: Arc<Diary>,
    pub images: Arc<ImageStore>,
    pub auth_token: String,
}

impl AppState {
    pub fn new(
        diary: Arc<Diary>,
        images: Arc<ImageStore>,
        auth_token: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            diary,
            images,
            auth_token: auth_token.into(),
        })
    }
}
