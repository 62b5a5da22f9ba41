use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::broadcast;

use crate::cache::EntityCache;
use crate::config;
use crate::db::models::{Organization, Problem};
use crate::i18n::Localizer;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub localizer: Arc<Localizer>,
    pub events: broadcast::Sender<String>,
    pub problems: Arc<EntityCache<Problem>>,
    pub organizations: Arc<EntityCache<Organization>>,
}

impl AppState {
    pub fn new(
        db: PgPool,
        env: config::Config,
        localizer: Arc<Localizer>,
        events: broadcast::Sender<String>,
    ) -> Self {
        Self {
            db,
            env,
            localizer,
            events,
            problems: Arc::new(EntityCache::new()),
            organizations: Arc::new(EntityCache::new()),
        }
    }
}
