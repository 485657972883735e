use std::sync::Arc;

use ogtags_fetch::OgFetcher;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<OgFetcher>,
}

impl AppState {
    pub fn new(fetcher: OgFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}
