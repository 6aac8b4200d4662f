use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use quicklinks::{links::LinkStore, AppPaths, FetchConfig};

pub type SharedStore = Arc<Mutex<LinkStore>>;

pub struct LinksState {
    store: SharedStore,
    links_file: PathBuf,
    fetch_config: FetchConfig,
}

impl LinksState {
    pub fn open(paths: &AppPaths, fetch_config: FetchConfig) -> Self {
        let links_file = paths.links_file();
        Self {
            store: Arc::new(Mutex::new(LinkStore::open(&links_file))),
            links_file,
            fetch_config,
        }
    }

    pub fn links_file(&self) -> &Path {
        &self.links_file
    }

    pub fn fetch_config(&self) -> FetchConfig {
        self.fetch_config.clone()
    }

    pub fn shared(&self) -> SharedStore {
        Arc::clone(&self.store)
    }
}

pub fn lock(store: &SharedStore) -> Result<MutexGuard<'_, LinkStore>, String> {
    store
        .lock()
        .map_err(|_| "link store poisoned".to_string())
}
