use crate::error::LinkError;

use super::fetch::MetadataFetcher;
use super::onenote::notebook_url;
use super::store::LinkStore;
use super::types::{LinkRecord, LinkView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget {
    Link,
    Notebook,
    Section,
}

pub fn list_views(store: &LinkStore) -> Vec<LinkView> {
    store.records().iter().map(LinkView::from).collect()
}

pub fn add_link(
    store: &mut LinkStore,
    fetcher: &MetadataFetcher,
    raw_input: &str,
) -> Result<LinkRecord, LinkError> {
    let record = fetcher.fetch(raw_input)?;
    store.add(record)
}

pub fn remove_link(
    store: &mut LinkStore,
    id: &str,
    confirm: impl FnOnce(&LinkRecord) -> bool,
) -> Result<bool, LinkError> {
    let record = store
        .get(id)
        .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
    if !confirm(record) {
        return Ok(false);
    }
    Ok(store.remove(id)?.is_some())
}

pub fn open_url(store: &LinkStore, id: &str, target: OpenTarget) -> Result<String, LinkError> {
    let record = store
        .get(id)
        .ok_or_else(|| LinkError::NotFound(id.to_string()))?;
    let url = match target {
        OpenTarget::Notebook if record.is_onenote => notebook_url(&record.url),
        _ => record.url.clone(),
    };
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;
    use std::path::PathBuf;

    struct TempSpace {
        root: PathBuf,
    }

    impl TempSpace {
        fn new() -> Self {
            let root = std::env::temp_dir()
                .join(format!("quicklinks-service-test-{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&root).expect("temp space should be created");
            Self { root }
        }

        fn store(&self) -> LinkStore {
            LinkStore::open(self.root.join("quick_links.json"))
        }
    }

    impl Drop for TempSpace {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }

    const NOTEBOOK_PAGE: &str = "onenote:https://d.docs.live.net/abc/Documents/MyNotebook/Scripts.one#Get AD Users&section-id=S&page-id=P&end";

    fn fetcher() -> MetadataFetcher {
        MetadataFetcher::new(FetchConfig::default()).expect("client should build")
    }

    #[test]
    fn empty_input_is_rejected_without_touching_the_store() {
        let space = TempSpace::new();
        let mut store = space.store();
        let err = add_link(&mut store, &fetcher(), " \n ").unwrap_err();
        assert_eq!(err, LinkError::EmptyInput);
        assert_eq!(err.to_string(), "Please enter a valid link.");
        assert!(store.records().is_empty());
    }

    #[test]
    fn added_link_is_persisted_and_listed() {
        let space = TempSpace::new();
        let mut store = space.store();
        let record = add_link(&mut store, &fetcher(), NOTEBOOK_PAGE).expect("add");

        let views = list_views(&space.store());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].id, record.id);
        assert_eq!(views[0].title, "📄 Get AD Users (MyNotebook/Scripts)");
        assert!(views[0].is_onenote);
        assert!(views[0].icon.is_none());
    }

    #[test]
    fn remove_requires_confirmation() {
        let space = TempSpace::new();
        let mut store = space.store();
        let record = add_link(&mut store, &fetcher(), "note://somewhere").expect("add");

        assert!(!remove_link(&mut store, &record.id, |_| false).expect("declined"));
        assert_eq!(store.records().len(), 1);

        let mut seen = None;
        let removed = remove_link(&mut store, &record.id, |r| {
            seen = Some(r.url.clone());
            true
        })
        .expect("confirmed");
        assert!(removed);
        assert_eq!(seen.as_deref(), Some("note://somewhere"));
        assert!(space.store().records().is_empty());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let space = TempSpace::new();
        let mut store = space.store();
        assert_eq!(
            remove_link(&mut store, "missing", |_| true).unwrap_err(),
            LinkError::NotFound("missing".to_string())
        );
        assert!(open_url(&store, "missing", OpenTarget::Link).is_err());
    }

    #[test]
    fn open_targets_for_notebook_links() {
        let space = TempSpace::new();
        let mut store = space.store();
        let page = add_link(&mut store, &fetcher(), NOTEBOOK_PAGE).expect("add");
        let web = add_link(&mut store, &fetcher(), "ftp://files.test/a/b/c/d").expect("add");

        assert_eq!(
            open_url(&store, &page.id, OpenTarget::Notebook).unwrap(),
            "onenote:https://d.docs.live.net/abc/Documents/MyNotebook"
        );
        assert_eq!(
            open_url(&store, &page.id, OpenTarget::Section).unwrap(),
            NOTEBOOK_PAGE
        );
        assert_eq!(
            open_url(&store, &web.id, OpenTarget::Notebook).unwrap(),
            "ftp://files.test/a/b/c/d"
        );
    }
}
