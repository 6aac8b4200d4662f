pub mod favicon;
pub mod fetch;
pub mod html;
pub mod input;
pub mod onenote;
pub mod service;
pub mod store;
pub mod types;

pub use fetch::MetadataFetcher;
pub use onenote::{DeepLink, NotebookTarget};
pub use service::OpenTarget;
pub use store::LinkStore;
pub use types::{LinkRecord, LinkView};
