use quicklinks::links::{
    input::normalize_input,
    service::{self, OpenTarget},
    LinkView, MetadataFetcher,
};
use tauri::{AppHandle, Runtime, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;
use tracing::{error, warn};

use crate::state::{lock, LinksState};

fn warn_user<R: Runtime>(app: &AppHandle<R>, message: &str) {
    app.dialog()
        .message(message)
        .title("⚠️ Warning")
        .kind(MessageDialogKind::Warning)
        .show(|_| {});
}

fn error_user<R: Runtime>(app: &AppHandle<R>, message: &str) {
    app.dialog()
        .message(message)
        .title("❌ Error")
        .kind(MessageDialogKind::Error)
        .show(|_| {});
}

#[tauri::command]
pub fn links_list(state: State<'_, LinksState>) -> Result<Vec<LinkView>, String> {
    let store = state.shared();
    let store = lock(&store)?;
    Ok(service::list_views(&store))
}

#[tauri::command]
pub async fn link_add(
    app: AppHandle,
    state: State<'_, LinksState>,
    input: String,
) -> Result<LinkView, String> {
    let url = match normalize_input(&input) {
        Ok(url) => url,
        Err(e) => {
            let message = e.to_string();
            warn_user(&app, &message);
            return Err(message);
        }
    };

    let store = state.shared();
    let config = state.fetch_config();
    tauri::async_runtime::spawn_blocking(move || -> Result<LinkView, String> {
        let fetcher = MetadataFetcher::new(config)?;
        // Fetch outside the lock so listing stays responsive during slow requests.
        let record = fetcher.fetch_url(&url);
        let mut store = lock(&store)?;
        let stored = store.add(record).map_err(|e| e.to_string())?;
        Ok(LinkView::from(&stored))
    })
    .await
    .map_err(|e| e.to_string())?
}

#[tauri::command]
pub async fn link_remove(
    app: AppHandle,
    state: State<'_, LinksState>,
    id: String,
) -> Result<bool, String> {
    let store = state.shared();
    tauri::async_runtime::spawn_blocking(move || -> Result<bool, String> {
        let title = {
            let store = lock(&store)?;
            store
                .get(&id)
                .map(|r| r.title.clone())
                .ok_or_else(|| format!("no link with id {id}"))?
        };

        let confirmed = app
            .dialog()
            .message(format!("Remove this link?\n\n{title}"))
            .title("Confirm Delete")
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .blocking_show();

        let mut store = lock(&store)?;
        service::remove_link(&mut store, &id, |_| confirmed).map_err(|e| {
            warn!(id = %id, "failed to remove link: {e}");
            e.to_string()
        })
    })
    .await
    .map_err(|e| e.to_string())?
}

fn open_link(
    app: &AppHandle,
    state: &LinksState,
    id: &str,
    target: OpenTarget,
) -> Result<(), String> {
    let url = {
        let store = state.shared();
        let store = lock(&store)?;
        service::open_url(&store, id, target).map_err(|e| e.to_string())?
    };
    app.opener()
        .open_url(url.as_str(), None::<&str>)
        .map_err(|e| {
            error!(url = %url, "failed to open link: {e}");
            let message = format!("Could not open the link.\n{e}");
            error_user(app, &message);
            message
        })
}

#[tauri::command]
pub fn link_open(app: AppHandle, state: State<'_, LinksState>, id: String) -> Result<(), String> {
    open_link(&app, &state, &id, OpenTarget::Link)
}

#[tauri::command]
pub fn link_open_notebook(
    app: AppHandle,
    state: State<'_, LinksState>,
    id: String,
) -> Result<(), String> {
    open_link(&app, &state, &id, OpenTarget::Notebook)
}

#[tauri::command]
pub fn link_open_section(
    app: AppHandle,
    state: State<'_, LinksState>,
    id: String,
) -> Result<(), String> {
    open_link(&app, &state, &id, OpenTarget::Section)
}
