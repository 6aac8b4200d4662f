mod links;
mod state;
mod tray;

use quicklinks::{AppPaths, FetchConfig};
use serde::Serialize;
use tauri::{Manager, WindowEvent};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,quicklinks=info,quicklinks_desktop_lib=info")
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[derive(Serialize)]
struct AppInfo {
    name: String,
    version: String,
    identifier: String,
    links_file: String,
}

#[tauri::command]
fn app_info(app: tauri::AppHandle, state: tauri::State<'_, state::LinksState>) -> AppInfo {
    let package = app.package_info();
    let config = app.config();
    AppInfo {
        name: package.name.clone(),
        version: package.version.to_string(),
        identifier: config.identifier.clone(),
        links_file: state.links_file().display().to_string(),
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    init_tracing();

    tauri::Builder::default()
        .setup(|app| {
            let paths = AppPaths::platform_default()?;
            paths.ensure()?;
            tracing::info!(path = %paths.links_file().display(), "opening link store");
            app.manage(state::LinksState::open(&paths, FetchConfig::default()));
            tray::install(app.handle())?;
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                if window.label() == tray::MAIN_WINDOW {
                    let _ = window.hide();
                    api.prevent_close();
                }
            }
        })
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            app_info,
            links::links_list,
            links::link_add,
            links::link_remove,
            links::link_open,
            links::link_open_notebook,
            links::link_open_section
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
