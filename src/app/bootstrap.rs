use std::path::{Path, PathBuf};

use gtk4::prelude::*;
use gtk4::ApplicationWindow;

const FOLDER_DIALOG_TITLE: &str = "Select Directory";

/// Asks for a folder, then calls `on_result` with the choice (`None` when cancelled).
pub(super) fn choose_folder<F>(
    window: &ApplicationWindow,
    start_folder: Option<&Path>,
    on_result: F,
) where
    F: FnOnce(Option<PathBuf>) + 'static,
{
    let dialog = gtk4::FileDialog::builder()
        .title(FOLDER_DIALOG_TITLE)
        .modal(true)
        .build();
    if let Some(start) = start_folder.filter(|path| path.is_dir()) {
        dialog.set_initial_folder(Some(&gtk4::gio::File::for_path(start)));
    }

    dialog.select_folder(
        Some(window),
        gtk4::gio::Cancellable::NONE,
        move |result| match result {
            Ok(file) => on_result(file.path()),
            Err(err) => {
                tracing::info!(%err, "folder selection dismissed");
                on_result(None);
            }
        },
    );
}
