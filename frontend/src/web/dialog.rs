//! `<dialog>` 与信号同步

use leptos::html::Dialog;
use leptos::prelude::*;

/// Open the dialog modally while `is_open` is true, close it otherwise.
pub fn sync_dialog(dialog_ref: NodeRef<Dialog>, is_open: Signal<bool>) {
    Effect::new(move |_| {
        let open = is_open.get();
        if let Some(dialog) = dialog_ref.get() {
            if open && !dialog.open() {
                let _ = dialog.show_modal();
            } else if !open && dialog.open() {
                dialog.close();
            }
        }
    });
}
