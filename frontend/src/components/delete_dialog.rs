use crate::web::dialog::sync_dialog;
use leptos::html::Dialog;
use leptos::prelude::*;
use stockroom::dashboard::DeletePrompt;

/// Delete confirmation. Both buttons lock while the request is in flight; the
/// caller decides whether the prompt closes afterwards.
#[component]
pub fn DeleteDialog(
    prompt: RwSignal<Option<DeletePrompt>>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();
    sync_dialog(dialog_ref, Signal::derive(move || prompt.with(Option::is_some)));

    let deleting = move || prompt.with(|p| p.as_ref().is_some_and(|p| p.deleting));
    let dismiss = move || {
        if !deleting() {
            prompt.set(None);
        }
    };

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:cancel=move |ev| {
                if deleting() {
                    ev.prevent_default();
                }
            }
            on:close=move |_| dismiss()
        >
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Confirm Delete"</h3>
                <p class="py-4">
                    {move || prompt.with(|p| p.as_ref().map(DeletePrompt::message))}
                </p>
                <div class="modal-action">
                    <button class="btn btn-ghost" disabled=deleting on:click=move |_| dismiss()>
                        "Cancel"
                    </button>
                    <button class="btn btn-error" disabled=deleting on:click=move |_| on_confirm.run(())>
                        <Show when=deleting>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        {move || prompt.with(|p| p.as_ref().map(DeletePrompt::confirm_label))}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
