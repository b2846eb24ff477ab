use crate::api::api;
use crate::web::dialog::sync_dialog;
use leptos::html::Dialog;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stockroom::ModalState;
use stockroom::forms::{ProductDraft, submit_product};

fn read(state: RwSignal<ModalState<ProductDraft>>, field: fn(&ProductDraft) -> &String) -> String {
    state.with(|s| s.draft().map(|d| field(d).clone()).unwrap_or_default())
}

fn write(state: RwSignal<ModalState<ProductDraft>>, edit: impl FnOnce(&mut ProductDraft)) {
    state.update(|s| {
        if let Some(draft) = s.draft_mut() {
            edit(draft);
        }
    });
}

/// Add / edit product dialog. Whether it creates or updates follows the
/// draft's target.
#[component]
pub fn ProductDialog(
    state: RwSignal<ModalState<ProductDraft>>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();
    sync_dialog(dialog_ref, Signal::derive(move || state.with(ModalState::is_open)));

    let submitting = move || state.with(ModalState::is_submitting);
    let title = move || {
        state.with(|s| match s.draft() {
            Some(d) if d.is_edit() => format!("{}: {}", d.title(), d.name),
            Some(d) => d.title().to_string(),
            None => String::new(),
        })
    };
    let submit_label = move || state.with(|s| s.draft().map(ProductDraft::submit_label).unwrap_or(""));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut pending = None;
        state.update(|s| {
            let (target, failure) = match s.draft() {
                Some(d) => (d.target, d.failure_message()),
                None => return,
            };
            pending = s
                .try_begin(ProductDraft::validate)
                .map(|payload| (target, payload, failure));
        });
        let Some((target, payload, failure)) = pending else {
            return;
        };

        spawn_local(async move {
            let result = submit_product(&api(), target, payload).await;
            if let Err(e) = &result {
                log::warn!("product save failed: {e}");
            }
            let mut closed = false;
            state.update(|s| closed = s.settle(&result, failure));
            if closed {
                on_success.run(());
            }
        });
    };

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:cancel=move |ev| {
                if submitting() {
                    ev.prevent_default();
                }
            }
            on:close=move |_| state.update(ModalState::close)
        >
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>

                <form on:submit=on_submit class="space-y-2 mt-4" novalidate>
                    <Show when=move || state.with(|s| s.error().is_some())>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || state.with(|s| s.error().unwrap_or_default().to_string())}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="product_name" class="label">
                            <span class="label-text">"Product Name"</span>
                        </label>
                        <input id="product_name" type="text" required
                            class="input input-bordered w-full"
                            prop:value=move || read(state, |d| &d.name)
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                write(state, |d| d.name = v);
                            }
                        />
                    </div>
                    <div class="form-control">
                        <label for="product_sku" class="label">
                            <span class="label-text">"SKU (Stock Keeping Unit)"</span>
                        </label>
                        <input id="product_sku" type="text" required
                            class="input input-bordered w-full font-mono"
                            prop:value=move || read(state, |d| &d.sku)
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                write(state, |d| d.sku = v);
                            }
                        />
                    </div>
                    <div class="form-control">
                        <label for="product_description" class="label">
                            <span class="label-text">"Description"</span>
                        </label>
                        <textarea id="product_description" rows="3"
                            class="textarea textarea-bordered w-full"
                            prop:value=move || read(state, |d| &d.description)
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                write(state, |d| d.description = v);
                            }
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label for="product_reorder" class="label">
                            <span class="label-text">"Reorder Point"</span>
                        </label>
                        <input id="product_reorder" type="number"
                            class="input input-bordered w-full"
                            prop:value=move || read(state, |d| &d.reorder_point)
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                write(state, |d| d.reorder_point = v);
                            }
                        />
                    </div>

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost"
                            disabled=submitting
                            on:click=move |_| state.update(ModalState::close)
                        >
                            "Cancel"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=submitting>
                            {move || if submitting() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                submit_label().into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
