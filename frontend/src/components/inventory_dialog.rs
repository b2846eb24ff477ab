use crate::api::api;
use crate::web::dialog::sync_dialog;
use leptos::html::Dialog;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stockroom::ModalState;
use stockroom::forms::{AdjustmentDraft, MSG_MOVE_FAILED, submit_adjustment};
use stockroom::shared::MovementReason;

/// "Update Stock" dialog: one inventory movement against a single product.
#[component]
pub fn InventoryDialog(
    state: RwSignal<ModalState<AdjustmentDraft>>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();
    sync_dialog(dialog_ref, Signal::derive(move || state.with(ModalState::is_open)));

    let submitting = move || state.with(ModalState::is_submitting);
    let draft_field = move |f: fn(&AdjustmentDraft) -> String| state.with(|s| s.draft().map(f).unwrap_or_default());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut movement = None;
        state.update(|s| movement = s.try_begin(AdjustmentDraft::validate));
        let Some(movement) = movement else {
            return;
        };

        spawn_local(async move {
            let result = submit_adjustment(&api(), movement).await;
            if let Err(e) = &result {
                log::warn!("inventory movement failed: {e}");
            }
            let mut closed = false;
            state.update(|s| closed = s.settle(&result, MSG_MOVE_FAILED));
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
                <h3 class="font-bold text-lg">
                    "Update Stock for " {move || draft_field(|d| d.product_name.clone())}
                </h3>
                <p class="text-sm text-base-content/70 mt-1">
                    "Current Quantity: " {move || draft_field(|d| d.on_hand.to_string())}
                </p>

                <form on:submit=on_submit class="space-y-2 mt-4" novalidate>
                    <Show when=move || state.with(|s| s.error().is_some())>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || state.with(|s| s.error().unwrap_or_default().to_string())}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label for="movement_reason" class="label">
                            <span class="label-text">"Reason"</span>
                        </label>
                        <select id="movement_reason" class="select select-bordered w-full"
                            prop:value=move || draft_field(|d| d.reason.as_str().to_string())
                            on:change=move |ev| {
                                if let Some(reason) = MovementReason::parse(&event_target_value(&ev)) {
                                    state.update(|s| {
                                        if let Some(d) = s.draft_mut() {
                                            d.reason = reason;
                                        }
                                    });
                                }
                            }
                        >
                            {MovementReason::ALL
                                .into_iter()
                                .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-control">
                        <label for="movement_quantity" class="label">
                            <span class="label-text">"Quantity Change"</span>
                        </label>
                        <input id="movement_quantity" type="number"
                            class="input input-bordered w-full"
                            placeholder="e.g., 50 for incoming, 10 for sale"
                            prop:value=move || draft_field(|d| d.quantity.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                state.update(|s| {
                                    if let Some(d) = s.draft_mut() {
                                        d.quantity = v;
                                    }
                                });
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
                            <Show when=submitting>
                                <span class="loading loading-spinner"></span>
                            </Show>
                            "Submit"
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}
