use crate::api::api;
use crate::components::icons::TriangleAlert;
use crate::web::dialog::sync_dialog;
use leptos::html::Dialog;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stockroom::dashboard::{MSG_NO_PRODUCT_ANOMALIES, MSG_NO_UNUSUAL_MOVEMENTS, load_anomalies};
use stockroom::shared::{Anomaly, Product};

#[component]
fn AnomalyTable(
    #[prop(into)] rows: Signal<Vec<Anomaly>>,
    #[prop(into)] loading: Signal<bool>,
    empty_message: &'static str,
) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="table table-sm table-zebra w-full">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Product Name"</th>
                        <th>"Reason"</th>
                        <th class="text-right">"Quantity Change"</th>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || loading.get()>
                        <tr>
                            <td colspan="4" class="text-center py-6">
                                <span class="loading loading-spinner loading-md"></span>
                            </td>
                        </tr>
                    </Show>
                    <Show when=move || !loading.get() && rows.with(Vec::is_empty)>
                        <tr>
                            <td colspan="4" class="text-center py-6 text-base-content/50">
                                {empty_message}
                            </td>
                        </tr>
                    </Show>
                    <For
                        each=move || if loading.get() { Vec::new() } else { rows.get() }
                        key=|a| a.id
                        children=|a| {
                            view! {
                                <tr>
                                    <td class="font-mono text-xs">{a.event_date}</td>
                                    <td>{a.product_name}</td>
                                    <td>{a.reason.unwrap_or_default()}</td>
                                    <td class="text-right font-mono text-error">{a.change_quantity}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}

/// Collapsible global report. Fetched once when the dashboard mounts.
#[component]
pub fn AnomalyReport() -> impl IntoView {
    let rows = RwSignal::new(Vec::<Anomaly>::new());
    let loading = RwSignal::new(true);

    spawn_local(async move {
        let fetched = load_anomalies(&api(), None).await;
        rows.set(fetched);
        loading.set(false);
    });

    view! {
        <div class="collapse collapse-arrow bg-base-100 shadow-xl">
            <input type="checkbox" />
            <div class="collapse-title flex items-center gap-2 font-semibold">
                <TriangleAlert attr:class="h-5 w-5 text-warning" />
                "Global Anomaly Report"
                <Show when=move || !loading.get() && rows.with(|r| !r.is_empty())>
                    <span class="badge badge-warning">{move || rows.with(Vec::len)}</span>
                </Show>
            </div>
            <div class="collapse-content">
                <AnomalyTable rows=rows loading=loading empty_message=MSG_NO_UNUSUAL_MOVEMENTS />
            </div>
        </div>
    }
}

/// Per-product anomaly viewer; fetches each time a product is selected.
#[component]
pub fn ProductAnomalyDialog(product: RwSignal<Option<Product>>) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();
    sync_dialog(dialog_ref, Signal::derive(move || product.with(Option::is_some)));

    let rows = RwSignal::new(Vec::<Anomaly>::new());
    let loading = RwSignal::new(false);
    let selected = Memo::new(move |_| product.with(|p| p.as_ref().map(|p| p.id)));

    Effect::new(move |_| {
        let Some(id) = selected.get() else {
            return;
        };
        rows.set(Vec::new());
        loading.set(true);
        spawn_local(async move {
            let fetched = load_anomalies(&api(), Some(id)).await;
            // a different product may have been picked meanwhile
            if selected.get_untracked() == Some(id) {
                rows.set(fetched);
                loading.set(false);
            }
        });
    });

    let title = move || {
        product.with(|p| {
            p.as_ref()
                .map(|p| format!("Anomaly Report for {}", p.name))
                .unwrap_or_default()
        })
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| product.set(None)>
            <div class="modal-box max-w-3xl">
                <h3 class="font-bold text-lg mb-4">{title}</h3>
                <AnomalyTable rows=rows loading=loading empty_message=MSG_NO_PRODUCT_ANOMALIES />
                <div class="modal-action">
                    <button class="btn" on:click=move |_| product.set(None)>"Close"</button>
                </div>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
