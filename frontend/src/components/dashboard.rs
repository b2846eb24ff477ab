use crate::api::api;
use crate::auth::use_auth;
use crate::components::anomaly::{AnomalyReport, ProductAnomalyDialog};
use crate::components::delete_dialog::DeleteDialog;
use crate::components::icons::*;
use crate::components::inventory_dialog::InventoryDialog;
use crate::components::notification::Toast;
use crate::components::product_dialog::ProductDialog;
use crate::components::stat_card::StatCard;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stockroom::ModalState;
use stockroom::dashboard::{
    DashboardSnapshot, DeletePrompt, MSG_DASHBOARD_FAILED, Notification, confirm_delete,
    load_dashboard,
};
use stockroom::forms::{AdjustmentDraft, ProductDraft};
use stockroom::shared::Product;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let caps = auth.capabilities();

    let snapshot = RwSignal::new(DashboardSnapshot::default());
    let (loading, set_loading) = signal(true);
    let (load_failed, set_load_failed) = signal(false);
    let notification = RwSignal::new(Option::<Notification>::None);

    let product_modal = RwSignal::new(ModalState::<ProductDraft>::Closed);
    let stock_modal = RwSignal::new(ModalState::<AdjustmentDraft>::Closed);
    let delete_prompt = RwSignal::new(Option::<DeletePrompt>::None);
    let anomaly_target = RwSignal::new(Option::<Product>::None);

    // 每次拉取都整体替换快照
    let refetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match load_dashboard(&api(), caps.get_untracked()).await {
                Ok(fresh) => {
                    snapshot.set(fresh);
                    set_load_failed.set(false);
                }
                Err(_) => set_load_failed.set(true),
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    refetch();

    let on_confirm_delete = move |()| {
        let Some(id) = delete_prompt.with_untracked(|p| p.as_ref().map(|p| p.product.id)) else {
            return;
        };
        delete_prompt.update(|p| {
            if let Some(p) = p {
                p.deleting = true;
            }
        });
        spawn_local(async move {
            let outcome = confirm_delete(&api(), caps.get_untracked(), id).await;
            notification.set(Some(outcome.notification));
            if outcome.deleted {
                delete_prompt.set(None);
            } else {
                delete_prompt.update(|p| {
                    if let Some(p) = p {
                        p.deleting = false;
                    }
                });
            }
            match outcome.refreshed {
                Some(Ok(fresh)) => {
                    snapshot.set(fresh);
                    set_load_failed.set(false);
                }
                Some(Err(_)) => set_load_failed.set(true),
                None => {}
            }
        });
    };

    let on_logout = move |_| auth.logout();

    let is_manager = move || caps.get().manage_catalog;
    let total_products = Signal::derive(move || {
        snapshot.with(|s| s.kpis.map(|k| k.total_products).unwrap_or_default())
    });
    let low_stock = Signal::derive(move || {
        snapshot.with(|s| s.kpis.map(|k| k.low_stock_items).unwrap_or_default())
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <Toast notification=notification />

                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <Boxes attr:class="text-primary h-6 w-6" />
                        <span class="text-xl font-semibold px-2">"Inventory Dashboard"</span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>

                <Show when=move || load_failed.get()>
                    <div role="alert" class="alert alert-error">
                        <TriangleAlert attr:class="h-5 w-5" />
                        <span>{MSG_DASHBOARD_FAILED}</span>
                    </div>
                </Show>

                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <Show when=move || is_manager() && snapshot.with(|s| s.kpis.is_some())>
                        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                            <StatCard title="Total Products" value=total_products>
                                <Boxes attr:class="inline-block w-8 h-8" />
                            </StatCard>
                            <StatCard title="Low Stock Items" value=low_stock>
                                <TriangleAlert attr:class="inline-block w-8 h-8" />
                            </StatCard>
                        </div>
                    </Show>

                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body p-0">
                            <div class="flex items-center justify-between p-6 pb-2">
                                <h3 class="card-title">"Products"</h3>
                                <Show when=is_manager>
                                    <button
                                        class="btn btn-primary gap-2"
                                        on:click=move |_| product_modal.set(ModalState::open(ProductDraft::blank()))
                                    >
                                        <Plus attr:class="h-4 w-4" /> "Add Product"
                                    </button>
                                </Show>
                            </div>

                            <div class="overflow-x-auto w-full">
                                <table class="table table-zebra w-full">
                                    <thead>
                                        <tr>
                                            <th>"Name"</th>
                                            <th>"SKU"</th>
                                            <th class="text-right">"Quantity"</th>
                                            <th class="text-right hidden md:table-cell">"Reorder Point"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <Show when=move || snapshot.with(|s| s.products.is_empty())>
                                            <tr>
                                                <td colspan="5" class="text-center py-8 text-base-content/50">
                                                    "No products found."
                                                </td>
                                            </tr>
                                        </Show>
                                        <For
                                            each=move || snapshot.with(|s| s.products.clone())
                                            key=|p| (p.id, p.quantity_on_hand, p.name.clone(), p.sku.clone(), p.reorder_point)
                                            children=move |product| {
                                                view! {
                                                    <ProductRow
                                                        product=product
                                                        manager=caps.get_untracked().manage_catalog
                                                        product_modal=product_modal
                                                        stock_modal=stock_modal
                                                        delete_prompt=delete_prompt
                                                        anomaly_target=anomaly_target
                                                    />
                                                }
                                            }
                                        />
                                    </tbody>
                                </table>
                            </div>
                        </div>
                    </div>
                </Show>

                <Show when=is_manager>
                    <AnomalyReport />
                </Show>
            </div>

            <ProductDialog state=product_modal on_success=move |()| refetch() />
            <InventoryDialog state=stock_modal on_success=move |()| refetch() />
            <DeleteDialog prompt=delete_prompt on_confirm=on_confirm_delete />
            <ProductAnomalyDialog product=anomaly_target />
        </div>
    }
}

#[component]
fn ProductRow(
    product: Product,
    manager: bool,
    product_modal: RwSignal<ModalState<ProductDraft>>,
    stock_modal: RwSignal<ModalState<AdjustmentDraft>>,
    delete_prompt: RwSignal<Option<DeletePrompt>>,
    anomaly_target: RwSignal<Option<Product>>,
) -> impl IntoView {
    let adjust = AdjustmentDraft::for_product(&product);
    let edit = ProductDraft::from_product(&product);
    let route = AppRoute::ProductDetail(product.id);
    let for_delete = product.clone();
    let for_anomalies = product.clone();

    let manager_actions = manager.then(|| {
        view! {
            <button
                class="btn btn-ghost btn-sm btn-square"
                title="Edit Product Details"
                on:click=move |_| product_modal.set(ModalState::open(edit.clone()))
            >
                <Pencil attr:class="h-4 w-4" />
            </button>
            <Link to=route class="btn btn-ghost btn-sm btn-square" title="View Chart & Forecast">
                <ChartLine attr:class="h-4 w-4" />
            </Link>
            <button
                class="btn btn-ghost btn-sm btn-square"
                title="View Anomalies"
                on:click=move |_| anomaly_target.set(Some(for_anomalies.clone()))
            >
                <Activity attr:class="h-4 w-4" />
            </button>
            <button
                class="btn btn-ghost btn-sm btn-square text-error"
                title="Delete"
                on:click=move |_| delete_prompt.set(Some(DeletePrompt::new(for_delete.clone())))
            >
                <Trash2 attr:class="h-4 w-4" />
            </button>
        }
    });

    view! {
        <tr>
            <td class="font-semibold">
                {product.name.clone()}
            </td>
            <td class="font-mono text-sm opacity-70">{product.sku.clone()}</td>
            <td class="text-right font-mono">
                {product.quantity_on_hand}
            </td>
            <td class="text-right font-mono hidden md:table-cell">{product.reorder_point}</td>
            <td>
                <div class="flex justify-end gap-1">
                    <button
                        class="btn btn-outline btn-sm"
                        title="Update Stock"
                        on:click=move |_| stock_modal.set(ModalState::open(adjust.clone()))
                    >
                        "Update Stock"
                    </button>
                    {manager_actions}
                </div>
            </td>
        </tr>
    }
}
