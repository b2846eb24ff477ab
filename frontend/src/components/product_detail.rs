use crate::api::api;
use crate::components::icons::ArrowLeft;
use crate::components::stock_chart::StockChart;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use stockroom::detail::{MSG_NO_CHART_DATA, ProductDetail, failure_message, load_product_detail};
use uuid::Uuid;

/// Load state of the page; the view renders exactly one of these.
#[derive(Clone)]
enum Load {
    Pending,
    Ready(ProductDetail),
    Failed(&'static str),
}

#[component]
pub fn ProductDetailPage(id: Uuid) -> impl IntoView {
    let state = RwSignal::new(Load::Pending);

    spawn_local(async move {
        let next = match load_product_detail(&api(), id).await {
            Ok(detail) => Load::Ready(detail),
            Err(e) => Load::Failed(failure_message(&e)),
        };
        state.set(next);
    });

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-5xl mx-auto space-y-6">
                <Link to=AppRoute::Dashboard class="btn btn-ghost gap-2">
                    <ArrowLeft attr:class="h-4 w-4" /> "Back to Dashboard"
                </Link>

                {move || match state.get() {
                    Load::Pending => view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                    .into_any(),
                    Load::Failed(message) => view! {
                        <div role="alert" class="alert alert-error">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    Load::Ready(detail) => view! { <DetailBody detail=detail /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn DetailBody(detail: ProductDetail) -> impl IntoView {
    let has_chart = detail.has_chart_data();
    let series = detail.chart_series();
    let product = detail.product;

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h2 class="card-title text-2xl">{product.name}</h2>
                <p class="font-mono text-sm opacity-70">"SKU: " {product.sku}</p>
                {product.description.map(|d| view! { <p class="mt-2">{d}</p> })}
                <div class="stats stats-horizontal mt-4">
                    <div class="stat px-0 pr-8">
                        <div class="stat-title">"Quantity On Hand"</div>
                        <div class="stat-value text-primary">{product.quantity_on_hand}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-title">"Reorder Point"</div>
                        <div class="stat-value">{product.reorder_point}</div>
                    </div>
                </div>
            </div>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">"Stock History & Demand Forecast"</h3>
                {if !has_chart {
                    view! {
                        <div role="alert" class="alert alert-info">
                            <span>{MSG_NO_CHART_DATA}</span>
                        </div>
                    }
                    .into_any()
                } else {
                    view! { <StockChart series=series /> }.into_any()
                }}
            </div>
        </div>
    }
}
