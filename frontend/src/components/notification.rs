use crate::api::client_config;
use crate::web::timer::DismissTimer;
use leptos::prelude::*;
use stockroom::dashboard::Notification;

/// Transient toast. Clears itself after the configured duration; a newer
/// notification restarts the countdown.
#[component]
pub fn Toast(notification: RwSignal<Option<Notification>>) -> impl IntoView {
    let ttl = client_config().notification_ttl;
    let timer = DismissTimer::new();

    Effect::new(move |_| {
        if notification.with(Option::is_some) {
            timer.arm(ttl, move || notification.set(None));
        } else {
            timer.cancel();
        }
    });

    view! {
        <Show when=move || notification.with(Option::is_some)>
            <div class="toast toast-bottom toast-start z-50">
                <div class=move || {
                    let severity = notification
                        .with(|n| n.as_ref().map(|n| n.severity.as_class()))
                        .unwrap_or("info");
                    format!("alert alert-{severity} shadow-lg")
                }>
                    <span>
                        {move || notification.with(|n| n.as_ref().map(|n| n.message.clone()))}
                    </span>
                    <button
                        class="btn btn-ghost btn-xs"
                        on:click=move |_| notification.set(None)
                    >
                        "✕"
                    </button>
                </div>
            </div>
        </Show>
    }
}
