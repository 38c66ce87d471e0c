//! 通信中オーバーレイ

use leptos::prelude::*;

#[component]
pub fn LoadingOverlay(busy: ReadSignal<bool>) -> impl IntoView {
    view! {
        <div id="loadingOverlay" class="loading-overlay" class:active=move || busy.get()>
            <div class="spinner"></div>
        </div>
    }
}
