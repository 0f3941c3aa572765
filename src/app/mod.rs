use crate::pages::{
    AttractionDetailPage, DiagnosticsPage, FavoritesPage, HomePage, NotFoundPage,
};
use crate::state::{AppContext, AppState};
use crate::telegram::apply_theme;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    apply_theme(state.host);
    log::info!(
        "starting against {} (inside Telegram: {})",
        state.config.api_url,
        state.host.is_embedded()
    );
    provide_context(AppContext(state));

    // Router hooks (`use_params`, `use_navigate`) need the <Router> context.
    view! {
        <Router>
            <main class="min-h-screen bg-[var(--tg-theme-bg-color)] text-[var(--tg-theme-text-color)]">
                <Routes fallback=NotFoundPage>
                    <Route path=path!("") view=HomePage />
                    <Route path=path!("attractions/:id") view=AttractionDetailPage />
                    <Route path=path!("favorites") view=FavoritesPage />
                    <Route path=path!("test") view=DiagnosticsPage />
                </Routes>
            </main>
        </Router>
    }
}
