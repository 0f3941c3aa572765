use crate::api::CatalogApi;
use crate::components::ui::{ErrorBanner, ErrorBannerText};
use crate::components::{AttractionList, Header, Loading, Navigation};
use crate::state::favorites::FavoritesState;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let favorite_ids = app_state.0.favorites;
    let api = StoredValue::new(app_state.0.api_client.clone());

    let state: RwSignal<FavoritesState> = RwSignal::new(FavoritesState::new());

    let load = move || {
        let Some(seq) = state.try_update(|s| s.begin_load()) else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let result = api.list_favorites().await;
            if let Ok(list) = &result {
                if state.with_untracked(|s| s.is_current(seq)) {
                    favorite_ids.update(|f| f.replace_with(&list.items));
                }
            }
            let _ = state.try_update(|s| s.apply(seq, result));
        });
    };

    Effect::new(move |_| load());

    // A removal from this page means the list itself changed.
    let on_favorite_toggle = Callback::new(move |_: ()| load());

    let attractions = Signal::derive(move || state.with(|s| s.display_attractions()));
    let initial_loading = move || state.with(|s| s.loading && s.favorites.is_empty());
    let error = move || state.with(|s| s.error.clone());
    let count = move || state.with(|s| s.favorites.len());

    view! {
        <div class="pb-20">
            <Header title="Favorites" />
            {move || {
                if initial_loading() {
                    return view! { <Loading /> }.into_any();
                }
                if let Some(message) = error() {
                    return view! {
                        <div class="px-4 py-4">
                            <ErrorBanner>
                                <ErrorBannerText>{message}</ErrorBannerText>
                            </ErrorBanner>
                        </div>
                    }
                    .into_any();
                }
                if count() == 0 {
                    return view! {
                        <div class="flex flex-col items-center gap-2 px-4 py-12 text-center">
                            <span class="text-4xl">"💔"</span>
                            <p class="font-medium">"No favorites yet"</p>
                            <p class="text-sm text-[var(--tg-theme-hint-color)]">
                                "Tap the heart on an attraction to save it here."
                            </p>
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <p class="px-4 pt-3 text-sm text-[var(--tg-theme-hint-color)]">
                        {move || format!("Saved attractions: {}", count())}
                    </p>
                    <div class="pt-2">
                        <AttractionList
                            attractions=attractions
                            on_favorite_toggle=on_favorite_toggle
                        />
                    </div>
                }
                .into_any()
            }}
            <Navigation />
        </div>
    }
}
