use crate::api::CatalogApi;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorBanner, ErrorBannerText};
use crate::components::{AttractionList, Header, Loading, Navigation};
use crate::models::CityId;
use crate::state::home::{bootstrap, FetchTicket, HomePhase, HomeState};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let favorites = app_state.0.favorites;
    let api = StoredValue::new(app_state.0.api_client.clone());

    let state: RwSignal<HomeState> = RwSignal::new(HomeState::new());
    let phase = Memo::new(move |_| state.with(|s| s.phase()));

    // Every attraction fetch goes through here; stale tickets are dropped by `apply_page`.
    let run_fetch = move |ticket: Option<FetchTicket>| {
        let Some(ticket) = ticket else {
            return;
        };
        let api = api.get_value();
        spawn_local(async move {
            let result = api.list_attractions(&ticket.query).await;
            if let Ok(list) = &result {
                if state.with_untracked(|s| s.is_current(&ticket)) {
                    favorites.update(|f| f.absorb(&list.items));
                }
            }
            let _ = state.try_update(|s| s.apply_page(&ticket, result));
        });
    };

    // Bootstrap once on mount: handshake, cities, first page.
    let app = StoredValue::new(app_state.0.clone());
    Effect::new(move |_| {
        let app = app.get_value();
        spawn_local(async move {
            let already_authenticated = app.auth.get_untracked().is_authenticated();
            let outcome = bootstrap(
                &app.api_client,
                app.api_client.tokens(),
                app.host.init_data.as_deref(),
                already_authenticated,
            )
            .await;

            match outcome {
                Ok(boot) => {
                    if let Some(auth) = boot.auth {
                        app.complete_handshake(auth);
                    }
                    let ticket = state
                        .try_update(|s| s.bootstrap_succeeded(boot.cities))
                        .flatten();
                    run_fetch(ticket);
                }
                Err(e) => {
                    let _ = state.try_update(|s| s.bootstrap_failed(&e));
                }
            }
        });
    });

    let on_city = move |id: CityId| {
        let ticket = state.try_update(|s| s.select_city(id)).flatten();
        run_fetch(ticket);
    };

    let on_load_more = move |_: web_sys::MouseEvent| {
        let ticket = state.try_update(|s| s.load_more()).flatten();
        run_fetch(ticket);
    };

    let on_favorite_toggle = Callback::new(move |_: ()| {
        let ticket = state.try_update(|s| s.favorite_toggled()).flatten();
        run_fetch(ticket);
    });

    let attractions = Signal::derive(move || state.with(|s| s.attractions.clone()));
    let cities = move || state.with(|s| s.cities.clone());
    let selected = move || state.with(|s| s.selected_city);
    let show_selector = move || state.with(|s| s.shows_city_selector());
    let can_load_more = move || state.with(|s| s.can_load_more());
    let loading_more = move || state.with(|s| s.loading && !s.attractions.is_empty());

    let title = move || {
        state.with(|s| match s.selected() {
            Some(city) => format!("Attractions · {}", city.name),
            None => "Attractions".to_string(),
        })
    };

    let greeting = app_state
        .0
        .host
        .user
        .as_ref()
        .map(|u| format!("Hi, {}!", u.display_name()));

    view! {
        <div class="pb-20">
            {move || match phase.get() {
                HomePhase::Loading => view! { <Loading /> }.into_any(),
                HomePhase::Failed(message) => view! {
                    <Header title="Error" />
                    <div class="flex flex-col items-center gap-4 px-4 py-8 text-center">
                        <ErrorBanner>
                            <ErrorBannerText>{message}</ErrorBannerText>
                        </ErrorBanner>
                        <Button on:click=move |_| {
                            let _ = window().location().reload();
                        }>
                            "Reload"
                        </Button>
                        <a href="/test" class="text-sm text-[var(--tg-theme-link-color)]">
                            "Open diagnostic page"
                        </a>
                    </div>
                }
                .into_any(),
                HomePhase::Ready => view! {
                    <Header title=Signal::derive(title) />
                    {greeting.clone().map(|g| view! {
                        <p class="px-4 pt-3 text-sm text-[var(--tg-theme-hint-color)]">{g}</p>
                    })}

                    <Show when=show_selector fallback=|| ().into_view()>
                        <div class="flex gap-2 overflow-x-auto px-4 py-3">
                            {move || {
                                let current = selected();
                                cities()
                                    .into_iter()
                                    .map(|c| {
                                        let id = c.id;
                                        let variant = if current == Some(id) {
                                            ButtonVariant::Default
                                        } else {
                                            ButtonVariant::Secondary
                                        };
                                        view! {
                                            <Button
                                                variant=variant
                                                size=ButtonSize::Pill
                                                attr:aria-pressed=(current == Some(id)).to_string()
                                                on:click=move |_| on_city(id)
                                            >
                                                {c.name}
                                            </Button>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>

                    <div class="pt-2">
                        <AttractionList
                            attractions=attractions
                            on_favorite_toggle=on_favorite_toggle
                        />
                    </div>

                    <Show when=can_load_more fallback=|| ().into_view()>
                        <div class="flex justify-center px-4 py-4">
                            <Button variant=ButtonVariant::Outline on:click=on_load_more>
                                "Load more"
                            </Button>
                        </div>
                    </Show>

                    <Show when=loading_more fallback=|| ().into_view()>
                        <Loading />
                    </Show>
                }
                .into_any(),
            }}
            <Navigation />
        </div>
    }
}
