use crate::api::CatalogApi;
use crate::components::ui::{Button, ButtonVariant, ErrorBanner, ErrorBannerText};
use crate::components::{Header, Loading, Navigation};
use crate::state::detail::{load_attraction, DetailState};
use crate::state::favorites::{record_toggle, toggle_favorite};
use crate::state::AppContext;
use crate::util::{fallback_image, format_rating, photo_or, DETAIL_PLACEHOLDER};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct AttractionRouteParams {
    pub id: Option<String>,
}

#[component]
pub fn AttractionDetailPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let favorites = app_state.0.favorites;
    let api = StoredValue::new(app_state.0.api_client.clone());
    let params = leptos_router::hooks::use_params::<AttractionRouteParams>();

    let raw_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();

    let detail: RwSignal<DetailState> = RwSignal::new(DetailState::Loading);
    let city_name: RwSignal<Option<String>> = RwSignal::new(None);
    let toggling: RwSignal<bool> = RwSignal::new(false);

    // Latest route wins; older responses are ignored.
    let request_id: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        let raw = raw_id();
        let my_id = request_id.get_untracked().saturating_add(1);
        request_id.set(my_id);
        detail.set(DetailState::Loading);
        city_name.set(None);

        let api = api.get_value();
        spawn_local(async move {
            let state = load_attraction(&api, &raw).await;
            if request_id.try_get_untracked() != Some(my_id) {
                return;
            }

            let city_id = state.attraction().map(|a| a.city_id);
            if let Some(a) = state.attraction() {
                favorites.update(|f| f.absorb(std::slice::from_ref(a)));
            }
            detail.set(state);

            // The city name is decoration; a failure just leaves it out.
            if let Some(city_id) = city_id {
                match api.get_city(city_id).await {
                    Ok(city) if request_id.try_get_untracked() == Some(my_id) => {
                        let _ = city_name.try_set(Some(city.name));
                    }
                    Ok(_) => {}
                    Err(e) => log::debug!("city {city_id} lookup failed: {e}"),
                }
            }
        });
    });

    let on_toggle = move |_: web_sys::MouseEvent| {
        if toggling.get_untracked() {
            return;
        }
        let Some(id) = detail.with_untracked(|d| d.attraction().map(|a| a.id)) else {
            return;
        };
        toggling.set(true);

        let current = favorites.with_untracked(|f| f.contains(id));
        let api = api.get_value();
        spawn_local(async move {
            let outcome = toggle_favorite(&api, id, current).await;
            let _ = favorites.try_update(|f| record_toggle(f, id, outcome));
            let _ = toggling.try_set(false);
        });
    };

    let title = move || {
        detail.with(|d| match d {
            DetailState::Loaded(a) => a.name.clone(),
            DetailState::NotFound => "Not found".to_string(),
            DetailState::Failed(_) => "Error".to_string(),
            DetailState::Loading => "Attraction".to_string(),
        })
    };

    view! {
        <div class="pb-20">
            <Header title=Signal::derive(title) show_back=true />
            {move || match detail.get() {
                DetailState::Loading => view! { <Loading /> }.into_any(),
                DetailState::NotFound => view! {
                    <div class="px-4 py-10 text-center text-sm text-[var(--tg-theme-hint-color)]">
                        "Attraction not found"
                    </div>
                }
                .into_any(),
                DetailState::Failed(message) => view! {
                    <div class="px-4 py-6">
                        <ErrorBanner>
                            <ErrorBannerText>{message}</ErrorBannerText>
                        </ErrorBanner>
                    </div>
                }
                .into_any(),
                DetailState::Loaded(loaded) => {
                    let a = loaded;
                    let photo = photo_or(a.photo_url.as_deref(), DETAIL_PLACEHOLDER).to_string();
                    let category = a.category.clone().filter(|c| !c.trim().is_empty());
                    let address = a.address.clone().filter(|s| !s.trim().is_empty());
                    let description = a.description.clone().filter(|s| !s.trim().is_empty());
                    let rating = format!("{} / 5.0", format_rating(a.rating));
                    let id = a.id;
                    let is_favorite = move || favorites.with(|f| f.contains(id));

                    view! {
                        <div class="relative h-64 w-full overflow-hidden bg-[var(--tg-theme-secondary-bg-color)]">
                            <img
                                src=photo
                                alt=a.name.clone()
                                class="h-full w-full object-cover"
                                on:error=move |ev| fallback_image(&ev, DETAIL_PLACEHOLDER)
                            />
                        </div>
                        <div class="flex flex-col gap-3 px-4 py-4">
                            <h2 class="text-xl font-semibold">{a.name.clone()}</h2>
                            {move || city_name.get().map(|c| view! {
                                <p class="text-sm text-[var(--tg-theme-hint-color)]">"🏙 " {c}</p>
                            })}
                            {category.map(|c| view! {
                                <span class="w-fit rounded-full bg-[var(--tg-theme-secondary-bg-color)] px-2 py-0.5 text-xs">
                                    {c}
                                </span>
                            })}
                            <div class="text-sm">"⭐ " {rating}</div>
                            {address.map(|s| view! {
                                <p class="text-sm text-[var(--tg-theme-hint-color)]">"📍 " {s}</p>
                            })}
                            {description.map(|s| view! {
                                <p class="whitespace-pre-line text-sm leading-relaxed">{s}</p>
                            })}
                            <Button
                                variant=ButtonVariant::Default
                                class="w-full"
                                attr:disabled=move || toggling.get()
                                on:click=on_toggle
                            >
                                {move || {
                                    if is_favorite() {
                                        "❤️ Remove from favorites"
                                    } else {
                                        "🤍 Add to favorites"
                                    }
                                }}
                            </Button>
                        </div>
                    }
                    .into_any()
                }
            }}
            <Navigation />
        </div>
    }
}
