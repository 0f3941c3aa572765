use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardList, CardMedia,
    CardTitle,
};
use crate::models::{Attraction, AttractionId};
use crate::state::favorites::{record_toggle, toggle_favorite};
use crate::state::AppContext;
use crate::util::{fallback_image, format_rating, photo_or, CARD_PLACEHOLDER};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// One attraction tile. Clicking opens the detail page; the heart toggles the favorite.
#[component]
pub(crate) fn AttractionCard(
    attraction: Attraction,
    /// Runs after a successful toggle.
    on_favorite_toggle: Callback<()>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let favorites = app_state.0.favorites;
    let api = StoredValue::new(app_state.0.api_client.clone());
    let navigate = StoredValue::new(use_navigate());

    let id = attraction.id;
    let is_favorite = move || favorites.with(|f| f.contains(id));
    let busy: RwSignal<bool> = RwSignal::new(false);

    let open_detail = move |_| {
        navigate.with_value(|nav| nav(&format!("/attractions/{id}"), Default::default()));
    };

    let on_heart = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        if busy.get_untracked() {
            return;
        }
        busy.set(true);

        let current = favorites.with_untracked(|f| f.contains(id));
        let api = api.get_value();
        spawn_local(async move {
            let outcome = toggle_favorite(&api, id, current).await;
            let changed = favorites
                .try_update(|f| record_toggle(f, id, outcome))
                .unwrap_or(false);
            // The card may already be gone if the parent re-fetched.
            let _ = busy.try_set(false);
            if changed {
                on_favorite_toggle.run(());
            }
        });
    };

    let photo = photo_or(attraction.photo_url.as_deref(), CARD_PLACEHOLDER).to_string();
    let name = attraction.name.clone();
    let alt = attraction.name.clone();
    let category = attraction.category.clone().filter(|c| !c.trim().is_empty());
    let address = attraction.address.clone().filter(|a| !a.trim().is_empty());
    let rating = format_rating(attraction.rating);

    view! {
        <Card class="cursor-pointer" on:click=open_detail>
            <CardMedia>
                <img
                    src=photo
                    alt=alt
                    class="h-full w-full object-cover"
                    on:error=move |ev| fallback_image(&ev, CARD_PLACEHOLDER)
                />
                <Button
                    variant=ButtonVariant::Favorite
                    size=ButtonSize::Icon
                    class="absolute right-2 top-2"
                    attr:disabled=move || busy.get()
                    attr:aria-pressed=move || is_favorite().to_string()
                    on:click=on_heart
                >
                    {move || if is_favorite() { "❤️" } else { "🤍" }}
                </Button>
            </CardMedia>
            <CardContent>
                <CardTitle>{name}</CardTitle>
                {category.map(|c| view! {
                    <span class="w-fit rounded-full bg-[var(--tg-theme-secondary-bg-color)] px-2 py-0.5 text-xs">
                        {c}
                    </span>
                })}
                <div class="text-sm">"⭐ " {rating}</div>
                {address.map(|a| view! { <CardDescription>"📍 " {a}</CardDescription> })}
            </CardContent>
        </Card>
    }
}

/// Pages are appended without de-duplication, so the same id can show up twice.
/// Position keeps every row distinct.
fn keyed_rows(items: Vec<Attraction>) -> Vec<((usize, AttractionId), Attraction)> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, a)| ((i, a.id), a))
        .collect()
}

#[component]
pub(crate) fn AttractionList(
    #[prop(into)] attractions: Signal<Vec<Attraction>>,
    on_favorite_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <Show
            when=move || attractions.with(|a| !a.is_empty())
            fallback=|| view! {
                <div class="px-4 py-10 text-center text-sm text-[var(--tg-theme-hint-color)]">
                    "No attractions found"
                </div>
            }
        >
            <CardList>
                <For
                    each=move || keyed_rows(attractions.get())
                    key=|(key, _)| *key
                    children=move |(_, a)| view! {
                        <AttractionCard attraction=a on_favorite_toggle=on_favorite_toggle />
                    }
                />
            </CardList>
        </Show>
    }
}
