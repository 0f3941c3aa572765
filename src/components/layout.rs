use crate::components::ui::{Button, ButtonSize, ButtonVariant, Spinner};
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

#[component]
pub fn Header(
    #[prop(into)] title: Signal<String>,
    #[prop(optional)] show_back: bool,
) -> impl IntoView {
    let go_back = move |_| {
        if let Ok(history) = window().history() {
            let _ = history.back();
        }
    };

    view! {
        <header class="sticky top-0 z-10 border-b border-black/5 bg-[var(--tg-theme-bg-color)] px-4 py-3">
            <div class="flex items-center gap-3">
                <Show when=move || show_back fallback=|| ().into_view()>
                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=go_back>
                        "← Back"
                    </Button>
                </Show>
                <h1 class="truncate text-lg font-semibold">{move || title.get()}</h1>
            </div>
        </header>
    }
}

/// Bottom tab bar.
#[component]
pub fn Navigation() -> impl IntoView {
    let location = use_location();
    let tab_class = move |path: &'static str| {
        let base = "flex flex-1 flex-col items-center gap-0.5 py-2 text-xs";
        if location.pathname.get() == path {
            format!("{base} text-[var(--tg-theme-button-color)] font-medium")
        } else {
            format!("{base} text-[var(--tg-theme-hint-color)]")
        }
    };

    view! {
        <nav class="fixed inset-x-0 bottom-0 z-10 flex border-t border-black/5 bg-[var(--tg-theme-bg-color)]">
            <A href="/" attr:class=move || tab_class("/")>
                <span class="text-lg">"🏛️"</span>
                <span>"Home"</span>
            </A>
            <A href="/favorites" attr:class=move || tab_class("/favorites")>
                <span class="text-lg">"❤️"</span>
                <span>"Favorites"</span>
            </A>
        </nav>
    }
}

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex min-h-[40vh] items-center justify-center">
            <Spinner />
        </div>
    }
}
