mod detail;
mod diagnostics;
mod favorites;
mod home;

pub use detail::AttractionDetailPage;
pub use diagnostics::DiagnosticsPage;
pub use favorites::FavoritesPage;
pub use home::HomePage;

use crate::components::{Header, Navigation};
use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="pb-16">
            <Header title="Not found" show_back=true />
            <div class="px-4 py-8 text-center text-sm text-[var(--tg-theme-hint-color)]">
                "Nothing lives at this address."
            </div>
            <Navigation />
        </div>
    }
}
