use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {ErrorBanner, div, "w-full rounded-lg border border-red-500/40 bg-red-500/5 px-4 py-3 text-sm text-red-600"}
    clx! {ErrorBannerText, p, "text-sm leading-relaxed break-words"}
}

#[allow(unused_imports)]
pub use components::*;
