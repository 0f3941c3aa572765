use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-[var(--tg-theme-bg-color)] text-[var(--tg-theme-text-color)] flex flex-col overflow-hidden rounded-xl border border-black/5 shadow-sm"}
    clx! {CardMedia, div, "relative aspect-[3/2] w-full overflow-hidden bg-[var(--tg-theme-secondary-bg-color)]"}
    clx! {CardContent, div, "flex flex-col gap-1.5 px-4 py-3"}
    clx! {CardTitle, h3, "text-base leading-tight font-semibold"}
    clx! {CardDescription, p, "text-[var(--tg-theme-hint-color)] text-sm"}
    clx! {CardList, div, "grid grid-cols-1 gap-4 px-4 sm:grid-cols-2"}
}

#[allow(unused_imports)]
pub use components::*;
