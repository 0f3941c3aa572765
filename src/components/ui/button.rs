use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap rounded-lg text-sm font-medium transition-all disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg]:shrink-0 outline-none hover:cursor-pointer active:scale-[0.98] touch-manipulation [-webkit-tap-highlight-color:transparent] select-none", // Using hover:cursor-pointer as workaround for href_support.
        variants: {
            variant: {
                Default: "bg-[var(--tg-theme-button-color)] text-[var(--tg-theme-button-text-color)] shadow-xs hover:opacity-90",
                Outline: "border border-[var(--tg-theme-button-color)] text-[var(--tg-theme-button-color)] bg-transparent",
                Secondary: "bg-[var(--tg-theme-secondary-bg-color)] text-[var(--tg-theme-text-color)]",
                Ghost: "bg-transparent text-[var(--tg-theme-link-color)]",
                Favorite: "rounded-full bg-white/90 shadow-md",
            },
            size: {
                Default: "h-10 px-4 py-2",
                Sm: "h-8 px-3 gap-1.5",
                Pill: "h-8 rounded-full px-4",
                Icon: "size-9 text-lg",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
