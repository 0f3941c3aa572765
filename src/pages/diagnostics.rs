use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent};
use crate::components::{Header, Navigation};
use crate::state::diagnostics::{DiagnosticLog, Probe};
use crate::state::AppContext;
use crate::util::clock_label;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn mask_token(token: &str) -> String {
    let len = token.chars().count();
    let tail: String = token.chars().skip(len.saturating_sub(4)).collect();
    format!("token …{tail}")
}

/// Talks to the backend directly and echoes what came back.
#[component]
pub fn DiagnosticsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api = StoredValue::new(app_state.0.api_client.clone());
    let auth = app_state.0.auth;

    let api_url = app_state.0.config.api_url.clone();
    let embedded = app_state.0.host.is_embedded();

    let log: RwSignal<DiagnosticLog> = RwSignal::new(DiagnosticLog::default());
    let busy: RwSignal<bool> = RwSignal::new(false);

    let run_probe = move |probe: Probe| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        log.update(|l| l.push(&clock_label(), probe.announcement()));

        let api = api.get_value();
        spawn_local(async move {
            let lines = probe.run(&api).await;
            let _ = log.try_update(|l| l.extend(&clock_label(), lines));
            let _ = busy.try_set(false);
        });
    };

    let has_token = move || api.with_value(|a| a.is_authenticated());
    let signed_in_as = move || {
        auth.with(|a| match (a.user(), a.token()) {
            (Some(u), Some(token)) => format!("user #{} ({})", u.id, mask_token(token)),
            (None, Some(token)) => format!("signed in ({})", mask_token(token)),
            _ => "not signed in".to_string(),
        })
    };

    view! {
        <div class="pb-20">
            <Header title="API diagnostics" show_back=true />
            <div class="flex flex-col gap-4 px-4 py-4">
                <Card>
                    <CardContent>
                        <div class="text-sm">
                            <span class="text-[var(--tg-theme-hint-color)]">"API URL: "</span>
                            <code class="break-all">{api_url}</code>
                        </div>
                        <div class="text-sm">
                            <span class="text-[var(--tg-theme-hint-color)]">"Inside Telegram: "</span>
                            {if embedded { "yes" } else { "no" }}
                        </div>
                        <div class="text-sm">
                            <span class="text-[var(--tg-theme-hint-color)]">"Token stored: "</span>
                            {move || if has_token() { "yes" } else { "no" }}
                        </div>
                        <div class="text-sm">
                            <span class="text-[var(--tg-theme-hint-color)]">"Session: "</span>
                            {signed_in_as}
                        </div>
                    </CardContent>
                </Card>

                <div class="grid grid-cols-2 gap-2">
                    {[Probe::Cities, Probe::Attractions, Probe::Direct]
                        .into_iter()
                        .map(|probe| view! {
                            <Button
                                size=ButtonSize::Sm
                                attr:disabled=move || busy.get()
                                on:click=move |_| run_probe(probe)
                            >
                                {probe.label()}
                            </Button>
                        })
                        .collect_view()}
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || busy.get()
                        on:click=move |_| log.update(|l| l.clear())
                    >
                        "Clear"
                    </Button>
                </div>

                <pre class="min-h-[8rem] overflow-x-auto whitespace-pre-wrap rounded-lg bg-[var(--tg-theme-secondary-bg-color)] p-3 text-xs">
                    {move || {
                        log.with(|l| {
                            if l.is_empty() {
                                "Results will appear here.".to_string()
                            } else {
                                l.lines().join("\n")
                            }
                        })
                    }}
                </pre>
            </div>
            <Navigation />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_token_keeps_last_four() {
        assert_eq!(mask_token("eyJhbGciOi.abcd1234"), "token …1234");
        assert_eq!(mask_token("ab"), "token …ab");
    }
}
