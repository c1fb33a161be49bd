//! Leptos console widget driving a [`ConsoleSession`] from DOM events.
//!
//! The component owns one session in a signal, routes key presses through [`route_key`], and
//! paints transcript lines as colored spans. Visual styling beyond the theme's colors and font
//! settings is left to the host stylesheet.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod keys;
pub mod theme;

use console_contract::{ColorSegment, ExecutionSummary};
use console_engine::{
    accept_candidate, CommandNode, ConsoleSession, DEFAULT_VISIBLE_SUGGESTIONS,
};
use leptos::ev::{self, KeyboardEvent};
use leptos::*;
use serde_json::Value;

pub use keys::route_key;
pub use theme::{
    default_theme, is_color_dark, merge_theme, preset_names, theme_preset, ConsoleTheme,
    SurfaceColorSet, ThemeError,
};

/// Resolves a theme payload: a preset name, a partial theme object, or nothing.
///
/// Unusable payloads fall back to the default theme with a warning.
pub fn theme_from_value(value: Option<Value>) -> ConsoleTheme {
    match value {
        None | Some(Value::Null) => merge_theme(None),
        Some(Value::String(name)) => match theme_preset(&name) {
            Some(preset) => preset,
            None => {
                logging::warn!("unknown console theme preset `{name}`; using default");
                merge_theme(None)
            }
        },
        Some(raw) => match serde_json::from_value::<ConsoleTheme>(raw) {
            Ok(partial) => merge_theme(Some(&partial)),
            Err(err) => {
                logging::warn!("console theme ignored: {err}");
                merge_theme(None)
            }
        },
    }
}

fn run_button_style(theme: &ConsoleTheme) -> String {
    let background = theme
        .background_palette()
        .secondary
        .unwrap_or_else(|| "#2F2F2F".to_string());
    let foreground = match is_color_dark(&background) {
        Ok(true) => "#FFFFFF",
        Ok(false) => "#000000",
        Err(err) => {
            logging::warn!("{err}; assuming a dark run button");
            "#FFFFFF"
        }
    };
    format!("background-color: {background}; color: {foreground};")
}

fn shell_style(theme: &ConsoleTheme) -> String {
    let background = theme.background_palette();
    let scroll = theme.scroll_palette();
    format!(
        "font-family: {}; font-size: {}; line-height: {}; background-color: {}; \
         scrollbar-color: {} {};",
        theme.font.as_deref().unwrap_or("monospace"),
        theme.font_size.as_deref().unwrap_or("14px"),
        theme.line_height.as_deref().unwrap_or("1.3"),
        background.primary.as_deref().unwrap_or("#171717"),
        scroll.primary.as_deref().unwrap_or("#73AD34"),
        scroll.secondary.as_deref().unwrap_or("#171717"),
    )
}

/// Embeddable console: transcript, suggestion popup, and input row.
#[component]
pub fn ConsoleLine(
    /// Caller commands, registered after the built-in `help` and `clear`.
    commands: Vec<CommandNode>,
    /// Theme payload: a preset name or a partial [`ConsoleTheme`] object.
    #[prop(optional)]
    theme: Option<Value>,
    /// Input placeholder text.
    #[prop(optional, into)]
    placeholder: Option<String>,
    /// Invoked after every submitted line.
    #[prop(optional, into)]
    on_execute: Option<Callback<ExecutionSummary>>,
) -> impl IntoView {
    let theme = theme_from_value(theme);
    let palette = theme.text_palette();
    let ghost_color = palette.secondary.clone().unwrap_or_else(|| "#5D60CB".to_string());
    let session = create_rw_signal(ConsoleSession::new(commands));
    let screen_ref = create_node_ref::<html::Div>();

    create_effect(move |_| {
        session.with(|session| session.transcript().len());
        if let Some(screen) = screen_ref.get() {
            let element: &web_sys::Element = &screen;
            element.set_scroll_top(element.scroll_height());
        }
    });

    let rendered_lines = move || {
        session.with(|session| {
            session
                .transcript()
                .lines()
                .iter()
                .cloned()
                .zip(session.render_transcript(&palette))
                .enumerate()
                .map(|(idx, (line, segments))| (idx, line, segments))
                .collect::<Vec<(usize, String, Vec<ColorSegment>)>>()
        })
    };

    let visible_candidates = move || {
        session.with(|session| {
            let suggestions = session.suggestions();
            let selected = suggestions.selected();
            suggestions
                .visible_window(DEFAULT_VISIBLE_SUGGESTIONS)
                .filter_map(|idx| {
                    suggestions
                        .candidates()
                        .get(idx)
                        .map(|candidate| (idx, candidate.clone(), idx == selected))
                })
                .collect::<Vec<_>>()
        })
    };

    let on_keydown = move |ev: KeyboardEvent| {
        let popup_open = session.with_untracked(|session| session.suggestions().is_visible());
        let Some(action) = route_key(&ev.key(), popup_open) else {
            return;
        };
        ev.prevent_default();
        let mut summary = None;
        session.update(|session| summary = session.dispatch(action));
        if let (Some(summary), Some(on_execute)) = (summary, on_execute) {
            on_execute.call(summary);
        }
    };

    let submit_on_click = move |_: ev::MouseEvent| {
        let mut summary = None;
        session.update(|session| summary = session.submit());
        if let (Some(summary), Some(on_execute)) = (summary, on_execute) {
            on_execute.call(summary);
        }
    };

    view! {
        <div class="console-shell" style=shell_style(&theme)>
            <div class="console-screen" role="log" aria-live="polite" node_ref=screen_ref>
                <For each=rendered_lines key=|(idx, line, _)| (*idx, line.clone()) let:entry>
                    <div class="console-line">
                        {entry
                            .2
                            .into_iter()
                            .map(|segment| {
                                view! {
                                    <span style=format!("color: {};", segment.color)>
                                        {segment.text}
                                    </span>
                                }
                            })
                            .collect_view()}
                    </div>
                </For>
            </div>

            <Show
                when=move || session.with(|session| session.suggestions().is_visible())
                fallback=|| ()
            >
                <div class="console-suggestions" role="listbox" aria-label="Suggestions">
                    <For
                        each=visible_candidates
                        key=|(idx, candidate, selected)| (*idx, candidate.clone(), *selected)
                        let:item
                    >
                        <button
                            type="button"
                            class="console-suggestion"
                            class:selected=item.2
                            role="option"
                            aria-selected=item.2.to_string()
                            on:click={
                                let candidate = item.1.clone();
                                move |_| {
                                    session.update(|session| {
                                        if let Ok(next) = accept_candidate(session.input(), &candidate) {
                                            session.set_input(next);
                                        }
                                    })
                                }
                            }
                        >
                            {item.1}
                        </button>
                    </For>
                </div>
            </Show>

            <div class="console-input-row">
                <span class="console-prompt">">"</span>
                <div class="console-input-wrap">
                    <span class="console-ghost" aria-hidden="true">
                        <span class="console-ghost-typed">
                            {move || session.with(|session| session.input().to_string())}
                        </span>
                        <span style=format!("color: {ghost_color}; opacity: 0.6;")>
                            {move || {
                                session
                                    .with(|session| session.suggestion_snapshot().ghost_text)
                                    .unwrap_or_default()
                            }}
                        </span>
                    </span>
                    <input
                        class="console-input"
                        type="text"
                        prop:value=move || session.with(|session| session.input().to_string())
                        on:input=move |ev| {
                            session.update(|session| session.set_input(event_target_value(&ev)))
                        }
                        on:keydown=on_keydown
                        placeholder=placeholder.unwrap_or_else(|| "Type help to get started".to_string())
                        autocomplete="off"
                        spellcheck="false"
                    />
                </div>
                <button
                    type="button"
                    class="console-run"
                    style=run_button_style(&theme)
                    on:click=submit_on_click
                >
                    "Run"
                </button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn theme_payload_accepts_preset_names_and_partials() {
        let preset = theme_from_value(Some(Value::String("cyberpunk".to_string())));
        assert_eq!(preset.font_size.as_deref(), Some("16px"));

        let partial = theme_from_value(Some(serde_json::json!({ "fontSize": "20px" })));
        assert_eq!(partial.font_size.as_deref(), Some("20px"));
        assert_eq!(partial.name.as_deref(), Some("darkMode"));

        assert_eq!(theme_from_value(None), default_theme());
    }

    #[test]
    fn run_button_contrasts_with_background() {
        let light = theme_preset("lightMode").expect("preset");
        assert!(run_button_style(&light).ends_with("color: #000000;"));
        assert!(run_button_style(&default_theme()).ends_with("color: #FFFFFF;"));
    }
}
