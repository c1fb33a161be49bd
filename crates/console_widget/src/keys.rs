//! Keyboard routing from DOM key names to controller actions.

use console_engine::ConsoleAction;

/// Maps a `KeyboardEvent.key` value to a controller action.
///
/// `Enter` always submits. While the suggestion popup is shown it captures the arrows, `Tab`,
/// and `Escape`; otherwise the arrows walk history.
pub fn route_key(key: &str, suggestions_visible: bool) -> Option<ConsoleAction> {
    if key == "Enter" {
        return Some(ConsoleAction::Submit);
    }
    if suggestions_visible {
        return match key {
            "ArrowDown" => Some(ConsoleAction::SuggestionNext),
            "ArrowUp" => Some(ConsoleAction::SuggestionPrevious),
            "Tab" => Some(ConsoleAction::AcceptSuggestion),
            "Escape" => Some(ConsoleAction::DismissSuggestions),
            _ => None,
        };
    }
    match key {
        "ArrowUp" => Some(ConsoleAction::HistoryOlder),
        "ArrowDown" => Some(ConsoleAction::HistoryNewer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_engine::ConsoleSession;

    fn press(session: &mut ConsoleSession, key: &str) {
        let visible = session.suggestions().is_visible();
        if let Some(action) = route_key(key, visible) {
            session.dispatch(action);
        }
    }

    #[test]
    fn popup_captures_navigation_keys() {
        assert_eq!(route_key("ArrowDown", true), Some(ConsoleAction::SuggestionNext));
        assert_eq!(route_key("ArrowUp", true), Some(ConsoleAction::SuggestionPrevious));
        assert_eq!(route_key("Enter", true), Some(ConsoleAction::Submit));
        assert_eq!(route_key("Tab", true), Some(ConsoleAction::AcceptSuggestion));
        assert_eq!(route_key("Escape", true), Some(ConsoleAction::DismissSuggestions));
    }

    #[test]
    fn hidden_popup_routes_history_and_submit() {
        assert_eq!(route_key("Enter", false), Some(ConsoleAction::Submit));
        assert_eq!(route_key("ArrowUp", false), Some(ConsoleAction::HistoryOlder));
        assert_eq!(route_key("ArrowDown", false), Some(ConsoleAction::HistoryNewer));
        assert_eq!(route_key("Tab", false), None);
        assert_eq!(route_key("a", true), None);
    }

    #[test]
    fn enter_submits_exact_navigable_command() {
        let mut session = ConsoleSession::new(Vec::new());
        session.set_input("help");
        assert!(session.suggestions().is_visible());

        press(&mut session, "Enter");
        let lines = session.transcript().lines();
        assert_eq!(lines[0], "> help");
        assert!(lines[1].starts_with("GENERAL HELP"));
        assert_eq!(session.input(), "");
    }

    #[test]
    fn tab_completes_then_enter_submits() {
        let mut session = ConsoleSession::new(Vec::new());
        session.set_input("cle");
        press(&mut session, "Tab");
        assert_eq!(session.input(), "clear ");

        session.set_input("help cl");
        press(&mut session, "Tab");
        press(&mut session, "Enter");
        let lines = session.transcript().lines();
        assert_eq!(lines[0], "> help clear");
        assert!(lines[1].starts_with("CLEAR"));
    }
}
