//! Host commands
//!
//! These commands bridge the presentation layer to the shell core. The core
//! owns all state; every mutating command answers with the fresh view.

pub mod content;
pub mod input;
pub mod navigation;
pub mod tabs;

use neutron_core::ShellAction;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::state::AppState;
use tabs::{Changed, CommandResult};

/// Route a method call to its command.
pub fn dispatch(state: &AppState, method: &str, params: &Value) -> CommandResult<Value> {
    match method {
        "ping" => CommandResult::ok(json!("pong")),
        "view.get" => respond(CommandResult::ok(state.with_browser(|b| b.view()))),

        // Tabs
        "tabs.list" => respond(tabs::get_tabs(state)),
        "tabs.active" => respond(tabs::get_active_tab(state)),
        "tabs.create" => respond(tabs::create_tab(state)),
        "tabs.close" => with_params(params, |p| tabs::close_tab(state, p)),
        "tabs.select" => with_params(params, |p| tabs::select_tab(state, p)),
        "tabs.next" => respond(tabs::next_tab(state)),
        "tabs.previous" => respond(tabs::previous_tab(state)),

        // Navigation
        "nav.navigate" => with_params(params, |p| navigation::navigate(state, p)),
        "nav.back" => respond(navigation::go_back(state)),
        "nav.forward" => respond(navigation::go_forward(state)),
        "nav.reload" => respond(navigation::reload(state)),

        // Address bar
        "address.focus" => respond(navigation::focus_address_bar(state)),
        "address.blur" => respond(navigation::blur_address_bar(state)),
        "address.edit" => with_params(params, |p| navigation::edit_address(state, p)),
        "address.submit" => respond(navigation::submit_address(state)),

        // Content frame signals
        "content.load_start" => with_params(params, |p| content::load_start(state, p)),
        "content.load_end" => with_params(params, |p| content::load_end(state, p)),
        "content.load_error" => with_params(params, |p| content::load_error(state, p)),

        // Input
        "input.key" => with_params(params, |p| input::key_press(state, p)),
        "shell.apply" => with_params(params, |a| input::action(state, a)),
        "shortcuts.list" => respond(input::get_shortcuts(state)),

        // Formatting helpers
        "format.url" => with_params(params, |p| navigation::format_url(state, p)),
        "format.title" => with_params(params, navigation::format_title),

        _ => {
            tracing::warn!(method = %method, "Unknown method");
            CommandResult::err(format!("unknown method: {method}"))
        }
    }
}

/// Apply an action and report the resulting view
pub(crate) fn apply(state: &AppState, action: ShellAction) -> CommandResult<Changed> {
    let (changed, view) = state.with_browser(|browser| {
        let changed = browser.apply(action);
        (changed, browser.view())
    });
    CommandResult::ok(Changed { changed, view })
}

fn with_params<P, T, F>(params: &Value, f: F) -> CommandResult<Value>
where
    P: DeserializeOwned,
    T: Serialize,
    F: FnOnce(P) -> CommandResult<T>,
{
    match serde_json::from_value::<P>(params.clone()) {
        Ok(params) => respond(f(params)),
        Err(e) => CommandResult::err(format!("invalid params: {e}")),
    }
}

fn respond<T: Serialize>(result: CommandResult<T>) -> CommandResult<Value> {
    let CommandResult {
        success,
        data,
        error,
    } = result;

    match data.map(serde_json::to_value).transpose() {
        Ok(data) => CommandResult {
            success,
            data,
            error,
        },
        Err(e) => CommandResult::err(format!("serialization error: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neutron_core::{Config, NEW_TAB_URL};

    fn state() -> AppState {
        AppState::new(Config::default()).unwrap()
    }

    fn call(state: &AppState, method: &str, params: Value) -> Value {
        let result = dispatch(state, method, &params);
        assert!(result.success, "{method} failed: {:?}", result.error);
        result.data.unwrap_or(Value::Null)
    }

    #[test]
    fn test_ping() {
        assert_eq!(call(&state(), "ping", json!({})), json!("pong"));
    }

    #[test]
    fn test_tab_lifecycle() {
        let state = state();

        let created = call(&state, "tabs.create", json!({}));
        assert_eq!(created["changed"], true);
        assert_eq!(created["view"]["tabs"].as_array().unwrap().len(), 2);

        let first = created["view"]["tabs"][0]["id"].as_str().unwrap().to_string();
        let selected = call(&state, "tabs.select", json!({ "tab_id": first }));
        assert_eq!(selected["view"]["active_tab_id"], first.as_str());

        let closed = call(&state, "tabs.close", json!({}));
        assert_eq!(closed["view"]["tabs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_tab_is_not_an_error() {
        let state = state();
        let result = call(&state, "tabs.select", json!({ "tab_id": "gone" }));
        assert_eq!(result["changed"], false);

        let result = call(&state, "content.load_end", json!({ "tab_id": "gone", "generation": 3 }));
        assert_eq!(result["changed"], false);
    }

    #[test]
    fn test_navigate_and_signals() {
        let state = state();

        let navigated = call(&state, "nav.navigate", json!({ "input": "openai.com" }));
        let pane = &navigated["view"]["panes"][0];
        assert_eq!(pane["kind"], "frame");
        assert_eq!(pane["url"], "https://openai.com");
        assert_eq!(navigated["view"]["tabs"][0]["is_loading"], true);

        let tab_id = pane["tab_id"].as_str().unwrap().to_string();
        let generation = pane["generation"].as_u64().unwrap();
        let finished = call(
            &state,
            "content.load_end",
            json!({ "tab_id": tab_id, "generation": generation }),
        );
        assert_eq!(finished["changed"], true);
        assert_eq!(finished["view"]["tabs"][0]["is_loading"], false);

        let back = call(&state, "nav.back", json!({}));
        assert_eq!(back["view"]["tabs"][0]["url"], NEW_TAB_URL);
        assert_eq!(back["view"]["panes"][0]["kind"], "new_tab_page");
    }

    #[test]
    fn test_address_bar_flow() {
        let state = state();
        call(&state, "address.edit", json!({ "text": "hello world" }));
        let submitted = call(&state, "address.submit", json!({}));

        let text = submitted["view"]["address_bar"]["text"].as_str().unwrap();
        assert!(text.ends_with("hello%20world"));
        assert_eq!(submitted["view"]["address_bar"]["focused"], false);
    }

    #[test]
    fn test_key_press() {
        let state = state();
        let pressed = call(&state, "input.key", json!({ "key": "t", "ctrl": true }));
        assert_eq!(pressed["changed"], true);
        assert_eq!(pressed["view"]["tabs"].as_array().unwrap().len(), 2);

        let unbound = call(&state, "input.key", json!({ "key": "q" }));
        assert_eq!(unbound["changed"], false);
    }

    #[test]
    fn test_shell_apply() {
        let state = state();
        let applied = call(&state, "shell.apply", json!({ "type": "new_tab" }));
        assert_eq!(applied["changed"], true);
    }

    #[test]
    fn test_format_helpers() {
        let state = state();
        let resolved = call(&state, "format.url", json!({ "input": "netflix" }));
        assert_eq!(resolved, json!({ "kind": "navigate", "url": "https://www.netflix.com" }));

        let title = call(&state, "format.title", json!({ "url": "https://www.github.com" }));
        assert_eq!(title, json!("Github"));
    }

    #[test]
    fn test_errors() {
        let state = state();

        let unknown = dispatch(&state, "tabs.explode", &json!({}));
        assert!(!unknown.success);
        assert_eq!(unknown.error.as_deref(), Some("unknown method: tabs.explode"));

        let missing = dispatch(&state, "nav.navigate", &json!({}));
        assert!(!missing.success);
        assert!(missing.error.unwrap().starts_with("invalid params"));
    }
}
