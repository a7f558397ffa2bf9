//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use userdash_core::router::Route;
use userdash_core::store::{Action, AuthAction, UsersAction};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{dashboard, login};

/// Effects to run once before the first frame.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    app.restoring = true;
    vec![UiEffect::RestoreSession]
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Store(action) => {
            apply_action(app, action);
            vec![]
        }
        UiEvent::Navigate(route) => enter_route(app, route),
        UiEvent::RestoreFinished { notice } => {
            app.restoring = false;
            app.login.notice = notice;
            vec![]
        }
    }
}

fn apply_action(app: &mut AppState, action: Action) {
    let logged_out = matches!(action, Action::Auth(AuthAction::Logout));
    let logged_in = matches!(action, Action::Auth(AuthAction::LoginSuccess(_)));
    let loaded = matches!(action, Action::Users(UsersAction::FetchSuccess { .. }));

    app.store.reduce(action);

    if logged_in {
        app.login.clear_secret();
        app.login.notice = None;
    }
    if logged_out {
        app.login.on_logout();
    }
    if loaded {
        app.dashboard.clamp_page(app.store.users.users.len());
    }

    // Route guard: the dashboard is only reachable while authenticated.
    if app.route == Route::Dashboard && !app.store.auth.is_authenticated {
        app.route = Route::Login;
    }
}

fn enter_route(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    match route {
        Route::Dashboard if !app.store.auth.is_authenticated => {
            app.route = Route::Login;
            vec![]
        }
        Route::Dashboard => {
            app.route = Route::Dashboard;
            // The fetch flow decides whether the list actually needs loading.
            vec![UiEffect::FetchOnMount {
                limit: app.fetch_limit,
            }]
        }
        Route::Login => {
            app.route = Route::Login;
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Paste(text) if app.route == Route::Login && !app.restoring => {
            login::handle_paste(&mut app.login, &app.store.auth, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }
    if app.restoring {
        return vec![];
    }

    let (effects, actions) = match app.route {
        Route::Login => login::handle_key(&mut app.login, &app.store.auth, key),
        Route::Dashboard => dashboard::handle_key(
            &mut app.dashboard,
            &app.store.users,
            app.fetch_limit,
            key,
        ),
    };
    for action in actions {
        apply_action(app, action);
    }
    effects
}
