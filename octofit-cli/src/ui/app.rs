use crossterm::event::KeyCode;
use std::fmt;
use tokio::runtime::Handle;

use crate::api::{ApiClient, Resource};
use crate::models::{Activity, LeaderboardEntry, Team, Workout};
use crate::views::table::loading_message;
use crate::views::{build_table, DateStyle, DraftField, ResourceView, Table, Tabular, UsersView, ViewState};

/// Dashboard routes, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Users,
    Activities,
    Teams,
    Leaderboard,
    Workouts,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Users,
        Route::Activities,
        Route::Teams,
        Route::Leaderboard,
        Route::Workouts,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Users => "/users",
            Route::Activities => "/activities",
            Route::Teams => "/teams",
            Route::Leaderboard => "/leaderboard",
            Route::Workouts => "/workouts",
        }
    }

    /// Parse `/leaderboard`, `leaderboard` or `/leaderboard/`
    pub fn from_path(path: &str) -> Option<Self> {
        let wanted = path.trim().trim_matches('/').to_lowercase();
        Self::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches('/') == wanted)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Users => "👤 Users",
            Route::Activities => "🏃 Activities",
            Route::Teams => "👥 Teams",
            Route::Leaderboard => "🏆 Leaderboard",
            Route::Workouts => "💪 Workouts",
        }
    }

    pub fn resource(self) -> Resource {
        match self {
            Route::Users => Resource::Users,
            Route::Activities => Resource::Activities,
            Route::Teams => Resource::Teams,
            Route::Leaderboard => Resource::Leaderboard,
            Route::Workouts => Resource::Workouts,
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The view mounted for the current route
pub enum Screen {
    Users(UsersView),
    Activities(ResourceView<Activity>),
    Teams(ResourceView<Team>),
    Leaderboard(ResourceView<LeaderboardEntry>),
    Workouts(ResourceView<Workout>),
}

/// What the body of the dashboard should show this frame
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    Loading(String),
    Failed(String),
    Ready(Table),
}

fn screen_state<T: Tabular>(state: &ViewState<T>, dates: &DateStyle) -> ScreenState {
    match state {
        ViewState::Loading => ScreenState::Loading(loading_message(T::RESOURCE)),
        ViewState::Failed(message) => ScreenState::Failed(message.clone()),
        ViewState::Loaded(records) => ScreenState::Ready(build_table(records, dates)),
    }
}

impl Screen {
    /// Mount the view for `route`, starting its load
    pub fn mount(route: Route, client: ApiClient, runtime: &Handle) -> Self {
        let resource = route.resource();
        match route {
            Route::Users => Screen::Users(UsersView::mount(client, runtime)),
            Route::Activities => Screen::Activities(ResourceView::mount(resource, client, runtime)),
            Route::Teams => Screen::Teams(ResourceView::mount(resource, client, runtime)),
            Route::Leaderboard => {
                Screen::Leaderboard(ResourceView::mount(resource, client, runtime))
            }
            Route::Workouts => Screen::Workouts(ResourceView::mount(resource, client, runtime)),
        }
    }

    pub fn unmount(&self) {
        match self {
            Screen::Users(view) => view.unmount(),
            Screen::Activities(view) => view.unmount(),
            Screen::Teams(view) => view.unmount(),
            Screen::Leaderboard(view) => view.unmount(),
            Screen::Workouts(view) => view.unmount(),
        }
    }

    pub fn state(&self, dates: &DateStyle) -> ScreenState {
        match self {
            Screen::Users(view) => view.with_state(|s| screen_state(s, dates)),
            Screen::Activities(view) => view.with_state(|s| screen_state(s, dates)),
            Screen::Teams(view) => view.with_state(|s| screen_state(s, dates)),
            Screen::Leaderboard(view) => view.with_state(|s| screen_state(s, dates)),
            Screen::Workouts(view) => view.with_state(|s| screen_state(s, dates)),
        }
    }

    pub fn record_count(&self) -> usize {
        fn count<T>(state: &ViewState<T>) -> usize {
            state.records().map_or(0, <[T]>::len)
        }

        match self {
            Screen::Users(view) => view.with_state(count),
            Screen::Activities(view) => view.with_state(count),
            Screen::Teams(view) => view.with_state(count),
            Screen::Leaderboard(view) => view.with_state(count),
            Screen::Workouts(view) => view.with_state(count),
        }
    }

    pub fn users(&self) -> Option<&UsersView> {
        match self {
            Screen::Users(view) => Some(view),
            _ => None,
        }
    }
}

/// Application state for the TUI dashboard
pub struct App {
    /// Should the application quit?
    pub should_quit: bool,
    /// Current route
    pub route: Route,
    /// View mounted for the current route
    pub screen: Screen,
    /// Selected row in the current table
    pub selected_index: usize,
    /// Show help overlay
    pub show_help: bool,
    /// Focused field in the edit modal
    pub focus: DraftField,
    pub dates: DateStyle,
    client: ApiClient,
    runtime: Handle,
}

impl App {
    /// Create the app and mount the view for `route`
    pub fn new(client: ApiClient, runtime: Handle, route: Route, dates: DateStyle) -> Self {
        let screen = Screen::mount(route, client.clone(), &runtime);

        Self {
            should_quit: false,
            route,
            screen,
            selected_index: 0,
            show_help: false,
            focus: DraftField::Name,
            dates,
            client,
            runtime,
        }
    }

    pub fn api_base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Switch routes. The old view is unmounted so a late response cannot
    /// land on it; the new view fetches on mount.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }

        tracing::debug!("Navigating {} -> {}", self.route, route);
        self.remount(route);
    }

    /// Remount the current view, fetching it again
    pub fn refresh(&mut self) {
        self.remount(self.route);
    }

    fn remount(&mut self, route: Route) {
        self.screen.unmount();
        self.screen = Screen::mount(route, self.client.clone(), &self.runtime);
        self.route = route;
        self.selected_index = 0;
    }

    /// True while the users edit modal is showing
    pub fn editing(&self) -> bool {
        self.screen
            .users()
            .map_or(false, |view| view.with_edit(|flow| flow.is_open()))
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode) {
        // Help overlay takes precedence
        if self.show_help {
            if matches!(key, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        if self.editing() {
            self.handle_modal_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }

            KeyCode::Char('?') => {
                self.show_help = true;
            }

            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.refresh();
            }

            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.navigate(Route::ALL[index]);
            }

            KeyCode::Tab | KeyCode::Right => {
                self.navigate(self.route.next());
            }

            KeyCode::BackTab | KeyCode::Left => {
                self.navigate(self.route.prev());
            }

            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection_up();
            }

            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection_down();
            }

            KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
                self.open_editor();
            }

            _ => {}
        }
    }

    fn open_editor(&mut self) {
        if let Some(view) = self.screen.users() {
            if view.open_edit(self.selected_index) {
                self.focus = DraftField::Name;
            }
        }
    }

    fn handle_modal_key(&mut self, key: KeyCode) {
        let Some(view) = self.screen.users().cloned() else {
            return;
        };

        if view.with_edit(|flow| flow.is_saving()) {
            if key == KeyCode::Esc {
                view.with_edit(|flow| flow.cancel());
            }
            return;
        }

        match key {
            KeyCode::Esc => view.with_edit(|flow| flow.cancel()),

            KeyCode::Enter => view.spawn_save(self.client.clone(), &self.runtime),

            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),

            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Left | KeyCode::Right if self.focus == DraftField::Team => {
                let forward = key == KeyCode::Right;
                cycle_team(&view, forward);
            }

            KeyCode::Backspace => {
                let focus = self.focus;
                view.with_edit(|flow| {
                    if let Some(value) = flow.field_mut(focus) {
                        if focus == DraftField::Team {
                            value.clear();
                        } else {
                            value.pop();
                        }
                    }
                });
            }

            KeyCode::Char(c) if self.focus != DraftField::Team => {
                let focus = self.focus;
                view.with_edit(|flow| {
                    if let Some(value) = flow.field_mut(focus) {
                        value.push(c);
                    }
                });
            }

            _ => {}
        }
    }

    /// Move selection up within the table
    fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down within the table
    fn move_selection_down(&mut self) {
        let max_index = self.screen.record_count().saturating_sub(1);

        if self.selected_index < max_index {
            self.selected_index += 1;
        }
    }
}

/// Step the draft's team through "no team" and the fetched team names
fn cycle_team(view: &UsersView, forward: bool) {
    let choices = view.team_choices();
    view.with_edit(|flow| {
        if let Some(team) = flow.field_mut(DraftField::Team) {
            let len = choices.len();
            let next = match choices.iter().position(|c| c == team) {
                Some(i) if forward => (i + 1) % len,
                Some(i) => (i + len - 1) % len,
                None => 0,
            };
            *team = choices[next].clone();
        }
    });
}
