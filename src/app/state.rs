use chrono::{DateTime, Local, NaiveDate, Utc};
use eframe::App as EApp;
use egui::TextureHandle;
use std::sync::{Arc, Mutex};

use crate::api::{ApiClient, SearchError};
use crate::history::{self, ChartCell, TodayStats};
use crate::store::RepositoryStore;
use crate::types::{RepositoryBundle, RepositoryDetail, RepositorySummary};

/// Which screen the user is looking at.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Dashboard,
    /// Detail view for the repository addressed by its full name.
    Repository(String),
}

/// Main application state
#[derive(Clone)]
pub struct App {
    pub screen: Screen,
    pub api: ApiClient,
    pub store: RepositoryStore,
    /// Dashboard list, mirrored from the store
    pub repositories: Vec<RepositorySummary>,
    /// Search input field
    pub new_repo: String,
    pub input_error: Option<String>,
    pub is_searching: bool,
    /// Detail record of the currently open repository
    pub repository_data: Option<RepositoryDetail>,
    /// Headline stats when a snapshot exists for today
    pub issue_of_day: Option<TodayStats>,
    /// Whole-day age of the oldest open issue
    pub oldest_issue_age: Option<i64>,
    /// Prepared chart table (header row first)
    pub chart_data: Option<Vec<[ChartCell; 2]>>,
    pub is_loading_detail: bool,
    pub plot_path: String,
    pub plot_texture: Option<TextureHandle>,
    pub update_needed: bool,
}

impl App {
    /// Build the app over explicit collaborators. The dashboard list is
    /// loaded from the store once, up front.
    pub fn new(api: ApiClient, store: RepositoryStore) -> Self {
        let repositories = store.load();
        Self {
            screen: Screen::Dashboard,
            api,
            store,
            repositories,
            new_repo: String::new(),
            input_error: None,
            is_searching: false,
            repository_data: None,
            issue_of_day: None,
            oldest_issue_age: None,
            chart_data: None,
            is_loading_detail: false,
            plot_path: "issue_history.png".to_string(),
            plot_texture: None,
            update_needed: false,
        }
    }

    /// Apply the outcome of a dashboard search.
    ///
    /// On success the summary was already persisted by the search flow, so
    /// the list is extended in place and the input field is cleared. On
    /// failure the input is preserved and the error message shown.
    pub fn apply_search(&mut self, result: Result<RepositorySummary, SearchError>) {
        match result {
            Ok(summary) => {
                self.repositories.push(summary);
                self.new_repo.clear();
                self.input_error = None;
            }
            Err(e) => {
                self.input_error = Some(e.to_string());
            }
        }
    }

    /// Switch to the detail screen for `full_name`, dropping any state left
    /// over from a previous visit. The fetch itself is spawned by the UI.
    pub fn open_repository(&mut self, full_name: String) {
        self.screen = Screen::Repository(full_name);
        self.repository_data = None;
        self.issue_of_day = None;
        self.oldest_issue_age = None;
        self.chart_data = None;
        self.plot_texture = None;
        self.is_loading_detail = true;
    }

    pub fn back_to_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        self.is_loading_detail = false;
    }

    /// Feed a fetched bundle into the detail view, deriving the "today"
    /// stats and the chart table.
    pub fn update_with_bundle(&mut self, full_name: &str, bundle: RepositoryBundle) {
        self.update_with_bundle_at(full_name, bundle, Local::now().date_naive(), Utc::now());
    }

    /// Like [`update_with_bundle`](Self::update_with_bundle) with an
    /// explicit reference day and instant.
    ///
    /// A bundle that arrives after the user left the screen (or opened a
    /// different repository) is discarded.
    pub fn update_with_bundle_at(
        &mut self,
        full_name: &str,
        bundle: RepositoryBundle,
        today: NaiveDate,
        reference: DateTime<Utc>,
    ) {
        if self.screen != Screen::Repository(full_name.to_string()) {
            log::debug!("discarding stale detail response for {full_name}");
            return;
        }

        if let Some(snapshot) = history::find_today(&bundle.issue_data, today) {
            self.issue_of_day = Some(TodayStats::from_snapshot(snapshot));
            self.oldest_issue_age = Some(history::age_in_days(reference, snapshot.oldest_issue));
        }
        self.chart_data = Some(history::build_series(&bundle.issue_data));
        self.repository_data = Some(bundle.repository);
        self.is_loading_detail = false;
        self.update_needed = true;
    }

    /// Wipe all persisted state and reload the dashboard from empty.
    pub fn clear_cache(&mut self) {
        self.store.clear();
        self.repositories = self.store.load();
        self.input_error = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(ApiClient::default(), RepositoryStore::open_default())
    }
}

/// Thread-safe wrapper around App for use with eframe
pub struct AppWrapper {
    pub app: Arc<Mutex<App>>,
}

impl EApp for AppWrapper {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Ok(mut app) = self.app.lock() {
            super::ui::draw_ui(&mut app, ctx, Arc::clone(&self.app));
        } else {
            log::error!("failed to acquire app lock in update");
        }
    }
}
