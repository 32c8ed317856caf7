// Dashboard application state.
//
// Holds the loaded dataset, the current season/team selection, and the
// `DashboardView` computed from them. Every selection change rebuilds the
// view from scratch.

use std::collections::BTreeSet;
use std::sync::Arc;

use placar_core::dataset::Dataset;
use placar_core::filter::{self, Selection};
use placar_core::view::DashboardView;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Main panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabId {
    Winners,
    WinRates,
    Goals,
    Trend,
    Matches,
}

impl TabId {
    pub const ALL: [TabId; 5] = [
        TabId::Winners,
        TabId::WinRates,
        TabId::Goals,
        TabId::Trend,
        TabId::Matches,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TabId::Winners => "Winners",
            TabId::WinRates => "Win rate",
            TabId::Goals => "Goals",
            TabId::Trend => "Trend",
            TabId::Matches => "Matches",
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    dataset: Arc<Dataset>,
    seasons: Vec<u16>,
    teams: Vec<String>,
    season_idx: Option<usize>,
    team_idx: Option<usize>,
    top_n: usize,
    /// Panels for the current selection.
    pub view: DashboardView,
    pub active_tab: TabId,
    /// Row offset for the scrollable tables.
    pub scroll: usize,
    /// Table rows that fit in the main panel; 0 until the first draw.
    visible_rows: usize,
    /// One-line notice shown in the status bar (load warnings, reload errors).
    pub message: Option<String>,
}

impl App {
    /// Build the app with `initial` as the starting selection.
    ///
    /// An unknown initial season falls back to the latest season; an unknown
    /// initial team falls back to all teams.
    pub fn new(dataset: Arc<Dataset>, top_n: usize, initial: &Selection) -> Self {
        let seasons = filter::seasons(dataset.records());
        let teams = filter::teams(dataset.records());

        let season_idx = match initial.season {
            Some(season) => seasons.iter().position(|s| *s == season).or_else(|| {
                warn!("initial season {} not in dataset, using latest", season);
                seasons.len().checked_sub(1)
            }),
            None => seasons.len().checked_sub(1),
        };
        let team_idx = initial.team.as_deref().and_then(|team| {
            let idx = teams.iter().position(|t| t == team);
            if idx.is_none() {
                warn!("initial team '{}' not in dataset, showing all teams", team);
            }
            idx
        });

        let message = summarize_warnings(&dataset);
        let mut app = App {
            view: DashboardView::build(&[], &Selection::all(), top_n),
            dataset,
            seasons,
            teams,
            season_idx,
            team_idx,
            top_n,
            active_tab: TabId::Winners,
            scroll: 0,
            visible_rows: 0,
            message,
        };
        app.refresh();
        app
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn seasons(&self) -> &[u16] {
        &self.seasons
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn season(&self) -> Option<u16> {
        self.season_idx.map(|i| self.seasons[i])
    }

    pub fn team(&self) -> Option<&str> {
        self.team_idx.map(|i| self.teams[i].as_str())
    }

    pub fn selection(&self) -> Selection {
        Selection {
            season: self.season(),
            team: self.team().map(str::to_string),
        }
    }

    // -- selection changes --

    pub fn next_season(&mut self) {
        if self.seasons.is_empty() {
            return;
        }
        self.season_idx = Some(match self.season_idx {
            Some(i) => (i + 1) % self.seasons.len(),
            None => 0,
        });
        self.refresh();
    }

    pub fn prev_season(&mut self) {
        if self.seasons.is_empty() {
            return;
        }
        let last = self.seasons.len() - 1;
        self.season_idx = Some(match self.season_idx {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
        self.refresh();
    }

    /// Cycle: all teams -> first -> ... -> last -> all teams.
    pub fn next_team(&mut self) {
        if self.teams.is_empty() {
            return;
        }
        self.team_idx = match self.team_idx {
            None => Some(0),
            Some(i) if i + 1 < self.teams.len() => Some(i + 1),
            Some(_) => None,
        };
        self.refresh();
    }

    pub fn prev_team(&mut self) {
        if self.teams.is_empty() {
            return;
        }
        self.team_idx = match self.team_idx {
            None => Some(self.teams.len() - 1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
        self.refresh();
    }

    pub fn clear_team(&mut self) {
        if self.team_idx.take().is_some() {
            self.refresh();
        }
    }

    /// Swap in a freshly loaded dataset, keeping the selection where possible.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        let selection = self.selection();
        let active_tab = self.active_tab;
        let visible_rows = self.visible_rows;
        *self = App::new(dataset, self.top_n, &selection);
        self.active_tab = active_tab;
        self.visible_rows = visible_rows;
    }

    // -- navigation --

    pub fn set_tab(&mut self, tab: TabId) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.scroll = 0;
        }
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    /// Record how many table rows the main panel shows, re-clamping the offset.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Rows in the active tab's table; 0 for the chart tabs.
    pub fn table_len(&self) -> usize {
        match self.active_tab {
            TabId::WinRates => self.view.win_rates.len(),
            TabId::Trend => self
                .view
                .season_wins
                .iter()
                .map(|s| s.team.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            TabId::Matches => self.view.matches.len(),
            TabId::Winners | TabId::Goals => 0,
        }
    }

    /// Largest offset that still leaves the last page full.
    fn max_scroll(&self) -> usize {
        self.table_len().saturating_sub(self.visible_rows)
    }

    fn refresh(&mut self) {
        let selection = self.selection();
        self.view = DashboardView::build(self.dataset.records(), &selection, self.top_n);
        self.scroll = 0;
        info!(
            "Selection season={:?} team={:?}: {} matches",
            selection.season,
            selection.team,
            self.view.matches.len()
        );
    }
}

fn summarize_warnings(dataset: &Dataset) -> Option<String> {
    let warnings: Vec<String> = dataset.warnings().iter().map(|w| w.to_string()).collect();
    if warnings.is_empty() {
        None
    } else {
        Some(warnings.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use placar_core::dataset::{self, LoadOptions, MatchRecord};

    pub(crate) fn sample_dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_records(vec![
            MatchRecord::new(2019, "Flamengo", "Santos", 2, 1),
            MatchRecord::new(2019, "Santos", "Gremio", 0, 0),
            MatchRecord::new(2020, "Gremio", "Flamengo", 1, 3),
            MatchRecord::new(2021, "Flamengo", "Gremio", 0, 1),
        ]))
    }

    pub(crate) fn sample_app() -> App {
        App::new(sample_dataset(), 10, &Selection::all())
    }

    /// One season with 40 matches, for scrolling.
    pub(crate) fn long_app() -> App {
        let records = (0..40u32)
            .map(|i| {
                let home = format!("Team {:02}", i % 8);
                let away = format!("Team {:02}", (i + 1) % 8);
                MatchRecord::new(2021, &home, &away, i % 3, i % 2)
            })
            .collect();
        App::new(Arc::new(Dataset::from_records(records)), 10, &Selection::all())
    }

    #[test]
    fn starts_on_latest_season_all_teams() {
        let app = sample_app();
        assert_eq!(app.seasons(), &[2019, 2020, 2021]);
        assert_eq!(app.season(), Some(2021));
        assert_eq!(app.team(), None);
        assert_eq!(app.view.matches.len(), 1);
        assert_eq!(app.active_tab, TabId::Winners);
        assert!(app.message.is_none());
    }

    #[test]
    fn honors_initial_selection() {
        let initial = Selection::all().with_season(2019).with_team("Santos");
        let app = App::new(sample_dataset(), 10, &initial);
        assert_eq!(app.season(), Some(2019));
        assert_eq!(app.team(), Some("Santos"));
        assert_eq!(app.view.matches.len(), 2);
    }

    #[test]
    fn unknown_initial_values_fall_back() {
        let initial = Selection::all().with_season(1999).with_team("Nobody");
        let app = App::new(sample_dataset(), 10, &initial);
        assert_eq!(app.season(), Some(2021));
        assert_eq!(app.team(), None);
    }

    #[test]
    fn season_cycles_both_ways() {
        let mut app = sample_app();
        app.next_season();
        assert_eq!(app.season(), Some(2019));
        app.prev_season();
        assert_eq!(app.season(), Some(2021));
        app.prev_season();
        assert_eq!(app.season(), Some(2020));
        assert_eq!(app.view.selection.season, Some(2020));
    }

    #[test]
    fn team_cycle_passes_through_all() {
        let mut app = sample_app();
        assert_eq!(app.teams(), &["Flamengo", "Gremio", "Santos"]);
        app.next_team();
        assert_eq!(app.team(), Some("Flamengo"));
        app.next_team();
        app.next_team();
        assert_eq!(app.team(), Some("Santos"));
        app.next_team();
        assert_eq!(app.team(), None);
        app.prev_team();
        assert_eq!(app.team(), Some("Santos"));
        app.clear_team();
        assert_eq!(app.team(), None);
    }

    #[test]
    fn selection_change_rebuilds_view_and_resets_scroll() {
        let mut app = sample_app();
        app.scroll_down(5);
        app.next_season(); // 2019
        assert_eq!(app.scroll, 0);
        assert_eq!(app.view.matches.len(), 2);
        app.next_team(); // Flamengo
        assert_eq!(app.view.matches.len(), 1);
        assert_eq!(app.view.top_home_winners[0].team, "Flamengo");
    }

    #[test]
    fn empty_dataset_is_handled() {
        let mut app = App::new(Arc::new(Dataset::default()), 10, &Selection::all());
        assert_eq!(app.season(), None);
        app.next_season();
        app.next_team();
        assert!(app.view.is_empty());
    }

    #[test]
    fn replace_dataset_keeps_selection_and_tab() {
        let mut app = App::new(
            sample_dataset(),
            10,
            &Selection::all().with_season(2020).with_team("Gremio"),
        );
        app.set_tab(TabId::Matches);
        app.replace_dataset(sample_dataset());
        assert_eq!(app.season(), Some(2020));
        assert_eq!(app.team(), Some("Gremio"));
        assert_eq!(app.active_tab, TabId::Matches);
    }

    #[test]
    fn load_warnings_become_message() {
        let csv_data = "\
time_mandante,time_visitante,gols_mandante,gols_visitante
A,B,x,1";
        let dataset = dataset::load_from_reader(csv_data.as_bytes(), &LoadOptions::default())
            .unwrap();
        let app = App::new(Arc::new(dataset), 10, &Selection::all());
        let message = app.message.unwrap();
        assert!(message.contains("season column not found"));
        assert!(message.contains("home goals"));
    }

    #[test]
    fn scroll_stops_at_last_page() {
        let mut app = long_app();
        app.set_tab(TabId::Matches);
        app.set_visible_rows(10);
        app.scroll_down(100);
        assert_eq!(app.scroll, 30);
        app.scroll_up(1);
        assert_eq!(app.scroll, 29);
    }

    #[test]
    fn scroll_reclamped_when_panel_grows() {
        let mut app = long_app();
        app.set_tab(TabId::Matches);
        app.scroll_down(35);
        assert_eq!(app.scroll, 35);
        app.set_visible_rows(20);
        assert_eq!(app.scroll, 20);
    }

    #[test]
    fn chart_tabs_do_not_scroll() {
        let mut app = long_app();
        app.set_tab(TabId::Goals);
        app.scroll_down(5);
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn trend_table_len_counts_winning_teams() {
        let mut app = sample_app();
        app.set_tab(TabId::Trend);
        assert_eq!(app.table_len(), 2);
    }

    #[test]
    fn tab_switch_resets_scroll() {
        let mut app = sample_app();
        app.scroll_down(3);
        app.set_tab(TabId::Trend);
        assert_eq!(app.scroll, 0);
        app.scroll_down(2);
        app.scroll_up(5);
        assert_eq!(app.scroll, 0);
    }
}
