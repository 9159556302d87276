//! Renderer-neutral tables. Both the dashboard and the printing commands
//! draw from the same [`Table`], so formatting rules live here once.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use std::fmt::{self, Write as _};

use crate::api::Resource;
use crate::models::workout::Difficulty;
use crate::models::{non_blank, record_key, Activity, LeaderboardEntry, Team, User, Workout};

const DASH: &str = "—";

/// Visual emphasis of a cell, mapped to colors by each renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Muted,
    Strong,
    Primary,
    Success,
    Info,
    Secondary,
    Easy,
    Medium,
    Hard,
    Gold,
    Silver,
    Bronze,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text { text: String, tone: Tone },
    Badge { text: String, tone: Tone },
    Badges { items: Vec<String>, tone: Tone },
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            tone: Tone::Plain,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            tone: Tone::Muted,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Cell::Text {
            text: text.into(),
            tone: Tone::Strong,
        }
    }

    pub fn badge(text: impl Into<String>, tone: Tone) -> Self {
        Cell::Badge {
            text: text.into(),
            tone,
        }
    }

    /// Cell content without styling
    pub fn text(&self) -> String {
        match self {
            Cell::Text { text, .. } | Cell::Badge { text, .. } => text.clone(),
            Cell::Badges { items, .. } => items.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Record {
        key: String,
        cells: Vec<Cell>,
        highlight: bool,
    },
    /// Stands in for an empty collection
    Placeholder(String),
}

impl TableRow {
    pub fn cells(&self) -> &[Cell] {
        match self {
            TableRow::Record { cells, .. } => cells,
            TableRow::Placeholder(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub title: &'static str,
    pub icon: &'static str,
    pub count_label: String,
    pub headers: &'static [&'static str],
    pub rows: Vec<TableRow>,
}

/// How timestamps are shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateStyle {
    pub format: String,
}

impl Default for DateStyle {
    fn default() -> Self {
        Self {
            format: "%Y-%m-%d".to_string(),
        }
    }
}

impl DateStyle {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Render a timestamp with the configured format, in the timestamp's
    /// own offset. Unparseable input is shown as received; a format the
    /// timestamp cannot satisfy falls back to the ISO date.
    pub fn format(&self, raw: Option<&str>) -> String {
        let Some(raw) = non_blank(raw) else {
            return DASH.to_string();
        };

        let Some(stamp) = Stamp::parse(raw) else {
            return raw.to_string();
        };

        let items = StrftimeItems::new(&self.format);
        if items.clone().any(|item| matches!(item, Item::Error)) {
            tracing::warn!("Invalid date format {:?}, using ISO dates", self.format);
            return stamp.iso_date();
        }

        stamp.render(items).unwrap_or_else(|_| {
            tracing::warn!("Date format {:?} does not fit {:?}, using ISO dates", self.format, raw);
            stamp.iso_date()
        })
    }
}

/// A parsed timestamp, keeping its offset when it came with one
enum Stamp {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Stamp {
    fn parse(raw: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Stamp::Zoned(dt));
        }

        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
            .map(Stamp::Naive)
    }

    fn iso_date(&self) -> String {
        let date = match self {
            Stamp::Zoned(dt) => dt.date_naive(),
            Stamp::Naive(dt) => dt.date(),
        };
        date.format("%Y-%m-%d").to_string()
    }

    /// Formatting errors (e.g. `%z` on a naive time) surface as `Err`
    fn render(&self, items: StrftimeItems<'_>) -> Result<String, fmt::Error> {
        let mut out = String::new();
        match self {
            Stamp::Zoned(dt) => write!(out, "{}", dt.format_with_items(items))?,
            Stamp::Naive(dt) => write!(out, "{}", dt.format_with_items(items))?,
        }
        Ok(out)
    }
}

/// A record type that can be laid out as a table row
pub trait Tabular {
    const RESOURCE: Resource;
    const TITLE: &'static str;
    const ICON: &'static str;
    const HEADERS: &'static [&'static str];
    /// Noun for the record counter, e.g. "athletes"
    const COUNT_NOUN: &'static str;
    const EMPTY_MESSAGE: &'static str;

    fn key(&self, index: usize) -> String;

    fn cells(&self, index: usize, dates: &DateStyle) -> Vec<Cell>;

    fn highlight(_index: usize) -> bool {
        false
    }
}

/// Loading banner text for a collection
pub fn loading_message(resource: Resource) -> String {
    format!("Loading {}...", resource)
}

/// Lay records out in server order; an empty collection yields exactly one
/// placeholder row.
pub fn build_table<T: Tabular>(records: &[T], dates: &DateStyle) -> Table {
    let rows = if records.is_empty() {
        vec![TableRow::Placeholder(T::EMPTY_MESSAGE.to_string())]
    } else {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| TableRow::Record {
                key: record.key(index),
                cells: record.cells(index, dates),
                highlight: T::highlight(index),
            })
            .collect()
    };

    Table {
        title: T::TITLE,
        icon: T::ICON,
        count_label: format!("{} {}", records.len(), T::COUNT_NOUN),
        headers: T::HEADERS,
        rows,
    }
}

fn or_dash(value: Option<&str>) -> String {
    non_blank(value).unwrap_or(DASH).to_string()
}

fn number_or_dash(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| DASH.to_string())
}

fn position(index: usize) -> Cell {
    Cell::muted((index + 1).to_string())
}

impl Tabular for User {
    const RESOURCE: Resource = Resource::Users;
    const TITLE: &'static str = "Users";
    const ICON: &'static str = "👤";
    const HEADERS: &'static [&'static str] = &["#", "Name", "Email", "Team", "Created At"];
    const COUNT_NOUN: &'static str = "users";
    const EMPTY_MESSAGE: &'static str = "No users found.";

    fn key(&self, index: usize) -> String {
        record_key(self.id.as_deref(), index)
    }

    fn cells(&self, index: usize, dates: &DateStyle) -> Vec<Cell> {
        vec![
            position(index),
            Cell::strong(self.display_name()),
            Cell::plain(self.email.clone().unwrap_or_default()),
            match self.team_name() {
                Some(team) => Cell::plain(team),
                None => Cell::muted(DASH),
            },
            Cell::plain(dates.format(self.created_at.as_deref())),
        ]
    }
}

impl Tabular for Activity {
    const RESOURCE: Resource = Resource::Activities;
    const TITLE: &'static str = "Activities";
    const ICON: &'static str = "🏃";
    const HEADERS: &'static [&'static str] = &["#", "User", "Activity Type", "Duration (min)", "Date"];
    const COUNT_NOUN: &'static str = "records";
    const EMPTY_MESSAGE: &'static str = "No activities found.";

    fn key(&self, index: usize) -> String {
        record_key(self.id.as_deref(), index)
    }

    fn cells(&self, index: usize, dates: &DateStyle) -> Vec<Cell> {
        vec![
            position(index),
            Cell::strong(self.user.clone().unwrap_or_default()),
            Cell::badge(or_dash(self.activity_type.as_deref()), Tone::Primary),
            Cell::plain(number_or_dash(self.duration)),
            Cell::plain(dates.format(self.date.as_deref())),
        ]
    }
}

impl Tabular for Team {
    const RESOURCE: Resource = Resource::Teams;
    const TITLE: &'static str = "Teams";
    const ICON: &'static str = "👥";
    const HEADERS: &'static [&'static str] = &["#", "Team Name", "Members", "Size"];
    const COUNT_NOUN: &'static str = "teams";
    const EMPTY_MESSAGE: &'static str = "No teams found.";

    fn key(&self, index: usize) -> String {
        record_key(self.id.as_deref(), index)
    }

    fn cells(&self, index: usize, _dates: &DateStyle) -> Vec<Cell> {
        vec![
            position(index),
            Cell::strong(self.display_name()),
            Cell::Badges {
                items: self.members.clone(),
                tone: Tone::Secondary,
            },
            Cell::badge(self.members.len().to_string(), Tone::Info),
        ]
    }
}

/// Medal for the top three positions, the 1-based position otherwise
pub fn rank_cell(index: usize) -> Cell {
    match index {
        0 => Cell::badge("🥇", Tone::Gold),
        1 => Cell::badge("🥈", Tone::Silver),
        2 => Cell::badge("🥉", Tone::Bronze),
        _ => position(index),
    }
}

impl Tabular for LeaderboardEntry {
    const RESOURCE: Resource = Resource::Leaderboard;
    const TITLE: &'static str = "Leaderboard";
    const ICON: &'static str = "🏆";
    const HEADERS: &'static [&'static str] = &["Rank", "User", "Team", "Total Calories"];
    const COUNT_NOUN: &'static str = "athletes";
    const EMPTY_MESSAGE: &'static str = "No entries found.";

    fn key(&self, index: usize) -> String {
        record_key(self.id.as_deref(), index)
    }

    fn cells(&self, index: usize, _dates: &DateStyle) -> Vec<Cell> {
        vec![
            rank_cell(index),
            Cell::strong(self.user_name.clone().unwrap_or_default()),
            Cell::plain(non_blank(self.team.as_deref()).unwrap_or("N/A")),
            Cell::badge(number_or_dash(self.total_calories), Tone::Success),
        ]
    }

    fn highlight(index: usize) -> bool {
        index == 0
    }
}

pub fn difficulty_cell(difficulty: Option<Difficulty>) -> Cell {
    match difficulty {
        None => Cell::badge(DASH, Tone::Secondary),
        Some(level) => {
            let tone = match level {
                Difficulty::Easy => Tone::Easy,
                Difficulty::Medium => Tone::Medium,
                Difficulty::Hard => Tone::Hard,
                Difficulty::Other(_) => Tone::Secondary,
            };
            Cell::badge(level.label(), tone)
        }
    }
}

impl Tabular for Workout {
    const RESOURCE: Resource = Resource::Workouts;
    const TITLE: &'static str = "Workouts";
    const ICON: &'static str = "💪";
    const HEADERS: &'static [&'static str] = &[
        "#",
        "Workout Name",
        "Category",
        "Description",
        "Duration (min)",
        "Cal/Session",
        "Difficulty",
    ];
    const COUNT_NOUN: &'static str = "workouts";
    const EMPTY_MESSAGE: &'static str = "No workouts found.";

    fn key(&self, index: usize) -> String {
        record_key(self.id.as_deref(), index)
    }

    fn cells(&self, index: usize, _dates: &DateStyle) -> Vec<Cell> {
        vec![
            position(index),
            Cell::strong(self.name.clone().unwrap_or_default()),
            Cell::badge(or_dash(self.category.as_deref()), Tone::Info),
            Cell::muted(self.description.clone().unwrap_or_default()),
            Cell::plain(number_or_dash(self.duration)),
            Cell::plain(number_or_dash(self.calories_per_session)),
            difficulty_cell(self.difficulty()),
        ]
    }
}
