use serde::{Deserialize, Serialize};

pub const DEFAULT_GOAL_STEPS: u64 = 8000;
pub const GOAL_PRESETS: [u64; 6] = [5000, 6000, 8000, 10000, 12000, 15000];

/// One saved day. `date` is the key; `id` is only a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    pub id: String,
    pub date: String,
    pub steps: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl StepRecord {
    pub fn new(date: impl Into<String>, steps: u64, timestamp: impl Into<String>) -> Self {
        let date = date.into();
        let timestamp = timestamp.into();
        Self {
            id: format!("record_{date}"),
            date,
            steps,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }

    /// Same record with a new count; keeps `id` and `createdAt`.
    pub fn with_steps(self, steps: u64, timestamp: impl Into<String>) -> Self {
        Self {
            steps,
            updated_at: timestamp.into(),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub goal_steps: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            goal_steps: DEFAULT_GOAL_STEPS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyStats {
    pub date: String,
    pub steps: u64,
    pub goal_steps: u64,
    pub achievement_rate: u64,
    pub is_goal_achieved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyStats {
    pub week_start: String,
    pub week_end: String,
    pub total_steps: u64,
    pub average_steps: u64,
    pub days_recorded: u32,
    pub days_achieved: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub month: String,
    pub total_steps: u64,
    pub average_steps: u64,
    pub days_recorded: u32,
    pub days_achieved: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct StreakInfo {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_achieved_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub steps: u64,
}

/// Step count as typed by the user; numbers and numeric strings are both accepted
/// and validated before anything is stored. Any other JSON value lands in `Other`
/// so validation, not deserialization, rejects it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RawCount {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveStepsRequest {
    #[serde(default)]
    pub steps: RawCount,
}

#[derive(Debug, Deserialize)]
pub struct RecordForm {
    pub steps: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(default)]
    pub goal_steps: RawCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Weekly,
    Monthly,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub period: Period,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub display_date: String,
    pub daily: DailyStats,
    pub streak: StreakInfo,
}

#[derive(Debug, Serialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum PeriodStats {
    Weekly(WeeklyStats),
    Monthly(MonthlyStats),
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub title: String,
    pub summary: PeriodStats,
    pub chart: Vec<ChartPoint>,
    pub streak: StreakInfo,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub goal_steps: u64,
    pub presets: [u64; 6],
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            goal_steps: settings.goal_steps,
            presets: GOAL_PRESETS,
        }
    }
}
