use crate::dates::{
    display_date, format_date, format_display_month, format_month, month_dates, parse_date,
    week_dates, week_end, week_start,
};
use crate::errors::AppError;
use crate::input::{parse_goal, parse_steps};
use crate::models::{
    Period, PeriodStats, RawCount, RecordForm, SaveSettingsRequest, SaveStepsRequest, Settings,
    SettingsResponse, StatsQuery, StatsResponse, StepRecord, TodayResponse,
};
use crate::state::AppState;
use crate::stats::{chart_data, daily_stats, monthly_stats, streak, weekly_stats};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use tracing::info;

/// Days shown in the monthly chart, counted back from the end of the month.
const MONTH_CHART_DAYS: usize = 14;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = state.clock.today();
    let date = format_date(today);
    let records = state.store.records().await;
    let goal_steps = state.store.settings().await.goal_steps;

    Html(render_index(
        &display_date(today),
        &daily_stats(&records, &date, goal_steps),
        &streak(&records, goal_steps, today),
        &weekly_stats(&records, today, goal_steps),
    ))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let today = state.clock.today();
    let records = state.store.records().await;
    let goal_steps = state.store.settings().await.goal_steps;

    Json(TodayResponse {
        display_date: display_date(today),
        daily: daily_stats(&records, &format_date(today), goal_steps),
        streak: streak(&records, goal_steps, today),
    })
}

pub async fn record_today(
    State(state): State<AppState>,
    Form(form): Form<RecordForm>,
) -> Result<Redirect, AppError> {
    let steps = parse_steps(&RawCount::Text(form.steps))?;
    let date = format_date(state.clock.today());
    save_steps(&state, &date, steps).await?;
    Ok(Redirect::to("/"))
}

pub async fn list_records(State(state): State<AppState>) -> Json<Vec<StepRecord>> {
    Json(state.store.records().await)
}

pub async fn get_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<StepRecord>, AppError> {
    parse_date(&date)?;
    state
        .store
        .record_by_date(&date)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no record for {date}")))
}

pub async fn put_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<SaveStepsRequest>,
) -> Result<Json<StepRecord>, AppError> {
    parse_date(&date)?;
    let steps = parse_steps(&payload.steps)?;
    Ok(Json(save_steps(&state, &date, steps).await?))
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    parse_date(&date)?;
    let _writes = state.writes.lock().await;
    state.store.delete_record(&date).await?;
    info!(date = %date, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let today = state.clock.today();
    let reference = match query.date.as_deref() {
        Some(date) => parse_date(date)?,
        None => today,
    };
    let records = state.store.records().await;
    let goal_steps = state.store.settings().await.goal_steps;

    let (title, summary, chart) = match query.period {
        Period::Weekly => (
            format!(
                "{} - {}",
                display_date(week_start(reference)),
                display_date(week_end(reference))
            ),
            PeriodStats::Weekly(weekly_stats(&records, reference, goal_steps)),
            chart_data(&records, &week_dates(reference)),
        ),
        Period::Monthly => {
            let month = format_month(reference);
            let dates = month_dates(&month)?;
            let tail = dates.len().saturating_sub(MONTH_CHART_DAYS);
            (
                format_display_month(&month)?,
                PeriodStats::Monthly(monthly_stats(&records, &month, goal_steps)?),
                chart_data(&records, &dates[tail..]),
            )
        }
    };

    Ok(Json(StatsResponse {
        title,
        summary,
        chart,
        streak: streak(&records, goal_steps, today),
    }))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(state.store.settings().await.into())
}

pub async fn put_settings(
    State(state): State<AppState>,
    Json(payload): Json<SaveSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let settings = Settings {
        goal_steps: parse_goal(&payload.goal_steps)?,
    };
    let _writes = state.writes.lock().await;
    state.store.save_settings(&settings).await?;
    Ok(Json(settings.into()))
}

pub async fn clear_data(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let _writes = state.writes.lock().await;
    state.store.clear_all().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates or updates the record for `date`, keeping its id and creation time.
async fn save_steps(state: &AppState, date: &str, steps: u64) -> Result<StepRecord, AppError> {
    let _writes = state.writes.lock().await;
    let timestamp = state.clock.timestamp();
    let record = match state.store.record_by_date(date).await {
        Some(existing) => existing.with_steps(steps, timestamp),
        None => StepRecord::new(date, steps, timestamp),
    };

    state.store.save_record(record.clone()).await?;
    info!(date = %date, steps, "steps saved");
    Ok(record)
}
