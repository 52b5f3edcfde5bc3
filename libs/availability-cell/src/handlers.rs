use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{
    parse_iso_date, validate_horizon, AvailabilityError, AvailableDatesQuery,
    AvailableDatesResponse, AvailableTimesQuery, AvailableTimesResponse, SlotsQuery,
    WorkingHoursPreview, WorkingHoursPreviewRequest, BOOKING_HORIZON_DAYS,
};
use crate::services::{
    availability::AvailabilityResolver,
    booked_times::HttpBookedTimesLookup,
    doctor::DoctorService,
    slots::{generate_time_slots, SlotGenerator, DEFAULT_SLOT_MINUTES},
    weekdays::match_abbreviated_day_names,
    working_hours::parse_working_hours,
};
use crate::state::AppState;

type BearerHeader = Option<TypedHeader<Authorization<Bearer>>>;

fn bearer_token(auth: BearerHeader) -> Option<String> {
    auth.map(|TypedHeader(authorization)| authorization.token().to_string())
}

fn resolver_for(state: &AppState, token: Option<String>) -> AvailabilityResolver<HttpBookedTimesLookup> {
    let lookup = HttpBookedTimesLookup::new(state.backend.clone()).with_auth_token(token);
    AvailabilityResolver::with_clock(lookup, state.clock.clone())
}

// ==============================================================================
// DOCTOR AVAILABILITY
// ==============================================================================

#[axum::debug_handler]
pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    query: Result<Query<AvailableDatesQuery>, QueryRejection>,
    auth: BearerHeader,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let horizon_days = validate_horizon(query.horizon_days.unwrap_or(BOOKING_HORIZON_DAYS))?;
    let token = bearer_token(auth);

    let doctor = DoctorService::new(state.backend.clone())
        .get_doctor(&doctor_id, token.as_deref())
        .await?;

    let dates = resolver_for(&state, token).available_dates_with(
        &doctor,
        horizon_days,
        query.matching.unwrap_or_default(),
        query.gate.unwrap_or_default(),
    );

    Ok(Json(json!(AvailableDatesResponse {
        doctor_id: doctor.id,
        horizon_days,
        dates,
    })))
}

#[axum::debug_handler]
pub async fn get_available_times(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    query: Result<Query<AvailableTimesQuery>, QueryRejection>,
    auth: BearerHeader,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let date = parse_iso_date(&query.date)?;
    let token = bearer_token(auth);

    let doctor = DoctorService::new(state.backend.clone())
        .get_doctor(&doctor_id, token.as_deref())
        .await?;

    let times = resolver_for(&state, token).available_times(&doctor, date).await;

    Ok(Json(json!(AvailableTimesResponse {
        doctor_id: doctor.id,
        date: date.format("%Y-%m-%d").to_string(),
        times,
    })))
}

#[axum::debug_handler]
pub async fn get_working_hours(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
    auth: BearerHeader,
) -> Result<Json<Value>, AppError> {
    let token = bearer_token(auth);

    let doctor = DoctorService::new(state.backend.clone())
        .get_doctor(&doctor_id, token.as_deref())
        .await?;

    let spec = parse_working_hours(doctor.working_hours_text());

    Ok(Json(json!({
        "doctor_id": doctor.id,
        "availability": doctor.availability,
        "working_hours": spec,
    })))
}

// ==============================================================================
// SCHEDULING FORM HELPERS (NO BACKEND ACCESS)
// ==============================================================================

#[axum::debug_handler]
pub async fn preview_working_hours(
    request: Result<Json<WorkingHoursPreviewRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(request) = request?;
    let spec = parse_working_hours(request.working_hours.as_deref().unwrap_or(""));
    let abbreviated_days = match_abbreviated_day_names(&spec.days)
        .into_iter()
        .map(str::to_string)
        .collect();
    let slots = SlotGenerator::default().generate(&spec.start, &spec.end);

    Ok(Json(json!(WorkingHoursPreview {
        spec,
        abbreviated_days,
        slots,
    })))
}

#[axum::debug_handler]
pub async fn get_time_slots(
    query: Result<Query<SlotsQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(query) = query?;
    let granularity = query.granularity.unwrap_or(DEFAULT_SLOT_MINUTES);
    if granularity == 0 {
        return Err(AvailabilityError::InvalidGranularity.into());
    }

    let slots = generate_time_slots(&query.start, &query.end, granularity);

    Ok(Json(json!({
        "start": query.start,
        "end": query.end,
        "granularity": granularity,
        "slots": slots,
    })))
}
