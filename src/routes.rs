use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::{ConfigSource, Domain},
    errors::GenerationFailure,
    image::{resolve_image, ImageProvider},
    models::{FitnessPlan, ImageRef, ImageRequest, SpeechRequest, UserProfile},
    narration::narration_script,
    pdf::render_plan_pdf,
    plan::{generate_plan, PlanProvider},
    policy::select_path,
    speech::{synthesize_speech, SpeechOutcome, SpeechProvider},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<dyn ConfigSource>,
    pub plan: Arc<dyn PlanProvider>,
    pub image: Arc<dyn ImageProvider>,
    pub speech: Arc<dyn SpeechProvider>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/image", post(image))
        .route("/api/tts", post(tts))
        .route("/api/narration", post(narration))
        .route("/api/plan/pdf", post(export_pdf))
        .route("/health", get(health))
        .layer(middleware::from_fn(with_request_id))
        .with_state(state)
}

async fn with_request_id(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", %request_id, method = %req.method(), path = %req.uri().path());
    next.run(req).instrument(span).await
}

pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<UserProfile>, JsonRejection>,
) -> Result<Json<FitnessPlan>, GenerationFailure> {
    let Json(profile) = body?;
    let config = state.config.snapshot();
    tracing::info!("🚀 Generating plan for {} (goal: {}, diet: {})", profile.name, profile.goal, profile.diet);

    let plan = generate_plan(&config, state.plan.as_ref(), &profile).await?;
    tracing::info!("✅ Plan ready with {} days and {} tips", plan.workout_plan.len(), plan.tips.len());
    Ok(Json(plan))
}

pub async fn image(
    State(state): State<AppState>,
    body: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageRef>, GenerationFailure> {
    let Json(request) = body?;
    let prompt = request.prompt.unwrap_or_default();
    let config = state.config.snapshot();
    resolve_image(&config, state.image.as_ref(), &prompt).await.map(Json)
}

pub async fn tts(
    State(state): State<AppState>,
    body: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<SpeechOutcome, GenerationFailure> {
    let Json(request) = body?;
    let text = request.text.unwrap_or_default();
    let config = state.config.snapshot();
    synthesize_speech(&config, state.speech.as_ref(), &text).await
}

impl IntoResponse for SpeechOutcome {
    fn into_response(self) -> Response {
        match self {
            SpeechOutcome::Audio(clip) => (
                [
                    (header::CONTENT_TYPE, clip.content_type),
                    (header::CONTENT_LENGTH, clip.bytes.len().to_string()),
                ],
                clip.bytes,
            )
                .into_response(),
            SpeechOutcome::UseLocalSynthesis => Json(json!({ "useLocalSynthesis": true })).into_response(),
        }
    }
}

pub async fn narration(
    body: Result<Json<FitnessPlan>, JsonRejection>,
) -> Result<Json<serde_json::Value>, GenerationFailure> {
    let Json(plan) = body?;
    Ok(Json(json!({ "text": narration_script(&plan) })))
}

pub async fn export_pdf(body: Result<Json<FitnessPlan>, JsonRejection>) -> Response {
    let plan = match body {
        Ok(Json(plan)) => plan,
        Err(rejection) => return GenerationFailure::from(rejection).into_response(),
    };
    match render_plan_pdf(&plan) {
        Ok(pdf_bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"ai-fitness-plan.pdf\""),
            ],
            pdf_bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("❌ {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": e.to_string() }))).into_response()
        }
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = state.config.snapshot();
    Json(json!({
        "status": "ok",
        "plan": select_path(Domain::Plan, &config),
        "image": select_path(Domain::Image, &config),
        "speech": select_path(Domain::Speech, &config),
    }))
}
