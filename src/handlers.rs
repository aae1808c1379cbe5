use crate::directory::{self, INSPIRATION_COUNT, Media, TherapistCard, VideoCard};
use crate::errors::{AppError, ValidationError};
use crate::models::{
    ChatMessage, ChatRequest, DiaryRequest, DiaryResponse, InspirationQuery, JournalEntry,
    JournalRequest, LoginRequest, PresetRequest, QuizRequest, QuizResult, SessionResponse,
    SignupRequest, TimerResponse, UserAccount, VideoQuery,
};
use crate::quiz::{self, QUESTIONS, QuizQuestion};
use crate::state::AppState;
use crate::streak::{current_streak, current_streak_at};
use crate::timer::{self, FocusTimer};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use chrono::{Local, Utc};
use serde::Serialize;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let user = state.accounts.lock().await.current_user().cloned();
    let streak = match user {
        Some(_) => state.diary.lock().await.streak(today()),
        None => 0,
    };
    Html(render_index(user.as_ref(), streak))
}

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    if [&payload.email, &payload.username, &payload.password]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(ValidationError::new("Please fill in all fields.").into());
    }

    let mut accounts = state.accounts.lock().await;
    if !accounts
        .signup(&payload.email, &payload.username, &payload.password)
        .await? {
        return Err(AppError::conflict("Unable to create account with these details."));
    }
    Ok(Json(session_response(accounts.current_user())))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut accounts = state.accounts.lock().await;
    if !accounts.login(&payload.email, &payload.password).await? {
        return Err(AppError::unauthorized("Invalid email or password."));
    }
    Ok(Json(session_response(accounts.current_user())))
}

pub async fn logout(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    state.accounts.lock().await.logout().await?;
    state.timer.stop();
    Ok(Json(session_response(None)))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let accounts = state.accounts.lock().await;
    Json(session_response(accounts.current_user()))
}

pub async fn get_diary(State(state): State<AppState>) -> Result<Json<DiaryResponse>, AppError> {
    require_session(&state).await?;
    let diary = state.diary.lock().await;
    let entries = diary.entries();
    Ok(Json(DiaryResponse {
        streak: current_streak(&entries),
        entries,
    }))
}

pub async fn save_diary(
    State(state): State<AppState>,
    Json(payload): Json<DiaryRequest>,
) -> Result<Json<DiaryResponse>, AppError> {
    require_session(&state).await?;
    let diary = state.diary.lock().await;
    let now = Local::now();
    diary.save(&payload.date, &payload.text, now).await?;

    let entries = diary.entries();
    Ok(Json(DiaryResponse {
        streak: current_streak_at(now.date_naive(), &entries),
        entries,
    }))
}

pub async fn get_journal(State(state): State<AppState>) -> Result<Json<Vec<JournalEntry>>, AppError> {
    require_session(&state).await?;
    Ok(Json(state.journal.lock().await.entries()))
}

pub async fn save_journal(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<Json<JournalEntry>, AppError> {
    require_session(&state).await?;
    let journal = state.journal.lock().await;
    let entry = journal.save(payload.mood, payload.answers, Utc::now()).await?;
    Ok(Json(entry))
}

pub async fn get_questions(State(state): State<AppState>) -> Result<Json<&'static [QuizQuestion]>, AppError> {
    require_session(&state).await?;
    Ok(Json(QUESTIONS.as_slice()))
}

pub async fn get_quiz_results(State(state): State<AppState>) -> Result<Json<Vec<QuizResult>>, AppError> {
    require_session(&state).await?;
    Ok(Json(state.quiz.lock().await.results()))
}

pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(payload): Json<QuizRequest>,
) -> Result<Json<QuizResult>, AppError> {
    require_session(&state).await?;
    let result = quiz::score(&payload.answers)?;
    let recorded = state.quiz.lock().await.record(result, Utc::now()).await?;
    Ok(Json(recorded))
}

pub async fn get_chat(State(state): State<AppState>) -> Result<Json<Vec<ChatMessage>>, AppError> {
    require_session(&state).await?;
    Ok(Json(state.chat.lock().await.history(Utc::now()).await?))
}

pub async fn send_chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    require_session(&state).await?;
    let chat = state.chat.lock().await;
    Ok(Json(chat.send(&payload.text, Utc::now()).await?))
}

pub async fn clear_chat(State(state): State<AppState>) -> Result<Json<Vec<ChatMessage>>, AppError> {
    require_session(&state).await?;
    Ok(Json(state.chat.lock().await.clear(Utc::now()).await?))
}

pub async fn get_timer(State(state): State<AppState>) -> Result<Json<TimerResponse>, AppError> {
    require_session(&state).await?;
    Ok(Json(timer_response(&state.timer.snapshot())))
}

pub async fn start_timer(State(state): State<AppState>) -> Result<Json<TimerResponse>, AppError> {
    require_session(&state).await?;
    state.timer.start();
    Ok(Json(timer_response(&state.timer.snapshot())))
}

pub async fn pause_timer(State(state): State<AppState>) -> Result<Json<TimerResponse>, AppError> {
    require_session(&state).await?;
    state.timer.pause();
    Ok(Json(timer_response(&state.timer.snapshot())))
}

pub async fn stop_timer(State(state): State<AppState>) -> Result<Json<TimerResponse>, AppError> {
    require_session(&state).await?;
    state.timer.stop();
    Ok(Json(timer_response(&state.timer.snapshot())))
}

pub async fn set_timer_preset(
    State(state): State<AppState>,
    Json(payload): Json<PresetRequest>,
) -> Result<Json<TimerResponse>, AppError> {
    require_session(&state).await?;
    let preset = timer::find_preset(&payload.name)
        .ok_or_else(|| AppError::bad_request(format!("unknown preset '{}'", payload.name)))?;
    if !state.timer.set_preset(preset) {
        return Err(AppError::conflict("Pause or stop the timer before changing presets."));
    }
    Ok(Json(timer_response(&state.timer.snapshot())))
}

pub async fn get_therapists(State(state): State<AppState>) -> Result<Json<Vec<TherapistCard>>, AppError> {
    require_session(&state).await?;
    Ok(Json(directory::therapist_cards()))
}

#[derive(Serialize)]
pub struct VideosResponse {
    videos: Vec<VideoCard>,
    media: &'static [Media],
}

pub async fn get_videos(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideosResponse>, AppError> {
    require_session(&state).await?;
    Ok(Json(VideosResponse {
        videos: directory::video_cards(query.kind),
        media: directory::RECOMMENDED_MEDIA.as_slice(),
    }))
}

pub async fn get_inspiration(
    State(state): State<AppState>,
    Query(query): Query<InspirationQuery>,
) -> Result<Json<Vec<directory::Quote>>, AppError> {
    require_session(&state).await?;
    Ok(Json(directory::inspiration(query.count.unwrap_or(INSPIRATION_COUNT))))
}

async fn require_session(state: &AppState) -> Result<UserAccount, AppError> {
    state
        .accounts
        .lock()
        .await
        .current_user()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Please log in to continue."))
}

fn session_response(user: Option<&UserAccount>) -> SessionResponse {
    SessionResponse {
        authenticated: user.is_some(),
        email: user.map(|user| user.email.clone()),
        username: user.map(|user| user.username.clone()),
    }
}

fn timer_response(timer: &FocusTimer) -> TimerResponse {
    TimerResponse {
        display: timer.display(),
        time_left: timer.time_left(),
        running: timer.is_running(),
        completed: timer.is_completed(),
        progress: timer.progress(),
    }
}

fn today() -> chrono::NaiveDate {
    Local::now().date_naive()
}
