use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/signup", post(handlers::signup))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .route("/api/session", get(handlers::get_session))
        .route("/api/diary", get(handlers::get_diary).post(handlers::save_diary))
        .route("/api/journal", get(handlers::get_journal).post(handlers::save_journal))
        .route("/api/quiz/questions", get(handlers::get_questions))
        .route(
            "/api/quiz/results",
            get(handlers::get_quiz_results).post(handlers::submit_quiz),
        )
        .route(
            "/api/chat",
            get(handlers::get_chat)
                .post(handlers::send_chat)
                .delete(handlers::clear_chat),
        )
        .route("/api/timer", get(handlers::get_timer))
        .route("/api/timer/start", post(handlers::start_timer))
        .route("/api/timer/pause", post(handlers::pause_timer))
        .route("/api/timer/stop", post(handlers::stop_timer))
        .route("/api/timer/preset", post(handlers::set_timer_preset))
        .route("/api/therapists", get(handlers::get_therapists))
        .route("/api/videos", get(handlers::get_videos))
        .route("/api/inspiration", get(handlers::get_inspiration))
        .with_state(state)
}
