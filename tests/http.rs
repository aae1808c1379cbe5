use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct SessionResponse {
    authenticated: bool,
    email: Option<String>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DiaryEntry {
    date: String,
    time: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct DiaryResponse {
    streak: u32,
    entries: Vec<DiaryEntry>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    text: String,
    sender: String,
}

#[derive(Debug, Deserialize)]
struct TherapistCard {
    rating: f32,
    stars: u8,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoCard {
    #[serde(rename = "type")]
    kind: String,
    embed_id: String,
    embed_url: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    videos: Vec<VideoCard>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_suffix() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", std::process::id(), nanos)
}

fn unique_data_path() -> String {
    let mut path = std::env::temp_dir();
    path.push(format!("wellness_app_http_{}.json", unique_suffix()));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/session")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    // Nothing listens on the completion port, so chat replies exercise the failure path.
    let dead_endpoint = format!("http://127.0.0.1:{}/v1/chat/completions", pick_free_port());
    let child = Command::new(env!("CARGO_BIN_EXE_wellness_app"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("GROQ_API_URL", dead_endpoint)
        .env("GROQ_API_KEY", "test-key")
        .env("REFLECTION_DELAY_MS", "0")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn signup_fresh(client: &Client, base_url: &str) -> String {
    let email = format!("user_{}@example.com", unique_suffix());
    let response = client
        .post(format!("{base_url}/api/signup"))
        .json(&serde_json::json!({ "email": email, "username": "tester", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    email
}

#[tokio::test]
async fn http_account_lifecycle() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;

    let email = signup_fresh(&client, base).await;
    let session: SessionResponse = client
        .get(format!("{base}/api/session"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(session.authenticated);
    assert_eq!(session.email.as_deref(), Some(email.as_str()));
    assert_eq!(session.username.as_deref(), Some("tester"));

    let duplicate = client
        .post(format!("{base}/api/signup"))
        .json(&serde_json::json!({ "email": email, "username": "other", "password": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let logout = client.post(format!("{base}/api/logout")).send().await.unwrap();
    assert!(logout.status().is_success());
    let guarded = client.get(format!("{base}/api/diary")).send().await.unwrap();
    assert_eq!(guarded.status(), StatusCode::UNAUTHORIZED);

    let wrong = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "email": email, "password": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let right = client
        .post(format!("{base}/api/login"))
        .json(&serde_json::json!({ "email": email, "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert!(right.status().is_success());
}

#[tokio::test]
async fn http_diary_entry_for_today_starts_streak() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;
    signup_fresh(&client, base).await;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let saved: DiaryResponse = client
        .post(format!("{base}/api/diary"))
        .json(&serde_json::json!({ "date": today, "text": "calm morning" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(saved.streak >= 1);
    let newest = &saved.entries[0];
    assert_eq!(newest.text, "calm morning");
    assert_eq!(newest.date, today);
    assert_eq!(newest.time.len(), 5);

    let rejected = client
        .post(format!("{base}/api/diary"))
        .json(&serde_json::json!({ "date": today, "text": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), StatusCode::BAD_REQUEST);

    let listed: DiaryResponse = client
        .get(format!("{base}/api/diary"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.entries.len(), saved.entries.len());
    assert_eq!(listed.streak, saved.streak);
}

#[tokio::test]
async fn http_chat_failure_is_reported_in_band() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;
    signup_fresh(&client, base).await;

    let messages: Vec<ChatMessage> = client
        .post(format!("{base}/api/chat"))
        .json(&serde_json::json!({ "text": "hello there" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let reply = messages.last().unwrap();
    assert_eq!(reply.sender, "ai");
    assert!(reply.text.starts_with("Sorry, I'm having trouble connecting"));
    let sent = &messages[messages.len() - 2];
    assert_eq!(sent.sender, "user");
    assert_eq!(sent.text, "hello there");
}

#[tokio::test]
async fn http_directory_cards_and_video_filter() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();
    let base = &server.base_url;
    signup_fresh(&client, base).await;

    let therapists: Vec<TherapistCard> = client
        .get(format!("{base}/api/therapists"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(!therapists.is_empty());
    for therapist in &therapists {
        assert_eq!(therapist.stars, therapist.rating.floor() as u8);
    }

    let all: VideosResponse = client
        .get(format!("{base}/api/videos"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let yoga: VideosResponse = client
        .get(format!("{base}/api/videos?type=yoga"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(yoga.videos.len() < all.videos.len());
    assert!(yoga.videos.iter().all(|video| video.kind == "yoga"));
    for video in &all.videos {
        assert_eq!(
            video.embed_url,
            format!("https://www.youtube.com/embed/{}", video.embed_id)
        );
    }
}
