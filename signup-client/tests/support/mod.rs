// signup-client/tests/support/mod.rs
//! In-process backend speaking the activities API, for end-to-end tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use actix_web::{delete, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use common::models::{Activity, Catalog};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use signup_client::{
    ActivityRepository, ApiUrls, AuthGateway, FileStorage, ReqwestTransport, SessionStore,
    TokenStorage, ViewController,
};

pub const TEACHER_EMAIL: &str = "mrodriguez@mergington.edu";
pub const TEACHER_NAME: &str = "Mr. Rodriguez";
pub const TEACHER_PASSWORD: &str = "art123";
const SECRET: &[u8] = b"test-secret";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

fn issue_token(email: &str) -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as usize;
    let claims = Claims {
        sub: email.to_string(),
        iat: now,
        exp: now + 86400,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

fn email_from_token(token: &str) -> Option<String> {
    decode::<Claims>(token, &DecodingKey::from_secret(SECRET), &Validation::new(Algorithm::HS256))
        .ok()
        .map(|data| data.claims.sub)
}

pub struct BackendState {
    pub catalog: Mutex<Catalog>,
    teachers: HashMap<String, (String, String)>,
    pub hits: AtomicUsize,
}

impl BackendState {
    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn admin(&self, req: &HttpRequest) -> Result<String, HttpResponse> {
        let token = req
            .headers()
            .get("Authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                HttpResponse::Unauthorized().json(json!({"detail": "Authentication required"}))
            })?;
        let email = email_from_token(token)
            .ok_or_else(|| HttpResponse::Unauthorized().json(json!({"detail": "Invalid token"})))?;
        if !self.teachers.contains_key(&email) {
            return Err(HttpResponse::Forbidden().json(json!({"detail": "Admin access required"})));
        }
        Ok(email)
    }
}

#[derive(Deserialize)]
struct LoginForm {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

#[post("/login")]
async fn login(form: web::Form<LoginForm>, state: web::Data<BackendState>) -> impl Responder {
    state.hit();
    match state.teachers.get(&form.email) {
        Some((name, password)) if *password == form.password => HttpResponse::Ok().json(json!({
            "token": issue_token(&form.email),
            "user": {"email": form.email, "name": name}
        })),
        _ => HttpResponse::Unauthorized().json(json!({"detail": "Invalid credentials"})),
    }
}

#[get("/verify-token")]
async fn verify_token(req: HttpRequest, state: web::Data<BackendState>) -> impl Responder {
    state.hit();
    match state.admin(&req) {
        Ok(email) => {
            let name = &state.teachers[&email].0;
            HttpResponse::Ok().json(json!({"valid": true, "user": {"email": email, "name": name}}))
        }
        Err(response) => response,
    }
}

#[get("/activities")]
async fn activities(state: web::Data<BackendState>) -> impl Responder {
    state.hit();
    let catalog = state.catalog.lock().unwrap();
    HttpResponse::Ok().json(&*catalog)
}

#[post("/activities/{name}/signup")]
async fn signup(
    req: HttpRequest,
    path: web::Path<(String,)>,
    query: web::Query<EmailQuery>,
    state: web::Data<BackendState>,
) -> impl Responder {
    state.hit();
    if let Err(response) = state.admin(&req) {
        return response;
    }
    let name = &path.0;
    let mut catalog = state.catalog.lock().unwrap();
    let Some(activity) = catalog.get_mut(name) else {
        return HttpResponse::NotFound().json(json!({"detail": "Activity not found"}));
    };
    if activity.participants.contains(&query.email) {
        return HttpResponse::BadRequest().json(json!({"detail": "Student is already signed up"}));
    }
    if activity.participants.len() >= activity.max_participants as usize {
        return HttpResponse::BadRequest().json(json!({"detail": "Activity is full"}));
    }
    activity.participants.push(query.email.clone());
    HttpResponse::Ok().json(json!({"message": format!("Signed up {} for {}", query.email, name)}))
}

#[delete("/activities/{name}/unregister")]
async fn unregister(
    req: HttpRequest,
    path: web::Path<(String,)>,
    query: web::Query<EmailQuery>,
    state: web::Data<BackendState>,
) -> impl Responder {
    state.hit();
    if let Err(response) = state.admin(&req) {
        return response;
    }
    let name = &path.0;
    let mut catalog = state.catalog.lock().unwrap();
    let Some(activity) = catalog.get_mut(name) else {
        return HttpResponse::NotFound().json(json!({"detail": "Activity not found"}));
    };
    let Some(position) = activity.participants.iter().position(|p| *p == query.email) else {
        return HttpResponse::BadRequest()
            .json(json!({"detail": "Student is not signed up for this activity"}));
    };
    activity.participants.remove(position);
    HttpResponse::Ok().json(json!({"message": format!("Unregistered {} from {}", query.email, name)}))
}

fn seed_catalog() -> Catalog {
    vec![
        Activity {
            name: "Chess Club".to_string(),
            description: "Learn strategies and compete in chess tournaments".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 2,
            participants: vec!["michael@mergington.edu".to_string()],
        },
        Activity {
            name: "Debate Team".to_string(),
            description: "Develop public speaking and argumentation skills".to_string(),
            schedule: "Fridays, 4:00 PM - 5:30 PM".to_string(),
            max_participants: 12,
            participants: vec![],
        },
    ]
    .into_iter()
    .collect()
}

/// A running mock backend
pub struct Backend {
    pub base_url: String,
    pub state: web::Data<BackendState>,
}

impl Backend {
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn participants(&self, activity: &str) -> Vec<String> {
        self.state.catalog.lock().unwrap().get(activity).unwrap().participants.clone()
    }
}

pub fn spawn_backend() -> Backend {
    let mut teachers = HashMap::new();
    teachers.insert(
        TEACHER_EMAIL.to_string(),
        (TEACHER_NAME.to_string(), TEACHER_PASSWORD.to_string()),
    );
    let state = web::Data::new(BackendState {
        catalog: Mutex::new(seed_catalog()),
        teachers,
        hits: AtomicUsize::new(0),
    });

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .service(login)
            .service(verify_token)
            .service(activities)
            .service(signup)
            .service(unregister)
    })
    .workers(1)
    .listen(listener)
    .expect("Failed to listen")
    .run();
    tokio::spawn(server);

    Backend {
        base_url: format!("http://127.0.0.1:{}", port),
        state,
    }
}

/// Base URL nothing listens on
pub fn dead_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

pub fn file_storage(dir: &tempfile::TempDir) -> Arc<FileStorage> {
    Arc::new(FileStorage::new(dir.path().join("storage.json")))
}

pub fn controller(base_url: &str, storage: Arc<dyn TokenStorage>) -> ViewController {
    let urls = ApiUrls::new(base_url).unwrap();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();
    let transport = Arc::new(ReqwestTransport::with_client(client));
    ViewController::new(
        SessionStore::new(storage, "authToken"),
        AuthGateway::new(transport.clone(), urls.clone()),
        ActivityRepository::new(transport, urls),
        Duration::from_secs(5),
    )
}
