//! Router tests driven through `tower::ServiceExt::oneshot` with fake services.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bytes_body::read_json;
use chrono::Utc;
use jobboard_config::{SecurityConfig, ServerConfig};
use jobboard_core::{
    JobBoardError, JobBoardResult, JobFilter, JobId, Page, PageRequest, Profile, User, UserId, UserRole,
};
use jobboard_rest::controllers::HealthProbe;
use jobboard_rest::middleware::AuthMiddlewareState;
use jobboard_rest::{build_router, AppState};
use jobboard_security::{Claims, TokenProvider, TokenProviderInterface};
use jobboard_service::{
    ApplyResponse, AuthResponse, AuthService, ChangePasswordRequest, CreateJobRequest, CreateUserRequest,
    JobDetailResponse, JobResponse, JobService, LoginRequest, ResumeService, UpdateJobRequest, UpdateUserRequest,
    UserResponse, UserService,
};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

mod bytes_body {
    use http_body_util::BodyExt;

    pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }
}

fn user_response(role: UserRole) -> UserResponse {
    UserResponse::from(User::new(
        "Ann".to_string(),
        "ann@example.com".to_string(),
        role,
        "hash".to_string(),
    ))
}

struct FakeUserService;

#[async_trait]
impl UserService for FakeUserService {
    async fn create_user(&self, request: CreateUserRequest) -> JobBoardResult<UserResponse> {
        if request.email == "taken@example.com" {
            return Err(JobBoardError::EmailConflict(request.email));
        }
        Ok(user_response(request.user_type))
    }

    async fn validate_login(&self, _email: &str, _password: &str) -> JobBoardResult<User> {
        Err(JobBoardError::InvalidCredentials)
    }

    async fn get_all_applicants(&self, page: PageRequest) -> JobBoardResult<Page<UserResponse>> {
        Ok(Page::new(vec![user_response(UserRole::Applicant)], page, 1))
    }

    async fn get_applicant_with_profile(&self, id: UserId) -> JobBoardResult<UserResponse> {
        Err(JobBoardError::not_found("Applicant", id))
    }

    async fn update_user(&self, _id: UserId, _request: UpdateUserRequest) -> JobBoardResult<UserResponse> {
        Ok(user_response(UserRole::Applicant))
    }

    async fn change_password(&self, _id: UserId, _request: ChangePasswordRequest) -> JobBoardResult<()> {
        Ok(())
    }

    async fn delete_user(&self, _id: UserId) -> JobBoardResult<()> {
        Ok(())
    }
}

struct FakeAuthService;

#[async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, request: LoginRequest) -> JobBoardResult<AuthResponse> {
        if request.password != "secret" {
            return Err(JobBoardError::InvalidCredentials);
        }
        Ok(AuthResponse {
            access_token: "token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
            user: user_response(UserRole::Applicant),
        })
    }

    async fn validate_token(&self, _token: &str) -> JobBoardResult<Claims> {
        Err(JobBoardError::InvalidToken("unused".to_string()))
    }
}

#[derive(Default)]
struct FakeJobService {
    last_query: Mutex<Option<(JobFilter, PageRequest)>>,
    applied: Mutex<Vec<(JobId, UserId)>>,
}

fn job_response(posted_by: UserId) -> JobResponse {
    let now = Utc::now();
    JobResponse {
        id: JobId::new(),
        title: "Rust engineer".to_string(),
        description: "Build services".to_string(),
        company_name: "Acme".to_string(),
        posted_on: now,
        total_applications: 0,
        posted_by_id: posted_by,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl JobService for FakeJobService {
    async fn list_jobs(&self, filter: JobFilter, page: PageRequest) -> JobBoardResult<Page<JobResponse>> {
        *self.last_query.lock().unwrap() = Some((filter, page));
        Ok(Page::new(vec![job_response(UserId::new())], page, 1))
    }

    async fn get_job_with_applicants(&self, id: JobId) -> JobBoardResult<JobDetailResponse> {
        Err(JobBoardError::not_found("Job", id))
    }

    async fn create_job(&self, posted_by: UserId, request: CreateJobRequest) -> JobBoardResult<JobResponse> {
        let mut job = job_response(posted_by);
        job.title = request.title;
        Ok(job)
    }

    async fn apply_to_job(&self, job_id: JobId, user_id: UserId) -> JobBoardResult<ApplyResponse> {
        let mut applied = self.applied.lock().unwrap();
        if applied.contains(&(job_id, user_id)) {
            return Err(JobBoardError::already_applied(job_id, user_id));
        }
        applied.push((job_id, user_id));
        Ok(ApplyResponse {
            job_id,
            total_applications: i32::try_from(applied.len()).unwrap(),
        })
    }

    async fn update_job(&self, id: JobId, _request: UpdateJobRequest) -> JobBoardResult<JobResponse> {
        Err(JobBoardError::not_found("Job", id))
    }

    async fn delete_job(&self, _id: JobId) -> JobBoardResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct FakeResumeService {
    uploads: Mutex<Vec<(Option<String>, usize)>>,
}

#[async_trait]
impl ResumeService for FakeResumeService {
    async fn process_resume(
        &self,
        user_id: UserId,
        file_name: Option<String>,
        document: axum::body::Bytes,
    ) -> JobBoardResult<Profile> {
        if document.is_empty() {
            return Err(JobBoardError::validation("resume file is empty"));
        }
        self.uploads.lock().unwrap().push((file_name.clone(), document.len()));
        let mut profile = Profile::new(user_id);
        profile.resume_file_name = file_name;
        Ok(profile)
    }

    async fn get_resume_data(&self, user_id: UserId) -> JobBoardResult<Profile> {
        Err(JobBoardError::not_found("Profile", user_id))
    }
}

struct FailingProbe {
    critical: bool,
}

#[async_trait]
impl HealthProbe for FailingProbe {
    fn component(&self) -> &'static str {
        if self.critical {
            "database"
        } else {
            "cache"
        }
    }

    fn critical(&self) -> bool {
        self.critical
    }

    async fn check(&self) -> JobBoardResult<()> {
        Err(JobBoardError::Cache("down".to_string()))
    }
}

struct TestApp {
    router: Router,
    tokens: Arc<TokenProvider>,
    jobs: Arc<FakeJobService>,
    resumes: Arc<FakeResumeService>,
}

impl TestApp {
    fn new() -> Self {
        Self::with_probes(Vec::new())
    }

    fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let tokens = Arc::new(TokenProvider::new(Arc::new(SecurityConfig {
            jwt_secret: "rest-test-secret-that-is-long-enough-to-use".to_string(),
            ..SecurityConfig::default()
        })));
        let jobs = Arc::new(FakeJobService::default());
        let resumes = Arc::new(FakeResumeService::default());

        let state = AppState::new(
            Arc::new(FakeUserService),
            Arc::new(FakeAuthService),
            jobs.clone(),
            resumes.clone(),
        )
        .with_probes(probes);

        let router = build_router(state, AuthMiddlewareState::new(tokens.clone()), &ServerConfig::default());
        Self {
            router,
            tokens,
            jobs,
            resumes,
        }
    }

    fn token(&self, role: UserRole) -> (UserId, String) {
        let id = UserId::new();
        let issued = self.tokens.issue(id, "someone@example.com", role).unwrap();
        (id, issued.access_token)
    }

    async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn signup_returns_created_envelope() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/signup",
            None,
            serde_json::json!({ "name": "Ann", "email": "ann@example.com", "password": "secret" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user_type"], "APPLICANT");
    assert!(json["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn signup_conflict_maps_to_409() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/signup",
            None,
            serde_json::json!({ "name": "Ann", "email": "taken@example.com", "password": "secret" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = read_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "EMAIL_CONFLICT");
}

#[tokio::test]
async fn login_failure_is_generic_401() {
    let app = TestApp::new();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/login",
            None,
            serde_json::json!({ "email": "ann@example.com", "password": "wrong" }),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = read_json(response).await;
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn jobs_require_a_token() {
    let app = TestApp::new();

    let response = app.send(get("/api/v1/jobs", None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.send(get("/api/v1/jobs", Some("garbage"))).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_jobs_passes_normalized_query() {
    let app = TestApp::new();
    let (_, token) = app.token(UserRole::Applicant);

    let response = app
        .send(get(
            "/api/v1/jobs?title=%20Rust%20&company_name=&page=2&page_size=500",
            Some(&token),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let (filter, page) = app.jobs.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(filter.title.as_deref(), Some("Rust"));
    assert!(filter.company_name.is_none());
    assert_eq!(page, PageRequest::new(2, PageRequest::MAX_SIZE));

    let json = read_json(response).await;
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["total_pages"], 1);
}

#[tokio::test]
async fn apply_is_applicant_only_and_once() {
    let app = TestApp::new();
    let job_id = JobId::new();
    let uri = format!("/api/v1/jobs/{job_id}/apply");

    let (_, admin) = app.token(UserRole::Admin);
    let response = app.send(json_request(Method::POST, &uri, Some(&admin), serde_json::json!({}))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let (applicant_id, applicant) = app.token(UserRole::Applicant);
    let response = app
        .send(json_request(Method::POST, &uri, Some(&applicant), serde_json::json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .send(json_request(Method::POST, &uri, Some(&applicant), serde_json::json!({})))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(read_json(response).await["error"]["code"], "ALREADY_APPLIED");
    assert_eq!(*app.jobs.applied.lock().unwrap(), vec![(job_id, applicant_id)]);
}

#[tokio::test]
async fn bad_path_id_is_400() {
    let app = TestApp::new();
    let (_, token) = app.token(UserRole::Applicant);

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/jobs/not-a-uuid/apply",
            Some(&token),
            serde_json::json!({}),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_routes_reject_applicants() {
    let app = TestApp::new();
    let (_, applicant) = app.token(UserRole::Applicant);

    let job_uri = format!("/api/v1/admin/job/{}", JobId::new());
    for uri in ["/api/v1/admin/applicants", job_uri.as_str()] {
        let response = app.send(get(uri, Some(&applicant))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn admin_creates_job_with_validation() {
    let app = TestApp::new();
    let (admin_id, admin) = app.token(UserRole::Admin);

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/admin/job",
            Some(&admin),
            serde_json::json!({ "title": "Rust engineer", "description": "Build services", "company_name": "Acme" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = read_json(response).await;
    assert_eq!(json["data"]["posted_by_id"], admin_id.to_string());

    let response = app
        .send(json_request(
            Method::POST,
            "/api/v1/admin/job",
            Some(&admin),
            serde_json::json!({ "title": "x".repeat(300), "description": "d" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"]["details"][0]["field"], "title");
}

#[tokio::test]
async fn admin_lists_applicants() {
    let app = TestApp::new();
    let (_, admin) = app.token(UserRole::Admin);

    let response = app.send(get("/api/v1/admin/applicants?page=1&page_size=5", Some(&admin))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["page_size"], 5);
    assert_eq!(json["data"]["data"].as_array().unwrap().len(), 1);
}

fn multipart_request(token: &str, field: &str, content: &[u8]) -> Request<Body> {
    let boundary = "jobboard-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"cv.pdf\"\r\n").as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/uploadResume")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={boundary}"))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn upload_resume_reads_resume_field() {
    let app = TestApp::new();
    let (_, token) = app.token(UserRole::Applicant);

    let response = app.send(multipart_request(&token, "resume", b"%PDF-1.4 body")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = read_json(response).await;
    assert_eq!(json["data"]["resume_file_name"], "cv.pdf");
    assert_eq!(*app.resumes.uploads.lock().unwrap(), vec![(Some("cv.pdf".to_string()), 13)]);
}

#[tokio::test]
async fn upload_resume_without_field_is_400() {
    let app = TestApp::new();
    let (_, token) = app.token(UserRole::Applicant);

    let response = app.send(multipart_request(&token, "document", b"%PDF")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.resumes.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_components() {
    let app = TestApp::with_probes(vec![Arc::new(FailingProbe { critical: false })]);
    let response = app.send(get("/api/v1/health", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "degraded");

    let app = TestApp::with_probes(vec![Arc::new(FailingProbe { critical: true })]);
    let response = app.send(get("/api/v1/health", None)).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(response).await["status"], "unhealthy");
}
