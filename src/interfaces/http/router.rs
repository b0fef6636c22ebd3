//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AccountService;
use crate::domain::TokenIssuer;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::middleware::{auth_middleware, require_admin, AuthState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::users::{self, AccountHandlerState};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token from /api/v1/users/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::register,
        users::login,
        users::list_accounts,
        users::get_account,
        users::block_account,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            users::AccountDto,
            users::RegisterRequest,
            users::LoginRequest,
            users::LoginResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Accounts", description = "Registration, login and account administration"),
    ),
    info(
        title = "Account Service API",
        version = "1.0.0",
        description = "REST API for user accounts: registration, JWT login, profile lookup and blocking",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Everything the router needs from the running service
#[derive(Clone)]
pub struct RouterDeps {
    pub accounts: Arc<AccountService>,
    pub tokens: Arc<dyn TokenIssuer>,
    /// `None` when accounts are kept in memory
    pub db: Option<DatabaseConnection>,
    /// `None` disables `GET /metrics`
    pub metrics: Option<PrometheusHandle>,
}

/// Create the API router with all routes
pub fn create_api_router(deps: RouterDeps) -> Router {
    let auth_state = AuthState {
        tokens: deps.tokens.clone(),
    };
    let account_state = AccountHandlerState {
        accounts: deps.accounts.clone(),
    };

    // Public
    let public_routes = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login));

    // Bearer + ADMIN role
    let admin_routes = Router::new()
        .route("/", get(users::list_accounts))
        .route_layer(middleware::from_fn(require_admin));

    // Bearer
    let protected_routes = Router::new()
        .route("/{id}", get(users::get_account))
        .route("/{id}/block", patch(users::block_account))
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let account_routes = public_routes
        .merge(protected_routes)
        .with_state(account_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: deps.db,
            started_at: Arc::new(Instant::now()),
        });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/users", account_routes);

    if let Some(handle) = deps.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, Response, StatusCode};
    use serde_json::{json, Value};
    use tower::Service;

    use crate::domain::RegisterAccountDto;
    use crate::infrastructure::crypto::{BcryptHasher, JwtConfig, JwtTokenIssuer};
    use crate::infrastructure::storage::InMemoryAccountRepository;

    struct TestApp {
        router: Router,
        accounts: Arc<AccountService>,
    }

    fn test_app() -> TestApp {
        let tokens: Arc<dyn TokenIssuer> = Arc::new(
            JwtTokenIssuer::new(&JwtConfig::new("router-test-secret", "account-service"))
                .unwrap(),
        );
        let accounts = Arc::new(AccountService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(BcryptHasher::new(4)),
            tokens.clone(),
        ));
        let router = create_api_router(RouterDeps {
            accounts: accounts.clone(),
            tokens,
            db: None,
            metrics: None,
        });
        TestApp { router, accounts }
    }

    impl TestApp {
        async fn send(&self, req: Request<Body>) -> Response<Body> {
            let mut svc = self.router.clone().into_service();
            svc.call(req).await.unwrap()
        }

        async fn post_json(&self, uri: &str, body: Value) -> Response<Body> {
            let req = Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap();
            self.send(req).await
        }

        async fn authed(&self, method: &str, uri: &str, token: &str) -> Response<Body> {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap();
            self.send(req).await
        }

        async fn register(&self, email: &str) -> Value {
            let resp = self
                .post_json(
                    "/api/v1/users/register",
                    json!({
                        "fullName": "Test User",
                        "birthDate": "2000-01-01",
                        "email": email,
                        "password": "password123"
                    }),
                )
                .await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            body_json(resp).await["data"].clone()
        }

        async fn login(&self, email: &str, password: &str) -> Response<Body> {
            self.post_json(
                "/api/v1/users/login",
                json!({ "email": email, "password": password }),
            )
            .await
        }

        async fn token(&self, email: &str, password: &str) -> String {
            let resp = self.login(email, password).await;
            assert_eq!(resp.status(), StatusCode::OK);
            body_json(resp).await["data"]["token"]
                .as_str()
                .unwrap()
                .to_string()
        }

        async fn seed_admin(&self) -> String {
            self.accounts
                .ensure_admin(RegisterAccountDto {
                    full_name: "Admin User".to_string(),
                    birth_date: "1980-01-01".to_string(),
                    email: "admin@example.com".to_string(),
                    password: "admin123".to_string(),
                })
                .await
                .unwrap()
                .unwrap();
            self.token("admin@example.com", "admin123").await
        }
    }

    async fn body_json(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ── register / login ────────────────────────────────────────

    #[tokio::test]
    async fn register_returns_201_with_public_fields_only() {
        let app = test_app();
        let account = app.register("new@example.com").await;

        assert_eq!(account["email"], "new@example.com");
        assert_eq!(account["fullName"], "Test User");
        assert_eq!(account["birthDate"], "2000-01-01");
        assert_eq!(account["role"], "USER");
        assert_eq!(account["status"], "ACTIVE");
        assert!(account.get("passwordHash").is_none());
        assert!(account.get("password").is_none());
    }

    #[tokio::test]
    async fn requested_admin_role_still_registers_a_user() {
        let app = test_app();
        let resp = app
            .post_json(
                "/api/v1/users/register",
                json!({
                    "fullName": "Hopeful Admin",
                    "birthDate": "1995-03-03",
                    "email": "hopeful@example.com",
                    "password": "password123",
                    "role": "ADMIN"
                }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["role"], "USER");

        let id = body["data"]["id"].as_str().unwrap();
        let stored = app.accounts.get_by_id(id, id).await.unwrap();
        assert_eq!(stored.role, crate::domain::AccountRole::User);
    }

    #[tokio::test]
    async fn duplicate_email_is_400() {
        let app = test_app();
        app.register("dup@example.com").await;

        let resp = app
            .post_json(
                "/api/v1/users/register",
                json!({
                    "fullName": "Other",
                    "birthDate": "1999-09-09",
                    "email": "dup@example.com",
                    "password": "another1"
                }),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Email already in use");
    }

    #[tokio::test]
    async fn invalid_register_payloads_are_400() {
        let app = test_app();
        let payloads = [
            json!({"fullName": "", "birthDate": "2000-01-01", "email": "a@example.com", "password": "secret1"}),
            json!({"fullName": "A", "birthDate": "invalid", "email": "a@example.com", "password": "secret1"}),
            json!({"fullName": "A", "birthDate": "2000-01-01", "email": "not-an-email", "password": "secret1"}),
            json!({"fullName": "A", "birthDate": "2000-01-01", "email": "a@example.com", "password": "123"}),
            json!({"fullName": "A", "birthDate": "2000-01-01", "email": "a@example.com", "password": "secret1", "role": "ROOT"}),
            json!({"fullName": "A", "birthDate": "2000-01-01", "email": "a@example.com", "password": "secret1", "nickname": "a"}),
            json!({"fullName": "A"}),
        ];

        for payload in payloads {
            let resp = app.post_json("/api/v1/users/register", payload).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(body_json(resp).await["success"], false);
        }
    }

    #[tokio::test]
    async fn login_returns_bearer_token() {
        let app = test_app();
        app.register("login@example.com").await;

        let resp = app.login("login@example.com", "password123").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["tokenType"], "Bearer");
        assert_eq!(body["data"]["expiresIn"], 3600);
        assert!(body["data"]["token"].as_str().unwrap().len() > 20);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_401() {
        let app = test_app();
        app.register("known@example.com").await;

        let wrong = app.login("known@example.com", "wrong-pass").await;
        let unknown = app.login("nobody@example.com", "password123").await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(wrong).await, body_json(unknown).await);
    }

    // ── bearer middleware ───────────────────────────────────────

    #[tokio::test]
    async fn protected_routes_require_a_valid_bearer_token() {
        let app = test_app();
        let account = app.register("me@example.com").await;
        let uri = format!("/api/v1/users/{}", account["id"].as_str().unwrap());

        let missing = Request::builder().uri(&uri).body(Body::empty()).unwrap();
        assert_eq!(app.send(missing).await.status(), StatusCode::UNAUTHORIZED);

        let basic = Request::builder()
            .uri(&uri)
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        assert_eq!(app.send(basic).await.status(), StatusCode::UNAUTHORIZED);

        let garbage = app.authed("GET", &uri, "not.a.jwt").await;
        assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_401() {
        let app = test_app();
        let account = app.register("exp@example.com").await;
        let id = account["id"].as_str().unwrap();

        let issuer =
            JwtTokenIssuer::new(&JwtConfig::new("router-test-secret", "account-service")).unwrap();
        let token = issuer
            .issue(
                &crate::domain::IdentityClaims {
                    subject_id: id.to_string(),
                    role: crate::domain::AccountRole::User,
                },
                chrono::Duration::hours(-2),
            )
            .unwrap();

        let resp = app
            .authed("GET", &format!("/api/v1/users/{}", id), &token)
            .await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(resp).await["error"], "Token has expired");
    }

    // ── get by id ───────────────────────────────────────────────

    #[tokio::test]
    async fn user_reads_self_but_not_others() {
        let app = test_app();
        let me = app.register("me@example.com").await;
        let other = app.register("other@example.com").await;
        let token = app.token("me@example.com", "password123").await;

        let own = app
            .authed("GET", &format!("/api/v1/users/{}", me["id"].as_str().unwrap()), &token)
            .await;
        assert_eq!(own.status(), StatusCode::OK);
        assert_eq!(body_json(own).await["data"]["email"], "me@example.com");

        let foreign = app
            .authed(
                "GET",
                &format!("/api/v1/users/{}", other["id"].as_str().unwrap()),
                &token,
            )
            .await;
        assert_eq!(foreign.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn admin_reads_any_account_and_gets_404_for_missing() {
        let app = test_app();
        let user = app.register("u@example.com").await;
        let admin_token = app.seed_admin().await;

        let found = app
            .authed(
                "GET",
                &format!("/api/v1/users/{}", user["id"].as_str().unwrap()),
                &admin_token,
            )
            .await;
        assert_eq!(found.status(), StatusCode::OK);

        let missing = app
            .authed("GET", "/api/v1/users/does-not-exist", &admin_token)
            .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    // ── list ────────────────────────────────────────────────────

    #[tokio::test]
    async fn listing_is_admin_only() {
        let app = test_app();
        app.register("u@example.com").await;
        let user_token = app.token("u@example.com", "password123").await;
        let admin_token = app.seed_admin().await;

        let refused = app.authed("GET", "/api/v1/users", &user_token).await;
        assert_eq!(refused.status(), StatusCode::FORBIDDEN);

        let listed = app.authed("GET", "/api/v1/users", &admin_token).await;
        assert_eq!(listed.status(), StatusCode::OK);
        let body = body_json(listed).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    // ── block ───────────────────────────────────────────────────

    #[tokio::test]
    async fn user_cannot_block_others() {
        let app = test_app();
        app.register("a@example.com").await;
        let b = app.register("b@example.com").await;
        let token = app.token("a@example.com", "password123").await;

        let resp = app
            .authed(
                "PATCH",
                &format!("/api/v1/users/{}/block", b["id"].as_str().unwrap()),
                &token,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let still_active = app.login("b@example.com", "password123").await;
        assert_eq!(still_active.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn admin_blocks_user_with_204() {
        let app = test_app();
        let user = app.register("u@example.com").await;
        let admin_token = app.seed_admin().await;

        let resp = app
            .authed(
                "PATCH",
                &format!("/api/v1/users/{}/block", user["id"].as_str().unwrap()),
                &admin_token,
            )
            .await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());

        let refused = app.login("u@example.com", "password123").await;
        assert_eq!(refused.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(refused).await["error"], "Account is blocked");
    }

    // ── end to end ──────────────────────────────────────────────

    #[tokio::test]
    async fn register_login_read_self_block_self_then_login_fails() {
        let app = test_app();
        let account = app.register("flow@example.com").await;
        let id = account["id"].as_str().unwrap().to_string();

        let token = app.token("flow@example.com", "password123").await;

        let me = app
            .authed("GET", &format!("/api/v1/users/{}", id), &token)
            .await;
        assert_eq!(me.status(), StatusCode::OK);
        assert_eq!(body_json(me).await["data"]["id"], id.as_str());

        let blocked = app
            .authed("PATCH", &format!("/api/v1/users/{}/block", id), &token)
            .await;
        assert_eq!(blocked.status(), StatusCode::NO_CONTENT);

        let login = app.login("flow@example.com", "password123").await;
        assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
    }

    // ── ambient routes ──────────────────────────────────────────

    #[tokio::test]
    async fn health_and_docs_are_public() {
        let app = test_app();

        let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let resp = app.send(health).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));

        let openapi = Request::builder()
            .uri("/api-doc/openapi.json")
            .body(Body::empty())
            .unwrap();
        let resp = app.send(openapi).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let doc = body_json(resp).await;
        assert!(doc["paths"]["/api/v1/users/register"].is_object());
    }
}
