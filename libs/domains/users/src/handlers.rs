use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    JwtAuth, JwtClaims, ValidatedJson, ACCESS_TOKEN_TTL,
};
use utoipa::OpenApi;

use crate::error::UserError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "auth";

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(
        schemas(RegisterRequest, LoginRequest, LoginResponse, UserResponse),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ConflictResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Registration and authentication endpoints")
    )
)]
pub struct ApiDoc;

/// Application state for auth handlers
pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt_auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            jwt_auth: self.jwt_auth.clone(),
        }
    }
}

/// Public auth endpoints (no token required)
pub fn router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state)
}

/// Endpoints requiring authentication (the app layers jwt middleware on top)
pub fn me_router<R: UserRepository + 'static>(state: AuthState<R>) -> Router {
    Router::new().route("/me", get(me)).with_state(state)
}

fn is_development() -> bool {
    std::env::var("APP_ENV")
        .map(|env| env == "development")
        .unwrap_or_else(|_| cfg!(debug_assertions))
}

/// Issue a token for the user and build the login response with cookie
fn token_response<R: UserRepository>(
    state: &AuthState<R>,
    user: crate::models::User,
    status: StatusCode,
) -> Result<Response, UserError> {
    let access_token = state
        .jwt_auth
        .create_access_token(&user.id.to_string(), &user.email, &user.name, &user.roles)
        .map_err(|e| {
            tracing::error!("Failed to create access token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    let secure_flag = if is_development() { "" } else { " Secure;" };
    let access_cookie = format!(
        "access_token={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        access_token, secure_flag, ACCESS_TOKEN_TTL
    );
    let access_cookie_header = HeaderValue::from_str(&access_cookie)
        .map_err(|e| UserError::Internal(format!("Failed to create cookie: {}", e)))?;

    let response = LoginResponse {
        user: user.into(),
        access_token,
    };

    Ok((
        status,
        AppendHeaders([(header::SET_COOKIE, access_cookie_header)]),
        Json(response),
    )
        .into_response())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> Result<Response, UserError> {
    let email = input.email.clone();
    let password = input.password.clone();

    state.service.register(input).await?;

    // Fetch the full user back for token creation
    let user = state
        .service
        .verify_credentials(&email, &password)
        .await?;

    token_response(&state, user, StatusCode::CREATED)
}

/// Login with email/password
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> Result<Response, UserError> {
    let user = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    token_response(&state, user, StatusCode::OK)
}

/// Get the currently authenticated user
#[utoipa::path(
    get,
    path = "/me",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    Extension(claims): Extension<JwtClaims>,
) -> Result<Json<UserResponse>, UserError> {
    let user_id = claims
        .user_id()
        .map_err(|e| UserError::Internal(format!("Malformed token subject: {}", e)))?;

    let user = state.service.get_user(user_id).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;
    use axum_helpers::JwtConfig;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> AuthState<InMemoryUserRepository> {
        AuthState {
            service: UserService::new(InMemoryUserRepository::new()),
            jwt_auth: JwtAuth::new(&JwtConfig::new("test-secret")),
        }
    }

    fn register_body() -> String {
        serde_json::json!({
            "name": "Alice",
            "email": "alice@example.com",
            "password": "long-enough-pw"
        })
        .to_string()
    }

    async fn send_json(
        router: Router,
        method: &str,
        uri: &str,
        body: String,
    ) -> (StatusCode, serde_json::Value) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_register_returns_created_with_token() {
        let app = router(test_state());

        let (status, body) = send_json(app, "POST", "/register", register_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let app = router(test_state());

        let body = serde_json::json!({
            "name": "Alice",
            "email": "not-an-email",
            "password": "long-enough-pw"
        })
        .to_string();

        let (status, _) = send_json(app, "POST", "/register", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_after_register() {
        let state = test_state();
        let app = router(state.clone());

        let (status, _) = send_json(app.clone(), "POST", "/register", register_body()).await;
        assert_eq!(status, StatusCode::CREATED);

        let login_body = serde_json::json!({
            "email": "alice@example.com",
            "password": "long-enough-pw"
        })
        .to_string();

        let (status, body) = send_json(app, "POST", "/login", login_body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let state = test_state();
        let app = router(state.clone());

        send_json(app.clone(), "POST", "/register", register_body()).await;

        let login_body = serde_json::json!({
            "email": "alice@example.com",
            "password": "wrong-password!"
        })
        .to_string();

        let (status, _) = send_json(app, "POST", "/login", login_body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
