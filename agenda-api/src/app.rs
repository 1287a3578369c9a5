//! Application state and router builder
//!
//! ```no_run
//! use std::sync::Arc;
//! use agenda_api::{app::{build_router, AppState}, config::Config};
//! use agenda_shared::store::MemoryStore;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
//! let app = build_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3001").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use agenda_shared::auth::authorization::policy_from_name;
use agenda_shared::auth::middleware::{jwt_auth_middleware, AuthError};
use agenda_shared::auth::{AccessPolicy, AuthService};
use agenda_shared::models::{Category, Habit, Reminder, Resource, Subtask, Task, User};
use agenda_shared::repository::Repository;
use agenda_shared::store::DocumentStore;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::routes::{self, crud};

/// Shared application state, cloned into every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,

    /// Ownership rules for tasks, habits and reminders
    pub policy: Arc<dyn AccessPolicy>,

    pub auth: AuthService,

    pub config: Arc<Config>,
}

impl AppState {
    /// Fails only if `config.access_policy` names no known policy.
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> anyhow::Result<Self> {
        let policy = policy_from_name(&config.access_policy).ok_or_else(|| {
            anyhow::anyhow!("unknown access policy '{}'", config.access_policy)
        })?;

        Ok(Self {
            auth: AuthService::new(Arc::clone(&store), config.jwt.secret.as_str()),
            store,
            policy,
            config: Arc::new(config),
        })
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    pub fn repo<R: Resource>(&self) -> Repository<R> {
        Repository::new(Arc::clone(&self.store))
    }
}

/// Builds the complete router
///
/// ```text
/// /                          service banner
/// /health                    health check
/// {base}/auth/login          POST
/// {base}/users               POST public; everything else needs a token
/// {base}/categories          public
/// {base}/subtasks            public
/// {base}/tasks               token required under the "owner" policy
/// {base}/tasks/:id/subtasks  subtasks of one task
/// {base}/habits              token required under the "owner" policy
/// {base}/reminders           token required under the "owner" policy
/// ```
///
/// Every resource also has `GET /search`, `GET /:id`, `PUT /:id` and
/// `DELETE /:id`. Unmatched paths and unsupported methods answer
/// `404 {"error": "Ruta no encontrada"}`.
pub fn build_router(state: AppState) -> Router {
    let protect_owned = state.policy.requires_authentication();

    let auth_routes = Router::new().route("/login", post(routes::auth::login));

    let user_routes = Router::new()
        .route("/", get(crud::list::<User>))
        .route("/search", get(crud::search::<User>))
        .route(
            "/:id",
            get(crud::get_one::<User>)
                .put(routes::users::update)
                .delete(crud::delete::<User>),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .route("/", post(routes::users::create));

    let category_routes = Router::new()
        .route(
            "/",
            get(crud::list::<Category>).post(routes::categories::create),
        )
        .route("/search", get(crud::search::<Category>))
        .route(
            "/:id",
            get(crud::get_one::<Category>)
                .put(crud::update::<Category>)
                .delete(crud::delete::<Category>),
        );

    let subtask_routes = Router::new()
        .route("/", get(crud::list::<Subtask>).post(routes::subtasks::create))
        .route("/search", get(crud::search::<Subtask>))
        .route(
            "/:id",
            get(crud::get_one::<Subtask>)
                .put(crud::update::<Subtask>)
                .delete(crud::delete::<Subtask>),
        );

    let task_routes = Router::new()
        .route("/", get(crud::list::<Task>).post(routes::tasks::create))
        .route("/search", get(crud::search::<Task>))
        .route(
            "/:id",
            get(crud::get_one::<Task>)
                .put(crud::update::<Task>)
                .delete(crud::delete::<Task>),
        )
        .route("/:id/subtasks", get(routes::tasks::subtasks));

    let habit_routes = Router::new()
        .route("/", get(crud::list::<Habit>).post(routes::habits::create))
        .route("/search", get(crud::search::<Habit>))
        .route(
            "/:id",
            get(crud::get_one::<Habit>)
                .put(crud::update::<Habit>)
                .delete(crud::delete::<Habit>),
        );

    let reminder_routes = Router::new()
        .route("/", get(crud::list::<Reminder>).post(routes::reminders::create))
        .route("/search", get(crud::search::<Reminder>))
        .route(
            "/:id",
            get(crud::get_one::<Reminder>)
                .put(crud::update::<Reminder>)
                .delete(crud::delete::<Reminder>),
        );

    let (task_routes, habit_routes, reminder_routes) = if protect_owned {
        let layer = || middleware::from_fn_with_state(state.clone(), require_auth);
        (
            task_routes.route_layer(layer()),
            habit_routes.route_layer(layer()),
            reminder_routes.route_layer(layer()),
        )
    } else {
        (task_routes, habit_routes, reminder_routes)
    };

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/categories", category_routes)
        .nest("/subtasks", subtask_routes)
        .nest("/tasks", task_routes)
        .nest("/habits", habit_routes)
        .nest("/reminders", reminder_routes);

    let base_path = state.config.api.base_path.clone();
    let mut router = Router::new()
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health_check));

    router = if base_path.is_empty() {
        router.merge(api_routes)
    } else {
        router.nest(&base_path, api_routes)
    };

    // A known path with the wrong method is reported like an unknown path
    let mut router = router
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found);

    if !state.config.api.production {
        router = router.layer(middleware::from_fn(
            crate::middleware::logging::log_requests,
        ));
    }

    let cors = cors_layer(&state.config.api.cors_origins);

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Bearer check; on success the handler can extract `AuthUser`.
async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    jwt_auth_middleware(state.jwt_secret(), req, next).await
}
