#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use web_client::{ApiRequest, ApiResponse, ClientError, Transport, REFRESH_PATH};

#[ctor::ctor]
fn init_logging() {
    api_test_support::logging::init();
}

/// How the fake API answers `GET /auth/refresh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshBehavior {
    Succeed,
    Refuse,
}

/// In-process API double. Protected paths answer 401 until a refresh
/// succeeds; `/users` always answers 403.
pub struct FakeApi {
    session_valid: AtomicBool,
    refresh_behavior: RefreshBehavior,
    refresh_delay: Duration,
    pub refresh_calls: AtomicUsize,
    pub refresh_completed: AtomicUsize,
    pub protected_calls: AtomicUsize,
}

impl FakeApi {
    pub fn expired_session(refresh_behavior: RefreshBehavior) -> Self {
        Self {
            session_valid: AtomicBool::new(false),
            refresh_behavior,
            refresh_delay: Duration::from_millis(100),
            refresh_calls: AtomicUsize::new(0),
            refresh_completed: AtomicUsize::new(0),
            protected_calls: AtomicUsize::new(0),
        }
    }

    pub fn live_session() -> Self {
        let api = Self::expired_session(RefreshBehavior::Succeed);
        api.session_valid.store(true, Ordering::SeqCst);
        api
    }

    pub fn refreshes(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn protected(&self) -> usize {
        self.protected_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        if request.path == REFRESH_PATH {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.refresh_delay).await;
            self.refresh_completed.fetch_add(1, Ordering::SeqCst);
            return Ok(match self.refresh_behavior {
                RefreshBehavior::Succeed => {
                    self.session_valid.store(true, Ordering::SeqCst);
                    ApiResponse::new(200, r#"{"refreshed":true}"#)
                }
                RefreshBehavior::Refuse => ApiResponse::new(401, "refresh rejected"),
            });
        }

        self.protected_calls.fetch_add(1, Ordering::SeqCst);
        if !self.session_valid.load(Ordering::SeqCst) {
            return Ok(ApiResponse::new(401, "session expired"));
        }
        if request.path.starts_with("/users") {
            return Ok(ApiResponse::new(403, "insufficient role"));
        }
        Ok(ApiResponse::new(
            200,
            r#"{"id":"u-1","email":"ann@example.com","name":"Ann","role":"user","status":"active","lastLogout":null}"#,
        ))
    }
}
