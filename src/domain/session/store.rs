use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::context::SessionContext;

pub type SharedContext = Arc<Mutex<SessionContext>>;

struct SessionEntry {
    context: SharedContext,
    expires_at: Instant,
}

impl SessionEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// 세션 ID → SessionContext
///
/// 같은 세션의 요청은 Mutex로 직렬화되고, 다른 세션끼리는 독립적으로 진행됩니다.
/// 세션은 토큰과 같은 시점에 만료되며, 만료된 세션은 조회/생성 시 정리됩니다.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 빈 컨텍스트를 만들고 세션 ID를 반환합니다.
    pub async fn create(&self, username: &str, ttl: Duration) -> String {
        let now = Instant::now();
        let session_id = Uuid::new_v4().to_string();
        let entry = SessionEntry {
            context: Arc::new(Mutex::new(SessionContext::new(username))),
            expires_at: now + ttl,
        };

        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now));
        if sessions.len() < before {
            debug!(evicted = before - sessions.len(), "만료 세션 정리");
        }
        sessions.insert(session_id.clone(), entry);
        session_id
    }

    /// 만료된 세션은 제거하고 `None`을 반환합니다.
    pub async fn get(&self, session_id: &str) -> Option<SharedContext> {
        let now = Instant::now();
        {
            let sessions = self.inner.read().await;
            match sessions.get(session_id) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.context.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        self.inner.write().await.remove(session_id);
        None
    }

    pub async fn remove(&self, session_id: &str) -> bool {
        self.inner.write().await.remove(session_id).is_some()
    }

    /// 만료되지 않은 세션 수
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.inner
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// 보관 중인 항목 수 (만료되었지만 아직 정리되지 않은 세션 포함)
    #[cfg(test)]
    async fn stored(&self) -> usize {
        self.inner.read().await.len()
    }
}
