use std::time::{Duration, Instant};

use super::dto::{CheckResult, HealthChecks, HealthState, HealthStatus};
use crate::domain::ai::AiClientTrait;
use crate::utils::error::AppError;

/// 서버 시작 시간
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// 헬스체크 타임아웃
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Degraded 상태 임계값
const DEGRADED_THRESHOLD: Duration = Duration::from_secs(2);

/// main에서 서버 시작 시 호출합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

pub async fn check_health(ai: &dyn AiClientTrait, active_sessions: usize) -> HealthStatus {
    let ai_check = check_ai(ai).await;

    HealthStatus {
        status: determine_health_state(&ai_check),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: uptime_secs(),
        active_sessions,
        checks: HealthChecks { ai_api: ai_check },
    }
}

/// 모델 목록 조회로 연결을 확인합니다.
async fn check_ai(ai: &dyn AiClientTrait) -> CheckResult {
    let start = Instant::now();
    let result = tokio::time::timeout(HEALTH_CHECK_TIMEOUT, ai.list_models()).await;
    let latency = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(_)) => CheckResult::success(latency),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "AI 헬스체크 실패");
            CheckResult::failure(latency, e.error_code())
        }
        Err(_) => CheckResult::failure(latency, AppError::AiTimeout.error_code()),
    }
}

fn determine_health_state(check: &CheckResult) -> HealthState {
    if !check.status {
        return HealthState::Unhealthy;
    }

    match check.latency_ms {
        Some(latency) if latency >= DEGRADED_THRESHOLD.as_millis() as u64 => HealthState::Degraded,
        _ => HealthState::Healthy,
    }
}
