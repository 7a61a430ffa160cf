use serde::Serialize;
use utoipa::ToSchema;

/// 전체 헬스 상태 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// healthy / degraded / unhealthy
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    /// 활성 세션 수
    #[schema(example = 3)]
    pub active_sessions: usize,
    pub checks: HealthChecks,
}

#[derive(Serialize, Debug, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    /// 생성형 API 연결 상태
    pub ai_api: CheckResult,
}

/// 개별 체크 결과
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 150)]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn success(latency_ms: u64) -> Self {
        Self {
            status: true,
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn failure(latency_ms: u64, error: String) -> Self {
        Self {
            status: false,
            latency_ms: Some(latency_ms),
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_status_should_serialize_with_camel_case() {
        let status = HealthStatus {
            status: HealthState::Healthy,
            version: "0.1.0",
            uptime_secs: 3600,
            active_sessions: 2,
            checks: HealthChecks {
                ai_api: CheckResult::success(150),
            },
        };

        let json = serde_json::to_string(&status).unwrap();

        assert!(json.contains("\"uptimeSecs\""));
        assert!(json.contains("\"aiApi\""));
        assert!(json.contains("\"activeSessions\""));
        assert!(json.contains("\"healthy\""));
        assert!(!json.contains("error"));
    }
}
