//! 로그인 단위 작업 상태
//!
//! 업로드한 문서, 활성 문서, 최근 생성 결과물, 튜터 대화 기록을 담습니다.
//! 로그인 시 만들어지고 로그아웃 시 버려집니다.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ai::{segment, Segmented};
use crate::domain::document::model::Document;
use crate::domain::material::entity::material::MaterialKind;
use crate::utils::error::AppError;

/// 결과물 본문
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactContent {
    /// 요약 경계를 요청한 응답 (시험지)
    Sectioned(Segmented),
    /// 모델 응답 원문
    Plain(String),
}

/// 화면 표시/내보내기용 생성 결과
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub kind: MaterialKind,
    /// 생성에 사용된 문서 파일명
    pub source: String,
    pub content: ArtifactContent,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    /// 요약 경계를 요청하는 종류만 응답을 나눕니다. 나머지는 원문 그대로 보관합니다.
    pub fn new(kind: MaterialKind, source: impl Into<String>, raw: &str) -> Self {
        let content = if kind.has_summary_section() {
            ArtifactContent::Sectioned(segment(raw))
        } else {
            ArtifactContent::Plain(raw.to_string())
        };

        Self {
            kind,
            source: source.into(),
            content,
            created_at: Utc::now(),
        }
    }

    /// 화면에 보여줄 본문
    pub fn body(&self) -> &str {
        match &self.content {
            ArtifactContent::Sectioned(result) => result.paper_body(),
            ArtifactContent::Plain(text) => text,
        }
    }

    /// 요약 경계를 요청한 종류에서만 값이 있습니다.
    pub fn unit_summary(&self) -> Option<&str> {
        match &self.content {
            ArtifactContent::Sectioned(result) => Some(result.unit_summary()),
            ArtifactContent::Plain(_) => None,
        }
    }

    /// 응답에 경계가 있었는지 여부 (경계를 요청하지 않은 종류는 `None`)
    pub fn is_segmented(&self) -> Option<bool> {
        match &self.content {
            ArtifactContent::Sectioned(result) => Some(result.is_complete()),
            ArtifactContent::Plain(_) => None,
        }
    }

    /// 저장/내보내기용 전체 텍스트
    pub fn full_text(&self) -> String {
        match &self.content {
            ArtifactContent::Sectioned(result) => result.full_text(),
            ArtifactContent::Plain(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub struct SessionContext {
    username: String,
    documents: BTreeMap<String, Document>,
    active: Option<String>,
    artifacts: HashMap<MaterialKind, Artifact>,
    history: Vec<ChatMessage>,
}

impl SessionContext {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            documents: BTreeMap::new(),
            active: None,
            artifacts: HashMap::new(),
            history: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// 문서를 추가하고 활성 문서로 지정합니다.
    ///
    /// 같은 파일명이 이미 있으면 교체하고, 이전 문서로 만든 결과물은 버립니다.
    /// 교체 여부를 반환합니다.
    pub fn add_document(&mut self, document: Document) -> bool {
        let name = document.name.clone();
        let replaced = self.documents.insert(name.clone(), document).is_some();
        if replaced {
            self.artifacts.retain(|_, artifact| artifact.source != name);
        }
        self.active = Some(name);
        replaced
    }

    /// 파일명 순으로 정렬된 문서 목록
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_document(&self) -> Result<&Document, AppError> {
        self.active
            .as_ref()
            .and_then(|name| self.documents.get(name))
            .ok_or(AppError::NoActiveDocument)
    }

    pub fn document(&self, name: &str) -> Result<&Document, AppError> {
        self.documents
            .get(name)
            .ok_or_else(|| AppError::not_found(format!("Document '{}' not found", name)))
    }

    /// 이름이 주어지면 해당 문서, 아니면 활성 문서
    pub fn resolve_document(&self, name: Option<&str>) -> Result<&Document, AppError> {
        match name {
            Some(name) => self.document(name),
            None => self.active_document(),
        }
    }

    pub fn select(&mut self, name: &str) -> Result<(), AppError> {
        self.document(name)?;
        self.active = Some(name.to_string());
        Ok(())
    }

    /// 같은 종류의 이전 결과물을 대체합니다.
    pub fn store_artifact(&mut self, artifact: Artifact) {
        self.artifacts.insert(artifact.kind, artifact);
    }

    pub fn artifact(&self, kind: MaterialKind) -> Option<&Artifact> {
        self.artifacts.get(&kind)
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn last_assistant_message(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::Assistant)
            .map(|m| m.content.as_str())
    }

    /// 문서, 결과물, 대화 기록을 모두 비웁니다. 사용자 정보는 유지됩니다.
    pub fn reset(&mut self) {
        self.documents.clear();
        self.active = None;
        self.artifacts.clear();
        self.history.clear();
    }
}
