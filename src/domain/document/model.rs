use chrono::{DateTime, Utc};

/// 업로드된 문서 (추출된 평문)
///
/// 파일명으로 식별되며 추출 이후 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub name: String,
    pub text: String,
    pub uploaded_at: DateTime<Utc>,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            uploaded_at: Utc::now(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
