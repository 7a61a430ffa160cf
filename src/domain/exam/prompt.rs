//! 시험지 생성 프롬프트
//!
//! 같은 요청과 같은 문서 발췌에는 항상 같은 문자열을 만듭니다.

use super::dto::{GenerationRequest, QuestionType, SectionSpec};
use crate::domain::ai::SUMMARY_SENTINEL;

/// 섹션 문자 (A, B, C)
pub fn section_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// 섹션별 문항/난이도 지시문
///
/// 요청한 문항 수와 난이도 라벨이 그대로 들어갑니다.
pub fn section_directive(index: usize, section: &SectionSpec) -> String {
    format!(
        "Section {}: {} {} level questions. Type: {}.",
        section_letter(index),
        section.count,
        section.difficulty.label(),
        section.question_type.label()
    )
}

fn format_block(question_type: QuestionType) -> &'static str {
    match question_type {
        QuestionType::Mcq => {
            "**Q1.** Question\nA) Option\nB) Option\nC) Option\nD) Option\n\
             (Record the correct option only in the answer key.)"
        }
        QuestionType::ShortAnswer => {
            "**Q1.** Question\n\
             (In the answer key: the expected answer, briefly explaining the key points.)"
        }
        QuestionType::LongTheory => {
            "**Q1.** Question (detailed theoretical question suitable for a long essay)\n\
             (In the answer key: list 3-4 key evaluation points that must be in the answer.)"
        }
    }
}

/// 시험지 생성 프롬프트
///
/// 구성: 역할 안내, 섹션 지시문(요청 순서), 형식 규칙, 경계 문자열 지시, 원문 발췌.
pub fn exam_prompt(request: &GenerationRequest, context: &str) -> String {
    let mut prompt = format!(
        "You are an experienced university examiner preparing a semester exam paper.\n\
         Target Audience: {}.\n\
         Base every question strictly on the TEXT CONTENT at the end of this message.\n\n\
         PAPER STRUCTURE\n",
        request.audience
    );

    for (index, section) in request.sections.iter().enumerate() {
        prompt.push_str(&section_directive(index, section));
        prompt.push('\n');
    }

    prompt.push_str("\nQUESTION FORMATS\n");
    for (index, section) in request.sections.iter().enumerate() {
        prompt.push_str(&format!(
            "Section {} format:\n{}\n\n",
            section_letter(index),
            format_block(section.question_type)
        ));
    }

    let objective: Vec<String> = request
        .sections
        .iter()
        .enumerate()
        .filter(|(_, s)| s.question_type.is_objective())
        .map(|(i, _)| format!("Section {}", section_letter(i)))
        .collect();

    prompt.push_str("FORMATTING RULES\n");
    prompt.push_str("- Begin every section with a heading of the form \"## Section A\".\n");
    prompt.push_str("- Restart question numbering at Q1 in every section.\n");
    prompt.push_str("- Prefix every question with its bold number, for example **Q1.**\n");
    if !objective.is_empty() {
        prompt.push_str(&format!(
            "- Do not reveal or hint at answers inside {}; those are objective sections.\n",
            objective.join(", ")
        ));
    }
    prompt.push_str("- Keep every answer out of the question paper itself.\n");
    prompt.push_str(&format!(
        "- After the last question write a line containing only {} and nothing else.\n",
        SUMMARY_SENTINEL
    ));
    prompt.push_str(
        "- After that line write the answer key, section by section, prefixing each entry \
         with **Answer:** and the matching question number, then close with a short unit \
         summary of the source text.\n",
    );

    prompt.push_str("\nTEXT CONTENT:\n");
    prompt.push_str(context);
    prompt
}
