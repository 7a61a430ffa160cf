//! 학습 보조 자료 프롬프트

/// 플래시카드 기본 개수
pub const DEFAULT_FLASHCARD_COUNT: u32 = 5;

/// 수업 계획 기본 시간 (분)
pub const DEFAULT_LESSON_MINUTES: u32 = 60;

/// 슬라이드 기본 장수
pub const DEFAULT_SLIDE_COUNT: u32 = 10;

pub fn flashcard_prompt(count: u32, context: &str) -> String {
    format!(
        "Extract {} key terms and their definitions from this text. \
         Format as 'Term: Definition', one pair per line, with no other text. \
         Text: {}",
        count, context
    )
}

pub fn lesson_plan_prompt(duration_minutes: u32, audience: &str, context: &str) -> String {
    format!(
        "You are an experienced lecturer. Prepare a {} minute lesson plan for {} \
         that teaches the material in the text below.\n\
         Include: learning objectives, prerequisite knowledge, a timed breakdown of \
         activities whose durations add up to {} minutes, a short in-class exercise, \
         and a homework assignment.\n\
         Use markdown headings for each part.\n\n\
         TEXT CONTENT:\n{}",
        duration_minutes, audience, duration_minutes, context
    )
}

pub fn slide_outline_prompt(slide_count: u32, context: &str) -> String {
    format!(
        "Create an outline for a {} slide lecture presentation on the text below.\n\
         For each slide write a line of the form \"Slide N: Title\" followed by 3-5 \
         concise bullet points. Finish with a summary slide.\n\n\
         TEXT CONTENT:\n{}",
        slide_count, context
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_request_term_definition_format() {
        // Act
        let prompt = flashcard_prompt(DEFAULT_FLASHCARD_COUNT, "Stacks are LIFO.");

        // Assert
        assert!(prompt.starts_with("Extract 5 key terms"));
        assert!(prompt.contains("'Term: Definition'"));
        assert!(prompt.ends_with("Text: Stacks are LIFO."));
    }

    #[test]
    fn should_include_duration_and_audience_in_lesson_plan() {
        let prompt = lesson_plan_prompt(45, "first-year students", "Recursion.");

        assert!(prompt.contains("45 minute lesson plan for first-year students"));
        assert!(prompt.ends_with("TEXT CONTENT:\nRecursion."));
    }

    #[test]
    fn should_include_slide_count() {
        let prompt = slide_outline_prompt(12, "Graphs.");

        assert!(prompt.contains("12 slide lecture"));
        assert!(prompt.contains("Slide N: Title"));
    }
}
