/// 문서 앞부분에서 최대 `budget`개의 문자(유니코드 스칼라)만 잘라냅니다.
///
/// 코드 포인트 중간에서 자르지 않습니다.
pub fn excerpt(text: &str, budget: usize) -> &str {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
