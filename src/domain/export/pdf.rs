//! PDF 내보내기
//!
//! 내장 폰트 범위를 벗어나는 문자는 렌더링 전에 제거합니다 (치환하지 않음).

use genpdf::elements::{Break, Paragraph};
use genpdf::style;
use genpdf::Element;
use tracing::warn;

use crate::utils::error::AppError;

/// ASCII 외 문자와 줄바꿈/탭 외 제어 문자를 제거합니다.
///
/// `"café"` → `"caf"`
pub fn sanitize_for_pdf(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii() && (!c.is_ascii_control() || *c == '\n' || *c == '\t'))
        .collect()
}

fn load_font_family(
    font_dir: &str,
    family_name: &str,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>, AppError> {
    match genpdf::fonts::from_files(font_dir, family_name, None) {
        Ok(family) => Ok(family),
        Err(full_err) => {
            warn!(
                "전체 폰트 패밀리 로딩 실패 ({}), Regular 폰트로 대체합니다.",
                full_err
            );
            let regular_path =
                std::path::Path::new(font_dir).join(format!("{}-Regular.ttf", family_name));
            let font_bytes = std::fs::read(&regular_path).map_err(|e| {
                AppError::PdfGenerationFailed(format!(
                    "Regular 폰트 파일 읽기 실패 ({}) : {}",
                    regular_path.display(),
                    e
                ))
            })?;
            let font = genpdf::fonts::FontData::new(font_bytes, None).map_err(|e| {
                AppError::PdfGenerationFailed(format!("Regular 폰트 데이터 로딩 실패: {}", e))
            })?;
            Ok(genpdf::fonts::FontFamily {
                regular: font.clone(),
                bold: font.clone(),
                italic: font.clone(),
                bold_italic: font,
            })
        }
    }
}

/// PDF 본문 한 줄의 배치 단위
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfBlock {
    Gap,
    Heading(String),
    Text(String),
}

/// 정제된 본문을 배치 단위로 나눕니다.
///
/// 빈 줄은 문단 간격, `#` 줄은 소제목이 되고 굵게 표시(`**`)는 제거됩니다.
pub fn layout_blocks(body: &str) -> Vec<PdfBlock> {
    sanitize_for_pdf(body)
        .lines()
        .map(|line| {
            let line = line.replace("**", "").replace('\t', "    ");
            if line.trim().is_empty() {
                PdfBlock::Gap
            } else if let Some(heading) = line.trim_start().strip_prefix('#') {
                PdfBlock::Heading(heading.trim_start_matches('#').trim().to_string())
            } else {
                PdfBlock::Text(line)
            }
        })
        .collect()
}

/// 제목과 본문으로 PDF를 만듭니다.
pub fn render_pdf(
    title: &str,
    body: &str,
    font_dir: &str,
    family_name: &str,
) -> Result<Vec<u8>, AppError> {
    let font_family = load_font_family(font_dir, family_name)?;
    let title = sanitize_for_pdf(title);

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(title.clone());
    doc.set_minimal_conformance();

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    doc.push(Paragraph::new(title).styled(style::Style::new().bold().with_font_size(18)));
    doc.push(Break::new(0.5));

    for block in layout_blocks(body) {
        match block {
            PdfBlock::Gap => doc.push(Break::new(0.5)),
            PdfBlock::Heading(heading) => doc.push(
                Paragraph::new(heading).styled(style::Style::new().bold().with_font_size(14)),
            ),
            PdfBlock::Text(text) => doc.push(Paragraph::new(text)),
        }
    }

    let mut buf = Vec::new();
    doc.render(&mut buf)
        .map_err(|e| AppError::PdfGenerationFailed(format!("PDF 렌더링 실패: {}", e)))?;

    Ok(buf)
}
