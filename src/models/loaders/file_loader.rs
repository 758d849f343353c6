//! 按扩展名路由的文件装载
//!
//! - `txt`  直接作为 UTF-8 文本返回
//! - `docx` 走颜色提取；颜色提取失败时兜底到纯文本提取
//! - `pdf`  交给外部文本提取器（通过 trait 注入，本库不自带实现）

use std::path::Path;
use tracing::{info, warn};

use crate::docx;
use crate::error::{AppError, AppResult, FileError};
use crate::models::FileParseResult;

/// PDF 文本提取能力的外部协作方
///
/// 本库只约定边界："给定字节，还我纯文本"。具体实现（外部服务、
/// 本地库）由调用方注入
pub trait PdfTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> anyhow::Result<String>;
}

/// 按扩展名解析文件内容，DOCX 会尝试识别红色片段
///
/// # 参数
/// - `file_name`: 文件名（用于取扩展名）
/// - `bytes`: 文件原始字节
/// - `pdf_extractor`: 可选的 PDF 文本提取器
///
/// # 返回
/// `red_texts` 仅在 DOCX 颜色提取成功时为 Some
pub fn parse_file_with_colors(
    file_name: &str,
    bytes: &[u8],
    pdf_extractor: Option<&dyn PdfTextExtractor>,
) -> AppResult<FileParseResult> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => {
            let text = String::from_utf8_lossy(bytes).to_string();
            Ok(FileParseResult {
                text,
                red_texts: None,
            })
        }
        "docx" => parse_docx_advanced(file_name, bytes),
        "pdf" => {
            let extractor = pdf_extractor.ok_or(FileError::PdfExtractorMissing)?;
            let text = extractor
                .extract_text(bytes)
                .map_err(|e| AppError::Other(format!("PDF文本提取失败 ({}): {:#}", file_name, e)))?;
            Ok(FileParseResult {
                text,
                red_texts: None,
            })
        }
        _ => Err(FileError::UnsupportedExtension {
            extension: extension.clone(),
        }
        .into()),
    }
}

/// DOCX 装载：优先颜色提取，失败则兜底纯文本
///
/// 颜色提取只在容器结构坏损时失败；此时纯文本提取多半也会失败，
/// 但仍按原策略各自尝试一次，两条路都断了才把结构性错误上抛
fn parse_docx_advanced(file_name: &str, bytes: &[u8]) -> AppResult<FileParseResult> {
    match docx::extract_docx_with_colors(bytes) {
        Ok(result) => {
            info!(
                "DOCX 颜色提取成功: {} (红色片段 {} 个)",
                file_name,
                result.red_texts.len()
            );
            Ok(FileParseResult {
                text: clean_text(&result.text),
                red_texts: Some(result.red_texts),
            })
        }
        Err(e) => {
            warn!("DOCX 颜色提取失败，兜底到纯文本提取: {} ({})", file_name, e);
            let text = docx::extract_docx_text(bytes)?;
            Ok(FileParseResult {
                text: clean_text(&text),
                red_texts: None,
            })
        }
    }
}

/// 提取后文本的轻量清理
///
/// 统一换行符、压缩连续空行、去掉每行首尾空白。后续 `parse` 里的
/// 规范化会把全文折叠为单行，这里只是让原始文本可读
pub fn clean_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    let mut lines: Vec<&str> = unified.lines().map(|line| line.trim()).collect();

    // 压缩 2 个以上的连续空行
    let mut cleaned = Vec::with_capacity(lines.len());
    let mut blank_streak = 0;
    for line in lines.drain(..) {
        if line.is_empty() {
            blank_streak += 1;
            if blank_streak > 1 {
                continue;
            }
        } else {
            blank_streak = 0;
        }
        cleaned.push(line);
    }

    cleaned.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_txt_passes_through() {
        let result = parse_file_with_colors("de_thi.txt", "Câu 1. abc".as_bytes(), None).unwrap();
        assert_eq!(result.text, "Câu 1. abc");
        assert!(result.red_texts.is_none());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        assert!(parse_file_with_colors("de_thi.xlsx", &[], None).is_err());
    }

    #[test]
    fn test_pdf_without_extractor_rejected() {
        assert!(parse_file_with_colors("de_thi.pdf", &[], None).is_err());
    }

    #[test]
    fn test_pdf_routed_to_extractor() {
        struct FakePdf;
        impl PdfTextExtractor for FakePdf {
            fn extract_text(&self, _bytes: &[u8]) -> anyhow::Result<String> {
                Ok("Câu 1. từ PDF".to_string())
            }
        }
        let result = parse_file_with_colors("de_thi.pdf", &[1, 2, 3], Some(&FakePdf)).unwrap();
        assert_eq!(result.text, "Câu 1. từ PDF");
    }

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text("  a  \r\n\r\n\r\n\r\nb\r\n"),
            "a\n\nb"
        );
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_broken_docx_is_fatal() {
        // 不是 ZIP 的字节流：结构性坏损，两条提取路径都失败后上抛
        assert!(parse_file_with_colors("de_thi.docx", &[0, 1, 2, 3], None).is_err());
    }
}
