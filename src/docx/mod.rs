//! DOCX 颜色标注提取器
//!
//! DOCX 是一个 ZIP 容器，正文在 `word/document.xml`，样式定义在
//! `word/styles.xml`。这里手工走 ZIP + XML 事件流（docx 生态的
//! 现成库偏写入方向），按文档顺序遍历每个 run（最小的同格式文本
//! 单元），拼出全文并收集被染成红色的文本片段。
//!
//! 一个 run 是否为红色按优先级判定：
//! 1. run 自身的直接颜色值（`w:color`）
//! 2. 红色系 highlight（`w:highlight` 为 red / darkRed）
//! 3. run 引用的命名样式（`w:rStyle`），在 styles.xml 里解析出
//!    该样式的直接颜色
//!
//! 错误策略：只有缺少 word/document.xml 是致命错误；XML 内容的
//! 任何解析异常都降级为"尽力而为"——已收集的 run 保留，无法识别
//! 格式的 run 一律当作非红色

pub mod color;

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashSet;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::DocxError;
use crate::models::DocxParseResult;

pub use color::{is_red_color, is_red_highlight};

/// 单个 run 的提取结果
#[derive(Debug, Clone)]
struct TextRun {
    text: String,
    is_red: bool,
}

/// 从 DOCX 字节流提取全文和红色片段
///
/// # 返回
/// 成功时返回 `(全文, 红色片段列表)`；红色片段按文档顺序排列，
/// 允许重复，逐条去除首尾空白。
///
/// # 错误
/// 仅在容器无法打开或缺少 word/document.xml 时失败
pub fn extract_docx_with_colors(bytes: &[u8]) -> Result<DocxParseResult, DocxError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocxError::ArchiveOpenFailed {
            source: Box::new(e),
        })?;

    let document_xml =
        read_entry(&mut archive, "word/document.xml")?.ok_or(DocxError::MissingDocumentPart)?;

    // styles.xml 缺失可以容忍，只是丢掉按样式染色的识别能力
    let styles_xml = read_entry(&mut archive, "word/styles.xml")?;
    let red_styles = styles_xml
        .as_deref()
        .map(collect_red_styles)
        .unwrap_or_default();

    let runs = walk_runs(&document_xml, &red_styles);

    let mut text = String::new();
    let mut red_texts = Vec::new();
    for run in runs {
        text.push_str(&run.text);
        if run.is_red && !run.text.trim().is_empty() {
            red_texts.push(run.text.trim().to_string());
        }
    }

    debug!("DOCX 提取完成: 全文 {} 字符, 红色片段 {} 个", text.chars().count(), red_texts.len());

    Ok(DocxParseResult { text, red_texts })
}

/// 纯文本提取（不识别颜色）
///
/// 颜色提取失败时的兜底路径：只拼接可见文本，段落之间补空行
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, DocxError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocxError::ArchiveOpenFailed {
            source: Box::new(e),
        })?;

    let document_xml =
        read_entry(&mut archive, "word/document.xml")?.ok_or(DocxError::MissingDocumentPart)?;

    let mut reader = Reader::from_str(&document_xml);
    reader.trim_text(false);

    let mut text = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => text.push_str("\n\n"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                if let Ok(t) = e.unescape() {
                    text.push_str(&t);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("document.xml 解析中断，保留已提取内容: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// 读取容器内的一个条目；条目不存在时返回 None
fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>, DocxError> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(DocxError::EntryReadFailed {
                entry: name.to_string(),
                source: Box::new(e),
            })
        }
    };

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| DocxError::EntryReadFailed {
            entry: name.to_string(),
            source: Box::new(e),
        })?;

    Ok(Some(content))
}

/// 从 styles.xml 收集"直接颜色为红色"的样式 ID
fn collect_red_styles(styles_xml: &str) -> HashSet<String> {
    let mut red_styles = HashSet::new();
    let mut reader = Reader::from_str(styles_xml);
    reader.trim_text(false);

    let mut current_style: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:style" => {
                    current_style = get_attr(&e, b"w:styleId");
                }
                b"w:color" => {
                    if let (Some(style_id), Some(val)) =
                        (current_style.as_ref(), get_attr(&e, b"w:val"))
                    {
                        if is_red_color(&val) {
                            red_styles.insert(style_id.clone());
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(e)) if e.name().as_ref() == b"w:style" => {
                current_style = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                // 样式表坏了不致命，只是放弃按样式染色的识别
                warn!("styles.xml 解析中断: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    red_styles
}

/// 按文档顺序遍历全部 run
///
/// 解析异常不上抛：走到哪算哪，已收集的 run 原样返回
fn walk_runs(document_xml: &str, red_styles: &HashSet<String>) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut reader = Reader::from_str(document_xml);
    reader.trim_text(false);

    let mut in_run = false;
    let mut in_rpr = false;
    let mut in_text = false;
    let mut run_text = String::new();
    let mut run_color: Option<String> = None;
    let mut run_highlight: Option<String> = None;
    let mut run_style: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            // 自闭合元素（Empty）不会产生 End 事件，状态开关只认 Start
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:r" => {
                    in_run = true;
                    run_text.clear();
                    run_color = None;
                    run_highlight = None;
                    run_style = None;
                }
                b"w:rPr" if in_run => in_rpr = true,
                b"w:t" if in_run => in_text = true,
                _ => {}
            },
            // 格式属性通常以自闭合形式出现（<w:color w:val="..."/>）
            Ok(Event::Empty(e)) if in_rpr => match e.name().as_ref() {
                b"w:color" => run_color = get_attr(&e, b"w:val"),
                b"w:highlight" => run_highlight = get_attr(&e, b"w:val"),
                b"w:rStyle" => run_style = get_attr(&e, b"w:val"),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                if let Ok(t) = e.unescape() {
                    run_text.push_str(&t);
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:rPr" => in_rpr = false,
                b"w:r" => {
                    in_run = false;
                    if !run_text.is_empty() {
                        let is_red = run_is_red(
                            run_color.as_deref(),
                            run_highlight.as_deref(),
                            run_style.as_deref(),
                            red_styles,
                        );
                        runs.push(TextRun {
                            text: std::mem::take(&mut run_text),
                            is_red,
                        });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("document.xml 解析中断，保留已提取的 {} 个 run: {}", runs.len(), e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    runs
}

/// 按优先级判定 run 是否为红色
fn run_is_red(
    color: Option<&str>,
    highlight: Option<&str>,
    style: Option<&str>,
    red_styles: &HashSet<String>,
) -> bool {
    if let Some(c) = color {
        if is_red_color(c) {
            return true;
        }
    }
    if let Some(h) = highlight {
        if is_red_highlight(h) {
            return true;
        }
    }
    if let Some(s) = style {
        if red_styles.contains(s) {
            return true;
        }
    }
    false
}

/// 取元素上指定名字的属性值
fn get_attr(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_XML: &str = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:r><w:t>Câu 1. FIFO? </w:t></w:r>
      <w:r><w:rPr><w:color w:val="FF0000"/></w:rPr><w:t>A. Queue</w:t></w:r>
      <w:r><w:t>B. Stack</w:t></w:r>
    </w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_walk_runs_collects_in_order() {
        let runs = walk_runs(DOC_XML, &HashSet::new());
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].text, "Câu 1. FIFO? ");
        assert!(!runs[0].is_red);
        assert!(runs[1].is_red);
        assert!(!runs[2].is_red);
    }

    #[test]
    fn test_collect_red_styles() {
        let styles = r#"<w:styles xmlns:w="x">
            <w:style w:type="character" w:styleId="DapAn">
              <w:rPr><w:color w:val="C00000"/></w:rPr>
            </w:style>
            <w:style w:type="character" w:styleId="Normal">
              <w:rPr><w:color w:val="000000"/></w:rPr>
            </w:style>
        </w:styles>"#;
        let red = collect_red_styles(styles);
        assert!(red.contains("DapAn"));
        assert!(!red.contains("Normal"));
    }

    #[test]
    fn test_styled_run_resolved_via_styles() {
        let mut red_styles = HashSet::new();
        red_styles.insert("DapAn".to_string());
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p>
            <w:r><w:rPr><w:rStyle w:val="DapAn"/></w:rPr><w:t>đáp án</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let runs = walk_runs(xml, &red_styles);
        assert_eq!(runs.len(), 1);
        assert!(runs[0].is_red);
    }

    #[test]
    fn test_escaped_text_unescaped() {
        let xml = r#"<w:document xmlns:w="x"><w:body><w:p>
            <w:r><w:t>p &amp; q</w:t></w:r>
        </w:p></w:body></w:document>"#;
        let runs = walk_runs(xml, &HashSet::new());
        assert_eq!(runs[0].text, "p & q");
    }
}
