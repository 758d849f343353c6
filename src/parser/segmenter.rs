//! 题目切分
//!
//! 在规范化后的文本中扫描 "Câu <N>." / "Câu <N>:" 标记，
//! 把文本切成每道题一个连续块。
//!
//! 注意：标记编号从不校验单调性——作者经常跳号或重复编号
//! （语料中存在整卷跳过 "Câu 33" 的情况），编号只用于定位，不用于排序

use regex::Regex;
use std::sync::OnceLock;

/// 题目起始标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionMarker {
    /// 标记在文本中的字节偏移
    pub index: usize,
    /// 标记携带的题号（仅供日志，不参与切分逻辑）
    pub num: u64,
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Câu\s*(\d+)\s*[.:]").expect("marker regex"))
}

fn marker_prefix_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^Câu\s*\d+\s*[.:]\s*").expect("marker prefix regex"))
}

/// 扫描全部题目标记
pub fn find_markers(text: &str) -> Vec<QuestionMarker> {
    marker_regex()
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let num = cap.get(1)?.as_str().parse().ok()?;
            Some(QuestionMarker {
                index: whole.start(),
                num,
            })
        })
        .collect()
}

/// 按标记位置切分题目块
///
/// 每块从一个标记的起点延伸到下一个标记的起点（最后一块到文本结尾）。
/// 零标记时返回空列表——这不是错误，只是"未识别出题目"
pub fn split_blocks(text: &str) -> Vec<&str> {
    split_at_markers(text, &find_markers(text))
}

/// 按已扫描出的标记切分（调用方持有标记时避免重复扫描）
///
/// 第 i 块与 `markers[i]` 一一对应
pub fn split_at_markers<'a>(text: &'a str, markers: &[QuestionMarker]) -> Vec<&'a str> {
    let mut blocks = Vec::with_capacity(markers.len());

    for (i, marker) in markers.iter().enumerate() {
        let end = markers
            .get(i + 1)
            .map(|next| next.index)
            .unwrap_or(text.len());
        blocks.push(text[marker.index..end].trim());
    }

    blocks
}

/// 去掉题目块开头的 "Câu <N>." 前缀
pub fn strip_marker_prefix(block: &str) -> &str {
    match marker_prefix_regex().find(block) {
        Some(m) => block[m.end()..].trim(),
        None => block.trim(),
    }
}
