//! 选项边界探测
//!
//! 整个引擎最核心的启发式：在一个题目块里找出 A/B/C/D 四个选项
//! 标签的起始位置。难点在于 A–D 这些大写字母同样会出现在题干、
//! 公式和缩写里，且作者经常省略选项之间的分隔符
//! （如 `...NeighborsB. ...` 直接粘连）。
//!
//! 探测流程：
//! 1. 定位选项区起点（标签 A 的位置），题干过短则拒绝整块
//! 2. 用一张有序的模式规则表收集所有候选边界
//! 3. 顺序过滤：只保留构成严格 A→B→C→D 递进的子序列
//! 4. 按相邻边界切出各选项内容，清理尾部混入的下一题标记
//!
//! 所有位置运算基于字符（char）索引而非字节，因为规则需要
//! 频繁检查前后单个字符

use regex::Regex;
use std::sync::OnceLock;

use crate::models::OptionLabel;

/// 候选边界命中的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPattern {
    /// 标签后紧跟 `.`（如 `B. Stack`）
    Punctuated,
    /// 无分隔符的粘连写法：标签前是小写字母、后是大写字母或符号
    /// （如 `AlgorithmB. ...` 中的 B，或 `HeapD Danh sách` 中的 D）
    RunOn,
}

/// 候选边界位置
#[derive(Debug, Clone, Copy)]
pub struct BoundaryCandidate {
    pub label: OptionLabel,
    /// 在选项区内的字符索引
    pub index: usize,
    pub pattern: BoundaryPattern,
}

/// 边界模式规则：按优先级排列，命中第一条即停
///
/// 新的启发式直接追加规则即可，不需要改动扫描循环
struct PatternRule {
    pattern: BoundaryPattern,
    matches: fn(prev: Option<char>, next: Option<char>) -> bool,
}

const PATTERN_RULES: &[PatternRule] = &[
    PatternRule {
        pattern: BoundaryPattern::Punctuated,
        matches: punctuated_rule,
    },
    PatternRule {
        pattern: BoundaryPattern::RunOn,
        matches: run_on_rule,
    },
];

/// 模式 1：标签后紧跟 `.`
///
/// 前一个字符不存在、不是字母、或是小写字母时接受。
/// 小写字母的例外覆盖 `...NeighborsB.` 这类粘连：`s` 是小写，
/// 说明 B 恰好站在上一个选项的词尾与 `.` 之间
fn punctuated_rule(prev: Option<char>, next: Option<char>) -> bool {
    if next != Some('.') {
        return false;
    }
    match prev {
        None => true,
        Some(p) => !is_letter(p) || is_lowercase_letter(p),
    }
}

/// 模式 2：无分隔符粘连
///
/// 标签前是小写字母（拉丁或越南语带调字母），后是大写字母或
/// 非字母数字符号——即标签正好卡在上一个选项的词尾与下一个
/// 内容起点的接缝处
fn run_on_rule(prev: Option<char>, next: Option<char>) -> bool {
    if next == Some('.') {
        return false;
    }
    let prev_is_lower = prev.map_or(false, is_lowercase_letter);
    let next_starts_new = next.map_or(false, |n| is_uppercase_letter(n) || !is_alphanumeric(n));
    prev_is_lower && next_starts_new
}

// ========== 字符分类 ==========
// 越南语字母采用 U+00C0..=U+1EF9 的连续区间（与语料使用的
// 判定保持一致，区间内大小写字母交替出现）

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{1EF9}').contains(&c)
}

fn is_lowercase_letter(c: char) -> bool {
    c.is_ascii_lowercase() || ('\u{00E0}'..='\u{1EF9}').contains(&c)
}

fn is_uppercase_letter(c: char) -> bool {
    c.is_ascii_uppercase() || ('\u{00C0}'..='\u{1EF8}').contains(&c)
}

fn is_alphanumeric(c: char) -> bool {
    is_letter(c) || c.is_ascii_digit()
}

fn trailing_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Câu\s*\d+\s*[.:].*$").expect("trailing marker regex"))
}

/// 定位选项区起点：第一个合法的标签 A
///
/// A 后面必须紧跟 `.` 或空格；若 A 不在块首，其前一个字符不能是
/// 字母（否则它只是某个单词的一部分）
pub fn find_option_a(chars: &[char]) -> Option<usize> {
    if chars.len() < 2 {
        return None;
    }
    for i in 0..chars.len() - 1 {
        if chars[i] == 'A' && (chars[i + 1] == '.' || chars[i + 1] == ' ') {
            if i == 0 {
                return Some(0);
            }
            if !is_letter(chars[i - 1]) {
                return Some(i);
            }
        }
    }
    None
}

/// 收集选项区内全部候选边界（已按位置有序）
pub fn collect_candidates(chars: &[char]) -> Vec<BoundaryCandidate> {
    let mut candidates = Vec::new();

    for (i, &curr) in chars.iter().enumerate() {
        let label = match OptionLabel::from_char(curr) {
            Some(l) => l,
            None => continue,
        };
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let next = chars.get(i + 1).copied();

        for rule in PATTERN_RULES {
            if (rule.matches)(prev, next) {
                candidates.push(BoundaryCandidate {
                    label,
                    index: i,
                    pattern: rule.pattern,
                });
                break;
            }
        }
    }

    candidates
}

/// 顺序过滤：保留构成严格 A→B→C→D 递进的子序列
///
/// 这是消歧的关键：题干公式里的 A–D 也会产生候选，但只有真正的
/// 选项标签能组成有序链条；不匹配的候选直接丢弃，不回退重来
pub fn filter_sequence(candidates: &[BoundaryCandidate]) -> Vec<BoundaryCandidate> {
    let mut sequence = Vec::with_capacity(4);
    let mut expected_iter = OptionLabel::ALL.iter();
    let mut expected = expected_iter.next();

    for cand in candidates {
        match expected {
            Some(&label) if cand.label == label => {
                sequence.push(*cand);
                expected = expected_iter.next();
                if expected.is_none() {
                    break;
                }
            }
            Some(_) => {}
            None => break,
        }
    }

    sequence
}

/// 按接受的边界切出各选项内容
///
/// 内容从标签之后开始（Punctuated 模式额外跳过 `.`），去掉前导
/// 空格，延伸到下一个边界的起点（最后一个到选项区结尾）。
/// 尾部若混入了下一题的 "Câu <N>." 片段（两个标记相邻而中间
/// 没有真边界的罕见情况），在收尾时剥掉
pub fn extract_options(chars: &[char], sequence: &[BoundaryCandidate]) -> Vec<(OptionLabel, String)> {
    let mut options = Vec::with_capacity(sequence.len());

    for (i, cand) in sequence.iter().enumerate() {
        let skip = match cand.pattern {
            BoundaryPattern::Punctuated => 2,
            BoundaryPattern::RunOn => 1,
        };
        let mut start = cand.index + skip;
        while start < chars.len() && chars[start] == ' ' {
            start += 1;
        }

        let end = sequence
            .get(i + 1)
            .map(|next| next.index)
            .unwrap_or(chars.len());

        let raw: String = chars[start..end.max(start)].iter().collect();
        let cleaned = trailing_marker_regex().replace(raw.trim(), "");

        options.push((cand.label, cleaned.trim().to_string()));
    }

    options
}

/// 对去掉标记前缀的题目块运行完整的边界探测
///
/// # 返回
/// `(题干, 识别出的选项)`；题干过短或边界不足 2 个时返回 None（整块拒绝）
pub fn detect_options(content: &str) -> Option<(String, Vec<(OptionLabel, String)>)> {
    let chars: Vec<char> = content.chars().collect();

    // 题干至少 5 个字符，防止题干内部游离的 "A." 抢走选项区起点
    let a_index = find_option_a(&chars)?;
    if a_index < 5 {
        return None;
    }

    let stem: String = chars[..a_index].iter().collect::<String>().trim().to_string();
    if stem.is_empty() {
        return None;
    }

    let option_region = &chars[a_index..];
    let candidates = collect_candidates(option_region);
    let sequence = filter_sequence(&candidates);
    let options = extract_options(option_region, &sequence);

    // 接受部分结果（2 或 3 个选项）而不是整块拒绝——部分文档会漏标签
    if options.len() < 2 {
        return None;
    }

    Some((stem, options))
}
