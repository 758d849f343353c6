//! 答案关联器
//!
//! 把选项内容和"红色文本片段"列表做模糊匹配，命中即认为该选项
//! 是正确答案。两个数据源完全脱节（红色片段不携带位置信息），
//! 只能做词法层面的关联。
//!
//! 匹配策略刻意偏宽松（宁可多标也不漏标）：漏掉一个正确答案的
//! 代价远高于多出一个误报。长度 ≤ 3 的片段只允许精确相等，
//! 避免单字母或纯标点片段触发包含匹配造成噪声

use crate::models::OptionLabel;

/// 判断选项内容是否命中红色片段列表
///
/// # 参数
/// - `opt_content`: 选项提取出的内容
/// - `red_texts`: 文档中全部红色片段（可重复）
/// - `label`: 该选项的标签（红色 run 有时会把标签本身一起染色）
pub fn is_option_in_red_texts(opt_content: &str, red_texts: &[String], label: OptionLabel) -> bool {
    let normalized_opt = opt_content.to_lowercase();
    let normalized_opt = normalized_opt.trim();

    for red_text in red_texts {
        let normalized_red = red_text.to_lowercase();
        let normalized_red = normalized_red.trim();

        // 精确相等或双向包含（带长度下限）
        if normalized_red == normalized_opt {
            return true;
        }
        if normalized_red.chars().count() > 3 && normalized_opt.contains(normalized_red) {
            return true;
        }
        if normalized_opt.chars().count() > 3 && normalized_red.contains(normalized_opt) {
            return true;
        }

        // 红色片段可能以 "A." 这样的标签开头，剥掉标签再比一轮
        let red_without_label = strip_label_prefix(normalized_red, label);
        if red_without_label == normalized_opt {
            return true;
        }
        if red_without_label.chars().count() > 3 && normalized_opt.contains(red_without_label) {
            return true;
        }
    }

    false
}

/// 剥掉片段开头的 "<label>." 前缀（标签、可选的点、后续空格）
///
/// 片段已做过小写化，所以只需比对小写标签
fn strip_label_prefix(red: &str, label: OptionLabel) -> &str {
    let lower = label.as_char().to_ascii_lowercase();
    let rest = match red.strip_prefix(lower) {
        Some(r) => r,
        None => return red,
    };
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    rest.trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reds(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_after_normalization() {
        assert!(is_option_in_red_texts(
            "Danh sách kề",
            &reds(&["  danh sách kề "]),
            OptionLabel::D
        ));
    }

    #[test]
    fn test_containment_both_directions() {
        // 片段包含于选项
        assert!(is_option_in_red_texts(
            "Quick sort là nhanh nhất",
            &reds(&["quick sort"]),
            OptionLabel::A
        ));
        // 选项包含于片段
        assert!(is_option_in_red_texts(
            "Heap",
            &reds(&["đáp án đúng là Heap nhé"]),
            OptionLabel::C
        ));
    }

    #[test]
    fn test_short_fragment_only_matches_exactly() {
        // 长度 ≤ 3 的片段不允许触发包含匹配
        assert!(!is_option_in_red_texts(
            "Stack",
            &reds(&["ta"]),
            OptionLabel::B
        ));
        assert!(is_option_in_red_texts("ta", &reds(&["ta"]), OptionLabel::B));
    }

    #[test]
    fn test_short_option_never_contained() {
        // 选项长度 ≤ 3 时不做"片段包含选项"的匹配
        assert!(!is_option_in_red_texts(
            "và",
            &reds(&["một câu dài có chữ và ở giữa"]),
            OptionLabel::A
        ));
    }

    #[test]
    fn test_label_prefix_stripped() {
        assert!(is_option_in_red_texts(
            "Queue",
            &reds(&["B. Queue"]),
            OptionLabel::B
        ));
        assert!(is_option_in_red_texts(
            "Queue",
            &reds(&["b Queue"]),
            OptionLabel::B
        ));
    }

    #[test]
    fn test_no_match_returns_false() {
        assert!(!is_option_in_red_texts(
            "Stack",
            &reds(&["Queue", "Heap"]),
            OptionLabel::B
        ));
        assert!(!is_option_in_red_texts("Stack", &[], OptionLabel::B));
    }
}
