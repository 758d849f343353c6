//! 文本规范化
//!
//! 所有后续组件都假定输入已经过此处理：整份文档合并为单行，
//! 任意空白序列（换行、制表符、不间断空格等）折叠为一个 ASCII 空格

/// 规范化文本
///
/// 纯函数，永不失败；对已规范化的文本再次调用是幂等的
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        // U+00A0（不间断空格）属于 char::is_whitespace，一并折叠
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_all_whitespace() {
        assert_eq!(
            normalize_text("Câu 1.\r\n nội dung\t\tA. x\u{a0}B. y\n"),
            "Câu 1. nội dung A. x B. y"
        );
    }

    #[test]
    fn test_normalize_trims_edges() {
        assert_eq!(normalize_text("  a b  "), "a b");
        assert_eq!(normalize_text("\r\n\t"), "");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_text("x \r\n y\t z");
        assert_eq!(normalize_text(&once), once);
    }
}
