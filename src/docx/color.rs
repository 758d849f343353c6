//! 红色判定
//!
//! DOCX 里的直接颜色值是 6 位十六进制 RGB。判定分两步：
//! 先查 Word 常用红色色值表，再用通道阈值兜底。阈值规则是
//! "人眼看着像红"的近似，不是色度学标准，语料行为依赖这组
//! 具体数值，不要换成感知色差公式

/// Word 中常见的红色色值
const RED_COLORS: &[&str] = &[
    "FF0000", // Pure red
    "C00000", // Dark red
    "FF3333",
    "CC0000",
    "E60000",
    "FF6666",
    "DC143C", // Crimson
    "B22222", // Firebrick
    "CD5C5C", // Indian red
    "8B0000", // Dark red
    "FF4500", // Orange red
    "FF6347", // Tomato
    "ED1C24", // Word default red
];

/// 判断一个颜色值是否属于红色系
///
/// 规则：色值表精确命中，或 R > 180 且 G < 100 且 B < 100，
/// 或 R > 200 且 R 超过 G、B 各自的两倍
pub fn is_red_color(hex: &str) -> bool {
    let hex = hex.trim().to_uppercase();

    if RED_COLORS.contains(&hex.as_str()) {
        return true;
    }

    if hex.len() == 6 {
        let channels = (
            u32::from_str_radix(&hex[0..2], 16),
            u32::from_str_radix(&hex[2..4], 16),
            u32::from_str_radix(&hex[4..6], 16),
        );
        if let (Ok(r), Ok(g), Ok(b)) = channels {
            if r > 180 && g < 100 && b < 100 {
                return true;
            }
            if r > 200 && r > g * 2 && r > b * 2 {
                return true;
            }
        }
    }

    false
}

/// 判断 highlight 值是否是红色系
pub fn is_red_highlight(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "red" || value == "darkred"
}
