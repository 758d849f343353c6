//! 核心解析引擎的端到端测试
//!
//! 覆盖切分、边界探测、答案关联的组合行为；语料片段取自真实试卷

use exam_question_parser::parser::{normalize_text, parse};
use exam_question_parser::{has_existing_questions, OptionLabel};

#[test]
fn test_segmentation_count_matches_marker_count() {
    // 跳号（缺 Câu 3）和重号都不影响切分数量
    let text = "Câu 1. Nội dung câu hỏi thứ nhất là gì? A. một B. hai C. ba D. bốn \
Câu 2. Nội dung câu hỏi thứ hai là gì? A. một B. hai C. ba D. bốn \
Câu 4. Nội dung câu hỏi thứ tư là gì? A. một B. hai C. ba D. bốn \
Câu 4. Nội dung câu hỏi trùng số là gì? A. một B. hai C. ba D. bốn";

    let exam = parse(text, None);
    assert_eq!(exam.questions.len(), 4);
}

#[test]
fn test_knn_run_on_fixture() {
    let text = "Câu 7. Thuật toán phân loại dựa trên k láng giềng gần nhất có tên là gì? \
A. K-Nearest Neighbors AlgorithmB. K-Node NeighborsC. K-Nearest NeighborsD. K-Nearest Network";

    let exam = parse(text, None);
    assert_eq!(exam.questions.len(), 1);
    let opts = &exam.questions[0].options;
    assert_eq!(opts[0].content, "K-Nearest Neighbors Algorithm");
    assert_eq!(opts[1].content, "K-Node Neighbors");
    assert_eq!(opts[2].content, "K-Nearest Neighbors");
    assert_eq!(opts[3].content, "K-Nearest Network");
}

#[test]
fn test_logic_symbols_fixture() {
    let text = "Câu 3. Theo luật De Morgan, đẳng thức nào sau đây đúng? \
A. ¬(p ∨ q) ≡ ¬p ∨ ¬qB. ¬(p ∧ q) ≡ ¬p ∨ ¬qC. ¬(p ∧ q) ≡ p ∨ qD. ¬(p ∨ q) ≡ p ∧ q";

    let exam = parse(text, None);
    assert_eq!(exam.questions.len(), 1);
    let opts = &exam.questions[0].options;
    assert_eq!(opts[0].content, "¬(p ∨ q) ≡ ¬p ∨ ¬q");
    assert_eq!(opts[1].content, "¬(p ∧ q) ≡ ¬p ∨ ¬q");
    assert_eq!(opts[2].content, "¬(p ∧ q) ≡ p ∨ q");
    assert_eq!(opts[3].content, "¬(p ∨ q) ≡ p ∧ q");
}

#[test]
fn test_vietnamese_seam_fixture() {
    let text = "Câu 5. Cấu trúc dữ liệu nào dùng để biểu diễn đồ thị? \
A. QueueB. StackC. HeapD. Danh sách kề";

    let exam = parse(text, None);
    let opts = &exam.questions[0].options;
    assert_eq!(opts[0].content, "Queue");
    assert_eq!(opts[1].content, "Stack");
    assert_eq!(opts[2].content, "Heap");
    assert_eq!(opts[3].content, "Danh sách kề");
}

#[test]
fn test_short_stem_contributes_zero_questions() {
    // 题干不足即整块丢弃，不影响其余题目
    let text = "Câu 1. x? A. một B. hai C. ba D. bốn \
Câu 2. Nội dung câu hỏi bình thường là gì? A. một B. hai C. ba D. bốn";

    let exam = parse(text, None);
    assert_eq!(exam.questions.len(), 1);
    assert!(exam.questions[0].content.starts_with("Nội dung"));
}

#[test]
fn test_compact_stem_accepted() {
    // 题干只有 5 个字符也是合法的：整块内容够长（≥10 字符）且
    // 选项区起点不早于第 5 个字符即可，不要求题干本身 ≥ 10
    let text = "Câu 1. Đúng? A. một B. hai C. ba D. bốn";
    let exam = parse(text, None);
    assert_eq!(exam.questions.len(), 1);
    assert_eq!(exam.questions[0].content, "Đúng?");
    assert_eq!(exam.questions[0].options.len(), 4);
}

#[test]
fn test_no_markers_yields_empty_not_error() {
    let exam = parse("văn bản hoàn toàn không có đánh dấu câu hỏi nào", None);
    assert!(exam.questions.is_empty());
}

#[test]
fn test_red_fragment_marks_correct_option() {
    let text = "Câu 1. Cấu trúc dữ liệu nào hoạt động theo nguyên tắc FIFO? \
A. Queue B. Stack C. Heap D. Cây nhị phân";
    let reds = vec!["Queue".to_string()];

    let exam = parse(text, Some(&reds));
    let opts = &exam.questions[0].options;
    assert!(opts[0].is_correct);
    assert_eq!(opts.iter().filter(|o| o.is_correct).count(), 1);
}

#[test]
fn test_red_fragment_with_label_prefix() {
    let text = "Câu 1. Cấu trúc dữ liệu nào hoạt động theo nguyên tắc FIFO? \
A. Queue B. Stack C. Heap D. Cây nhị phân";
    // 红色 run 把标签一起染了
    let reds = vec!["A. Queue".to_string()];

    let exam = parse(text, Some(&reds));
    assert!(exam.questions[0].options[0].is_correct);
}

#[test]
fn test_short_red_fragment_never_matches_by_containment() {
    let text = "Câu 1. Cấu trúc dữ liệu nào hoạt động theo nguyên tắc FIFO? \
A. Que B. Stack C. Heap D. Cây nhị phân";
    // "ue" 长度 ≤ 3：即使是子串也不得命中
    let reds = vec!["ue".to_string()];

    let exam = parse(text, Some(&reds));
    assert!(exam.questions[0].options.iter().all(|o| !o.is_correct));
}

#[test]
fn test_multiple_red_fragments_may_mark_multiple_options() {
    // 引擎不强制"每题恰好一个正确答案"，宽松关联的两个命中都保留
    let text = "Câu 1. Chọn các phương án hợp lệ trong những phương án sau? \
A. Queue B. Stack C. Heap D. Cây nhị phân";
    let reds = vec!["Queue".to_string(), "Stack".to_string()];

    let exam = parse(text, Some(&reds));
    assert_eq!(exam.questions[0].correct_count(), 2);
}

#[test]
fn test_parse_twice_is_identical() {
    let text = "Câu 1. Nội dung câu hỏi thứ nhất là gì?\r\nA. một\nB. hai\tC. ba D. bốn";
    let reds = vec!["hai".to_string()];

    let a = parse(text, Some(&reds));
    let b = parse(text, Some(&reds));
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn test_raw_text_is_normalized() {
    let exam = parse("Câu 1.\r\n Nội dung câu hỏi là gì?\tA. một B. hai C. ba D. bốn", None);
    assert_eq!(
        exam.raw_text,
        "Câu 1. Nội dung câu hỏi là gì? A. một B. hai C. ba D. bốn"
    );
    // 规范化幂等：对已规范化文本再跑一遍不变
    assert_eq!(normalize_text(&exam.raw_text), exam.raw_text);
}

#[test]
fn test_option_labels_always_complete() {
    let text = "Câu 1. Nội dung câu hỏi thứ nhất là gì? A. một B. hai";
    let exam = parse(text, None);
    let labels: Vec<OptionLabel> = exam.questions[0].options.iter().map(|o| o.label).collect();
    assert_eq!(
        labels,
        vec![OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D]
    );
}

#[test]
fn test_has_existing_questions() {
    assert!(has_existing_questions(
        "Câu 1. Nội dung câu hỏi là gì? A. một B. hai C. ba D. bốn"
    ));
    assert!(!has_existing_questions("văn bản tự do"));
}

#[test]
fn test_serialized_shape_matches_consumer_contract() {
    let text = "Câu 1. Nội dung câu hỏi là gì? A. một B. hai C. ba D. bốn";
    let exam = parse(text, None);
    let json = serde_json::to_value(&exam).unwrap();

    // 下游题库按 camelCase 字段消费
    assert!(json.get("rawText").is_some());
    let opt = &json["questions"][0]["options"][0];
    assert_eq!(opt["label"], "A");
    assert_eq!(opt["isCorrect"], false);
}
