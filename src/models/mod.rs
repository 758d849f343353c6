pub mod loaders;
pub mod question;

pub use loaders::{parse_file_with_colors, PdfTextExtractor};
pub use question::{
    AnswerOption, DocxParseResult, FileParseResult, OptionLabel, ParsedExam, ParsedQuestion,
};
