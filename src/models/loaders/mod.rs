pub mod file_loader;

pub use file_loader::{clean_text, parse_file_with_colors, PdfTextExtractor};
