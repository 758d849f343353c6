use std::fmt;

/// 应用程序错误类型
///
/// 注意：核心解析入口 `parser::parse` 永不返回错误，这里覆盖的是
/// 文件装载和 DOCX 容器层面的失败
#[derive(Debug)]
pub enum AppError {
    /// DOCX 容器 / 颜色提取错误
    Docx(DocxError),
    /// 文件操作错误
    File(FileError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Docx(e) => write!(f, "DOCX错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Docx(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// DOCX 容器 / 颜色提取错误
///
/// 只有 `MissingDocumentPart` 是结构性致命错误；其余解析异常在
/// 提取器内部降级处理（当作"不是红色"），不会出现在这里
#[derive(Debug)]
pub enum DocxError {
    /// 容器缺少 word/document.xml —— 结构坏损，无法恢复
    MissingDocumentPart,
    /// 无法作为 ZIP 容器打开
    ArchiveOpenFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 读取容器内部条目失败
    EntryReadFailed {
        entry: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for DocxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocxError::MissingDocumentPart => {
                write!(f, "无效的DOCX文件: 缺少 word/document.xml")
            }
            DocxError::ArchiveOpenFailed { source } => {
                write!(f, "无法打开DOCX容器: {}", source)
            }
            DocxError::EntryReadFailed { entry, source } => {
                write!(f, "读取容器条目失败 ({}): {}", entry, source)
            }
        }
    }
}

impl std::error::Error for DocxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DocxError::MissingDocumentPart => None,
            DocxError::ArchiveOpenFailed { source }
            | DocxError::EntryReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 不支持的文件类型
    UnsupportedExtension {
        extension: String,
    },
    /// PDF 文本提取器未配置
    PdfExtractorMissing,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
            FileError::UnsupportedExtension { extension } => {
                write!(f, "不支持的文件类型: {}", extension)
            }
            FileError::PdfExtractorMissing => {
                write!(f, "未配置PDF文本提取器，无法处理PDF文件")
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<DocxError> for AppError {
    fn from(err: DocxError) -> Self {
        AppError::Docx(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
