use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 报告输出错误
    #[error("报告错误: {0}")]
    Report(#[from] ReportError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// PDF 文本提取错误
#[derive(Debug, Error)]
pub enum ExtractError {
    /// 无法打开或解析 PDF
    #[error("无法加载PDF ({path}): {message}")]
    LoadFailed { path: String, message: String },
    /// 某一页的文本无法解码
    #[error("第 {page} 页文本提取失败 ({path}): {message}")]
    PageFailed {
        path: String,
        page: u32,
        message: String,
    },
}

/// 评审服务错误
///
/// 任何一种都只影响当前论文，批处理继续。
#[derive(Debug, Error)]
pub enum JudgeError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {message}")]
    Api { model: String, message: String },
    /// 请求频率限制，可重试
    #[error("LLM请求频率限制 (模型: {model}): {message}")]
    RateLimited { model: String, message: String },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyResponse { model: String },
    /// 返回内容不符合评审结构
    #[error("LLM返回内容无法解析为评审结果: {reason}")]
    MalformedResponse { reason: String },
    /// 调用超时
    #[error("LLM调用超时 ({secs} 秒)")]
    Timeout { secs: u64 },
}

impl JudgeError {
    /// 是否属于频率限制类错误（可退避重试）
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, JudgeError::RateLimited { .. })
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 报告输出错误
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV 写入失败
    #[error("CSV报告写入失败 ({path}): {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// 图表绘制失败
    #[error("图表绘制失败 ({path}): {message}")]
    Chart { path: String, message: String },
    /// 文件写入失败
    #[error("报告写入失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建目录不存在错误
    pub fn directory_not_found(path: impl Into<String>) -> Self {
        AppError::File(FileError::DirectoryNotFound { path: path.into() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
