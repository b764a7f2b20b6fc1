use crate::error::ConfigError;

/// 每篇论文最多读取的页数（摘要、引言、结论通常已足够）
pub const DEFAULT_MAX_PAGES: usize = 10;
/// 发送给评审服务的正文最大字符数
pub const DEFAULT_EXCERPT_CHARS: usize = 7000;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 论文根目录（递归扫描）
    pub papers_dir: String,
    /// 报告输出目录
    pub output_dir: String,
    /// 自定义评审标准 TOML 文件，未设置时使用内置标准
    pub rubric_file: Option<String>,
    /// 每篇论文最多读取的页数
    pub max_pages: usize,
    /// 发送给 LLM 的正文截断长度（字符）
    pub excerpt_chars: usize,
    /// 每次调用之后的固定间隔（毫秒）
    pub call_delay_ms: u64,
    /// 频率限制时的最大重试次数
    pub max_retries: u32,
    /// 退避基础时长（毫秒），第 n 次重试等待 base * 2^(n-1)
    pub retry_base_delay_ms: u64,
    /// 单次评审调用超时（秒）
    pub judge_timeout_secs: u64,
    /// 详细报告中列出的论文数量
    pub top_n: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 要求服务端以 JSON 对象返回（需模型支持 `response_format`）
    pub llm_json_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            papers_dir: "papers".to_string(),
            output_dir: ".".to_string(),
            rubric_file: None,
            max_pages: DEFAULT_MAX_PAGES,
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            call_delay_ms: 500,
            max_retries: 3,
            retry_base_delay_ms: 1000,
            judge_timeout_secs: 120,
            top_n: 10,
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4-0125-preview".to_string(),
            llm_json_mode: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            papers_dir: std::env::var("PAPERS_DIR").unwrap_or(default.papers_dir),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            rubric_file: std::env::var("RUBRIC_FILE").ok().filter(|v| !v.trim().is_empty()),
            max_pages: std::env::var("MAX_PAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_pages),
            excerpt_chars: std::env::var("EXCERPT_CHARS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.excerpt_chars),
            call_delay_ms: std::env::var("CALL_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.call_delay_ms),
            max_retries: std::env::var("MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_base_delay_ms: std::env::var("RETRY_BASE_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_base_delay_ms),
            judge_timeout_secs: std::env::var("JUDGE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.judge_timeout_secs),
            top_n: std::env::var("TOP_N").ok().and_then(|v| v.parse().ok()).unwrap_or(default.top_n),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("OPENAI_API_KEY"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_json_mode: std::env::var("LLM_JSON_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_json_mode),
        }
    }

    /// 启动前检查
    ///
    /// 缺少 API 密钥属于启动条件不满足，而不是流水线错误。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::EnvVarNotFound {
                var_name: "LLM_API_KEY".to_string(),
            });
        }
        if self.excerpt_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "excerpt_chars".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        if self.judge_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "judge_timeout_secs".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }
}
