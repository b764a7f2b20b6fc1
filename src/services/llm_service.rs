//! LLM 服务 - 业务能力层
//!
//! 只负责"调用一次 Chat Completion"能力，不关心论文和评审标准
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::JudgeError;

/// 评审调用使用的采样温度
const JUDGE_TEMPERATURE: f32 = 0.1;
/// 评审调用的最大输出 token 数
const JUDGE_MAX_TOKENS: u32 = 1500;

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API，返回文本内容
/// - 把 API 错误归类为可重试（频率限制）与不可重试
/// - 不解析返回内容
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    json_mode: bool,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            json_mode: config.llm_json_mode,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（已去除首尾空白）
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, JudgeError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| self.classify(e))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| self.classify(e))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = self
            .build_request(messages)
            .map_err(|e| self.classify(e))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            self.classify(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| JudgeError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        Ok(content.trim().to_string())
    }

    /// 构建请求；开启 JSON 模式时附带 `response_format: json_object`
    fn build_request(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<CreateChatCompletionRequest, OpenAIError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model_name)
            .messages(messages)
            .temperature(JUDGE_TEMPERATURE)
            .max_tokens(JUDGE_MAX_TOKENS);
        if self.json_mode {
            args.response_format(ResponseFormat::JsonObject);
        }
        args.build()
    }

    /// 将 async-openai 的错误归类
    fn classify(&self, err: OpenAIError) -> JudgeError {
        let model = self.model_name.clone();
        match err {
            OpenAIError::ApiError(api_err) => {
                // Display 中包含 type 与 code
                let message = api_err.to_string();
                if is_rate_limit(&message) {
                    JudgeError::RateLimited { model, message }
                } else {
                    JudgeError::Api { model, message }
                }
            }
            other => JudgeError::Api {
                model,
                message: other.to_string(),
            },
        }
    }
}

/// OpenAI 的频率限制错误
fn is_rate_limit(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("rate_limit") || lower.contains("rate limit")
}
