//! 测验数据模型与解析
//!
//! 出题接口的成功响应有两种形态：
//! - 结构化的 `questions` 列表
//! - 原始文本 `raw`（题目之间用 `<|Q|>` 分隔）
//!
//! 两种形态统一解析为 Quiz，解析结果在整次作答期间不可变

use crate::error::{AppError, AppResult};
use crate::models::preferences::QuestionType;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// 单个题目
///
/// 由出题引擎生成，对测验会话只读
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Question {
    /// 题目ID（提示接口以此为键）
    pub id: String,
    /// 题干
    pub prompt: String,
    /// 选项（仅选择题，键为 A/B/C/D）
    pub options: Option<BTreeMap<String, String>>,
    /// 正确答案（仅选择题）
    pub answer: Option<String>,
    /// 作答形式，与提交时选择的题型一致
    pub answer_format: QuestionType,
    /// 是否有可用提示
    pub hint_available: bool,
}

/// 一次出题任务生成的完整测验
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Quiz {
    /// 有序题目列表
    pub questions: Vec<Question>,
}

impl Quiz {
    /// 题目数量
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// 从出题接口的响应体解析测验
///
/// # 参数
/// - `payload`: 响应 JSON
/// - `question_type`: 提交时选择的题型（决定 answer_format）
///
/// # 返回
/// 解析失败或结果为空时返回 MalformedResult
pub fn parse_quiz_payload(payload: &Value, question_type: QuestionType) -> AppResult<Quiz> {
    // 优先尝试结构化题目列表
    if let Some(items) = payload.get("questions").and_then(|v| v.as_array()) {
        let questions = parse_structured_questions(items, question_type)?;
        return finish(questions);
    }

    // 回退到原始文本
    if let Some(raw) = payload.get("raw").and_then(|v| v.as_str()) {
        let questions = parse_raw_questions(raw, question_type);
        return finish(questions);
    }

    Err(AppError::malformed_result(
        "响应中既没有 questions 列表也没有 raw 文本".to_string(),
    ))
}

fn finish(questions: Vec<Question>) -> AppResult<Quiz> {
    if questions.is_empty() {
        return Err(AppError::malformed_result("解析后题目列表为空"));
    }
    Ok(Quiz { questions })
}

/// 解析结构化题目列表
fn parse_structured_questions(
    items: &[Value],
    question_type: QuestionType,
) -> AppResult<Vec<Question>> {
    let mut questions = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let prompt = item
            .get("prompt")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                AppError::malformed_result(format!("第 {} 个题目缺少 prompt 字段", i + 1))
            })?
            .to_string();

        let id = item
            .get("id")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("q{}", i + 1));

        let options = item.get("options").and_then(|v| v.as_object()).map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect::<BTreeMap<_, _>>()
        });

        let answer = item
            .get("answer")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        // 服务端可能显式标注，否则只要提示接口可用就默认为 true
        let hint_available = item
            .get("hint_available")
            .and_then(|v| v.as_bool())
            .unwrap_or_else(|| {
                item.get("hint")
                    .map(|h| !h.is_null())
                    .unwrap_or(true)
            });

        questions.push(Question {
            id,
            prompt,
            options,
            answer,
            answer_format: question_type,
            hint_available,
        });
    }

    Ok(questions)
}

/// 解析原始文本形式的测验
///
/// 文本约定：题目之间用 `<|Q|>` 分隔；每题第一行为带编号的题干，
/// 之后是 `A) ...` 形式的选项行和 `Answer: X` 行。
/// 选择题只保留"四个选项齐全且有答案"的题目，简答题只取题干
pub fn parse_raw_questions(raw: &str, question_type: QuestionType) -> Vec<Question> {
    // 这几个正则是静态合法的
    let numbering_re = Regex::new(r"^\d+\.\s*").unwrap();
    let option_re = Regex::new(r"^([A-D])[\)\.:]\s*(.*)").unwrap();
    let answer_re = Regex::new(r"(?i)Answer[:\s]*([A-D])").unwrap();

    let mut questions = Vec::new();

    for item in raw.split("<|Q|>") {
        let lines: Vec<&str> = item
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();

        let Some(first) = lines.first() else {
            continue;
        };

        // 去掉开头的编号（如 "1."）
        let prompt = numbering_re.replace(first, "").to_string();
        if prompt.is_empty() {
            continue;
        }

        match question_type {
            QuestionType::FreeResponse => {
                questions.push(make_question(questions.len(), prompt, None, None, question_type));
            }
            QuestionType::MultipleChoice => {
                let mut options = BTreeMap::new();
                let mut answer = None;

                for line in &lines[1..] {
                    if let Some(caps) = option_re.captures(line) {
                        options.insert(caps[1].to_string(), caps[2].trim().to_string());
                        continue;
                    }
                    if let Some(caps) = answer_re.captures(line) {
                        answer = Some(caps[1].to_uppercase());
                    }
                }

                // 只保留答案有效且恰好四个选项的题目
                if answer.is_some() && options.len() == 4 {
                    questions.push(make_question(
                        questions.len(),
                        prompt,
                        Some(options),
                        answer,
                        question_type,
                    ));
                }
            }
        }
    }

    questions
}

fn make_question(
    index: usize,
    prompt: String,
    options: Option<BTreeMap<String, String>>,
    answer: Option<String>,
    answer_format: QuestionType,
) -> Question {
    Question {
        id: format!("q{}", index + 1),
        prompt,
        options,
        answer,
        answer_format,
        hint_available: true,
    }
}
