//! Command Parser - 指令语法解析
//!
//! 语法: `/<target>[<restaurantId>]: <message>`
//!
//! - target: ASCII 字母/数字/下划线，大小写不敏感
//! - restaurantId: 不含 `]` 的任意字符
//! - message: `:` 之后（跳过空白）的整行剩余内容

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use super::Command;

/// 指令语法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid command syntax: {input}")]
pub struct SyntaxError {
    pub input: String,
}

/// 目标工位同义词表
///
/// 启动时构建，之后只读。未登记的目标原样（小写）放行。
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: HashMap<String, String>,
}

impl SynonymTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }

    /// 归一化目标：先小写，再查同义词表
    pub fn canonical(&self, raw_target: &str) -> String {
        let lower = raw_target.to_lowercase();
        match self.entries.get(&lower) {
            Some(canonical) => canonical.clone(),
            None => lower,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new([
            ("chef", "chef"),
            ("cocinero", "cocinero"),
            ("kitchen", "kitchen"),
        ])
    }
}

const COMMAND_PATTERN: &str = r"(?i)^/((?-u:[A-Za-z0-9_])+?)\[([^\]]+?)\]:\s*(.+)$";

/// 指令解析器
///
/// 纯函数语义：无 I/O，相同输入总是得到相同结果
#[derive(Debug, Clone)]
pub struct CommandParser {
    pattern: Regex,
    synonyms: SynonymTable,
}

impl CommandParser {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self {
            // 模式为编译期常量
            pattern: Regex::new(COMMAND_PATTERN).expect("command pattern is valid"),
            synonyms,
        }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// 解析原始输入，不匹配完整语法时返回 SyntaxError（不产生部分结果）
    pub fn parse(&self, raw: &str) -> Result<Command, SyntaxError> {
        let captures = self.pattern.captures(raw).ok_or_else(|| SyntaxError {
            input: raw.to_string(),
        })?;

        let target = self.synonyms.canonical(&captures[1]);
        let restaurant_id = captures[2].to_string();
        let message = captures[3].to_string();

        Ok(Command::new(target, restaurant_id, message))
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(SynonymTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_command() {
        let parser = CommandParser::default();
        let command = parser.parse("/chef[r1]: hola").unwrap();

        assert_eq!(command.target(), "chef");
        assert_eq!(command.restaurant_id(), "r1");
        assert_eq!(command.message(), "hola");
    }

    #[test]
    fn test_parse_rejects_free_text() {
        let parser = CommandParser::default();
        assert!(parser.parse("not a command").is_err());
    }

    #[test]
    fn test_target_is_case_insensitive_and_normalized() {
        let parser = CommandParser::default();
        let command = parser.parse("/Kitchen[r9]: test").unwrap();

        assert_eq!(command.target(), "kitchen");
        assert_eq!(command.restaurant_id(), "r9");
        assert_eq!(command.message(), "test");
    }

    #[test]
    fn test_unknown_target_passes_through_lowercased() {
        let parser = CommandParser::default();
        let command = parser.parse("/BARRA_2[local-centro]: dos cafés").unwrap();

        assert_eq!(command.target(), "barra_2");
        assert_eq!(command.restaurant_id(), "local-centro");
        assert_eq!(command.message(), "dos cafés");
    }

    #[test]
    fn test_synonym_mapping() {
        let parser = CommandParser::new(SynonymTable::new([("cocina", "kitchen")]));
        let command = parser.parse("/COCINA[r1]: mesa 4 lista").unwrap();
        assert_eq!(command.target(), "kitchen");
    }

    #[test]
    fn test_message_keeps_rest_of_line() {
        let parser = CommandParser::default();
        let command = parser.parse("/chef[r1]:sin espacio: y dos puntos").unwrap();
        assert_eq!(command.message(), "sin espacio: y dos puntos");
    }

    #[test]
    fn test_restaurant_id_may_contain_spaces() {
        let parser = CommandParser::default();
        let command = parser.parse("/chef[La Tasca 3]: hola").unwrap();
        assert_eq!(command.restaurant_id(), "La Tasca 3");
    }

    #[test]
    fn test_malformed_inputs_fail() {
        let parser = CommandParser::default();
        let inputs = [
            "",
            "chef[r1]: hola",
            "/chef: hola",
            "/chef[]: hola",
            "/chef[r1] hola",
            "/chef[r1]:",
            "/[r1]: hola",
            "/che-f[r1]: hola",
            "/chef[r1]: hola\nsegunda línea",
            " /chef[r1]: hola",
        ];
        for input in inputs {
            assert!(parser.parse(input).is_err(), "expected failure for {input:?}");
        }
    }

    #[test]
    fn test_syntax_error_carries_input() {
        let parser = CommandParser::default();
        let err = parser.parse("hola").unwrap_err();
        assert_eq!(err.input, "hola");
    }
}
