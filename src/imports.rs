// importの抽出
// ASTは使わず正規表現でモジュール指定子を拾う

use crate::core::{CheckError, CheckResult, Module};
use regex::{Captures, Regex};
use std::collections::HashSet;

const IMPORT_PATTERN: &str =
    r#"(?s)\bimport\b\s*(?P<type_only>type\s+)?(?:[^;'"`]*?\bfrom\s*)?["'](?P<module>[^"'\n]+)["']"#;

// 文字列リテラルを先に拾い、その外側にある行コメント・ブロックコメントだけを消す
const COMMENT_PATTERN: &str = r#"(?s)(?P<literal>"(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`)|(?P<line>//[^\n]*)|/\*.*?\*/"#;

/// ソースコードからimportを抽出する
#[derive(Debug, Clone)]
pub struct ImportExtractor {
    import_re: Regex,
    comment_re: Regex,
    region_re: Regex,
}

impl ImportExtractor {
    /// `not_mocked_region` は `//#region <name>` ～ `//#endregion` で囲む範囲の名前
    pub fn new(not_mocked_region: &str) -> CheckResult<Self> {
        let region_pattern = format!(
            r"(?ms)//[ \t]*#region[ \t]+{}[ \t]*\r?$.*?//[ \t]*#endregion",
            regex::escape(not_mocked_region)
        );

        Ok(Self {
            import_re: Self::compile(IMPORT_PATTERN)?,
            comment_re: Self::compile(COMMENT_PATTERN)?,
            region_re: Self::compile(&region_pattern)?,
        })
    }

    fn compile(pattern: &str) -> CheckResult<Regex> {
        Regex::new(pattern)
            .map_err(|e| CheckError::configuration(format!("invalid import pattern: {e}")))
    }

    /// モックが必要なimportを出現順・重複なしで返す
    ///
    /// 除外対象:
    /// - not-mocked リージョン内のimport
    /// - 行コメント・ブロックコメントとしてコメントアウトされたimport
    /// - `import type` による型のみのimport
    pub fn extract(&self, source: &str) -> Vec<Module> {
        let without_regions = self.region_re.replace_all(source, "");
        let code = self.strip_comments(&without_regions);

        let mut seen = HashSet::new();
        self.import_re
            .captures_iter(&code)
            .filter(|caps| caps.name("type_only").is_none())
            .filter_map(|caps| caps.name("module"))
            .map(|m| m.as_str().trim())
            .filter(|specifier| seen.insert(specifier.to_string()))
            .map(Module::new)
            .collect()
    }

    /// 文字列リテラル内を除いた `//` と `/* */` のコメントを取り除く
    pub fn strip_comments(&self, source: &str) -> String {
        self.comment_re
            .replace_all(source, |caps: &Captures| {
                if let Some(literal) = caps.name("literal") {
                    literal.as_str().to_string()
                } else if caps.name("line").is_some() {
                    String::new()
                } else {
                    " ".to_string()
                }
            })
            .into_owned()
    }
}

impl Default for ImportExtractor {
    fn default() -> Self {
        // 固定パターンのコンパイルは失敗しない
        Self::new(crate::checking::config::DEFAULT_NOT_MOCKED_REGION)
            .unwrap_or_else(|e| unreachable!("built-in import patterns must compile: {e}"))
    }
}
