// 依存関係の差し替えデモ
// 固定トークン2つと外部依存の戻り値から挨拶文を組み立てる

use anyhow::Result;
use mockall::automock;
use std::fmt;

/// 挨拶に使う固定トークン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoType {
    Hello,
    World,
}

impl DemoType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hello => "Hello",
            Self::World => "World",
        }
    }
}

impl fmt::Display for DemoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 外部依存のトレイト（引数なしで文字列を返す）
#[automock]
pub trait Dependency {
    fn call(&self) -> Result<String>;
}

// クロージャもそのまま注入できるようにする
impl<F> Dependency for F
where
    F: Fn() -> Result<String>,
{
    fn call(&self) -> Result<String> {
        self()
    }
}

/// `"Hello World <依存の戻り値>"` を組み立てる
///
/// 依存は1回だけ呼び出す。依存のエラーはそのまま呼び出し元へ返す。
pub fn hello_world<D>(dependency: &D) -> Result<String>
where
    D: Dependency + ?Sized,
{
    let suffix = dependency.call()?;
    Ok(format!("{} {} {suffix}", DemoType::Hello, DemoType::World))
}
