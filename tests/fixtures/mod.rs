// テスト用のサンプルプロジェクト
// tests/fixtures/samples のTypeScriptファイルを一時ディレクトリへ展開する

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DEMO_TS: &str = include_str!("samples/demo.ts");
pub const DEMO_SPEC_TS: &str = include_str!("samples/demo.spec.ts");
pub const DEPENDENCY_TS: &str = include_str!("samples/dependency.ts");
pub const DEMO_TYPE_TS: &str = include_str!("samples/types/DemoType.ts");

/// サンプルプロジェクト（デモ + 任意の追加ファイル）
pub struct SampleProject {
    pub dir: TempDir,
}

impl SampleProject {
    /// `demo.ts` / `demo.spec.ts` の組を含むプロジェクトを作成
    pub fn demo() -> Self {
        let project = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        project.write("src/demo.ts", DEMO_TS);
        project.write("src/demo.spec.ts", DEMO_SPEC_TS);
        project.write("src/dependency.ts", DEPENDENCY_TS);
        project.write("src/types/DemoType.ts", DEMO_TYPE_TS);
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, contents: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directory");
        }
        fs::write(path, contents).expect("Failed to write fixture file");
    }

    /// モックが足りないモジュールの組を追加
    pub fn with_unmocked_clock(self) -> Self {
        self.write(
            "src/clock.ts",
            "import { now } from \"./time\";\nimport { format } from \"date-fns\";\n\nexport const stamp = () => format(now());\n",
        );
        self.write(
            "src/clock.test.ts",
            "import { stamp } from \"./clock\";\n\njest.mock(\"./time\");\n\nit(\"stamps\", () => expect(stamp()).toBeDefined());\n",
        );
        self
    }
}
