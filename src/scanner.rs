use crate::checking::config::CheckConfig;
use crate::core::{CheckError, CheckResult, TestPair};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

impl TestPair {
    /// テストファイルのパスからテスト対象モジュールとの組を作る
    pub fn from_test_file(test_file: impl Into<PathBuf>, config: &CheckConfig) -> CheckResult<Self> {
        let test_file = test_file.into();
        if !test_file.is_file() {
            return Err(CheckError::TestFileNotFound(test_file));
        }

        let under_test_name = test_file
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| FileScanner::under_test_name(name, &config.test_markers));
        let Some(under_test_name) = under_test_name else {
            return Err(CheckError::NotTestFile(test_file));
        };

        let under_test_file = test_file.with_file_name(under_test_name);
        if !under_test_file.is_file() {
            return Err(CheckError::UnderTestFileNotFound(under_test_file));
        }

        Ok(Self::new(test_file, under_test_file))
    }
}

pub struct FileScanner;

impl FileScanner {
    /// ディレクトリ以下のテストファイルを再帰的に探し、テスト対象と組にする
    ///
    /// テスト対象が存在しないテストファイルや読めないサブディレクトリは読み飛ばす。
    /// 結果はテストファイルのパス順。
    pub fn find_test_pairs(directory: &Path, config: &CheckConfig) -> CheckResult<Vec<TestPair>> {
        let mut pairs = Vec::new();

        let walker = WalkDir::new(directory).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config.is_ignored_dir(&entry.file_name().to_string_lossy())
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // 起点ディレクトリが読めない場合のみ致命的
                Err(error) if error.depth() == 0 => {
                    return Err(CheckError::directory_walk(directory, error));
                }
                Err(error) => {
                    tracing::warn!(%error, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let is_test = entry
                .file_name()
                .to_str()
                .is_some_and(|name| Self::is_test_file_name(name, &config.test_markers));
            if !is_test {
                continue;
            }

            match TestPair::from_test_file(entry.path(), config) {
                Ok(pair) => pairs.push(pair),
                Err(error) => {
                    tracing::debug!(path = %entry.path().display(), %error, "skipping test file");
                }
            }
        }

        pairs.sort_by(|a, b| a.test_file.cmp(&b.test_file));
        Ok(pairs)
    }

    /// ファイル名がテストファイルかどうか（先頭以外のドット区切りの要素がマーカーと一致）
    pub fn is_test_file_name(file_name: &str, markers: &[String]) -> bool {
        Self::under_test_name(file_name, markers).is_some()
    }

    /// テストファイル名からマーカー要素を取り除いたテスト対象のファイル名
    ///
    /// `demo.spec.ts` -> `demo.ts`
    pub fn under_test_name(file_name: &str, markers: &[String]) -> Option<String> {
        let segments: Vec<&str> = file_name.split('.').collect();
        let marker_index = segments
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, segment)| markers.iter().any(|m| m == *segment))
            .map(|(index, _)| index)?;

        if segments[0].is_empty() {
            return None;
        }

        let name = segments
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != marker_index)
            .map(|(_, segment)| *segment)
            .collect::<Vec<_>>()
            .join(".");
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn markers() -> Vec<String> {
        vec!["test".to_string(), "spec".to_string()]
    }

    #[test]
    fn test_under_test_name() {
        let markers = markers();
        assert_eq!(
            FileScanner::under_test_name("demo.test.ts", &markers),
            Some("demo.ts".to_string())
        );
        assert_eq!(
            FileScanner::under_test_name("demo.spec.ts", &markers),
            Some("demo.ts".to_string())
        );
        assert_eq!(
            FileScanner::under_test_name("Button.test.tsx", &markers),
            Some("Button.tsx".to_string())
        );
        assert_eq!(
            FileScanner::under_test_name("api.client.test.js", &markers),
            Some("api.client.js".to_string())
        );
    }

    #[test]
    fn test_under_test_name_rejects_non_test_files() {
        let markers = markers();
        assert_eq!(FileScanner::under_test_name("demo.ts", &markers), None);
        assert_eq!(FileScanner::under_test_name("test.ts", &markers), None);
        assert_eq!(FileScanner::under_test_name("demo.testing.ts", &markers), None);
        assert_eq!(FileScanner::under_test_name(".test.ts", &markers), None);
        assert!(!FileScanner::is_test_file_name("contest.ts", &markers));
        assert!(FileScanner::is_test_file_name("demo.test.ts", &markers));
    }

    #[test]
    fn test_from_test_file() {
        let temp_dir = tempdir().unwrap();
        let test_file = temp_dir.path().join("demo.spec.ts");
        fs::write(&test_file, "").unwrap();
        fs::write(temp_dir.path().join("demo.ts"), "").unwrap();

        let pair = TestPair::from_test_file(&test_file, &CheckConfig::default()).unwrap();

        assert_eq!(pair.test_file, test_file);
        assert_eq!(pair.under_test_file, temp_dir.path().join("demo.ts"));
    }

    #[test]
    fn test_from_test_file_errors() {
        let temp_dir = tempdir().unwrap();
        let config = CheckConfig::default();

        let missing = TestPair::from_test_file(temp_dir.path().join("gone.test.ts"), &config);
        assert!(matches!(missing, Err(CheckError::TestFileNotFound(_))));

        let plain = temp_dir.path().join("plain.ts");
        fs::write(&plain, "").unwrap();
        let not_test = TestPair::from_test_file(&plain, &config);
        assert!(matches!(not_test, Err(CheckError::NotTestFile(_))));

        let orphan = temp_dir.path().join("orphan.test.ts");
        fs::write(&orphan, "").unwrap();
        match TestPair::from_test_file(&orphan, &config) {
            Err(CheckError::UnderTestFileNotFound(path)) => {
                assert_eq!(path, temp_dir.path().join("orphan.ts"));
            }
            other => panic!("Expected UnderTestFileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_find_test_pairs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("src/utils")).unwrap();
        fs::create_dir_all(root.join("node_modules/lib")).unwrap();
        fs::create_dir_all(root.join("src/__snapshots__")).unwrap();

        fs::write(root.join("src/demo.ts"), "").unwrap();
        fs::write(root.join("src/demo.test.ts"), "").unwrap();
        fs::write(root.join("src/utils/format.ts"), "").unwrap();
        fs::write(root.join("src/utils/format.spec.ts"), "").unwrap();
        // テスト対象が無いテストファイルは読み飛ばされる
        fs::write(root.join("src/orphan.test.ts"), "").unwrap();
        fs::write(root.join("node_modules/lib/index.ts"), "").unwrap();
        fs::write(root.join("node_modules/lib/index.test.ts"), "").unwrap();
        fs::write(root.join("src/__snapshots__/demo.test.ts"), "").unwrap();

        let pairs = FileScanner::find_test_pairs(root, &CheckConfig::default()).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].test_file, root.join("src/demo.test.ts"));
        assert_eq!(pairs[0].under_test_file, root.join("src/demo.ts"));
        assert_eq!(pairs[1].test_file, root.join("src/utils/format.spec.ts"));
        assert_eq!(pairs[1].under_test_file, root.join("src/utils/format.ts"));
    }

    #[test]
    fn test_find_test_pairs_respects_custom_ignore_dirs() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("dist")).unwrap();
        fs::write(root.join("dist/a.ts"), "").unwrap();
        fs::write(root.join("dist/a.test.ts"), "").unwrap();

        let config = CheckConfig::default().with_ignore_dirs(["dist"]);
        let pairs = FileScanner::find_test_pairs(root, &config).unwrap();
        assert!(pairs.is_empty());

        let pairs = FileScanner::find_test_pairs(root, &CheckConfig::default()).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn test_find_test_pairs_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let result =
            FileScanner::find_test_pairs(&temp_dir.path().join("missing"), &CheckConfig::default());
        assert!(matches!(result, Err(CheckError::DirectoryWalk { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_test_pairs_skips_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("demo.ts"), "").unwrap();
        fs::write(root.join("demo.test.ts"), "").unwrap();
        let locked = root.join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("hidden.ts"), "").unwrap();
        fs::write(locked.join("hidden.test.ts"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = FileScanner::find_test_pairs(root, &CheckConfig::default());
        let still_readable = fs::read_dir(&locked).is_ok();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let pairs = result.unwrap();
        if still_readable {
            // rootなど権限チェックが効かない環境では両方見つかる
            assert_eq!(pairs.len(), 2);
        } else {
            assert_eq!(pairs.len(), 1);
            assert_eq!(pairs[0].test_file, root.join("demo.test.ts"));
        }
    }
}
