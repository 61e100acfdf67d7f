use crate::error::{OvdMatchError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct WorkbookInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// ファイルならそのまま、フォルダなら中のワークブックを列挙する
pub fn scan_workbooks(path: &Path, recursive: bool) -> Result<Vec<WorkbookInfo>> {
    if path.is_file() {
        return Ok(vec![workbook_info(path)]);
    }
    if !path.exists() {
        return Err(OvdMatchError::FolderNotFound(path.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut workbooks = Vec::new();

    for entry in WalkDir::new(path)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();

        if !entry_path.is_file() {
            continue;
        }

        let info = workbook_info(entry_path);
        // Excelのロックファイル（~$xxx.xlsx）は除外
        if info.file_name.starts_with("~$") {
            continue;
        }

        if let Some(ext) = entry_path.extension() {
            if is_workbook_extension(&ext.to_string_lossy()) {
                workbooks.push(info);
            }
        }
    }

    // ファイル名でソート
    workbooks.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(workbooks)
}

/// 照合結果の書き出し先
///
/// - 出力指定なし: 入力ファイルを上書き
/// - 複数ワークブック、または出力先がフォルダ: フォルダ内に同名で出力
/// - それ以外: 指定ファイルへ出力
///
/// 書き出しは常に xlsx 形式なので、拡張子も xlsx に揃える。
pub fn output_path_for(workbook: &WorkbookInfo, output: Option<&Path>, multiple: bool) -> PathBuf {
    let path = match output {
        None => workbook.path.clone(),
        Some(out) if multiple || out.is_dir() || out.extension().is_none() => {
            out.join(&workbook.file_name)
        }
        Some(out) => out.to_path_buf(),
    };

    let is_xlsx = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if is_xlsx {
        path
    } else {
        path.with_extension("xlsx")
    }
}

fn workbook_info(path: &Path) -> WorkbookInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    WorkbookInfo {
        path: path.to_path_buf(),
        file_name,
    }
}

fn is_workbook_extension(ext: &str) -> bool {
    let ext = ext.to_lowercase();
    WORKBOOK_EXTENSIONS.contains(&ext.as_str())
}
