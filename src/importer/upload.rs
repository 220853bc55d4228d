// ==========================================
// 酒店后台 - 上传暂存
// ==========================================
// 职责: 上传内容落到上传目录的临时文件，供解码器按路径读取
// 约束: 文件名安全化；临时文件在 StagedUpload 释放时删除（含失败路径）
// ==========================================

use crate::domain::FileFormat;
use crate::importer::error::{ImportError, ImportResult};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const FALLBACK_STEM: &str = "upload";

/// 安全化文件名主干
///
/// 只保留 ASCII 字母数字与 `.`、`-`、`_`；空白与路径分隔符变为 `_`；
/// 去掉首尾的 `.` 与 `_`。结果为空时使用 "upload"。
pub fn secure_file_stem(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            out.push(c);
        } else if c.is_whitespace() || matches!(c, '/' | '\\') {
            out.push('_');
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        trimmed.to_string()
    }
}

/// 拆分上传文件名为 (安全主干, 小写扩展名)
///
/// 扩展名取自原始文件名的最后一段，不受主干安全化影响。
pub fn split_upload_name(file_name: &str) -> (String, String) {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let path = Path::new(base);
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    (secure_file_stem(stem), ext)
}

/// 暂存中的上传文件
pub struct StagedUpload {
    file: NamedTempFile,
    original_name: String,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

/// 暂存上传内容
///
/// 格式与大小在写盘前校验；不受支持的格式不会产生任何文件。
pub fn stage_upload(
    upload_dir: &Path,
    file_name: &str,
    bytes: &[u8],
    max_file_bytes: u64,
) -> ImportResult<StagedUpload> {
    let (stem, ext) = split_upload_name(file_name);
    if FileFormat::from_extension(&ext).is_none() {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    if bytes.len() as u64 > max_file_bytes {
        return Err(ImportError::FileTooLarge {
            path: file_name.to_string(),
            size: bytes.len() as u64,
            max_size: max_file_bytes,
        });
    }

    std::fs::create_dir_all(upload_dir)?;

    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}-", stem))
        .suffix(&format!(".{}", ext))
        .tempfile_in(upload_dir)?;
    file.write_all(bytes)?;
    file.flush()?;

    tracing::debug!(path = %file.path().display(), size = bytes.len(), "上传文件已暂存");

    Ok(StagedUpload {
        file,
        original_name: file_name.to_string(),
    })
}
