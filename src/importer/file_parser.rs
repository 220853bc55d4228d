// ==========================================
// 酒店后台 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 约定: 首行为表头；空单元格为 ""；整行空白的行丢弃；
//       行级结构问题作为 RowFailure 随行返回，不中止整个文件
// ==========================================

use crate::config::DEFAULT_MAX_FILE_BYTES;
use crate::domain::FileFormat;
use crate::importer::encoding_detector::detect_encoding;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::raw_row::{DecodedTable, RawRow};
use crate::importer::reservation_importer_trait::FileParser;
use crate::importer::row_failure::{RowFailure, RowFailureReason};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::Timelike;
use csv::ReaderBuilder;
use std::path::Path;

/// 检查文件存在且不超过大小上限
fn check_file(path: &Path, max_file_bytes: u64) -> ImportResult<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ImportError::FileNotFound(path.display().to_string())
        } else {
            ImportError::FileReadError(e.to_string())
        }
    })?;

    if metadata.len() > max_file_bytes {
        return Err(ImportError::FileTooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            max_size: max_file_bytes,
        });
    }

    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装一行；空白行返回 None
///
/// 多出表头的单元格若有内容则视为行级失败，全空则忽略（常见于行尾多余逗号）。
fn assemble_row(
    row_number: usize,
    headers: &[String],
    values: Vec<String>,
) -> Option<Result<RawRow, RowFailure>> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return None;
    }

    if values.len() > headers.len()
        && values[headers.len()..].iter().any(|v| !v.trim().is_empty())
    {
        return Some(Err(RowFailure::new(
            row_number,
            RowFailureReason::ExtraCells {
                expected: headers.len(),
                found: values.len(),
            },
        )));
    }

    Some(Ok(RawRow::from_headers(row_number, headers, values)))
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    pub max_file_bytes: u64,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl CsvParser {
    /// 解析已读入内存的 CSV 字节
    pub fn parse_bytes(&self, bytes: &[u8], source: &str) -> ImportResult<DecodedTable> {
        let detected = detect_encoding(bytes);
        tracing::debug!(
            encoding = detected.name(),
            source = ?detected.source,
            "CSV 字符集探测完成"
        );
        let text = detected.decode(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeader(source.to_string()));
        }

        // 读取所有行
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row_number = idx + 1;
            match result {
                Ok(record) => {
                    let values = record.iter().map(str::to_string).collect();
                    if let Some(row) = assemble_row(row_number, &headers, values) {
                        rows.push(row);
                    }
                }
                Err(e) => rows.push(Err(RowFailure::new(
                    row_number,
                    RowFailureReason::Unreadable(e.to_string()),
                ))),
            }
        }

        Ok(DecodedTable {
            headers,
            encoding: Some(detected.name().to_string()),
            rows,
        })
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<DecodedTable> {
        let ext = extension_of(file_path);
        if FileFormat::from_extension(&ext) != Some(FileFormat::Csv) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        check_file(file_path, self.max_file_bytes)?;

        // 读入后文件句柄即释放
        let bytes = std::fs::read(file_path)?;
        self.parse_bytes(&bytes, &file_path.display().to_string())
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    pub max_file_bytes: u64,
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// 单元格转文本；错误单元格返回 Err(错误文本)
fn cell_to_text(cell: &Data) -> Result<String, String> {
    match cell {
        Data::Empty => Ok(String::new()),
        Data::String(s) => Ok(s.clone()),
        Data::Float(f) => Ok(f.to_string()),
        Data::Int(i) => Ok(i.to_string()),
        Data::Bool(b) => Ok(b.to_string()),
        Data::DateTime(dt) => Ok(match dt.as_datetime() {
            Some(ndt) if ndt.hour() == 0 && ndt.minute() == 0 && ndt.second() == 0 => {
                ndt.format("%Y-%m-%d").to_string()
            }
            Some(ndt) => ndt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Ok(s.clone()),
        Data::Error(e) => Err(e.to_string()),
    }
}

/// 按表头组装一个工作表行；含错误单元格时整行为行级失败（取第一个错误）
fn assemble_sheet_row(
    row_number: usize,
    headers: &[String],
    cells: &[Data],
) -> Option<Result<RawRow, RowFailure>> {
    let mut values = Vec::with_capacity(cells.len());
    let mut cell_error = None;

    for (col_idx, cell) in cells.iter().enumerate() {
        match cell_to_text(cell) {
            Ok(text) => values.push(text),
            Err(detail) => {
                if cell_error.is_none() {
                    let column = headers
                        .get(col_idx)
                        .filter(|h| !h.trim().is_empty())
                        .cloned()
                        .unwrap_or_else(|| format!("#{}", col_idx + 1));
                    cell_error = Some(RowFailureReason::CellError { column, detail });
                }
                values.push(String::new());
            }
        }
    }

    match cell_error {
        Some(reason) => Some(Err(RowFailure::new(row_number, reason))),
        None => assemble_row(row_number, headers, values),
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<DecodedTable> {
        let ext = extension_of(file_path);
        match FileFormat::from_extension(&ext) {
            Some(format) if format.is_spreadsheet() => {}
            _ => return Err(ImportError::UnsupportedFormat(ext)),
        }

        check_file(file_path, self.max_file_bytes)?;

        // 打开 Excel 文件（xls / xlsx 自动识别）
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::MissingHeader(file_path.display().to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_to_text(cell).unwrap_or_default())
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(ImportError::MissingHeader(file_path.display().to_string()));
        }

        // 读取数据行
        let mut rows = Vec::new();
        for (idx, data_row) in sheet_rows.enumerate() {
            if let Some(row) = assemble_sheet_row(idx + 1, &headers, data_row) {
                rows.push(row);
            }
        }

        Ok(DecodedTable {
            headers,
            encoding: None,
            rows,
        })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    pub max_file_bytes: u64,
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl UniversalFileParser {
    pub fn new(max_file_bytes: u64) -> Self {
        Self { max_file_bytes }
    }

    /// 按给定扩展名解码文件
    ///
    /// 扩展名不受支持时在打开文件之前返回 UnsupportedFormat。
    pub fn decode(&self, file_path: &Path, extension: &str) -> ImportResult<DecodedTable> {
        match FileFormat::from_extension(extension) {
            Some(FileFormat::Csv) => CsvParser {
                max_file_bytes: self.max_file_bytes,
            }
            .parse_to_raw_records(file_path),
            Some(FileFormat::Xls) | Some(FileFormat::Xlsx) => ExcelParser {
                max_file_bytes: self.max_file_bytes,
            }
            .parse_to_raw_records(file_path),
            None => Err(ImportError::UnsupportedFormat(
                extension.trim_start_matches('.').to_lowercase(),
            )),
        }
    }
}

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<DecodedTable> {
        self.decode(file_path, &extension_of(file_path))
    }
}
