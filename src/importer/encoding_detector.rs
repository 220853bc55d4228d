// ==========================================
// 酒店后台 - 字符集探测
// ==========================================
// 职责: 根据 CSV 原始字节推断字符集
// 顺序: BOM → 合法 UTF-8 → chardetng 统计猜测 → UTF-8 兜底
// 约束: 纯函数，永不失败
// ==========================================

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// 字符集判定依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionSource {
    Bom,
    ValidUtf8,
    Guessed,
    Fallback,
}

/// 探测结果
#[derive(Debug, Clone, Copy)]
pub struct DetectedEncoding {
    pub encoding: &'static Encoding,
    pub source: DetectionSource,
}

impl DetectedEncoding {
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// 按探测结果解码（BOM 会被去除）
    ///
    /// 非法字节序列以 U+FFFD 替换，不报错。
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, _actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            tracing::debug!(encoding = self.name(), "解码时出现非法字节，已替换");
        }
        text
    }
}

/// 探测字符集
pub fn detect_encoding(bytes: &[u8]) -> DetectedEncoding {
    if bytes.is_empty() {
        return DetectedEncoding {
            encoding: UTF_8,
            source: DetectionSource::Fallback,
        };
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(bytes) {
        return DetectedEncoding {
            encoding,
            source: DetectionSource::Bom,
        };
    }

    if std::str::from_utf8(bytes).is_ok() {
        return DetectedEncoding {
            encoding: UTF_8,
            source: DetectionSource::ValidUtf8,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    DetectedEncoding {
        encoding,
        source: DetectionSource::Guessed,
    }
}
