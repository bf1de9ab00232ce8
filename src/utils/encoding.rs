use crate::error::DatasetError;
use encoding_rs::Encoding;

/// Resolve an encoding label to a decoder.
///
/// Accepts WHATWG labels plus the Windows code page names commonly used for
/// Japanese CSV exports (`cp932`, `ms932`, `windows-31j`).
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding, DatasetError> {
    let normalized = label.trim().to_ascii_lowercase();
    let encoding = match normalized.as_str() {
        "cp932" | "ms932" | "windows-31j" | "sjis" | "shift-jis" | "shift_jis" => {
            Some(encoding_rs::SHIFT_JIS)
        }
        "eucjp" | "euc_jp" | "euc-jp" => Some(encoding_rs::EUC_JP),
        "utf8" | "utf-8" | "utf_8" | "utf-8-sig" | "utf_8_sig" => Some(encoding_rs::UTF_8),
        other => Encoding::for_label(other.as_bytes()),
    };

    encoding.ok_or_else(|| DatasetError::UnknownEncoding(label.to_string()))
}

/// Decode raw bytes into a `String`.
///
/// A leading byte order mark overrides the requested encoding. Malformed input
/// is an error rather than being replaced with U+FFFD.
pub fn decode_text(bytes: &[u8], label: &str) -> Result<String, DatasetError> {
    let encoding = encoding_for_label(label)?;
    let (text, actual, had_errors) = encoding.decode(bytes);

    if had_errors {
        return Err(DatasetError::Decode {
            encoding: actual.name(),
        });
    }

    Ok(text.into_owned())
}
