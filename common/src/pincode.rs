//! PINコード照合
//!
//! 類似度ではなく、6桁の数字列の完全一致で判定する。

use regex::Regex;

/// 正規化済み住所から最初の6桁の数字列を取り出す
///
/// 7桁以上の数字列では先頭6桁が対象になる。見つからなければ `None`。
pub fn extract_pincode(normalized_address: &str) -> Option<&str> {
    lazy_static::lazy_static! {
        static ref PINCODE_RE: Regex = Regex::new(r"[0-9]{6}").unwrap();
    }

    PINCODE_RE.find(normalized_address).map(|m| m.as_str())
}

/// 申告PINコード（空白除去後）と抽出PINコードの完全一致判定
///
/// 抽出できなかった場合は空文字列として比較する（双方空なら一致）。
pub fn pincode_match(input_pincode: &str, normalized_address: &str) -> bool {
    let input: String = input_pincode.chars().filter(|c| !c.is_whitespace()).collect();
    let extracted = extract_pincode(normalized_address).unwrap_or("");
    input == extracted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_anywhere() {
        assert!(pincode_match("400001", "Flat 12 Mumbai 400001 India"));
        assert!(pincode_match("400001", "400001"));
    }

    #[test]
    fn test_different_pincode() {
        assert!(!pincode_match("400001", "Flat 12 Mumbai 400002 India"));
    }

    #[test]
    fn test_no_six_digit_run() {
        assert!(!pincode_match("400001", "Flat 12 Mumbai India"));
        assert!(!pincode_match("400001", "Flat 12 Mumbai 40000 India"));
        assert!(!pincode_match("400001", ""));
    }

    #[test]
    fn test_input_whitespace_removed() {
        assert!(pincode_match("400 001", "Mumbai 400001"));
        assert!(pincode_match(" 400001\t", "Mumbai 400001"));
    }

    #[test]
    fn test_first_run_wins() {
        assert_eq!(extract_pincode("12345678 400001"), Some("123456"));
        assert!(!pincode_match("400001", "Phone 9876543210 Mumbai 400001"));
    }

    #[test]
    fn test_empty_input_compared_as_empty_string() {
        // 双方とも空文字列なら一致
        assert!(pincode_match("", "Flat 12 Mumbai"));
        assert!(pincode_match("  ", ""));
        // 本文にPINコードがあれば不一致
        assert!(!pincode_match("", "Mumbai 400001"));
    }
}
