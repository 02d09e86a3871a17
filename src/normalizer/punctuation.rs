//! 記号・数字の置換
//!
//! ASCII記号（`+` と `#` を除く）と数字を1文字ずつ置換文字に置き換える。
//! `c++` や `c#` をキーワードとして残すため `+` `#` は対象外。

use regex::{NoExpand, Regex};

lazy_static::lazy_static! {
    static ref PUNCTUATION_RE: Regex =
        Regex::new(r#"[0-9!"$%&'()*,./:;<=>?@\[\\\]^_`{|}~-]"#).unwrap();
}

/// 記号・数字を置換
pub fn replace_punctuation(text: &str, replacement: &str) -> String {
    PUNCTUATION_RE
        .replace_all(text, NoExpand(replacement))
        .into_owned()
}
