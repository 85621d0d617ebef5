//! 种子类型
//!
//! 种子可以是字符串或数字；字符串经 31 乘子哈希折叠为 32 位整数。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 城市种子：字符串或数字。数字可以为负数或小数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(f64),
    Text(String),
}

/// 把字符串哈希为 32 位无符号整数（按 UTF-16 码元，`h = h * 31 + c`，32 位回绕）。
pub fn hash_seed(text: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in text.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash as u32
}

impl Seed {
    /// 未指定种子时使用：从线程随机源取一个新值，渲染成 base-36 字符串。
    pub fn random() -> Seed {
        Seed::Text(to_base36(rand::random::<u64>()))
    }

    /// 主随机流使用的 32 位种子。数字种子向零取整后按 2^32 取模，非有限值为 0。
    pub fn to_u32(&self) -> u32 {
        const MODULUS: f64 = 4_294_967_296.0;
        match self {
            Seed::Number(n) if n.is_finite() => n.trunc().rem_euclid(MODULUS) as u32,
            Seed::Number(_) => 0,
            Seed::Text(s) => hash_seed(s),
        }
    }

    /// 派生子流的种子：`"<seed>-<stream>"` 的哈希。
    pub fn stream(&self, name: &str) -> u32 {
        hash_seed(&format!("{self}-{name}"))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{n}"),
            Seed::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

impl From<u64> for Seed {
    fn from(n: u64) -> Self {
        Seed::Number(n as f64)
    }
}

impl From<f64> for Seed {
    fn from(n: f64) -> Self {
        Seed::Number(n)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
