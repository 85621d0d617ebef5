//! 伪随机流
//!
//! mulberry32：32 位状态，每次抽取先加黄金常数再做位混合。

use super::seed::Seed;

const GOLDEN_GAMMA: u32 = 0x6D2B_79F5;

/// 显式随机句柄。生成与仿真把它作为参数逐层传递，而不是使用全局单例。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRng {
    state: u32,
}

impl CityRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// 主流：数字种子直接使用，字符串种子先哈希。
    pub fn from_seed(seed: &Seed) -> Self {
        Self::new(seed.to_u32())
    }

    /// 命名子流，例如 `substream(seed, "district")` 对应 `"<seed>-district"`。
    pub fn substream(seed: &Seed, name: &str) -> Self {
        Self::new(seed.stream(name))
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// [0, 1) 上的均匀浮点数
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }

    /// 以概率 `p` 返回 true；`p` 先被钳制到 [0, 1]。
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.next_f64() < p
    }

    /// [lo, hi) 上的均匀浮点数
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// [0, len) 上的均匀下标；`len == 0` 时返回 None（仍然消耗一次抽取）。
    pub fn index(&mut self, len: usize) -> Option<usize> {
        let sample = self.next_f64();
        if len == 0 {
            return None;
        }
        Some(((sample * len as f64) as usize).min(len - 1))
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|i| items.get(i))
    }
}
