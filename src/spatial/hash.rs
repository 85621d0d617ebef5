//! 空间哈希
//!
//! 桶存放在 arena（`Vec<Vec<T>>` + 空闲链表）中，由打包成 64 位的整数网格坐标索引。
//! 不记录条目的包围盒：`remove` 必须传入与 `insert` 相同的 bounds。

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use tracing::trace;

use super::bounds::Bounds;

/// 把两个 32 位网格坐标打包成一个 key
#[inline]
fn cell_key(ix: i32, iz: i32) -> u64 {
    ((ix as u32 as u64) << 32) | (iz as u32 as u64)
}

#[inline]
fn decode_key(key: u64) -> (i32, i32) {
    ((key >> 32) as u32 as i32, key as u32 as i32)
}

/// bounds 覆盖的格子范围（含边界格，取极值的向下整除；无穷值饱和到 i32 极值）
#[derive(Debug, Clone, Copy)]
struct CellRange {
    x0: i32,
    x1: i32,
    z0: i32,
    z1: i32,
}

impl CellRange {
    fn of(cell_size: f64, bounds: &Bounds) -> Self {
        let cell_of = |v: f64| (v / cell_size).floor() as i32;
        Self {
            x0: cell_of(bounds.min_x),
            x1: cell_of(bounds.max_x),
            z0: cell_of(bounds.min_z),
            z1: cell_of(bounds.max_z),
        }
    }

    fn cell_count(&self) -> u128 {
        let span = |lo: i32, hi: i32| (hi as i64 - lo as i64 + 1).max(0) as u128;
        span(self.x0, self.x1) * span(self.z0, self.z1)
    }

    fn contains(&self, key: u64) -> bool {
        let (x, z) = decode_key(key);
        (self.x0..=self.x1).contains(&x) && (self.z0..=self.z1).contains(&z)
    }

    /// x 主序
    fn keys(self) -> impl Iterator<Item = u64> {
        (self.x0..=self.x1).flat_map(move |x| (self.z0..=self.z1).map(move |z| cell_key(x, z)))
    }
}

#[derive(Debug, Clone)]
pub struct SpatialHash<T> {
    cell_size: f64,
    index: HashMap<u64, usize>,
    buckets: Vec<Vec<T>>,
    free: Vec<usize>,
}

impl<T: Copy + Eq + Hash> SpatialHash<T> {
    /// 非正或非有限的格子尺寸按 1 处理，避免除零。
    pub fn new(cell_size: f64) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            1.0
        };
        Self {
            cell_size,
            index: HashMap::new(),
            buckets: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// 范围内已存在的桶 key，按 x 主序。
    /// 范围比现有桶还多时改为扫描现有桶，避免枚举整个范围。
    fn occupied_keys(&self, range: CellRange) -> Vec<u64> {
        if range.cell_count() <= self.index.len() as u128 {
            return range.keys().filter(|key| self.index.contains_key(key)).collect();
        }
        let mut keys: Vec<u64> = self
            .index
            .keys()
            .copied()
            .filter(|&key| range.contains(key))
            .collect();
        keys.sort_unstable_by_key(|&key| decode_key(key));
        keys
    }

    pub fn insert(&mut self, item: T, bounds: &Bounds) {
        for key in CellRange::of(self.cell_size, bounds).keys() {
            let slot = match self.index.get(&key) {
                Some(&slot) => slot,
                None => {
                    let slot = match self.free.pop() {
                        Some(slot) => slot,
                        None => {
                            self.buckets.push(Vec::new());
                            self.buckets.len() - 1
                        }
                    };
                    self.index.insert(key, slot);
                    slot
                }
            };
            let bucket = &mut self.buckets[slot];
            if !bucket.contains(&item) {
                bucket.push(item);
            }
        }
    }

    /// 逆操作；未知条目/空桶为 no-op，变空的桶被回收。
    pub fn remove(&mut self, item: T, bounds: &Bounds) {
        for key in self.occupied_keys(CellRange::of(self.cell_size, bounds)) {
            let Some(&slot) = self.index.get(&key) else {
                continue;
            };
            let bucket = &mut self.buckets[slot];
            bucket.retain(|existing| *existing != item);
            if bucket.is_empty() {
                self.index.remove(&key);
                self.free.push(slot);
                trace!(key, slot, "回收空桶");
            }
        }
    }

    /// 与 bounds 重叠的所有桶中条目的去重并集（按首次出现的顺序）。
    pub fn query_range(&self, bounds: &Bounds) -> Vec<T> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for key in self.occupied_keys(CellRange::of(self.cell_size, bounds)) {
            let Some(&slot) = self.index.get(&key) else {
                continue;
            };
            for item in &self.buckets[slot] {
                if seen.insert(*item) {
                    out.push(*item);
                }
            }
        }
        out
    }

    /// 当前非空桶的数量
    pub fn len_buckets(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.buckets.clear();
        self.free.clear();
    }
}
