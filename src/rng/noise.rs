//! 相干噪声场
//!
//! 底层原语为 OpenSimplex2（`fastnoise-lite`，频率固定为 1，由调用方缩放坐标）。
//! `layered` 把若干倍频按 persistence/lacunarity 叠加，再除以总振幅，
//! 因此不论层数多少，输出都大致落在 [-1, 1]。

use fastnoise_lite::{FastNoiseLite, NoiseType};

use super::seed::Seed;

pub struct NoiseField {
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed as i32);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { noise }
    }

    /// 按命名子流播种，例如 `for_stream(seed, "river")`。
    pub fn for_stream(seed: &Seed, name: &str) -> Self {
        Self::new(seed.stream(name))
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get_noise_2d(x as f32, y as f32) as f64
    }

    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.noise.get_noise_3d(x as f32, y as f32, z as f32) as f64
    }

    /// 多倍频叠加（2D）
    pub fn layered(&self, x: f64, y: f64, layers: u32, persistence: f64, lacunarity: f64) -> f64 {
        octaves(layers, persistence, lacunarity, |f| self.sample(x * f, y * f))
    }

    /// 多倍频叠加（3D）
    pub fn layered_3d(
        &self,
        x: f64,
        y: f64,
        z: f64,
        layers: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        octaves(layers, persistence, lacunarity, |f| {
            self.sample_3d(x * f, y * f, z * f)
        })
    }
}

fn octaves(layers: u32, persistence: f64, lacunarity: f64, mut at: impl FnMut(f64) -> f64) -> f64 {
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut value = 0.0;
    let mut normalization = 0.0;

    for _ in 0..layers {
        value += at(frequency) * amplitude;
        normalization += amplitude;
        amplitude *= persistence;
        frequency *= lacunarity;
    }

    if normalization == 0.0 {
        return 0.0;
    }
    value / normalization
}
