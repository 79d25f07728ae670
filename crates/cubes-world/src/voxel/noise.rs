use fastnoise_lite::{FastNoiseLite, NoiseType};

use crate::worldgen::TerrainConfig;

/// Continuous terrain height over the normalized horizontal plane.
///
/// Implementations must be pure: the same `(x_norm, z_norm)` always yields
/// the same value in `[0, 1]`.
pub trait HeightNoise: Send + Sync {
    fn height(&self, x_norm: f32, z_norm: f32) -> f32;
}

impl<F> HeightNoise for F
where
    F: Fn(f32, f32) -> f32 + Send + Sync,
{
    #[inline]
    fn height(&self, x_norm: f32, z_norm: f32) -> f32 {
        self(x_norm, z_norm)
    }
}

/// Constant height everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatHeight(pub f32);

impl HeightNoise for FlatHeight {
    #[inline]
    fn height(&self, _x_norm: f32, _z_norm: f32) -> f32 {
        self.0
    }
}

/// Seeded fractal OpenSimplex2 height, remapped into `[min_ratio, max_ratio]`.
pub struct NoiseHeight {
    noise: FastNoiseLite,
    frequency: f32,
    octaves: u32,
    persistence: f32,
    lacunarity: f32,
    min_ratio: f32,
    max_ratio: f32,
}

impl NoiseHeight {
    pub fn new(params: &TerrainConfig) -> Self {
        let mut noise = FastNoiseLite::with_seed(params.seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        // Sample positions are pre-scaled by `frequency`.
        noise.set_frequency(Some(1.0));
        Self {
            noise,
            frequency: params.frequency,
            octaves: params.octaves.max(1),
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            min_ratio: params.min_ratio,
            max_ratio: params.max_ratio,
        }
    }

    /// Fractal sum normalized back to `[-1, 1]`.
    fn fractal(&self, x: f32, z: f32) -> f32 {
        let mut amp = 1.0_f32;
        let mut freq = self.frequency;
        let mut sum = 0.0_f32;
        let mut max_amp = 0.0_f32;
        for _ in 0..self.octaves {
            sum += self.noise.get_noise_2d(x * freq, z * freq) * amp;
            max_amp += amp;
            amp *= self.persistence;
            freq *= self.lacunarity;
        }
        if max_amp > 0.0 { sum / max_amp } else { sum }
    }
}

impl HeightNoise for NoiseHeight {
    fn height(&self, x_norm: f32, z_norm: f32) -> f32 {
        let t = ((self.fractal(x_norm, z_norm) + 1.0) * 0.5).clamp(0.0, 1.0);
        (self.min_ratio + t * (self.max_ratio - self.min_ratio)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_height_stays_in_configured_band() {
        let cfg = TerrainConfig::default();
        let h = NoiseHeight::new(&cfg);
        for i in 0..64 {
            for j in 0..64 {
                let v = h.height(i as f32 / 64.0, j as f32 / 64.0);
                assert!(v >= cfg.min_ratio - 1e-6 && v <= cfg.max_ratio + 1e-6, "{v}");
            }
        }
    }

    #[test]
    fn closures_are_height_sources() {
        let ramp = |x: f32, _z: f32| x;
        assert_eq!(ramp.height(0.25, 0.9), 0.25);
        assert_eq!(FlatHeight(0.4).height(0.1, 0.2), 0.4);
    }
}
