use std::str::FromStr;
use lazy_raster::{Channels, Raster, RasterError};

/// Named whole-image pipelines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Preset {
    Glow,
    Outline,
    OutlineOfOutline,
}

impl FromStr for Preset {
    type Err = RasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "glow" => Ok(Preset::Glow),
            "outline" => Ok(Preset::Outline),
            "outline-of-outline" => Ok(Preset::OutlineOfOutline),
            unknown => Err(RasterError::InvalidArgument(format!("Unknown preset '{unknown}'"))),
        }
    }
}

/// Soft mask in `[1, 2]`, brighter around the light parts of the image.
pub fn glow_mask(channels: &Channels) -> Raster {
    channels.lightness()
        .min_cut_off(200.0, 0.0)
        .gaussian_blur(20)
        .normalize()
        .max_cut_off(0.0, 1.0)
        .gaussian_blur(20)
        .add(1.0)
        .evaluate()
}

/// 0.0 on edges, 1.0 elsewhere.
pub fn outline_mask(channels: &Channels) -> Raster {
    channels.lightness()
        .edges(100.0)
        .invert()
        .evaluate()
}

pub fn outline_of_outline_mask(channels: &Channels) -> Raster {
    channels.lightness()
        .edges(100.0)
        .multiply(255.0)
        .edges(100.0)
        .invert()
        .evaluate()
}

impl Preset {
    pub fn render(&self, channels: &Channels) -> Channels {
        let glow = glow_mask(channels);
        let mask = match self {
            Preset::Glow => None,
            Preset::Outline => Some(outline_mask(channels)),
            Preset::OutlineOfOutline => Some(outline_of_outline_mask(channels)),
        };
        channels.map(|raster| {
            let raster = match &mask {
                Some(mask) => raster.multiply_raster(mask),
                None => raster.clone(),
            };
            raster.multiply_raster(&glow).clamp(0.0, 255.0)
        })
    }
}
