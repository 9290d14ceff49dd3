use std::path::Path;

use anyhow::{ensure, Context};
use honeycomb::prelude::*;
use image::{imageops, DynamicImage, Rgba as Pixel, RgbaImage};
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// How canvases are flattened into an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: [245, 242, 235],
        }
    }
}

impl RenderConfig {
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// Composites `canvases` bottom to top over the background and writes a PNG.
pub fn write_png(
    canvases: &[&PixelCanvas],
    rc: &RenderConfig,
    out_path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let Some(first) = canvases.first() else {
        anyhow::bail!("nothing to render");
    };
    let (w, h) = first.size();
    ensure!(
        canvases.iter().all(|c| c.size() == (w, h)),
        "canvases must share one size"
    );

    let [r, g, b] = rc.background;
    let mut img = RgbaImage::from_pixel(w, h, Pixel([r, g, b, 255]));
    for canvas in canvases {
        imageops::overlay(&mut img, canvas.image(), 0, 0);
    }

    let out_path = out_path.as_ref();
    DynamicImage::ImageRgba8(img)
        .to_rgb8()
        .save(out_path)
        .with_context(|| format!("writing {}", out_path.display()))?;
    tracing::info!("Wrote {}.", out_path.display());
    Ok(())
}
