mod options;
mod preset;

use lazy_raster::{Channels, Result};
use log::{error, info};
use crate::options::Options;

fn run(options: Options) -> Result<()> {
    info!("Loading image {}", options.source);
    let channels = Channels::open(&options.source)?;
    info!("Loaded {}x{}", channels.width(), channels.height());

    let channels = match options.preset {
        Some(preset) => {
            info!("Rendering preset {preset:?}");
            preset.render(&channels)
        }
        None => channels,
    };

    let output = if options.lightness {
        channels.with_rgb(&options.apply(&channels.lightness()))
    } else if options.ops.is_empty() {
        channels
    } else {
        channels.map(|raster| options.apply(raster))
    };

    info!("Calculating");
    output.save(&options.destination)?;
    info!("Saved {}x{} to {}", output.width(), output.height(), options.destination);
    Ok(())
}

fn main() {
    env_logger::init();

    let result = Options::parse(std::env::args().skip(1))
        .and_then(run);

    if let Err(e) = result {
        error!("{e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
