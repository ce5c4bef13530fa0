use std::{path::PathBuf, time::Duration};

use argh::FromArgs;

use waferscan::io::functional as F;
use waferscan::scan::{
    GeneratorConfig, JsonLinesRecordStore, MemoryRecordStore, RecordStore,
    WaferImageTransformer,
};

#[derive(FromArgs, Debug)]
/// Generate randomly transformed wafer scan images from a source image.
struct Args {
    /// path to the source wafer image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// directory the generated images are written to
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,

    /// number of images to generate
    #[argh(option, short = 'n', default = "1")]
    num_images: usize,

    /// milliseconds to wait between two generations
    #[argh(option, default = "0")]
    interval_ms: u64,

    /// fixed seed for reproducible transforms
    #[argh(option)]
    seed: Option<u64>,

    /// JSON-lines file the generation records are appended to
    #[argh(option, short = 'r')]
    records: Option<PathBuf>,

    /// JSON configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::from_json_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if args.seed.is_some() {
        config.random_seed = args.seed;
    }
    if args.records.is_some() {
        config.records_path = args.records;
    }

    let mut store: Box<dyn RecordStore> = match &config.records_path {
        Some(path) => Box::new(JsonLinesRecordStore::open(path)?),
        None => Box::new(MemoryRecordStore::new()),
    };

    // the source is decoded once and reused for every generation
    let source = F::read_image_any_rgb8(&args.image_path)?;
    log::info!(
        "source {} loaded: {}",
        args.image_path.display(),
        source.size()
    );

    let mut transformer = WaferImageTransformer::from_config(&config);
    let interval = Duration::from_millis(args.interval_ms);

    for i in 0..args.num_images {
        if i > 0 && !interval.is_zero() {
            std::thread::sleep(interval);
        }

        let generation =
            transformer.generate_and_persist(&source, &config.output_dir, store.as_mut())?;

        println!(
            "{} -> {} ({})",
            generation.record.original_name,
            generation.saved_path.display(),
            generation.params
        );
    }

    log::info!(
        "generated {} images into {}",
        args.num_images,
        config.output_dir.display()
    );

    Ok(())
}
