use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;
use wafer_image::{Bitmap, Image, PixelFormat};
use wafer_io::{functional::read_image_any_rgb8, png::write_image_png_u8, IoError};

use crate::compositor::{self, WarpMode};
use crate::config::GeneratorConfig;
use crate::error::WaferError;
use crate::params::TransformParams;
use crate::record::{Generation, GenerationRecord, LabeledImage};
use crate::store::RecordStore;

/// Extension of the saved images.
pub const IMAGE_EXTENSION: &str = "png";

/// Generates randomly transformed copies of a source wafer image.
///
/// The transformer owns its random source and the label counter. Every
/// generating call takes `&mut self`, so one instance is never driven from
/// two threads at once; wrap it in a `Mutex` to share it.
///
/// # Example
///
/// ```
/// use wafer_image::Image;
/// use wafer_scan::WaferImageTransformer;
///
/// let source = Image::<u8, 3>::from_size_val([64, 64].into(), 180).unwrap();
/// let mut transformer = WaferImageTransformer::with_seed(7);
///
/// let labeled = transformer.transform_and_label(&source).unwrap();
/// assert_eq!(labeled.image.size(), source.size());
/// assert_eq!(labeled.record.original_name, "scan0000");
/// assert!(labeled.record.saved_name.ends_with(".png"));
/// ```
#[derive(Debug)]
pub struct WaferImageTransformer {
    rng: StdRng,
    counter: u32,
    label_prefix: String,
    warp_mode: WarpMode,
}

impl Default for WaferImageTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl WaferImageTransformer {
    /// Create a transformer seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a transformer with a fixed seed for reproducible parameters.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a transformer from a [`GeneratorConfig`].
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let transformer = match config.random_seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        };

        transformer
            .with_start_index(config.start_index)
            .with_label_prefix(&config.label_prefix)
            .with_warp_mode(config.warp_mode)
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            counter: 0,
            label_prefix: "scan".to_string(),
            warp_mode: WarpMode::default(),
        }
    }

    /// Continue the label sequence from `index` instead of zero.
    pub fn with_start_index(mut self, index: u32) -> Self {
        self.counter = index;
        self
    }

    /// Use `prefix` instead of `scan` for the labels.
    pub fn with_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.label_prefix = prefix.into();
        self
    }

    /// Select how the rotation and translation warps are applied.
    pub fn with_warp_mode(mut self, warp_mode: WarpMode) -> Self {
        self.warp_mode = warp_mode;
        self
    }

    /// Number of labels handed out so far, including the start index.
    pub fn images_generated(&self) -> u32 {
        self.counter
    }

    /// The label the next labeled generation will get.
    pub fn next_label(&self) -> String {
        format!("{}{:04}", self.label_prefix, self.counter)
    }

    /// Draw random parameters for an image of the source's size.
    pub fn sample_params<const C: usize>(&mut self, source: &Image<u8, C>) -> TransformParams {
        TransformParams::sample(&mut self.rng, source.size())
    }

    /// Apply a fresh random transform to `source`.
    ///
    /// # Errors
    ///
    /// Returns [`WaferError::ImageLoad`] when the image has no pixels.
    pub fn transform<const C: usize>(
        &mut self,
        source: &Image<u8, C>,
    ) -> Result<Image<u8, C>, WaferError> {
        self.transform_sampled(source).map(|(image, _)| image)
    }

    /// Apply the given parameters to `source`.
    ///
    /// # Errors
    ///
    /// * [`WaferError::ImageLoad`] when the image has no pixels.
    /// * [`WaferError::InvalidParams`] when the parameters are out of range.
    pub fn transform_with<const C: usize>(
        &self,
        source: &Image<u8, C>,
        params: &TransformParams,
    ) -> Result<Image<u8, C>, WaferError> {
        ensure_loaded(source, None)?;
        params.validate(source.size())?;

        let result = compositor::apply(self.warp_mode, source, params)?;

        log::info!(
            "applied transform: {params}, result size: {}",
            result.size()
        );

        Ok(result)
    }

    fn transform_sampled<const C: usize>(
        &mut self,
        source: &Image<u8, C>,
    ) -> Result<(Image<u8, C>, TransformParams), WaferError> {
        ensure_loaded(source, None)?;
        log::info!(
            "image loaded: channels={}, size={}",
            source.num_channels(),
            source.size()
        );

        let params = self.sample_params(source);
        let image = self.transform_with(source, &params)?;
        Ok((image, params))
    }

    /// Transform `source` and assign the next label, a unique file name and a timestamp.
    ///
    /// The label counter advances only when the transform succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`WaferError::LabelsExhausted`] once the counter has reached
    /// `u32::MAX`, before any transform is attempted.
    pub fn transform_and_label<const C: usize>(
        &mut self,
        source: &Image<u8, C>,
    ) -> Result<LabeledImage<C>, WaferError> {
        let next_counter = self
            .counter
            .checked_add(1)
            .ok_or_else(|| WaferError::LabelsExhausted(self.next_label()))?;

        let (image, params) = self.transform_sampled(source)?;

        let record = GenerationRecord {
            original_name: self.next_label(),
            saved_name: unique_file_name(),
            generated_time: Utc::now(),
        };
        self.counter = next_counter;

        Ok(LabeledImage {
            image,
            params,
            record,
        })
    }

    /// Load `path` in color mode, then [`Self::transform_and_label`] it.
    ///
    /// # Errors
    ///
    /// Returns [`WaferError::ImageLoad`] when the file is missing, corrupt or empty.
    pub fn transform_from_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<LabeledImage<3>, WaferError> {
        let source = load_source(path)?;
        self.transform_and_label(&source)
    }

    /// Transform and label `source`, then write it as `<saved_name>` into `output_dir`.
    ///
    /// `output_dir` is created when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`WaferError::UnsupportedChannels`] unless the image has 1, 3
    /// or 4 channels. Nothing is transformed or written in that case.
    pub fn generate_and_save<const C: usize>(
        &mut self,
        source: &Image<u8, C>,
        output_dir: impl AsRef<Path>,
    ) -> Result<Generation<C>, WaferError> {
        PixelFormat::from_channels(C)?;

        let labeled = self.transform_and_label(source)?;
        let saved_path = save_image(&labeled, output_dir.as_ref())?;
        Ok(Generation::saved(labeled, saved_path))
    }

    /// Load `path` in color mode, then [`Self::generate_and_save`] it.
    pub fn generate_and_save_from_path(
        &mut self,
        path: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Result<Generation<3>, WaferError> {
        let source = load_source(path)?;
        self.generate_and_save(&source, output_dir)
    }

    /// Generate, save and insert the record into `store`.
    ///
    /// The save and the insert are not transactional: when the insert fails
    /// the image stays on disk and [`WaferError::Persistence`] carries the
    /// record and the saved path back to the caller.
    pub fn generate_and_persist<const C: usize, S: RecordStore + ?Sized>(
        &mut self,
        source: &Image<u8, C>,
        output_dir: impl AsRef<Path>,
        store: &mut S,
    ) -> Result<Generation<C>, WaferError> {
        let mut generation = self.generate_and_save(source, output_dir)?;

        match store.insert(&generation.record) {
            Ok(id) => {
                log::info!(
                    "image info stored: {} as {id}",
                    generation.record.original_name
                );
                generation.record_id = Some(id);
                Ok(generation)
            }
            Err(e) => {
                log::warn!(
                    "failed to store image info for {}: {e}",
                    generation.saved_path.display()
                );
                Err(WaferError::Persistence {
                    record: generation.record,
                    saved_path: generation.saved_path,
                    source: e,
                })
            }
        }
    }
}

/// Pack a generated image into a bitmap for display.
///
/// # Errors
///
/// Returns [`WaferError::UnsupportedChannels`] unless the image has 1, 3 or 4 channels.
pub fn to_bitmap<const C: usize>(image: &Image<u8, C>) -> Result<Bitmap, WaferError> {
    Ok(Bitmap::from_image(image)?)
}

fn unique_file_name() -> String {
    format!("{}.{IMAGE_EXTENSION}", Uuid::new_v4())
}

fn ensure_loaded<const C: usize>(
    image: &Image<u8, C>,
    path: Option<&Path>,
) -> Result<(), WaferError> {
    if image.is_empty() {
        return Err(WaferError::ImageLoad {
            path: path.map(Path::to_path_buf),
            reason: format!("image has no pixels ({})", image.size()),
        });
    }
    Ok(())
}

fn load_source(path: impl AsRef<Path>) -> Result<Image<u8, 3>, WaferError> {
    let path = path.as_ref();
    let image = read_image_any_rgb8(path).map_err(|e| WaferError::ImageLoad {
        path: Some(path.to_path_buf()),
        reason: e.to_string(),
    })?;
    ensure_loaded(&image, Some(path))?;
    Ok(image)
}

fn save_image<const C: usize>(
    labeled: &LabeledImage<C>,
    output_dir: &Path,
) -> Result<PathBuf, WaferError> {
    std::fs::create_dir_all(output_dir).map_err(|e| WaferError::Save {
        path: output_dir.to_path_buf(),
        source: IoError::FileError(e),
    })?;

    let saved_path = output_dir.join(&labeled.record.saved_name);
    write_image_png_u8(&saved_path, &labeled.image).map_err(|e| WaferError::Save {
        path: saved_path.clone(),
        source: e,
    })?;

    log::info!("image saved: {}", saved_path.display());

    Ok(saved_path)
}
