use crate::decoder::Decoder;
use crate::error::{DdsmError, Result};
use crate::extraction::read_ics;
use crate::pixels::{
    normalize_min_max, od_correct, reconstruct, verify_lossless, DensityWindow, Dimensions,
    OutputImage, RawImage,
};
use crate::types::{ScanMetadata, ViewInfo, ViewName};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

/// Files making up one view of a DDSM case
///
/// A case directory holds one ICS header and an LJPEG file per view, named
/// like `A_1234_1.LEFT_CC.LJPEG`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFiles {
    pub ljpeg: PathBuf,
    pub ics: PathBuf,
    pub view: ViewName,
}

impl CaseFiles {
    /// Locates the ICS header next to an LJPEG file
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the file name has no view component or the
    /// directory has no `.ics` file.
    pub fn from_ljpeg(ljpeg: &Path) -> Result<Self> {
        let view = view_from_path(ljpeg)?;
        let dir = match ljpeg.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let ics = find_ics(dir)?;
        debug!("{} belongs to ICS {}", ljpeg.display(), ics.display());

        Ok(Self {
            ljpeg: ljpeg.to_path_buf(),
            ics,
            view,
        })
    }

    /// Overlay file of this view, if one exists on disk
    pub fn overlay(&self) -> Option<PathBuf> {
        let path = self.ljpeg.with_extension("OVERLAY");
        path.is_file().then_some(path)
    }
}

/// Extracts the view from an LJPEG file name (`<case>.<VIEW>.LJPEG`)
pub fn view_from_path(ljpeg: &Path) -> Result<ViewName> {
    let name = ljpeg
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| DdsmError::InvalidPath(ljpeg.display().to_string()))?;

    if !name.contains("LJPEG") {
        return Err(DdsmError::InvalidPath(format!(
            "{} is not an LJPEG file",
            ljpeg.display()
        )));
    }

    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() < 2 {
        return Err(DdsmError::InvalidPath(format!(
            "{} has no view component",
            ljpeg.display()
        )));
    }
    parts[parts.len() - 2]
        .parse()
        .map_err(|e: String| DdsmError::InvalidPath(format!("{}: {}", ljpeg.display(), e)))
}

/// Returns the first `.ics` file of a directory in name order
fn find_ics(dir: &Path) -> Result<PathBuf> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(ext) = path.extension() {
            if ext.eq_ignore_ascii_case("ics") {
                candidates.push(path);
            }
        }
    }
    candidates.sort();
    info!("ICS candidates in {}: {:?}", dir.display(), candidates);

    candidates.into_iter().next().ok_or_else(|| {
        DdsmError::InvalidPath(format!("no .ics file in {}", dir.display()))
    })
}

/// Reads LJPEG scans through a [`Decoder`]
///
/// # Example
///
/// ```no_run
/// use ddsm_core::{CaseFiles, ExternalDecoder, LjpegReader};
/// use std::path::Path;
///
/// let case = CaseFiles::from_ljpeg(Path::new("cases/A_1234_1.LEFT_CC.LJPEG")).unwrap();
/// let reader = LjpegReader::new(ExternalDecoder::default());
/// let (metadata, image) = reader.read_case(&case).unwrap();
/// println!("{} {}x{}", metadata.patient_id, image.width(), image.height());
/// ```
pub struct LjpegReader<D: Decoder> {
    decoder: D,
}

impl<D: Decoder> LjpegReader<D> {
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }

    /// Decodes one LJPEG file
    ///
    /// With `view` given, its ICS geometry overrides the decoder's dimensions.
    pub fn read(&self, ljpeg: &Path, view: Option<&ViewInfo>) -> Result<RawImage> {
        let decoded = self.decoder.decode(ljpeg)?;
        let declared = Dimensions::new(decoded.width, decoded.height);
        let authoritative = view.map(|v| Dimensions::new(v.width, v.height));
        reconstruct(&decoded.sample_file, declared, authoritative)
    }

    /// Reads the ICS header and the scan of one view
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` if the ICS has no row for the view.
    pub fn read_case(&self, case: &CaseFiles) -> Result<(ScanMetadata, RawImage)> {
        let metadata = read_ics(&case.ics)?;
        let view = metadata
            .view(case.view)
            .ok_or_else(|| DdsmError::MissingRequiredField(case.view.to_string()))?;
        let image = self.read(&case.ljpeg, Some(view))?;
        Ok((metadata, image))
    }
}

/// Processing switches for a conversion
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvertOptions {
    /// Re-read the output and compare it with the decoded scan
    pub verify: bool,
    /// Min-max stretch to 8 bits for viewing
    pub visual: bool,
    /// Map gray levels to optical density, rendered through `window`
    pub od_correct: bool,
    /// Rescale factor, only valid together with `visual`
    pub scale: Option<f64>,
    pub window: DensityWindow,
}

impl ConvertOptions {
    /// Whether the written file can equal the decoded scan
    pub fn is_lossless(&self) -> bool {
        !(self.visual || self.od_correct)
    }
}

/// Builds the output raster for a decoded scan
///
/// Without `od_correct` or `visual` the scan passes through untouched.
pub fn render(
    metadata: &ScanMetadata,
    image: &RawImage,
    options: &ConvertOptions,
) -> Result<OutputImage> {
    if options.scale.is_some() && !options.visual {
        return Err(DdsmError::InvalidValue(
            "scale must be used with visual".to_string(),
        ));
    }

    let mut output = if options.od_correct {
        let od = od_correct(
            &image.to_gray_levels(),
            metadata.scan_institution(),
            metadata.scanner_type(),
        )?;
        OutputImage::Gray8(options.window.apply(&od))
    } else {
        OutputImage::Gray16(image.samples().to_owned())
    };

    if options.visual {
        warn!("normalizing color, will lose information");
        if options.verify {
            error!("verification is going to fail");
        }
        if let Some(scale) = options.scale {
            output = output.resize(scale)?;
        }
        output = OutputImage::Gray8(normalize_min_max(&output.to_values()));
    }

    Ok(output)
}

/// Outcome of converting one view
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub metadata: ScanMetadata,
    pub view: ViewName,
    /// Dimensions of the decoded scan
    pub scan: Dimensions,
    pub output: PathBuf,
    /// Dimensions of the written raster
    pub written: Dimensions,
    pub bit_depth: u8,
    /// Lossless check result, `None` if not requested
    pub verified: Option<bool>,
}

/// Decodes one view, renders it and writes it to `output`
pub fn convert_case<D: Decoder>(
    reader: &LjpegReader<D>,
    case: &CaseFiles,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let (metadata, image) = reader.read_case(case)?;
    let rendered = render(&metadata, &image, options)?;
    rendered.save(output)?;
    info!("Wrote {}", output.display());

    let verified = if options.verify {
        let lossless = verify_lossless(output, image.samples())?;
        if !lossless {
            error!("Verification failed: {}", case.ljpeg.display());
        }
        Some(lossless)
    } else {
        None
    };

    Ok(ConversionReport {
        view: case.view,
        scan: image.dimensions(),
        output: output.to_path_buf(),
        written: rendered.dimensions(),
        bit_depth: rendered.bit_depth(),
        verified,
        metadata,
    })
}
