//! Extract the main, secondary, and neutral colors of images, derive harmonies, and render swatch cards.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal
)]

mod cli;

#[allow(clippy::wildcard_imports)]
use cli::*;

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use huecard::{
    CardStyle, Color, DesignSpec, HarmonyScheme, KmeansParams, Palette, PaletteOptions, SampleGrid, Theme,
};
use image::RgbImage;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Record the running time of a function and print the elapsed time
macro_rules! time {
    ($name: literal, $verbose: expr, $func_call: expr) => {{
        let start = Instant::now();
        let result = $func_call;
        if $verbose {
            eprintln!("{} took {}ms", $name, start.elapsed().as_millis());
        }
        result
    }};
}

fn main() -> ExitCode {
    let options = Options::parse();

    init_logging(options.verbose);

    let result = run_generate_and_print_palettes(&options);

    // Returning Result<_> uses Debug printing instead of Display
    if let Err(e) = result {
        eprintln!("{e:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Install the stderr log subscriber, `RUST_LOG` overrides the level picked by `--verbose`
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds a thread pool and then runs `generate_and_print_palettes`
#[cfg(feature = "threads")]
fn run_generate_and_print_palettes(options: &Options) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(usize::from(options.threads))
        .build()
        .context("Failed to configure thread pool")?;

    pool.install(|| generate_and_print_palettes(options))
}

/// Runs `generate_and_print_palettes` on a single thread
#[cfg(not(feature = "threads"))]
fn run_generate_and_print_palettes(options: &Options) -> Result<()> {
    generate_and_print_palettes(options)
}

/// Load every image, extract its palette, and print and render the results using the given options
fn generate_and_print_palettes(options: &Options) -> Result<()> {
    // Input
    let images = options
        .images
        .iter()
        .map(|path| time!("Image loading", options.verbose, load_image(path)))
        .collect::<Result<Vec<_>>>()?;

    // Processing
    let palettes = {
        let start = Instant::now();
        let result = extract_palettes(&images, options);
        if options.verbose {
            eprintln!(
                "Palette extraction took {}ms in total",
                start.elapsed().as_millis()
            );
        }
        result?
    };

    // Output
    let total = palettes.len();
    for (i, (palette, path)) in palettes.iter().zip(&options.images).enumerate() {
        let palette = apply_scheme(palette, options.scheme);

        if total > 1 && options.output != FormatOutput::Json {
            println!("{}", path.display());
        }
        print_palette(&palette, options)?;

        if let Some(card) = &options.card {
            write_card(&palette, &card_path(card, i + 1, total), options)?;
        }
    }

    Ok(())
}

/// Load the image at the given path, dropping any alpha channel
fn load_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to load the image file {}", path.display()))?
        .into_rgb8();

    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");

    Ok(image)
}

/// The library options described by the command line
fn palette_options(options: &Options) -> PaletteOptions {
    PaletteOptions {
        k: options.k,
        grid: options.grid.map_or(
            if options.batch {
                SampleGrid::BATCH
            } else {
                SampleGrid::PALETTE
            },
            SampleGrid::square,
        ),
        kmeans: KmeansParams {
            seed: options.seed,
            trials: options.trials,
            max_iter: options.max_iter,
            ..KmeansParams::default()
        },
    }
}

/// Extract one palette per image, in order
fn extract_palettes(images: &[RgbImage], options: &Options) -> Result<Vec<Palette>> {
    let palette_options = palette_options(options);
    if options.batch {
        huecard::extract_batch(images, &palette_options)
            .into_iter()
            .zip(&options.images)
            .map(|(entry, path)| {
                entry
                    .map(|entry| entry.palette)
                    .with_context(|| format!("Failed to extract the palette of {}", path.display()))
            })
            .collect()
    } else {
        images
            .iter()
            .zip(&options.images)
            .map(|(image, path)| {
                let extraction = time!(
                    "Palette extraction",
                    options.verbose,
                    huecard::extract(image, &palette_options)
                )
                .with_context(|| format!("Failed to extract the palette of {}", path.display()))?;

                if options.verbose {
                    eprintln!("k-means took {} iterations", extraction.clusters.iterations);
                }

                Ok(extraction.palette)
            })
            .collect()
    }
}

/// Replace the secondary colors with a harmony, keeping the neutral colors found in the image
fn apply_scheme(palette: &Palette, scheme: HarmonyScheme) -> Palette {
    match scheme {
        HarmonyScheme::Auto => palette.clone(),
        _ => palette
            .harmonized(scheme)
            .with_neutral(palette.neutral.clone()),
    }
}

/// Append the image number to the card file name when there are multiple images
fn card_path(path: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map_or_else(|| "card".into(), |stem| stem.to_string_lossy());
    let ext = path
        .extension()
        .map_or_else(|| "png".into(), |ext| ext.to_string_lossy());

    path.with_file_name(format!("{stem}-{index}.{ext}"))
}

/// Render the palette card and write it to `path`
fn write_card(palette: &Palette, path: &Path, options: &Options) -> Result<()> {
    let theme = Theme::PRESETS
        .get(options.theme)
        .with_context(|| format!("There is no theme {}", options.theme))?;

    let png = time!(
        "Card rendering",
        options.verbose,
        huecard::render_png(palette, &CardStyle::from_theme(theme))
    )?;

    std::fs::write(path, png)
        .with_context(|| format!("Failed to write the card to {}", path.display()))?;

    info!(path = %path.display(), "wrote palette card");

    Ok(())
}

/// The color groups of a palette with their labels, skipping empty groups
fn groups(palette: &Palette) -> Vec<(&'static str, Vec<Color>)> {
    let groups = [
        ("main", vec![palette.main]),
        ("secondary", palette.secondary.clone()),
        ("neutral", palette.neutral.clone()),
    ];

    groups
        .into_iter()
        .filter(|(_, colors)| !colors.is_empty())
        .collect()
}

/// Format a single color as text
fn format_color(color: Color, format: FormatOutput) -> String {
    let [r, g, b] = color.rgb();
    match format {
        FormatOutput::Rgb => format!("({r},{g},{b})"),
        FormatOutput::Cmyk => format!("({})", color.cmyk()),
        _ => color.hex(),
    }
}

/// Print the given palette based off the provided options
fn print_palette(palette: &Palette, options: &Options) -> Result<()> {
    match options.output {
        format @ (FormatOutput::Hex | FormatOutput::Rgb | FormatOutput::Cmyk) => {
            color_format_print(palette, options, " ", |color| format_color(color, format));
        }

        FormatOutput::Swatch => format_print(palette, "", |color| {
            let [r, g, b] = color.rgb();
            "   ".on_truecolor(r, g, b).to_string()
        }),

        FormatOutput::Json => {
            let json =
                serde_json::to_string(palette).context("Failed to serialize the palette")?;
            println!("{json}");
        }

        FormatOutput::Spec => {
            let mut spec = DesignSpec::new(palette.clone());
            spec.font_notes = options.font_notes.clone();
            spec.layout_notes = options.layout_notes.clone();
            print!("{spec}");
        }
    }

    Ok(())
}

/// Print each color group on its own line using the given format
fn format_print(palette: &Palette, delimiter: &str, format: impl Fn(Color) -> String) {
    for (label, colors) in groups(palette) {
        println!(
            "{label:<9} {}",
            colors
                .into_iter()
                .map(&format)
                .collect::<Vec<_>>()
                .join(delimiter)
        );
    }
}

/// Format, colorize, and then print the text for all colors
fn color_format_print(
    palette: &Palette,
    options: &Options,
    delimiter: &str,
    format: impl Fn(Color) -> String,
) {
    match options.colorize {
        Some(ColorizeOutput::Fg) => format_print(palette, delimiter, |color| {
            let [r, g, b] = color.rgb();
            format(color).truecolor(r, g, b).to_string()
        }),

        Some(ColorizeOutput::Bg) => format_print(palette, delimiter, |color| {
            let [r, g, b] = color.rgb();
            format(color).on_truecolor(r, g, b).to_string()
        }),

        None => format_print(palette, delimiter, format),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::ffi::OsString;

    fn palette() -> Palette {
        Palette::new(
            Color::new(200, 100, 50),
            vec![Color::new(30, 144, 255)],
            vec![Color::new(10, 10, 10)],
        )
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("huecard-{}-{name}", std::process::id()))
    }

    #[test]
    fn options_map_to_library() {
        let options = Options::parse_from([
            "huecard", "a.png", "-k", "3", "--grid", "40", "--seed", "7", "-n", "2",
        ]);
        let palette_options = palette_options(&options);

        assert_eq!(palette_options.k, 3);
        assert_eq!(palette_options.grid, SampleGrid::square(40));
        assert_eq!(palette_options.kmeans.seed, 7);
        assert_eq!(palette_options.kmeans.trials, 2);
    }

    #[test]
    fn batch_keeps_kmeans_flags() {
        let options = Options::parse_from([
            "huecard", "a.png", "--batch", "--seed", "7", "-n", "3", "-i", "20",
        ]);
        let palette_options = palette_options(&options);

        assert_eq!(palette_options.grid, SampleGrid::BATCH);
        assert_eq!(palette_options.kmeans.seed, 7);
        assert_eq!(palette_options.kmeans.trials, 3);
        assert_eq!(palette_options.kmeans.max_iter, 20);

        let options = Options::parse_from(["huecard", "a.png", "--batch", "--grid", "30"]);
        assert_eq!(super::palette_options(&options).grid, SampleGrid::square(30));

        let options = Options::parse_from(["huecard", "a.png"]);
        assert_eq!(super::palette_options(&options).grid, SampleGrid::PALETTE);
    }

    #[test]
    fn batch_extraction_uses_grid() {
        let images = vec![RgbImage::from_pixel(8, 8, Rgb([200, 100, 50]))];
        let options = Options::parse_from(["huecard", "a.png", "--batch", "--grid", "2"]);

        let error = extract_palettes(&images, &options).unwrap_err();
        assert!(format!("{error:#}").contains("from 4 sampled pixels"), "{error:#}");
    }

    #[test]
    fn card_paths() {
        let path = Path::new("out/card.png");
        assert_eq!(card_path(path, 1, 1), PathBuf::from("out/card.png"));
        assert_eq!(card_path(path, 2, 3), PathBuf::from("out/card-2.png"));
        assert_eq!(card_path(Path::new("card"), 1, 2), PathBuf::from("card-1.png"));
    }

    #[test]
    fn formats() {
        let color = Color::new(200, 100, 50);
        assert_eq!(format_color(color, FormatOutput::Hex), "#c86432");
        assert_eq!(format_color(color, FormatOutput::Rgb), "(200,100,50)");
        assert_eq!(format_color(color, FormatOutput::Cmyk), "(0%,50%,75%,22%)");
    }

    #[test]
    fn empty_groups_skipped() {
        let labels = groups(&palette().with_neutral(Vec::new()))
            .into_iter()
            .map(|(label, _)| label)
            .collect::<Vec<_>>();

        assert_eq!(labels, vec!["main", "secondary"]);
    }

    #[test]
    fn schemes_keep_neutral() {
        let palette = palette();
        assert_eq!(apply_scheme(&palette, HarmonyScheme::Auto), palette);

        let triadic = apply_scheme(&palette, HarmonyScheme::Triadic);
        assert_eq!(triadic.main, palette.main);
        assert_eq!(triadic.secondary.len(), 2);
        assert_eq!(triadic.neutral, palette.neutral);
    }

    #[test]
    fn missing_image_fails() {
        let error = load_image(Path::new("does/not/exist.png")).unwrap_err();
        assert!(error.to_string().contains("does/not/exist.png"));
    }

    #[test]
    #[cfg(feature = "png")]
    fn writes_card() {
        let input = temp_path("input.png");
        let card = temp_path("card.png");
        RgbImage::from_pixel(64, 48, Rgb([200, 100, 50]))
            .save(&input)
            .unwrap();

        let args: Vec<OsString> = vec![
            "huecard".into(),
            input.clone().into(),
            "--card".into(),
            card.clone().into(),
            "--output".into(),
            "json".into(),
        ];
        let options = Options::parse_from(args);
        generate_and_print_palettes(&options).unwrap();

        let rendered = image::open(&card).unwrap().into_rgb8();
        assert_eq!(
            rendered.dimensions(),
            (huecard::CARD_WIDTH, huecard::CARD_HEIGHT)
        );
        assert_eq!(rendered.get_pixel(400, 100), &Rgb([200, 100, 50]));

        std::fs::remove_file(input).unwrap();
        std::fs::remove_file(card).unwrap();
    }
}
