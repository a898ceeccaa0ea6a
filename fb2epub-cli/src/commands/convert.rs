//! Directory conversion command implementation

use anyhow::{bail, Context, Result};
use fb2epub_core::decoder::decoder_for_extension;
use fb2epub_core::encoder::{EpubEncoder, EpubVersion};
use fb2epub_core::Converter;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Convert every FB2 file in `input_dir` into an EPUB in `output_dir`.
///
/// Per-file failures are reported and counted but never fail the command;
/// only an unusable input directory does.
pub fn convert(
    input_dir: &Path,
    output_dir: &Path,
    jobs: usize,
    version: EpubVersion,
) -> Result<()> {
    check_input_dir(input_dir)?;

    if !output_dir.exists() {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;
        println!("Created output directory: {}", output_dir.display());
    }

    let files = find_sources(input_dir)?;
    if files.is_empty() {
        println!("No .fb2 files found in {}", input_dir.display());
        return Ok(());
    }

    println!("Found {} files to convert.", files.len());

    let converter = Converter::new().with_encoder(EpubEncoder::new().with_version(version));

    // Set up progress tracking
    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")?
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);

    // Configure thread pool
    rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build_global()
        .ok(); // Ignore if already configured

    let plan = plan_outputs(&files, output_dir);

    plan.par_iter().for_each(|(file_path, output)| {
        let name = display_name(file_path);
        let converted = output
            .as_ref()
            .map(|output| converter.convert(file_path, output))
            .unwrap_or(false);

        overall_pb.suspend(|| {
            if converted {
                println!("Converted: {}", name);
            } else {
                eprintln!("Failed: {}", name);
            }
        });
        if converted {
            success_count.fetch_add(1, Ordering::Relaxed);
        }

        overall_pb.inc(1);
    });

    overall_pb.finish_and_clear();

    println!(
        "Conversion complete. {}/{} files converted.",
        success_count.load(Ordering::Relaxed),
        files.len()
    );

    Ok(())
}

/// The input directory must exist, be a directory and be readable
fn check_input_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        bail!("Input directory '{}' does not exist", dir.display());
    }
    if !dir.is_dir() {
        bail!("Input path '{}' is not a directory", dir.display());
    }
    fs::read_dir(dir)
        .with_context(|| format!("Input directory '{}' is not readable", dir.display()))?;
    Ok(())
}

/// FB2 files directly inside `dir`, sorted by path
fn find_sources(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|ext| decoder_for_extension(ext).is_some())
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    Ok(files)
}

/// Pair each source with its destination. A source whose destination is
/// already taken by an earlier one gets `None` and is not converted.
fn plan_outputs<'a>(
    files: &'a [PathBuf],
    output_dir: &Path,
) -> Vec<(&'a Path, Option<PathBuf>)> {
    let mut taken = HashSet::new();

    files
        .iter()
        .map(|file| {
            let output = output_path(file, output_dir).filter(|output| {
                let fresh = taken.insert(output.clone());
                if !fresh {
                    tracing::error!(
                        "Skipping {:?}: {:?} is already produced by another source",
                        file,
                        output
                    );
                }
                fresh
            });
            (file.as_path(), output)
        })
        .collect()
}

/// `<output_dir>/<stem>.epub`
fn output_path(input: &Path, output_dir: &Path) -> Option<PathBuf> {
    let Some(stem) = input.file_stem() else {
        tracing::error!("Could not determine output filename from {:?}", input);
        return None;
    };
    let mut name = stem.to_os_string();
    name.push(".epub");
    Some(output_dir.join(name))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_replaces_extension() {
        let output = output_path(Path::new("/books/war.and.peace.fb2"), Path::new("/out"));
        assert_eq!(output, Some(PathBuf::from("/out/war.and.peace.epub")));
    }

    #[test]
    fn test_plan_outputs_skips_colliding_sources() {
        let files = vec![
            PathBuf::from("/in/a.fb2"),
            PathBuf::from("/in/book.FB2"),
            PathBuf::from("/in/book.fb2"),
        ];

        let plan = plan_outputs(&files, Path::new("/out"));
        let outputs: Vec<Option<PathBuf>> = plan.into_iter().map(|(_, output)| output).collect();
        assert_eq!(
            outputs,
            vec![
                Some(PathBuf::from("/out/a.epub")),
                Some(PathBuf::from("/out/book.epub")),
                None,
            ]
        );
    }

    #[test]
    fn test_check_input_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_input_dir(dir.path()).is_ok());
        assert!(check_input_dir(&dir.path().join("missing")).is_err());

        let file = dir.path().join("file.fb2");
        fs::write(&file, "").unwrap();
        assert!(check_input_dir(&file).is_err());
    }

    #[test]
    fn test_find_sources_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.fb2", "a.FB2", "notes.txt", "c.epub"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.fb2")).unwrap();

        let files = find_sources(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.FB2", "b.fb2"]);
    }
}
