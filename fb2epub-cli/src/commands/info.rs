//! Info command implementation

use anyhow::{Context, Result};
use fb2epub_core::decoder::decoder_for_extension;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Book info output
#[derive(Serialize)]
struct BookInfo {
    title: Option<String>,
    author: Option<String>,
    language: Option<String>,
    genres: Vec<String>,
    annotation: Option<String>,
    cover: Option<String>,
    chapters: Vec<String>,
    images: usize,
}

/// Display information about an FB2 book
pub fn info(input: &Path, json: bool) -> Result<()> {
    // Get file extension
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .context("Could not determine input file extension")?;

    // Get decoder
    let decoder = decoder_for_extension(ext)
        .with_context(|| format!("No decoder available for .{} files", ext))?;

    // Read and decode
    let file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    let mut reader = BufReader::new(file);

    let book = decoder
        .decode(&mut reader)
        .with_context(|| format!("Failed to decode {}", input.display()))?;

    let info = BookInfo {
        title: book.metadata.title.clone(),
        author: book.metadata.author.clone(),
        language: book.metadata.language.clone(),
        genres: book.metadata.genres.clone(),
        annotation: book.metadata.annotation.clone(),
        cover: book.metadata.cover.clone(),
        chapters: book.chapters.iter().map(|c| c.title.clone()).collect(),
        images: book.assets.len(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:       {}", info.title.as_deref().unwrap_or("(none)"));
        if let Some(author) = &info.author {
            println!("Author:      {}", author);
        }
        if let Some(language) = &info.language {
            println!("Language:    {}", language);
        }
        if !info.genres.is_empty() {
            println!("Genres:      {}", info.genres.join(", "));
        }
        if let Some(annotation) = &info.annotation {
            println!("Annotation:  {}", annotation);
        }
        if let Some(cover) = &info.cover {
            println!("Cover:       {}", cover);
        }
        println!("Chapters:    {}", info.chapters.len());
        for (i, title) in info.chapters.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, title);
        }
        println!("Images:      {}", info.images);
    }

    Ok(())
}
