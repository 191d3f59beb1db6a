use std::{io, path::Path};
use tokio::fs;

use pulldown_cmark::{html, Options, Parser};
use ammonia::{Builder, UrlRelative};
use derive_more::Display;

use crate::errors::AppError;

const MAX_README_SIZE: u64 = 2 * 1024 * 1024;

/// Converts Markdown content to sanitized HTML to prevent XSS attacks.
pub fn safe_markdown_to_html(markdown: &str) -> String {
    let options = Options::all();
    let parser = Parser::new_ext(markdown, options);

    let mut raw_html = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut raw_html, parser);

    sanitize_html(&raw_html)
}

/// Sanitizes rendered HTML to remove unsafe markup.
pub fn sanitize_html(content: &str) -> String {
    Builder::default()
        .link_rel(Some("nofollow noopener noreferrer"))
        .url_relative(UrlRelative::PassThrough)
        .clean(content)
        .to_string()
}

/// Reads the Markdown document at `path` and renders it to sanitized HTML.
pub async fn render_markdown_file(path: &Path) -> Result<String, ReadmeError> {
    let metadata = fs::metadata(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadmeError::Missing,
        _ => ReadmeError::IoError(e),
    })?;
    if metadata.len() > MAX_README_SIZE {
        return Err(ReadmeError::FileTooLarge);
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(ReadmeError::IoError)?;
    if content.trim().is_empty() {
        return Err(ReadmeError::EmptyFile);
    }

    Ok(safe_markdown_to_html(&content))
}

#[derive(Debug, Display)]
pub enum ReadmeError {
    #[display("Documentation not found.")]
    Missing,

    #[display("Documentation is empty.")]
    EmptyFile,

    #[display("Documentation exceeds the maximum allowed size.")]
    FileTooLarge,

    #[display("Failed to read documentation: {_0}")]
    IoError(io::Error),
}

impl From<ReadmeError> for AppError {
    fn from(err: ReadmeError) -> Self {
        match err {
            ReadmeError::Missing | ReadmeError::EmptyFile => AppError::NotFound(err.to_string()),
            _ => AppError::InternalError(err.to_string()),
        }
    }
}
