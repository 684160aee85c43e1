//! Text extraction helpers shared by the site scrapers.

use nsum_core::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// Paragraphs this short are captions, bylines or ads.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

const BOILERPLATE: &[&str] = &[
    "Share on Facebook",
    "Tweet this",
    "Share on Twitter",
    "Share on LinkedIn",
    "Email this",
    "Print this",
    "Read more",
    "Click here",
    "Advertisement",
    "Subscribe now",
    "Sign up for",
];

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector '{}': {}", css, e)))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether a paragraph as a whole is a share button, ad label or related-story
/// link such as "Read more: ...". Phrases inside prose do not count.
fn is_boilerplate(text: &str) -> bool {
    let text = text.trim();
    BOILERPLATE.iter().any(|phrase| {
        let Some(head) = text.get(..phrase.len()) else {
            return false;
        };
        if !head.eq_ignore_ascii_case(phrase) {
            return false;
        }
        let rest = text[phrase.len()..].trim_start();
        rest.is_empty() || rest.starts_with(':') || rest.chars().all(|c| c == '.' || c == '\u{2026}')
    })
}

/// Collapses runs of whitespace. Wording is left untouched.
pub fn clean_text(text: &str) -> String {
    collapse_whitespace(text)
}

pub fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first element matching any of the selectors, tried in order.
pub fn extract_text(document: &Html, selectors: &[&str]) -> Result<Option<String>> {
    for css in selectors {
        let selector = selector(css)?;
        if let Some(element) = document.select(&selector).next() {
            let text = element_text(element);
            if !text.is_empty() {
                return Ok(Some(text));
            }
        }
    }
    Ok(None)
}

fn join_long(parts: impl Iterator<Item = String>) -> Option<String> {
    let kept: Vec<String> = parts
        .filter(|part| part.chars().count() > MIN_PARAGRAPH_CHARS && !is_boilerplate(part))
        .collect();
    if kept.is_empty() {
        None
    } else {
        Some(kept.join("\n\n"))
    }
}

/// Joins the `<p>` children of the first container match, skipping short ones.
pub fn extract_paragraphs(document: &Html, container: &str) -> Result<Option<String>> {
    let container = selector(container)?;
    let paragraph = selector("p")?;
    Ok(document
        .select(&container)
        .next()
        .and_then(|element| join_long(element.select(&paragraph).map(element_text))))
}

/// Like [`extract_paragraphs`] for containers that hold bare text lines
/// instead of paragraph tags.
pub fn extract_lines(document: &Html, container: &str) -> Result<Option<String>> {
    let container = selector(container)?;
    Ok(document.select(&container).next().and_then(|element| {
        let lines: Vec<String> = element
            .text()
            .flat_map(|node| node.lines())
            .map(clean_text)
            .filter(|line| !line.is_empty())
            .collect();
        join_long(lines.into_iter())
    }))
}
