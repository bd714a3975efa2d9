//! Prompt context from ranked sections
//!
//! Insight and narration generation happen in an external language-model
//! service. What this crate hands over is a plain-text block listing the
//! related sections: title, source, score and a short preview of each.

use crate::types::SimilarityResult;

/// Characters of section content quoted in a preview
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// First `max_chars` characters of `content` with whitespace collapsed,
/// followed by `...` when anything was cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");

    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", collapsed[..cut].trim_end()),
        None => collapsed,
    }
}

/// Render ranked sections as a numbered list for a prompt.
///
/// Returns an empty string when there are no results.
pub fn format_related_sections(results: &[SimilarityResult], max_chars: usize) -> String {
    let mut out = String::new();

    for result in results {
        let section = &result.section;
        let title = if section.title.is_empty() {
            section.id.as_str()
        } else {
            section.title.as_str()
        };

        out.push_str(&format!(
            "{}. {} ({}, page {}) [relevance {:.0}%]\n   {}\n",
            result.rank,
            title,
            section.document_name,
            section.page_number,
            result.relevance_score,
            preview(&section.content, max_chars),
        ));
    }

    out
}
