//! Read time estimation from raw markdown

use lazy_static::lazy_static;
use regex::Regex;

/// Average reading speed in words per minute
pub const WORDS_PER_MINUTE: f64 = 265.0;

/// Seconds added for each embedded image
pub const SECONDS_PER_IMAGE: f64 = 12.0;

/// Seconds added for each fenced code or diagram block
pub const SECONDS_PER_BLOCK: f64 = 8.0;

lazy_static! {
    static ref HEADING: Regex = Regex::new(r"(?m)^#+\s+").unwrap();
    static ref EMPHASIS: Regex = Regex::new(r"\*\*?|__?|~~|`").unwrap();
    static ref LINK: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
    static ref RESIDUAL: Regex = Regex::new(r"[#*_~`\[\]()]").unwrap();
    static ref IMAGE: Regex = Regex::new(r"!\[[^\]]*\]\([^)]+\)").unwrap();
    static ref FENCED_BLOCK: Regex = Regex::new(r"(?s)```.*?```").unwrap();
}

/// Estimate read time in whole minutes, never less than 1.
///
/// Text counts at [`WORDS_PER_MINUTE`] after markdown markers are stripped;
/// every `![alt](url)` image adds [`SECONDS_PER_IMAGE`] and every
/// triple-backtick block adds [`SECONDS_PER_BLOCK`].
pub fn read_time_minutes(content: &str) -> u32 {
    if content.trim().is_empty() {
        return 1;
    }

    let word_minutes = count_words(content) as f64 / WORDS_PER_MINUTE;
    let image_minutes = IMAGE.find_iter(content).count() as f64 * SECONDS_PER_IMAGE / 60.0;
    let block_minutes =
        FENCED_BLOCK.find_iter(content).count() as f64 * SECONDS_PER_BLOCK / 60.0;

    let minutes = (word_minutes + image_minutes + block_minutes).ceil() as u32;
    minutes.max(1)
}

/// Count visible words once markdown syntax is stripped
pub fn count_words(content: &str) -> usize {
    let stripped = HEADING.replace_all(content, "");
    let stripped = EMPHASIS.replace_all(&stripped, "");
    let stripped = LINK.replace_all(&stripped, "$1");
    let stripped = RESIDUAL.replace_all(&stripped, " ");
    stripped.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_empty_content_is_one_minute() {
        assert_eq!(read_time_minutes(""), 1);
        assert_eq!(read_time_minutes("   \n"), 1);
    }

    #[test]
    fn test_word_thresholds() {
        assert_eq!(read_time_minutes(&words(1)), 1);
        assert_eq!(read_time_minutes(&words(265)), 1);
        assert_eq!(read_time_minutes(&words(266)), 2);
        assert_eq!(read_time_minutes(&words(530)), 2);
        assert_eq!(read_time_minutes(&words(531)), 3);
    }

    #[test]
    fn test_count_words_strips_markdown() {
        assert_eq!(count_words("# Heading here"), 2);
        assert_eq!(count_words("**bold** and _italic_ and ~~gone~~"), 5);
        assert_eq!(count_words("see [the docs](https://example.com/a b)"), 3);
        assert_eq!(count_words("`code` (aside) [x]"), 3);
        assert_eq!(count_words("###"), 0);
    }

    #[test]
    fn test_image_and_block_allowances() {
        let content = "# Title\n\nSome text with ![img](a.png) and one code block:\n```\ncode\n```";
        assert_eq!(count_words(content), 10);
        // 10/265 + 12/60 + 8/60 rounds up to a single minute
        assert_eq!(read_time_minutes(content), 1);

        // 265 words fill one minute exactly; one image tips it over
        let with_image = format!("{} ![pic](p.png)", words(264));
        assert_eq!(read_time_minutes(&with_image), 2);

        let with_block = format!("{}\n```\n```", words(265));
        assert_eq!(read_time_minutes(&with_block), 2);
    }

    #[test]
    fn test_many_images_add_up() {
        // Alt text counts as words too, so five images pass one minute
        let content = "![a](1.png) ![b](2.png) ![c](3.png) ![d](4.png)";
        assert_eq!(read_time_minutes(content), 1);
        let content = format!("{} ![e](5.png)", content);
        assert_eq!(read_time_minutes(&content), 2);
    }

    #[test]
    fn test_unclosed_fence_is_not_a_block() {
        assert_eq!(FENCED_BLOCK.find_iter("```\nno end").count(), 0);
        assert_eq!(FENCED_BLOCK.find_iter("```a``` ```b```").count(), 2);
    }

    #[test]
    fn test_monotonic_in_word_count() {
        let mut previous = 0;
        for n in (0..2000).step_by(37) {
            let minutes = read_time_minutes(&words(n));
            assert!(minutes >= 1);
            assert!(minutes >= previous, "estimate dropped at {} words", n);
            previous = minutes;
        }
    }
}
