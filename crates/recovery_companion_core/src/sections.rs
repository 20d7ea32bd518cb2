//! crates/recovery_companion_core/src/sections.rs
//!
//! Parses heading-delimited generated text into an ordered list of titled
//! guide sections.

use crate::domain::GuideSection;

/// Splits raw generated text into sections in a single left-to-right pass.
///
/// A line beginning with `"# "` opens a new section titled by the remainder
/// of the line; every following non-empty line accumulates into the body
/// (joined with newlines) until the next heading or end of input. Empty
/// lines are dropped. A section is emitted only once both its title and its
/// accumulated body are non-empty, so a heading followed immediately by
/// another heading (or the end of input) is silently dropped.
///
/// This cannot fail on malformed input; it may only produce an empty list,
/// which callers handle as "no sections yet".
pub fn parse_sections(raw: &str) -> Vec<GuideSection> {
    let mut sections = Vec::new();
    let mut current_title = String::new();
    let mut current_body: Vec<&str> = Vec::new();

    for line in raw.lines() {
        if let Some(heading) = line.strip_prefix("# ") {
            flush(&mut sections, &current_title, &current_body);
            current_title = heading.to_string();
            current_body.clear();
        } else if !line.is_empty() {
            current_body.push(line);
        }
    }
    flush(&mut sections, &current_title, &current_body);

    sections
}

fn flush(sections: &mut Vec<GuideSection>, title: &str, body: &[&str]) {
    if !title.is_empty() && !body.is_empty() {
        sections.push(GuideSection::new(title, body.join("\n")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles_and_bodies(sections: &[GuideSection]) -> Vec<(&str, &str)> {
        sections
            .iter()
            .map(|s| (s.title.as_str(), s.body.as_str()))
            .collect()
    }

    #[test]
    fn splits_on_headings_and_drops_blank_lines() {
        let sections = parse_sections("# A\nx\ny\n\n# B\nz");
        assert_eq!(
            titles_and_bodies(&sections),
            vec![("A", "x\ny"), ("B", "z")]
        );
    }

    #[test]
    fn drops_trailing_heading_with_no_body() {
        let sections = parse_sections("# A\nx\n# B");
        assert_eq!(titles_and_bodies(&sections), vec![("A", "x")]);
    }

    #[test]
    fn drops_heading_immediately_followed_by_another_heading() {
        let sections = parse_sections("# A\n# B\nbody");
        assert_eq!(titles_and_bodies(&sections), vec![("B", "body")]);
    }

    #[test]
    fn ignores_text_before_the_first_heading() {
        let sections = parse_sections("preamble\nmore\n# A\nx");
        assert_eq!(titles_and_bodies(&sections), vec![("A", "x")]);
    }

    #[test]
    fn returns_empty_list_for_headingless_input() {
        assert!(parse_sections("just some prose\nwith no headings").is_empty());
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn new_sections_start_unfavorited_with_fresh_ids() {
        let sections = parse_sections("# A\nx\n# B\ny");
        assert!(sections.iter().all(|s| !s.is_favorite));
        assert_ne!(sections[0].id, sections[1].id);
    }

    #[test]
    fn heading_marker_without_space_is_body_text() {
        let sections = parse_sections("# A\n#not a heading\nx");
        assert_eq!(
            titles_and_bodies(&sections),
            vec![("A", "#not a heading\nx")]
        );
    }
}
