//! Exporters for the canonical question collection.
//!
//! All exporters are pure string builders; encoding and newline
//! conventions are applied by the caller that writes the file.

use crate::types::Question;

/// Render questions in MyTestX plain text: `# question`, `+`/`-` choice
/// lines, one blank line between questions. Output parses back through
/// the MyTestX parser to the same collection.
pub fn to_mytestx(questions: &[Question]) -> String {
    let mut out = String::new();
    for (i, q) in questions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("# ");
        out.push_str(&q.text);
        out.push('\n');
        for c in &q.choices {
            out.push(if c.is_correct { '+' } else { '-' });
            out.push(' ');
            out.push_str(&c.text);
            out.push('\n');
        }
    }
    transliterate_greek(&out)
}

/// Greek letters that the printing target cannot render; spelled out in
/// Russian as the study groups expect them.
fn transliterate_greek(text: &str) -> String {
    text.replace('α', "альфа")
        .replace('β', "бета")
        .replace('γ', "гамма")
}

/// Render questions as Anki-importable TSV: one row per question, TAB
/// between front and back, `<br>` as the only markup.
pub fn to_anki(questions: &[Question]) -> String {
    let mut out = String::new();
    for q in questions {
        let mut all = String::from("<div style=\"text-align:left\">");
        let mut correct = String::from("<div style=\"text-align:left\">");
        for (n, c) in q.choices.iter().enumerate() {
            let line = format!("{}. {}<br>", n + 1, c.text);
            all.push_str(&line);
            if c.is_correct {
                // numbered text instead of an <ol> so the back field can
                // cite arbitrary choice numbers
                correct.push_str(&line);
            }
        }
        all.push_str("</div>");
        correct.push_str("</div>");
        // no trailing tab: a third column would be imported as tags
        out.push_str(&q.text);
        out.push_str("<br>");
        out.push_str(&all);
        out.push('\t');
        out.push_str(&correct);
        out.push('\n');
    }
    out
}

/// Render the condensed crib: one line per question, shortened question
/// text, then the shortened correct choices. Expects questions sorted by
/// casefolded text; the shortener keeps neighboring lines distinguishable
/// only under that order.
pub fn to_crib(questions: &[Question]) -> String {
    let texts: Vec<String> = questions.iter().map(|q| q.text.clone()).collect();
    let shortened = min_diff(texts);

    let mut lines = Vec::with_capacity(questions.len());
    for (short_q, q) in shortened.iter().zip(questions) {
        let mut correct: Vec<String> = q.correct_choices().map(|c| c.text.clone()).collect();
        correct.sort();
        lines.push(format!("{}: {}", short_q, min_diff(correct).join(", ")));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Contract a long word to its first three and last two characters:
/// `compatibility` becomes `com-ty`. Words of seven characters or fewer
/// pass through.
fn shorten_word(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() > 7 {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}-{}", head, tail)
    } else {
        word.to_string()
    }
}

fn short(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| shorten_word(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten every string while keeping neighbors distinguishable.
///
/// Input must be sorted. When a string is a prefix-run of its successor
/// (common with question series), the successor keeps one extra word
/// beyond the shared part instead of its full text.
fn min_diff(mut texts: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(texts.len());
    while texts.len() > 1 {
        let prelast_contained = {
            let last = &texts[texts.len() - 1];
            let prelast = &texts[texts.len() - 2];
            last.contains(prelast.as_str())
        };
        let last = texts.pop().expect("len checked");
        let words: Vec<&str> = last.split_whitespace().collect();
        if prelast_contained {
            let keep = texts
                .last()
                .expect("len checked")
                .split_whitespace()
                .count()
                + 1;
            out.push(short(&words[..keep.min(words.len())]));
        } else {
            out.push(short(&words));
        }
    }
    if let Some(first) = texts.pop() {
        out.push(short(&first.split_whitespace().collect::<Vec<_>>()));
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::{mytestx::MyTestXParser, FormatParser};
    use crate::types::Choice;
    use pretty_assertions::assert_eq;

    fn q(text: &str, choices: &[(&str, bool)]) -> Question {
        Question::new(
            text,
            choices
                .iter()
                .map(|(t, c)| Choice::new(*t, *c))
                .collect(),
        )
    }

    #[test]
    fn mytestx_round_trip() {
        let original = vec![q("Sample Q", &[("Right", true), ("Wrong", false)])];
        let text = to_mytestx(&original);
        let report = MyTestXParser.parse(&text).unwrap();
        assert_eq!(report.questions, original);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn mytestx_blank_line_between_questions() {
        let qs = vec![q("A", &[("1", true)]), q("B", &[("2", false)])];
        assert_eq!(to_mytestx(&qs), "# A\n+ 1\n\n# B\n- 2\n");
    }

    #[test]
    fn mytestx_transliterates_greek() {
        let qs = vec![q("Уровень α-амилазы", &[("норма", true)])];
        assert!(to_mytestx(&qs).contains("альфа-амилазы"));
    }

    #[test]
    fn anki_row_shape() {
        let qs = vec![q("Q1", &[("a", false), ("b", true)])];
        let row = to_anki(&qs);
        assert_eq!(
            row,
            "Q1<br><div style=\"text-align:left\">1. a<br>2. b<br></div>\t\
             <div style=\"text-align:left\">2. b<br></div>\n"
        );
    }

    #[test]
    fn anki_unanswered_question_has_empty_back_list() {
        let qs = vec![q("Q", &[("a", false)])];
        let row = to_anki(&qs);
        assert!(row.ends_with("\t<div style=\"text-align:left\"></div>\n"));
    }

    #[test]
    fn shorten_word_contracts_long_words() {
        assert_eq!(shorten_word("compatibility"), "com-ty");
        assert_eq!(shorten_word("lupus"), "lupus");
        assert_eq!(
            short(&"Something wrong with compatibility regressions.".split_whitespace().collect::<Vec<_>>()),
            "Som-ng wrong with com-ty reg-s."
        );
    }

    #[test]
    fn min_diff_keeps_prefix_runs_distinguishable() {
        let input = vec![
            "Clinical notes is the same way".to_string(),
            "Clinical symptoms of lupus".to_string(),
            "Clinical symptoms of lupus or something sophisticated".to_string(),
        ];
        assert_eq!(
            min_diff(input),
            vec![
                "Cli-al notes is the same way",
                "Cli-al sym-ms of lupus",
                "Cli-al sym-ms of lupus or",
            ]
        );
    }

    #[test]
    fn crib_lists_only_correct_choices() {
        let qs = vec![
            q("First question", &[("alpha", true), ("beta", false)]),
            q("Second question", &[("delta", true), ("gamma", true)]),
        ];
        let crib = to_crib(&qs);
        // "question" is eight letters, so the shortener contracts it
        assert_eq!(crib, "First que-on: alpha\nSecond que-on: delta, gamma\n");
    }
}
