/// Longest text (in characters) the endpoint accepts in one request.
pub const MAX_TOKEN_CHARS: usize = 100;

const TONE_MARKS: &[char] = &['?', '!', '？', '！'];

/// Punctuation that always ends a token and is dropped.
const SPLIT_PUNCTUATION: &[char] = &[
    '¡', '(', ')', '[', ']', '¿', '…', '‥', '،', ';', '—', '。', '，', '、', '：', '\n',
];

const ABBREVIATIONS: &[&str] = &["dr", "jr", "mr", "mrs", "ms", "msgr", "prof", "sr", "st"];

/// Normalize text before tokenizing.
///
/// Spaces out tone marks, joins words hyphenated across a line break, drops
/// the period of common abbreviations (so `Dr.` does not end a sentence) and
/// expands `Esq.`.
pub fn preprocess(text: &str) -> String {
    let spaced = space_tone_marks(text);
    let joined = spaced.replace("-\n", "");
    let unabbreviated = strip_abbreviation_periods(&joined);
    unabbreviated.replace("Esq.", "Esquire")
}

/// Split text into request-sized tokens.
///
/// Text of at most [`MAX_TOKEN_CHARS`] characters is sent whole. Longer text
/// breaks after tone marks (which stay attached), at clause punctuation
/// (which is dropped) and, for anything still too long, at the last space
/// that fits. Empty and punctuation-only tokens are removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_TOKEN_CHARS {
        if is_punctuation_only(trimmed) {
            return Vec::new();
        }
        return vec![trimmed.to_string()];
    }
    split_tokens(text)
}

/// `.` and `,` break only when followed by a space and not closing a dotted
/// abbreviation such as `e.g.`; `:` breaks only with no digit on either side.
fn split_tokens(text: &str) -> Vec<String> {
    let mut raw = Vec::new();
    let mut current = String::new();

    for (idx, ch) in text.char_indices() {
        if TONE_MARKS.contains(&ch) {
            current.push(ch);
            raw.push(std::mem::take(&mut current));
            continue;
        }

        if is_split_point(text, idx, ch) {
            raw.push(std::mem::take(&mut current));
            continue;
        }

        current.push(ch);
    }
    raw.push(current);

    raw.iter()
        .flat_map(|token| minimize(token, MAX_TOKEN_CHARS))
        .map(|token| token.trim().to_string())
        .filter(|token| !is_punctuation_only(token))
        .collect()
}

fn space_tone_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        out.push(ch);
        if TONE_MARKS.contains(&ch) {
            out.push(' ');
        }
    }
    out
}

fn strip_abbreviation_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '.' {
            let word_start = out
                .char_indices()
                .rev()
                .take_while(|(_, c)| c.is_alphabetic())
                .last()
                .map(|(i, _)| i);
            if let Some(start) = word_start {
                let word = &out[start..];
                if ABBREVIATIONS.iter().any(|abbr| abbr.eq_ignore_ascii_case(word)) {
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

fn is_split_point(text: &str, idx: usize, ch: char) -> bool {
    let before = &text[..idx];
    let prev = before.chars().next_back();
    let next = text[idx + ch.len_utf8()..].chars().next();

    match ch {
        '.' | ',' => next == Some(' ') && !closes_dotted_abbreviation(before),
        ':' => {
            !prev.is_some_and(|c| c.is_ascii_digit()) && !next.is_some_and(|c| c.is_ascii_digit())
        }
        _ => SPLIT_PUNCTUATION.contains(&ch),
    }
}

fn closes_dotted_abbreviation(before: &str) -> bool {
    let mut tail = before.chars().rev();
    matches!(
        (tail.next(), tail.next()),
        (Some(letter), Some('.')) if letter.is_ascii_lowercase()
    )
}

/// Cut `token` into pieces of at most `max_chars` characters, preferring to
/// cut at a space.
fn minimize(token: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = token.trim_start_matches(' ');

    while rest.chars().count() > max_chars {
        let limit = rest
            .char_indices()
            .nth(max_chars)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let cut = match rest[..limit].rfind(' ') {
            Some(i) if i > 0 => i,
            _ => limit,
        };
        pieces.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start_matches(' ');
    }

    if !rest.is_empty() {
        pieces.push(rest.to_string());
    }
    pieces
}

fn is_punctuation_only(token: &str) -> bool {
    token.chars().all(|c| {
        c.is_whitespace()
            || c.is_ascii_punctuation()
            || TONE_MARKS.contains(&c)
            || SPLIT_PUNCTUATION.contains(&c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narration::NarrationTable;

    #[test]
    fn short_text_is_sent_whole() {
        assert_eq!(tokenize("Hello, world."), vec!["Hello, world."]);
        assert_eq!(tokenize("  Is it working? Yes!  "), vec!["Is it working? Yes!"]);
    }

    #[test]
    fn builtin_narration_under_the_limit_is_one_request() {
        for (location, lang, text) in NarrationTable::builtin().unwrap().entries() {
            let prepared = preprocess(text);
            if prepared.trim().chars().count() <= MAX_TOKEN_CHARS {
                assert_eq!(tokenize(&prepared).len(), 1, "{location}_{lang}");
            }
        }
    }

    #[test]
    fn long_text_splits_at_sentence_punctuation() {
        let text = format!("Hello, world. Is it working? Yes! {}", "and more ".repeat(10));
        let tokens = tokenize(&text);
        assert_eq!(tokens[..3], ["Hello", "world", "Is it working?"]);
        assert!(tokens[3].starts_with("Yes!"));
    }

    #[test]
    fn separators_inside_numbers_do_not_split() {
        let tokens = split_tokens("A 55.5 meter tower seen by 1,000 visitors at 10:30.");
        assert_eq!(
            tokens,
            vec!["A 55.5 meter tower seen by 1,000 visitors at 10:30."]
        );
    }

    #[test]
    fn dotted_abbreviations_do_not_split() {
        let tokens = split_tokens("See e.g. the hall, then the well.");
        assert_eq!(tokens, vec!["See e.g. the hall", "then the well."]);
    }

    #[test]
    fn colon_next_to_a_digit_does_not_split() {
        let tokens = split_tokens("Open 10:am daily: free entry");
        assert_eq!(tokens, vec!["Open 10:am daily", "free entry"]);
        assert_eq!(split_tokens("Gate:4 north"), vec!["Gate:4 north"]);
    }

    #[test]
    fn drops_punctuation_only_tokens() {
        assert!(tokenize("... ,,, !?").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn long_tokens_are_cut_at_spaces() {
        let text = "word ".repeat(60);
        let tokens = tokenize(&text);
        assert!(tokens.len() > 1);
        for token in &tokens {
            assert!(token.chars().count() <= MAX_TOKEN_CHARS);
            assert!(!token.starts_with(' ') && !token.ends_with(' '));
        }
        let rejoined: Vec<&str> = tokens.iter().flat_map(|t| t.split(' ')).collect();
        assert_eq!(rejoined.len(), 60);
    }

    #[test]
    fn long_token_without_spaces_is_hard_cut() {
        let text = "ம".repeat(250);
        let tokens = tokenize(&text);
        let lengths: Vec<usize> = tokens.iter().map(|t| t.chars().count()).collect();
        assert_eq!(lengths, vec![100, 100, 50]);
    }

    #[test]
    fn preprocess_handles_abbreviations_and_line_breaks() {
        assert_eq!(preprocess("Dr. Raja met Mr. Chola"), "Dr Raja met Mr Chola");
        assert_eq!(preprocess("the tem-\nple"), "the temple");
        assert_eq!(preprocess("John Smith, Esq."), "John Smith, Esquire");
        assert_eq!(preprocess("Wow!Great"), "Wow! Great");
    }

    #[test]
    fn preprocess_keeps_period_after_ordinary_words() {
        assert_eq!(preprocess("The best. Next"), "The best. Next");
    }
}
