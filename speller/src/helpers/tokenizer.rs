use regex_lite::Regex;

/// Longest piece of text the speech endpoint accepts.
pub const MAX_CHUNK_CHARS: usize = 100;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Trims and collapses runs of whitespace into one space.
pub fn normalize<T: AsRef<str>>(text: T) -> String {
    WHITESPACE.replace_all(text.as_ref().trim(), " ").into_owned()
}

/// Text actually spoken for `GET /audio`.
///
/// `test` is never prefixed, clients use it to check audio works.
pub fn utterance(text: &str, prompt: Option<&str>) -> String {
    match prompt {
        Some(prompt) if text != "test" => normalize(format!("{} {}", prompt, text)),
        _ => normalize(text),
    }
}

/// Hides every whole-word, case-insensitive occurrence of `word` with
/// underscores of the same length.
///
/// Word boundaries and case folding follow Unicode, so `café` is masked
/// in `Café` but not in `cafés`.
pub fn mask(sentence: &str, word: &str) -> String {
    let target: Vec<char> = word.trim().chars().flat_map(char::to_lowercase).collect();
    if target.is_empty() {
        return sentence.to_string();
    }

    let characters: Vec<char> = sentence.chars().collect();
    let mut result = String::with_capacity(sentence.len());
    let mut i = 0;

    while i < characters.len() {
        if i == 0 || !is_word_char(characters[i - 1]) {
            if let Some(length) = match_at(&characters[i..], &target) {
                let end = i + length;
                if characters.get(end).map_or(true, |c| !is_word_char(*c)) {
                    result.extend(std::iter::repeat('_').take(length));
                    i = end;
                    continue;
                }
            }
        }

        result.push(characters[i]);
        i += 1;
    }

    result
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Number of characters of `characters` matching the lowercased `target`.
fn match_at(characters: &[char], target: &[char]) -> Option<usize> {
    let (mut matched, mut consumed) = (0, 0);

    while matched < target.len() {
        for lower in characters.get(consumed)?.to_lowercase() {
            if target.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        consumed += 1;
    }

    Some(consumed)
}

/// Splits text into pieces of at most `max` characters, cutting on
/// whitespace. A single longer token is cut hard.
pub fn chunk(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();

    for token in text.split_whitespace() {
        let length = token.chars().count();

        if length > max {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }

            let characters: Vec<char> = token.chars().collect();
            for piece in characters.chunks(max) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        if !current.is_empty() && current.chars().count() + 1 + length > max {
            chunks.push(std::mem::take(&mut current));
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utterance_with_prompt() {
        assert_eq!(
            utterance("necessary", Some("Your word is...")),
            "Your word is... necessary"
        );
    }

    #[test]
    fn test_utterance_test_word_is_bare() {
        assert_eq!(utterance("test", Some("Your word is...")), "test");
        assert_eq!(utterance("  rhythm ", None), "rhythm");
    }

    #[test]
    fn test_mask() {
        assert_eq!(
            mask("The Dog chased another dog, not a hotdog.", "dog"),
            "The ___ chased another ___, not a hotdog."
        );
    }

    #[test]
    fn test_mask_escapes_word() {
        assert_eq!(mask("Is a.b here? aXb stays.", "a.b"), "Is ___ here? aXb stays.");
        assert_eq!(mask("unchanged", "  "), "unchanged");
    }

    #[test]
    fn test_mask_non_ascii() {
        assert_eq!(
            mask("I had a coffee at the café today.", "café"),
            "I had a coffee at the ____ today."
        );
        assert_eq!(mask("Send your résumé by Monday.", "résumé"), "Send your ______ by Monday.");
        assert_eq!(mask("ÉCOLE is école.", "école"), "_____ is _____.");
        assert_eq!(mask("Two cafés, one café.", "café"), "Two cafés, one ____.");
    }

    #[test]
    fn test_chunk_short_text() {
        assert_eq!(chunk("Your word is... cat", MAX_CHUNK_CHARS), ["Your word is... cat"]);
        assert!(chunk("   ", MAX_CHUNK_CHARS).is_empty());
    }

    #[test]
    fn test_chunk_on_whitespace() {
        assert_eq!(
            chunk("one two three four", 9),
            ["one two", "three", "four"]
        );
    }

    #[test]
    fn test_chunk_long_token() {
        assert_eq!(chunk("ab abcdefgh c", 3), ["ab", "abc", "def", "gh", "c"]);
    }

    #[test]
    fn test_chunks_respect_limit() {
        let text = "pneumonoultramicroscopicsilicovolcanoconiosis ".repeat(10);
        for piece in chunk(&text, MAX_CHUNK_CHARS) {
            assert!(piece.chars().count() <= MAX_CHUNK_CHARS);
        }
    }
}
