/// Greedy word wrap.
///
/// Words are accumulated while the space-joined line stays within `max_chars` characters
/// (Unicode scalar values). A word longer than `max_chars` is kept whole on its own line.
/// Whitespace runs collapse to single spaces and empty input yields no lines.
pub fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
            continue;
        }
        if current_chars + 1 + word_chars > max_chars {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        } else {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/caption/wrap.rs"]
mod tests;
