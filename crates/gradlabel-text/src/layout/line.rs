//! Line breaking (simplified UAX #14)

/// Line break opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakOpportunity {
    /// No break allowed here
    NoBreak,
    /// Break allowed (soft break)
    AllowBreak,
    /// Must break (hard break - newline)
    MustBreak,
}

/// Greedy line breaker
pub struct LineBreaker;

impl LineBreaker {
    /// Byte offsets *after* which a line may or must end
    pub fn break_opportunities(text: &str) -> Vec<(usize, BreakOpportunity)> {
        let mut breaks = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            let (end, opp) = match c {
                '\n' => (i + 1, BreakOpportunity::MustBreak),
                '\r' => match chars.peek() {
                    Some(&(j, '\n')) => {
                        chars.next();
                        (j + 1, BreakOpportunity::MustBreak)
                    }
                    _ => (i + 1, BreakOpportunity::MustBreak),
                },
                ' ' | '\t' | '-' => (i + c.len_utf8(), BreakOpportunity::AllowBreak),
                c if is_cjk(c) => (i + c.len_utf8(), BreakOpportunity::AllowBreak),
                _ => continue,
            };
            breaks.push((end, opp));
        }

        breaks
    }

    /// Split text into `(start, end)` byte ranges no wider than `max_width`
    /// where a soft break allows it. Single words wider than `max_width`
    /// keep their own line.
    pub fn break_lines(
        text: &str,
        max_width: f32,
        mut measure_fn: impl FnMut(&str) -> f32,
    ) -> Vec<(usize, usize)> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut last_soft: Option<usize> = None;

        for (pos, opp) in Self::break_opportunities(text) {
            if measure_fn(text[line_start..pos].trim_end()) > max_width {
                if let Some(soft) = last_soft.filter(|&s| s > line_start) {
                    lines.push((line_start, soft));
                    line_start = soft;
                }
            }

            match opp {
                BreakOpportunity::MustBreak => {
                    lines.push((line_start, pos));
                    line_start = pos;
                    last_soft = None;
                }
                BreakOpportunity::AllowBreak => last_soft = Some(pos),
                BreakOpportunity::NoBreak => {}
            }
        }

        if line_start < text.len() {
            if measure_fn(text[line_start..].trim_end()) > max_width {
                if let Some(soft) = last_soft.filter(|&s| s > line_start) {
                    lines.push((line_start, soft));
                    line_start = soft;
                }
            }
            lines.push((line_start, text.len()));
        }

        lines
    }
}

/// Check if character is CJK (simplified check)
fn is_cjk(c: char) -> bool {
    let code = c as u32;
    // CJK Unified Ideographs
    (0x4E00..=0x9FFF).contains(&code) ||
    // Hiragana
    (0x3040..=0x309F).contains(&code) ||
    // Katakana
    (0x30A0..=0x30FF).contains(&code) ||
    // Hangul Syllables
    (0xAC00..=0xD7AF).contains(&code)
}
