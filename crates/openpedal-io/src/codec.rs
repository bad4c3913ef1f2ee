//! Text frame decoding.
//!
//! A frame is one line of text holding at least one number per axis:
//!
//! ```text
//! [12.5, 40.0, 99.1]
//! (12.5, 40.0, 99.1)
//! 12.5, 40.0, 99.1
//! 12.5 40.0 99.1
//! ```
//!
//! Trailing values past the axis count are ignored. Anything else is
//! rejected as a whole; the caller treats that as "no sample".

/// Decode a frame carrying at least `axis_count` finite numbers.
///
/// ```
/// use openpedal_io::decode_frame;
///
/// assert_eq!(decode_frame("[1.5, 2, 3e1]", 3), Some(vec![1.5, 2.0, 30.0]));
/// assert_eq!(decode_frame("[1.5, 2]", 3), None);
/// assert_eq!(decode_frame("garbage", 1), None);
/// ```
pub fn decode_frame(line: &str, axis_count: usize) -> Option<Vec<f32>> {
    let body = strip_brackets(line.trim())?;

    let values = if body.contains(',') {
        parse_comma_separated(body)?
    } else {
        body.split_whitespace()
            .map(parse_value)
            .collect::<Option<Vec<f32>>>()?
    };

    (!values.is_empty() && values.len() >= axis_count).then_some(values)
}

fn strip_brackets(text: &str) -> Option<&str> {
    for (open, close) in [('[', ']'), ('(', ')')] {
        if let Some(rest) = text.strip_prefix(open) {
            return rest.strip_suffix(close);
        }
    }
    if text.ends_with([']', ')']) {
        return None;
    }
    Some(text)
}

fn parse_comma_separated(body: &str) -> Option<Vec<f32>> {
    let mut tokens: Vec<&str> = body.split(',').map(str::trim).collect();

    // A single trailing comma is allowed: "[1, 2, 3,]".
    if tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }

    tokens.into_iter().map(parse_value).collect()
}

fn parse_value(token: &str) -> Option<f32> {
    token.parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_list() {
        assert_eq!(
            decode_frame("[12.5, 40.0, 99.1]", 3),
            Some(vec![12.5, 40.0, 99.1])
        );
    }

    #[test]
    fn test_parenthesized_and_bare() {
        assert_eq!(decode_frame("(1, 2, 3)", 3), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(decode_frame("1,2,3", 3), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(decode_frame("  1 2\t3 \r", 3), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_extra_values_kept() {
        assert_eq!(decode_frame("[1, 2, 3, 4]", 3), Some(vec![1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_trailing_comma() {
        assert_eq!(decode_frame("[1, 2, 3,]", 3), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(decode_frame("[1,, 2, 3]", 3), None);
    }

    #[test]
    fn test_short_frame_rejected() {
        assert_eq!(decode_frame("[1, 2]", 3), None);
        assert_eq!(decode_frame("[]", 1), None);
        assert_eq!(decode_frame("", 0), None);
    }

    #[test]
    fn test_malformed_rejected() {
        assert_eq!(decode_frame("[1, 2, 3", 3), None);
        assert_eq!(decode_frame("1, 2, 3]", 3), None);
        assert_eq!(decode_frame("[1, x, 3]", 3), None);
        assert_eq!(decode_frame("[1, nan, 3]", 3), None);
        assert_eq!(decode_frame("[1, inf, 3]", 3), None);
        assert_eq!(decode_frame("Traceback (most recent call last):", 3), None);
    }
}
