//! Shared rendering components.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::signature::{tokenize, SigToken};
use crate::summary::MetricBlock;
use crate::tui::theme::Theme;

/// Add lowercase section header with muted color
pub fn add_section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme) {
    lines.push(Line::from(vec![Span::styled(
        title.to_lowercase(),
        Style::default().fg(theme.muted),
    )]));
}

/// Add label-value pair with dotted leader connection
///
/// ```text
///   Lines of Code ··········· 120
///   Has Scaladoc ············ Yes
/// ```
pub fn add_label_value(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: String,
    theme: &Theme,
    width: u16,
) {
    const INDENT: usize = 2;
    const MIN_DOTS: usize = 3;

    let label_with_indent = format!("{}{}", " ".repeat(INDENT), label);
    let total_content_len = label_with_indent.width() + 1 + value.width() + 1;
    let dots_needed = (width as usize)
        .saturating_sub(total_content_len)
        .max(MIN_DOTS);

    lines.push(Line::from(vec![
        Span::raw(label_with_indent),
        Span::raw(" "),
        Span::styled("·".repeat(dots_needed), Style::default().fg(theme.muted)),
        Span::raw(" "),
        Span::styled(value, Style::default().fg(theme.primary)),
    ]));
}

/// Add a metric block: header followed by its rows.
pub fn add_metric_block(
    lines: &mut Vec<Line<'static>>,
    block: &MetricBlock,
    theme: &Theme,
    width: u16,
) {
    add_section_header(lines, block.title, theme);
    for (label, value) in &block.lines {
        add_label_value(lines, label, value.clone(), theme, width);
    }
    add_blank_line(lines);
}

/// Add blank line separator
pub fn add_blank_line(lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from(""));
}

/// Pad or truncate `text` to exactly `width` display columns.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return format!("{}{}", text, " ".repeat(width - text.width()));
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Center `text` within `width` display columns.
pub fn center(text: &str, width: usize) -> String {
    let free = width.saturating_sub(text.width());
    let left = free / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(free - left))
}

/// Coloured spans for a signature.
pub fn signature_spans(signature: &str, theme: &Theme) -> Vec<Span<'static>> {
    tokenize(signature)
        .into_iter()
        .map(|token| match token {
            SigToken::Name(s) => Span::styled(
                s.to_string(),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            SigToken::Type(s) => Span::styled(s.to_string(), Style::default().fg(theme.type_name)),
            SigToken::Punct(c) => Span::styled(c.to_string(), Style::default().fg(theme.muted)),
            SigToken::Space => Span::raw(" "),
            SigToken::Ident(s) | SigToken::Raw(s) => Span::raw(s.to_string()),
        })
        .collect()
}

/// Horizontal bar: `label ████ value`, scaled against `max`.
pub fn bar_line(
    label: &str,
    value: u64,
    max: u64,
    label_width: usize,
    bar_width: usize,
    style: Style,
) -> Line<'static> {
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * bar_width as f64).round() as usize
    };
    Line::from(vec![
        Span::raw(fit_width(label, label_width)),
        Span::raw(" "),
        Span::styled("█".repeat(filled.min(bar_width)), style),
        Span::raw(format!(" {}", value)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_pads_and_truncates() {
        assert_eq!(fit_width("abc", 5), "abc  ");
        assert_eq!(fit_width("abcdef", 4), "abc…");
        assert_eq!(fit_width("0–1", 3), "0–1");
    }

    #[test]
    fn test_center() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_label_value_has_leaders() {
        let mut lines = Vec::new();
        add_label_value(&mut lines, "Lines", "10".into(), &Theme::dark(), 20);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("  Lines "));
        assert!(text.ends_with(" 10"));
        assert!(text.contains("···"));
    }

    #[test]
    fn test_bar_scales() {
        let line = bar_line("a", 5, 10, 3, 8, Style::default());
        assert_eq!(line.spans[2].content, "████");
        let empty = bar_line("a", 0, 0, 3, 8, Style::default());
        assert_eq!(empty.spans[2].content, "");
    }
}
