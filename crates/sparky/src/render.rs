//! Draws the widget's frames into a terminal.
//!
//! The terminal is an append-only surface, so "scrolling to the newest
//! message" means printing every row up to the scroll anchor that hasn't
//! been printed yet.

use owo_colors::OwoColorize;
use sparky_core::scroll::ScrollRequest;
use sparky_core::view::{Align, Bubble, InputView, MessageRow, ViewModel};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width used when the terminal doesn't tell us.
pub const DEFAULT_WIDTH: usize = 80;

const BAR_CHAR: &str = "▎";

/// A laid out line of a message bubble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BubbleLine {
    /// Columns of padding before the bubble.
    pub indent: usize,
    /// The bubble's content, padded with one space on each side.
    pub content: String,
}

/// Prints frames into a terminal, remembering what has been printed.
#[derive(Clone, Debug)]
pub struct TerminalRenderer {
    width: usize,
    colored: bool,
    printed: usize,
}

impl TerminalRenderer {
    /// Creates a renderer for a terminal of the given width.
    #[inline]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(20),
            colored: true,
            printed: 0,
        }
    }

    /// Creates a renderer sized from the `COLUMNS` variable.
    pub fn from_env() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_WIDTH);
        Self::new(width)
    }

    /// Turns colors on or off.
    #[inline]
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Renders the title bar.
    pub fn title(&self, view: &ViewModel) -> String {
        if self.colored {
            format!("{}{}", BAR_CHAR.bright_cyan(), view.title.bold())
        } else {
            format!("{BAR_CHAR}{}", view.title)
        }
    }

    /// Returns the lines for the rows the scroll request brings into view,
    /// and marks them as printed.
    pub fn reveal(
        &mut self,
        view: &ViewModel,
        req: ScrollRequest,
    ) -> Vec<String> {
        let end = req.anchor.min(view.rows.len());
        if end <= self.printed {
            return vec![];
        }
        let lines = view.rows[self.printed..end]
            .iter()
            .flat_map(|row| self.paint_row(row))
            .collect();
        self.printed = end;
        lines
    }

    /// Returns `true` if every row of the view has been printed.
    #[inline]
    pub fn is_caught_up(&self, view: &ViewModel) -> bool {
        self.printed >= view.rows.len()
    }

    /// Renders the hint shown above the prompt.
    pub fn hint(&self, input: &InputView, send_label: &str) -> String {
        let hint = format!("{} [Enter: {send_label}]", input.placeholder);
        if self.colored {
            hint.dimmed().to_string()
        } else {
            hint
        }
    }

    fn paint_row(&self, row: &MessageRow) -> Vec<String> {
        layout_row(row, self.width)
            .into_iter()
            .map(|line| {
                let padding = " ".repeat(line.indent);
                if !self.colored {
                    return format!("{padding}{}", line.content);
                }
                match row.bubble {
                    Bubble::Own => {
                        format!("{padding}{}", line.content.white().on_blue())
                    }
                    Bubble::Other => format!(
                        "{padding}{}",
                        line.content.black().on_bright_white()
                    ),
                }
            })
            .collect()
    }
}

/// Lays out a message bubble. Bubbles take at most three quarters of the
/// width; right-aligned bubbles are pushed against the right edge.
///
/// Widths are terminal columns, so wide characters count twice.
pub fn layout_row(row: &MessageRow, width: usize) -> Vec<BubbleLine> {
    let max_text = (width * 3 / 4).saturating_sub(2).max(1);
    let lines = wrap(&row.text, max_text);
    let bubble_width = lines.iter().map(|l| l.width()).max().unwrap_or(0) + 2;

    lines
        .into_iter()
        .map(|line| {
            let fill = bubble_width - 2 - line.width();
            let content = format!(" {line}{} ", " ".repeat(fill));
            let indent = match row.align {
                Align::Left => 0,
                Align::Right => width.saturating_sub(bubble_width),
            };
            BubbleLine { indent, content }
        })
        .collect()
}

/// Splits text into lines of at most `max` columns, breaking at whitespace
/// when possible and keeping explicit line breaks.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        for mut word in paragraph.split(' ') {
            loop {
                let needed = if current.is_empty() {
                    word.width()
                } else {
                    current.width() + 1 + word.width()
                };
                if needed <= max {
                    if !current.is_empty() {
                        current.push(' ');
                    }
                    current.push_str(word);
                    break;
                }
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                    continue;
                }
                // A single word longer than a line.
                let (head, rest) = split_at_width(word, max);
                if rest.is_empty() {
                    current.push_str(head);
                    break;
                }
                lines.push(head.to_owned());
                word = rest;
            }
        }
        lines.push(current);
    }
    lines
}

/// Splits off the longest prefix that fits in `max` columns. The prefix
/// always holds at least one character.
fn split_at_width(word: &str, max: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in word.char_indices() {
        let w = c.width().unwrap_or(0);
        if i > 0 && used + w > max {
            return word.split_at(i);
        }
        used += w;
    }
    (word, "")
}
