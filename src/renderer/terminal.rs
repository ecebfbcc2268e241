use crossterm::queue;
use crossterm::style::ResetColor;
use std::io::{self, BufWriter, Write};

use crate::art::{ArtLayout, ArtSegment, draw_row, segment};
use crate::color::{ColorState, write_color};
use crate::config::{ArrangeBox, Configuration, FrameKind, LineConfig};
use crate::info::InfoProvider;
use crate::template::LineRenderer;

/// Draws art on the left and info lines on the right, framed per the
/// configured [`FrameKind`].
pub struct TerminalRenderer<'a, P: ?Sized> {
    config: &'a Configuration,
    lines: LineRenderer<'a, P>,
}

/// One info line with its plain text, used for box widths.
struct BoxedLine<'l> {
    config: &'l LineConfig,
    plain: String,
}

impl<'a, P: InfoProvider + ?Sized> TerminalRenderer<'a, P> {
    pub fn new(config: &'a Configuration, provider: &'a P) -> Self {
        Self {
            config,
            lines: LineRenderer::new(config, provider),
        }
    }

    pub fn render(&self, art: &[ArtSegment]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        self.render_to_writer(&mut out, art)
    }

    pub fn render_to_writer<W: Write>(&self, out: &mut W, art: &[ArtSegment]) -> io::Result<()> {
        let layout = segment(art);
        let mut colors = ColorState::new();
        log::debug!(
            "rendering {} art rows (max width {}) with frame {:?}",
            layout.rows.len(),
            layout.max_visual_length,
            self.config.frame_kind
        );

        // Layout per frame kind
        match self.config.frame_kind {
            FrameKind::None => self.render_side_by_side(out, art, &layout, &mut colors, false)?,
            FrameKind::Underline => self.render_side_by_side(out, art, &layout, &mut colors, true)?,
            FrameKind::AllBox => self.render_all_box(out, art, &layout, &mut colors)?,
            FrameKind::DoubleBox => self.render_double_box(out, art, &layout, &mut colors)?,
        }

        // Leave the terminal in its default color
        queue!(out, ResetColor)?;
        out.flush()
    }

    /// One info line per art row, optionally underlined.
    fn render_side_by_side<W: Write>(
        &self,
        out: &mut W,
        art: &[ArtSegment],
        layout: &ArtLayout,
        colors: &mut ColorState,
        underline: bool,
    ) -> io::Result<()> {
        for (i, row) in layout.rows.iter().enumerate() {
            draw_row(out, art, row, colors)?;
            write_spaces(out, self.gap(layout.max_visual_length, row.visual_length))?;

            // Info line for this row, if any.
            let line = self.config.renderable_line(i);
            if let Some(line) = line {
                self.lines.colored(out, line, colors.current_art_color())?;
            }
            writeln!(out)?;

            // Dashes as wide as the info text, starting at the info column.
            if underline {
                let width = line.map_or(0, |line| self.lines.plain(line).len());
                write_spaces(out, self.gap(layout.max_visual_length, 0))?;
                write_color(out, self.config.frame_color_or_default())?;
                write!(out, "{}", "─".repeat(width))?;
                colors.restore(out)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Every renderable line in one box.
    fn render_all_box<W: Write>(
        &self,
        out: &mut W,
        art: &[ArtSegment],
        layout: &ArtLayout,
        colors: &mut ColorState,
    ) -> io::Result<()> {
        let boxed = self.boxed_lines(|_| true);
        let inner = boxed.iter().map(|line| line.plain.len()).max().unwrap_or(0);
        let box_rows = boxed.len() + 2;

        for r in 0..layout.rows.len().max(box_rows) {
            self.write_art_column(out, art, layout, r, colors)?;

            // Top, bottom, then the lines in between. Rows past the box stay empty.
            if r == 0 {
                self.write_border(out, '┌', '┐', inner + 2, colors)?;
            } else if r == box_rows - 1 {
                self.write_border(out, '└', '┘', inner + 2, colors)?;
            } else if let Some(line) = boxed.get(r - 1) {
                self.write_boxed_line(out, line, inner, colors)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Soft lines under one title, hard lines under another, in a shared box.
    fn render_double_box<W: Write>(
        &self,
        out: &mut W,
        art: &[ArtSegment],
        layout: &ArtLayout,
        colors: &mut ColorState,
    ) -> io::Result<()> {
        let soft = self.boxed_lines(|line| line.arrange_box == ArrangeBox::Soft);
        let hard = self.boxed_lines(|line| line.arrange_box == ArrangeBox::Hard);
        let soft_title = self.config.frame_title_soft.as_str();
        let hard_title = self.config.frame_title_hard.as_str();

        // Titles count toward the width so they never get cut
        let inner = soft
            .iter()
            .chain(hard.iter())
            .map(|line| line.plain.len())
            .chain([soft_title.len(), hard_title.len()])
            .max()
            .unwrap_or(0);
        // Titled top, soft lines, titled divider, hard lines, plain bottom
        let divider = soft.len() + 1;
        let box_rows = soft.len() + hard.len() + 3;

        for r in 0..layout.rows.len().max(box_rows) {
            self.write_art_column(out, art, layout, r, colors)?;

            if r == 0 {
                self.write_titled_border(out, '┌', '┐', inner + 2, soft_title, colors)?;
            } else if r < divider {
                self.write_boxed_line(out, &soft[r - 1], inner, colors)?;
            } else if r == divider {
                self.write_titled_border(out, '├', '┤', inner + 2, hard_title, colors)?;
            } else if r < box_rows - 1 {
                self.write_boxed_line(out, &hard[r - divider - 1], inner, colors)?;
            } else if r == box_rows - 1 {
                self.write_border(out, '└', '┘', inner + 2, colors)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn boxed_lines(&self, keep: impl Fn(&LineConfig) -> bool) -> Vec<BoxedLine<'a>> {
        self.config
            .lines
            .iter()
            .filter(|line| line.is_renderable() && keep(*line))
            .map(|line| BoxedLine {
                config: line,
                plain: self.lines.plain(line),
            })
            .collect()
    }

    /// Spaces between the art and the info column. Never negative.
    fn gap(&self, max_visual_length: usize, visual_length: usize) -> usize {
        let gap = (max_visual_length - visual_length) as i64 + i64::from(self.config.info_padding);
        gap.max(0) as usize
    }

    /// Art row `r` plus its padding, or blank space where the art has run out.
    fn write_art_column<W: Write>(
        &self,
        out: &mut W,
        art: &[ArtSegment],
        layout: &ArtLayout,
        r: usize,
        colors: &mut ColorState,
    ) -> io::Result<()> {
        let visual_length = match layout.rows.get(r) {
            Some(row) => {
                draw_row(out, art, row, colors)?;
                row.visual_length
            }
            None => 0,
        };
        write_spaces(out, self.gap(layout.max_visual_length, visual_length))
    }

    fn write_border<W: Write>(
        &self,
        out: &mut W,
        left: char,
        right: char,
        width: usize,
        colors: &ColorState,
    ) -> io::Result<()> {
        write_color(out, self.config.frame_color_or_default())?;
        write!(out, "{}{}{}", left, "─".repeat(width), right)?;
        colors.restore(out)?;
        Ok(())
    }

    fn write_titled_border<W: Write>(
        &self,
        out: &mut W,
        left: char,
        right: char,
        width: usize,
        title: &str,
        colors: &ColorState,
    ) -> io::Result<()> {
        let title = truncate(title, width);
        let (before, after) = title_dashes(width, title.len());

        write_color(out, self.config.frame_color_or_default())?;
        write!(
            out,
            "{}{}{}{}{}",
            left,
            "─".repeat(before),
            title,
            "─".repeat(after),
            right
        )?;
        colors.restore(out)?;
        Ok(())
    }

    fn write_boxed_line<W: Write>(
        &self,
        out: &mut W,
        line: &BoxedLine<'_>,
        inner: usize,
        colors: &ColorState,
    ) -> io::Result<()> {
        let frame_color = self.config.frame_color_or_default();

        // Left edge
        write_color(out, frame_color)?;
        write!(out, "│ ")?;
        colors.restore(out)?;
        self.lines.colored(out, line.config, colors.current_art_color())?;
        // Pad to the right edge
        write_color(out, frame_color)?;
        write_spaces(out, inner - line.plain.len() + 1)?;
        write!(out, "│")?;
        colors.restore(out)?;
        Ok(())
    }
}

/// Dashes left and right of a title centered in `width`.
pub(crate) fn title_dashes(width: usize, title_len: usize) -> (usize, usize) {
    let spare = width.saturating_sub(title_len);
    let before = spare / 2;
    (before, spare - before)
}

/// Cut `text` to at most `max` bytes on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn write_spaces<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    write!(out, "{:1$}", "", count)
}
