pub mod builtin;

use std::io::{self, Write};
use std::path::Path;

use crate::color::ColorState;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtSegment {
    /// Switches the drawing color. Invisible.
    Color(String),
    /// Text on the same row as the segment before it.
    Continuation(String),
    /// Text that begins a new row.
    Row(String),
}

impl ArtSegment {
    pub fn parse(raw: &str) -> Self {
        if let Some(hex) = raw.strip_prefix('#') {
            ArtSegment::Color(hex.to_string())
        } else if let Some(text) = raw.strip_prefix('$') {
            ArtSegment::Continuation(text.to_string())
        } else {
            ArtSegment::Row(raw.to_string())
        }
    }

    /// Printable text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ArtSegment::Color(_) => None,
            ArtSegment::Continuation(text) | ArtSegment::Row(text) => Some(text),
        }
    }

    fn starts_row(&self) -> bool {
        matches!(self, ArtSegment::Row(_))
    }
}

pub fn parse_all<S: AsRef<str>>(raw: &[S]) -> Vec<ArtSegment> {
    raw.iter().map(|s| ArtSegment::parse(s.as_ref())).collect()
}

/// One visual row: the segments in `start..end` and their printable length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtRow {
    pub start: usize,
    pub end: usize,
    pub visual_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtLayout {
    pub rows: Vec<ArtRow>,
    pub max_visual_length: usize,
}

/// Group segments into rows.
///
/// A row takes the color directives in front of it, its first text segment,
/// and every color or continuation after that up to the next row start. Color
/// directives after the last text stay with the last row. Lengths are in bytes.
pub fn segment(art: &[ArtSegment]) -> ArtLayout {
    let mut layout = ArtLayout::default();
    let mut i = 0;

    while i < art.len() {
        // Leading colors belong to the row they precede
        let start = i;
        while i < art.len() && art[i].text().is_none() {
            i += 1;
        }
        // Only colors left: fold them into the last row
        let Some(first) = art.get(i) else {
            if let Some(last) = layout.rows.last_mut() {
                last.end = art.len();
            }
            break;
        };

        let mut visual_length = first.text().map_or(0, str::len);
        i += 1;
        // Absorb continuations and colors up to the next row start
        while i < art.len() && !art[i].starts_row() {
            visual_length += art[i].text().map_or(0, str::len);
            i += 1;
        }

        layout.max_visual_length = layout.max_visual_length.max(visual_length);
        layout.rows.push(ArtRow {
            start,
            end: i,
            visual_length,
        });
    }

    layout
}

/// Draw one row, applying its color directives as they come.
pub fn draw_row<W: Write>(
    out: &mut W,
    art: &[ArtSegment],
    row: &ArtRow,
    colors: &mut ColorState,
) -> io::Result<()> {
    for seg in &art[row.start..row.end] {
        match seg {
            ArtSegment::Color(hex) => colors.set_art_color(out, hex)?,
            ArtSegment::Continuation(text) | ArtSegment::Row(text) => {
                out.write_all(text.as_bytes())?
            }
        }
    }
    Ok(())
}

/// Read a custom art file, one segment per line.
pub fn load_file(path: &Path) -> Result<Vec<ArtSegment>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ArtFile {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded art file {}", path.display());
    Ok(content.lines().map(ArtSegment::parse).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn art(raw: &[&str]) -> Vec<ArtSegment> {
        parse_all(raw)
    }

    #[test]
    fn test_parse_markers() {
        assert_eq!(ArtSegment::parse("#FF0000"), ArtSegment::Color("FF0000".into()));
        assert_eq!(ArtSegment::parse("##FF0000"), ArtSegment::Color("#FF0000".into()));
        assert_eq!(ArtSegment::parse("$BB"), ArtSegment::Continuation("BB".into()));
        assert_eq!(ArtSegment::parse(" $x"), ArtSegment::Row(" $x".into()));
        assert_eq!(ArtSegment::parse(""), ArtSegment::Row(String::new()));
    }

    #[test]
    fn test_segment_continuation_joins_row() {
        let layout = segment(&art(&["#FF0000", "AA", "$BB", "CC"]));
        assert_eq!(
            layout.rows,
            vec![
                ArtRow { start: 0, end: 3, visual_length: 4 },
                ArtRow { start: 3, end: 4, visual_length: 2 },
            ]
        );
        assert_eq!(layout.max_visual_length, 4);
    }

    #[test]
    fn test_segment_colors_between_rows() {
        let layout = segment(&art(&["A", "#FF0000", "$BC", "#00FF00", "DEF", "#0000FF"]));
        assert_eq!(
            layout.rows,
            vec![
                ArtRow { start: 0, end: 4, visual_length: 3 },
                ArtRow { start: 4, end: 6, visual_length: 3 },
            ]
        );
    }

    #[test]
    fn test_segment_leading_continuation_starts_row() {
        let layout = segment(&art(&["$ab", "$cd", "e"]));
        assert_eq!(layout.rows.len(), 2);
        assert_eq!(layout.rows[0].visual_length, 4);
        assert_eq!(layout.rows[1].visual_length, 1);
    }

    #[test]
    fn test_segment_empty_and_color_only() {
        assert_eq!(segment(&[]), ArtLayout::default());

        let layout = segment(&art(&["#FF0000", "#00FF00"]));
        assert!(layout.rows.is_empty());
        assert_eq!(layout.max_visual_length, 0);
    }

    #[test]
    fn test_draw_row_updates_art_color() {
        let segments = art(&["#FF0000", "AA", "#00ff00", "$BB", "CC"]);
        let layout = segment(&segments);
        let mut colors = ColorState::new();

        let mut buf = Vec::new();
        draw_row(&mut buf, &segments, &layout.rows[0], &mut colors).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "\x1b[0m\x1b[38;2;255;0;0m\x1b[1mAA\x1b[0m\x1b[38;2;0;255;0mBB"
        );
        assert_eq!(colors.current_art_color(), "00ff00");

        let mut buf = Vec::new();
        draw_row(&mut buf, &segments, &layout.rows[1], &mut colors).unwrap();
        assert_eq!(buf, b"CC");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "#5277C3").unwrap();
        writeln!(file, " /\\").unwrap();
        writeln!(file, "/  \\").unwrap();

        let segments = load_file(file.path()).unwrap();
        assert_eq!(
            segments,
            vec![
                ArtSegment::Color("5277C3".into()),
                ArtSegment::Row(" /\\".into()),
                ArtSegment::Row("/  \\".into()),
            ]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::ArtFile { .. }));
    }

    fn segment_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("#FF0000".to_string()),
            Just("#00ffff".to_string()),
            "\\$[a-z ]{0,5}",
            "[a-z ]{0,6}",
        ]
    }

    proptest! {
        #[test]
        fn prop_max_is_largest_row(raw in prop::collection::vec(segment_strategy(), 0..24)) {
            let segments = parse_all(&raw);
            let layout = segment(&segments);

            let max = layout.rows.iter().map(|r| r.visual_length).max().unwrap_or(0);
            prop_assert_eq!(layout.max_visual_length, max);
        }

        #[test]
        fn prop_rows_are_stable(raw in prop::collection::vec(segment_strategy(), 0..24)) {
            let segments = parse_all(&raw);
            let layout = segment(&segments);

            let mut expected_start = 0;
            for row in &layout.rows {
                prop_assert_eq!(row.start, expected_start);
                expected_start = row.end;

                let again = segment(&segments[row.start..row.end]);
                prop_assert_eq!(again.rows.len(), 1);
                prop_assert_eq!(again.rows[0].visual_length, row.visual_length);
                prop_assert_eq!(again.rows[0].end - again.rows[0].start, row.end - row.start);
            }
        }

        #[test]
        fn prop_adjacent_rows_resplit(raw in prop::collection::vec(segment_strategy(), 0..24)) {
            let segments = parse_all(&raw);
            let layout = segment(&segments);

            for pair in layout.rows.windows(2) {
                let (first, second) = (pair[0], pair[1]);
                let again = segment(&segments[first.start..second.end]);

                let shift = |row: ArtRow| ArtRow {
                    start: row.start - first.start,
                    end: row.end - first.start,
                    visual_length: row.visual_length,
                };
                prop_assert_eq!(again.rows, vec![shift(first), shift(second)]);
            }
        }
    }
}
