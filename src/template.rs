use std::io::{self, Write};

use crate::color::write_color;
use crate::config::{Configuration, LineConfig};
use crate::info::InfoProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split a format string into literal text and placeholder names.
///
/// A `%` without a closing `%` turns the rest of the string into literal text,
/// and `%%` is kept as the literal `%%`.
pub fn tokenize(format: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = format;

    while !rest.is_empty() {
        let Some(open) = rest.find('%') else {
            tokens.push(Token::Literal(rest));
            break;
        };
        if open > 0 {
            tokens.push(Token::Literal(&rest[..open]));
        }

        let after = &rest[open + 1..];
        let Some(close) = after.find('%') else {
            tokens.push(Token::Literal(&rest[open..]));
            break;
        };
        if close == 0 {
            tokens.push(Token::Literal(&rest[open..open + 2]));
        } else {
            tokens.push(Token::Placeholder(&after[..close]));
        }
        rest = &after[close + 1..];
    }

    tokens
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Span<'a> {
    Label(&'a str),
    Data(String),
}

impl Span<'_> {
    fn text(&self) -> &str {
        match self {
            Span::Label(text) => *text,
            Span::Data(text) => text.as_str(),
        }
    }
}

/// Renders info lines against an [`InfoProvider`].
pub struct LineRenderer<'a, P: ?Sized> {
    provider: &'a P,
    default_label_color: &'a str,
    default_data_color: &'a str,
}

impl<'a, P: InfoProvider + ?Sized> LineRenderer<'a, P> {
    pub fn new(config: &'a Configuration, provider: &'a P) -> Self {
        Self {
            provider,
            default_label_color: &config.default_label_color,
            default_data_color: &config.default_data_color,
        }
    }

    /// Forced values win over the provider.
    pub fn resolve(&self, line: &LineConfig, name: &str) -> String {
        match line.forced_value(name) {
            Some(value) => value.to_string(),
            None => self.provider.resolve(name),
        }
    }

    fn spans<'l>(&self, line: &'l LineConfig) -> Vec<Span<'l>> {
        if !line.is_renderable() {
            return Vec::new();
        }
        let format = line.format.as_deref().unwrap_or_default();

        tokenize(format)
            .into_iter()
            .map(|token| match token {
                Token::Literal(text) => Span::Label(text),
                Token::Placeholder(name) => Span::Data(self.resolve(line, name)),
            })
            .collect()
    }

    /// The line's text without any escapes.
    pub fn plain(&self, line: &LineConfig) -> String {
        self.spans(line).iter().map(Span::text).collect()
    }

    /// Write the line in its colors, then switch to `restore`.
    ///
    /// A line with its own `color` is drawn in that color throughout; otherwise
    /// literal text uses the label color and resolved values the data color.
    /// Lines with nothing to render write nothing, not even the restore.
    pub fn colored<W: Write>(
        &self,
        out: &mut W,
        line: &LineConfig,
        restore: &str,
    ) -> io::Result<()> {
        if !line.is_renderable() {
            return Ok(());
        }
        let spans = self.spans(line);

        if let Some(color) = line.color.as_deref() {
            write_color(out, color)?;
            for span in &spans {
                out.write_all(span.text().as_bytes())?;
            }
        } else {
            let label_color = line.label_color.as_deref().unwrap_or(self.default_label_color);
            let data_color = line.data_color.as_deref().unwrap_or(self.default_data_color);

            for span in &spans {
                let color = match span {
                    Span::Label(_) => label_color,
                    Span::Data(_) => data_color,
                };
                write_color(out, color)?;
                out.write_all(span.text().as_bytes())?;
            }
        }

        write_color(out, restore)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::StaticInfo;
    use proptest::prelude::*;

    fn strip_escapes(s: &str) -> String {
        let re = regex::Regex::new("\x1b\\[[0-9;]*m").unwrap();
        re.replace_all(s, "").into_owned()
    }

    fn colored(cfg: &Configuration, info: &StaticInfo, line: &LineConfig, restore: &str) -> String {
        let renderer = LineRenderer::new(cfg, info);
        let mut buf = Vec::new();
        renderer.colored(&mut buf, line, restore).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("OS: %os% (%kernel%)"),
            vec![
                Token::Literal("OS: "),
                Token::Placeholder("os"),
                Token::Literal(" ("),
                Token::Placeholder("kernel"),
                Token::Literal(")"),
            ]
        );
    }

    #[test]
    fn test_tokenize_unmatched_percent() {
        assert_eq!(
            tokenize("100% sure"),
            vec![Token::Literal("100"), Token::Literal("% sure")]
        );
        assert_eq!(tokenize("%"), vec![Token::Literal("%")]);
    }

    #[test]
    fn test_tokenize_empty_name_is_literal() {
        assert_eq!(
            tokenize("a%%b"),
            vec![Token::Literal("a"), Token::Literal("%%"), Token::Literal("b")]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_forced_value_skips_provider() {
        let cfg = Configuration::default();
        let info = StaticInfo::new().with("os", "Windows");
        let mut line = LineConfig::new("%os%");
        line.force("OS", "Linux");

        let renderer = LineRenderer::new(&cfg, &info);
        assert_eq!(renderer.plain(&line), "Linux");
        assert!(info.lookups().is_empty());
    }

    #[test]
    fn test_plain_resolves_through_provider() {
        let cfg = Configuration::default();
        let info = StaticInfo::new().with("cpu", "Ryzen 7");
        let line = LineConfig::new("CPU: %CPU% %missing%!");

        let renderer = LineRenderer::new(&cfg, &info);
        assert_eq!(renderer.plain(&line), "CPU: Ryzen 7 !");
        assert_eq!(info.lookups(), vec!["cpu", "missing"]);
    }

    #[test]
    fn test_colored_label_and_data() {
        let cfg = Configuration::default();
        let info = StaticInfo::new().with("os", "Arch");
        let line = LineConfig::new("OS: %os%");

        let out = colored(&cfg, &info, &line, "#000000");
        assert_eq!(
            out,
            "\x1b[0m\x1b[38;2;204;204;204mOS: \
             \x1b[0m\x1b[38;2;0;255;255mArch\
             \x1b[0m\x1b[38;2;0;0;0m"
        );
    }

    #[test]
    fn test_colored_line_color_overrides() {
        let cfg = Configuration::default();
        let info = StaticInfo::new().with("os", "Arch");
        let mut line = LineConfig::new("OS: %os%");
        line.color = Some("#FF0000".to_string());
        line.label_color = Some("#00ff00".to_string());

        let out = colored(&cfg, &info, &line, "#0000ff");
        assert_eq!(
            out,
            "\x1b[0m\x1b[38;2;255;0;0m\x1b[1mOS: Arch\x1b[0m\x1b[38;2;0;0;255m"
        );
    }

    #[test]
    fn test_colored_line_specific_colors() {
        let cfg = Configuration::default();
        let info = StaticInfo::new();
        let mut line = LineConfig::new("x%a%");
        line.label_color = Some("#010203".to_string());
        line.data_color = Some("#040506".to_string());
        line.force("a", "y");

        let out = colored(&cfg, &info, &line, "#000000");
        assert!(out.starts_with("\x1b[0m\x1b[38;2;1;2;3mx\x1b[0m\x1b[38;2;4;5;6my"));
    }

    #[test]
    fn test_absent_line_writes_nothing() {
        let cfg = Configuration::default();
        let info = StaticInfo::new();
        let mut line = LineConfig::new("OS: %os%");
        line.present = false;

        assert_eq!(colored(&cfg, &info, &line, "#000000"), "");
        assert_eq!(LineRenderer::new(&cfg, &info).plain(&line), "");

        let empty = LineConfig::new("");
        assert_eq!(colored(&cfg, &info, &empty, "#000000"), "");
    }

    #[test]
    fn test_invalid_colors_degrade_to_text() {
        let mut cfg = Configuration::default();
        cfg.default_label_color = "bogus".to_string();
        cfg.default_data_color = String::new();
        let info = StaticInfo::new().with("os", "Arch");
        let line = LineConfig::new("OS: %os%");

        assert_eq!(colored(&cfg, &info, &line, "nope"), "OS: Arch");
    }

    proptest! {
        #[test]
        fn prop_plain_is_colored_without_escapes(
            format in "[a-z %:]{0,24}",
            value in "[A-Za-z0-9 ]{0,12}",
            use_line_color in any::<bool>(),
        ) {
            let cfg = Configuration::default();
            let info = StaticInfo::new().with("a", &value).with("b", "bee");
            let mut line = LineConfig::new(&format);
            if use_line_color {
                line.color = Some("#7EB4DA".to_string());
            }

            let renderer = LineRenderer::new(&cfg, &info);
            let plain = renderer.plain(&line);
            let colored = colored(&cfg, &info, &line, "#123456");

            prop_assert!(!plain.contains('\x1b'));
            prop_assert_eq!(plain, strip_escapes(&colored));
        }
    }
}
