use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Used when no configuration file exists.
pub const DEFAULT_CONFIG: &str = include_str!("../assets/default.conf");

/// Highest `line[N]` index accepted, exclusive.
pub const MAX_LINES: usize = 256;

/// Largest `info_padding` magnitude accepted.
pub const MAX_INFO_PADDING: i32 = 1024;

/// Box border color when neither `frame_color` nor `default_label_color` is set.
pub const FALLBACK_FRAME_COLOR: &str = "#cccccc";

static LINE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^line\[(\d+)\]").expect("valid line header regex"));

static FORCE_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^force\s*(?:%([^%]*)%|([^\s=%]+))\s*=\s*(.*)$").expect("valid force regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    #[default]
    None,
    Underline,
    AllBox,
    DoubleBox,
}

impl FrameKind {
    /// Case-insensitive; anything unrecognised means no frame.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "underline" => FrameKind::Underline,
            "allbox" => FrameKind::AllBox,
            "doublebox" => FrameKind::DoubleBox,
            "none" => FrameKind::None,
            other => {
                log::warn!("unknown frame_type {:?}, using none", other);
                FrameKind::None
            }
        }
    }
}

/// Which half of a double box a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrangeBox {
    #[default]
    None,
    Soft,
    Hard,
}

impl From<i64> for ArrangeBox {
    fn from(value: i64) -> Self {
        match value {
            1 => ArrangeBox::Soft,
            2 => ArrangeBox::Hard,
            _ => ArrangeBox::None,
        }
    }
}

/// One `line[N]` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineConfig {
    pub present: bool,
    pub format: Option<String>,
    /// Overrides both label and data color.
    pub color: Option<String>,
    pub label_color: Option<String>,
    pub data_color: Option<String>,
    /// Lower-cased placeholder name to value, in insertion order.
    pub forced: Vec<(String, String)>,
    pub arrange_box: ArrangeBox,
}

impl LineConfig {
    pub fn new(format: &str) -> Self {
        Self {
            present: true,
            format: Some(format.to_string()),
            ..Self::default()
        }
    }

    /// Whether this line takes part in rendering and width calculations.
    pub fn is_renderable(&self) -> bool {
        self.present && self.format.as_deref().is_some_and(|f| !f.is_empty())
    }

    /// Set a forced value. Keys are case-insensitive; the last write wins.
    pub fn force(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        match self.forced.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.forced.push((key, value.to_string())),
        }
    }

    pub fn forced_value(&self, name: &str) -> Option<&str> {
        let key = name.to_ascii_lowercase();
        self.forced
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub ascii_art: String,
    pub default_label_color: String,
    pub default_data_color: String,
    pub info_padding: i32,
    pub frame_kind: FrameKind,
    pub frame_color: String,
    pub frame_title_soft: String,
    pub frame_title_hard: String,
    pub lines: Vec<LineConfig>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            ascii_art: "auto".to_string(),
            default_label_color: "#cccccc".to_string(),
            default_data_color: "#00ffff".to_string(),
            info_padding: 4,
            frame_kind: FrameKind::None,
            frame_color: "#cccccc".to_string(),
            frame_title_soft: "Softwares".to_string(),
            frame_title_hard: "Hardwares".to_string(),
            lines: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Global,
    Info,
    Line(usize),
}

impl Configuration {
    /// Parse the block format on top of the defaults.
    ///
    /// ```text
    /// global {
    ///     ascii_art = auto
    ///     frame_type = doublebox
    /// }
    /// info {
    ///     line[0] {
    ///         format = "%username%@%hostname%"
    ///         force %hostname% = "workstation"   # overrides the live value
    ///     }
    /// }
    /// ```
    ///
    /// The format is forgiving: unknown keys and malformed lines are skipped
    /// with a warning rather than rejected.
    pub fn parse(input: &str) -> Self {
        let mut cfg = Configuration::default();
        let mut section = Section::None;

        for (number, raw) in input.lines().enumerate() {
            let number = number + 1;
            let line = strip_inline_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            if line == "global {" {
                section = Section::Global;
                continue;
            }
            if line == "info {" {
                section = Section::Info;
                continue;
            }
            // line[N] headers only count inside `info { }`
            if line.starts_with("line[") && section == Section::Info {
                match LINE_HEADER.captures(line).and_then(|c| c[1].parse::<usize>().ok()) {
                    Some(index) if index < MAX_LINES && line.contains('{') => {
                        cfg.ensure_line(index).present = true;
                        section = Section::Line(index);
                    }
                    _ => log::warn!("config line {}: malformed line header {:?}", number, line),
                }
                continue;
            }
            // Closing a line block returns to `info`, anything else to the top level
            if line == "}" {
                section = match section {
                    Section::Line(_) => Section::Info,
                    _ => Section::None,
                };
                continue;
            }

            match section {
                Section::Global => cfg.apply_global(number, line),
                Section::Line(index) => {
                    if let Some(lc) = cfg.lines.get_mut(index) {
                        apply_line(lc, number, line);
                    }
                }
                Section::Info | Section::None => {
                    log::warn!("config line {}: ignoring {:?} outside a block", number, line)
                }
            }
        }

        cfg
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("loaded config from {}", path.display());
        Ok(Self::parse(&content))
    }

    /// Load the user's config if it exists, the built-in default otherwise.
    pub fn discover() -> Result<Self> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                log::info!("no config file found, using built-in defaults");
                Ok(Self::parse(DEFAULT_CONFIG))
            }
        }
    }

    /// Border color for the frame layouts.
    pub fn frame_color_or_default(&self) -> &str {
        if !self.frame_color.is_empty() {
            &self.frame_color
        } else if !self.default_label_color.is_empty() {
            &self.default_label_color
        } else {
            FALLBACK_FRAME_COLOR
        }
    }

    /// The line at `index`, if it exists and has something to render.
    pub fn renderable_line(&self, index: usize) -> Option<&LineConfig> {
        self.lines.get(index).filter(|lc| lc.is_renderable())
    }

    fn ensure_line(&mut self, index: usize) -> &mut LineConfig {
        if index >= self.lines.len() {
            self.lines.resize_with(index + 1, LineConfig::default);
        }
        &mut self.lines[index]
    }

    fn apply_global(&mut self, number: usize, line: &str) {
        let Some((key, value)) = split_key_value(line) else {
            log::warn!("config line {}: expected key = value, got {:?}", number, line);
            return;
        };

        match key {
            "ascii_art" => self.ascii_art = value,
            "default_label_color" => self.default_label_color = value,
            "default_data_color" => self.default_data_color = value,
            "info_padding" => match i32::try_from(parse_int(&value)) {
                Ok(padding) if (-MAX_INFO_PADDING..=MAX_INFO_PADDING).contains(&padding) => {
                    self.info_padding = padding
                }
                _ => log::warn!(
                    "config line {}: info_padding {:?} out of range, keeping {}",
                    number,
                    value,
                    self.info_padding
                ),
            },
            "frame_type" => self.frame_kind = FrameKind::from_name(&value),
            "frame_color" => self.frame_color = value,
            "frame_title_soft" => self.frame_title_soft = value,
            "frame_title_hard" => self.frame_title_hard = value,
            _ => log::warn!("config line {}: unknown global key {:?}", number, key),
        }
    }
}

fn apply_line(lc: &mut LineConfig, number: usize, line: &str) {
    // force entries repeat, so they are not plain key = value pairs
    if line.starts_with("force") {
        match parse_force(line) {
            Some((name, value)) => lc.force(&name, &value),
            None => log::warn!("config line {}: malformed force entry {:?}", number, line),
        }
        return;
    }

    let Some((key, value)) = split_key_value(line) else {
        log::warn!("config line {}: expected key = value, got {:?}", number, line);
        return;
    };

    match key {
        "format" => lc.format = Some(value),
        "color" => lc.color = Some(value),
        "label_color" => lc.label_color = Some(value),
        "data_color" => lc.data_color = Some(value),
        "arrange_box" => lc.arrange_box = ArrangeBox::from(parse_int(&value)),
        _ => log::warn!("config line {}: unknown line key {:?}", number, key),
    }
}

/// `$XDG_CONFIG_HOME/cfetch/config`, else `~/.config/cfetch/config`.
pub fn default_path() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("cfetch").join("config"));
    }
    dirs::home_dir().map(|home| home.join(".config").join("cfetch").join("config"))
}

/// Cut a `#` comment, unless it sits inside double quotes.
fn strip_inline_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..i],
            _ => {}
        }
    }
    line
}

fn split_key_value(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once('=')?;
    Some((key.trim(), unquote(value)?))
}

/// A quoted value runs to the last `"` on the line; an unterminated quote is
/// rejected.
fn unquote(value: &str) -> Option<String> {
    let value = value.trim();
    match value.strip_prefix('"') {
        Some(rest) => {
            let end = rest.rfind('"')?;
            Some(rest[..end].to_string())
        }
        None => Some(value.to_string()),
    }
}

/// Leading integer, `atoi` style: `"4px"` is 4, garbage is 0.
fn parse_int(value: &str) -> i64 {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    value[..end].parse().unwrap_or(0)
}

/// `force %name% = value` or `force name = value`.
fn parse_force(line: &str) -> Option<(String, String)> {
    let caps = FORCE_ENTRY.captures(line)?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let value = unquote(caps.get(3)?.as_str())?;
    Some((name.to_string(), value))
}
