use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

pub const EXPORT_NAME: &str = "EXPORTED_ASCII_ART";

/// Write Rust source declaring the lines of `path` as a `&[&str]` constant.
///
/// Lines are copied as-is, so `#` color and `$` continuation markers in the
/// file keep their meaning once pasted into the art catalogue.
pub fn export_ascii<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ArtFile {
        path: path.to_path_buf(),
        source,
    })?;

    writeln!(out, "// Generated by cfetch --ExportAscii {}", path.display())?;
    writeln!(out, "pub const {}: &[&str] = &[", EXPORT_NAME)?;
    for line in content.lines() {
        writeln!(out, "    {:?},", line)?;
    }
    writeln!(out, "];")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_escapes_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "#FF0000\n /\\\n\"q\"\n$tail\n").unwrap();

        let mut buf = Vec::new();
        export_ascii(&mut buf, file.path()).unwrap();
        let out = String::from_utf8(buf).unwrap();

        let body: Vec<&str> = out.lines().skip(1).collect();
        assert_eq!(
            body,
            vec![
                "pub const EXPORTED_ASCII_ART: &[&str] = &[",
                r##"    "#FF0000","##,
                r#"    " /\\","#,
                r#"    "\"q\"","#,
                r#"    "$tail","#,
                "];",
            ]
        );
        assert!(out.starts_with("// Generated by cfetch --ExportAscii "));
    }

    #[test]
    fn test_export_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut buf = Vec::new();
        export_ascii(&mut buf, file.path()).unwrap();
        assert!(String::from_utf8(buf).unwrap().ends_with("&[\n];\n"));
    }

    #[test]
    fn test_export_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut buf = Vec::new();
        let err = export_ascii(&mut buf, &dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::ArtFile { .. }));
        assert!(buf.is_empty());
    }
}
