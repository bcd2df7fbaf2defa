//! File and stdin helpers shared by commands.
//!
//! Round histories are JSONL files, optionally Zstandard-compressed
//! (`.jsonl.zst`); [`read_text_auto`] picks the decoder from the extension.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Reads one line from `stdin`, trimmed. `None` on EOF or read error.
///
/// # Example
///
/// ```rust
/// use std::io::Cursor;
/// # use neonmines_cli::io_utils::read_stdin_line;
///
/// let mut input = Cursor::new(&b"  reveal 3 \n"[..]);
/// assert_eq!(read_stdin_line(&mut input), Some("reveal 3".to_string()));
/// assert_eq!(read_stdin_line(&mut input), None);
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Reads a text file, decompressing it first when the name ends in `.zst`.
/// A leading UTF-8 BOM is stripped.
pub fn read_text_auto(path: &Path) -> io::Result<String> {
    let is_zst = path.extension().is_some_and(|ext| ext == "zst");
    let mut content = if is_zst {
        let comp = std::fs::File::open(path)?;
        let dec = zstd::stream::decode_all(comp)?;
        String::from_utf8(dec).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
    } else {
        std::fs::read_to_string(path)?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// True for file names the history readers accept.
pub fn is_history_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|name| name.ends_with(".jsonl") || name.ends_with(".jsonl.zst"))
}

/// History files under `dir`, recursively, in sorted order.
/// Unreadable subdirectories are skipped.
pub fn collect_history_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(d) = stack.pop() {
        let Ok(rd) = std::fs::read_dir(&d) else {
            continue;
        };
        for entry in rd.filter_map(Result::ok) {
            let p = entry.path();
            if p.is_dir() {
                stack.push(p);
            } else if is_history_file(&p) {
                files.push(p);
            }
        }
    }
    files.sort();
    files
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
