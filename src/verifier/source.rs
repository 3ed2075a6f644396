use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

/// Something that can be read from the start once per verification pass.
pub trait LineSource {
    type Reader: BufRead;

    /// Opens a fresh reader positioned at the first line.
    fn open(&self) -> io::Result<Self::Reader>;

    /// Name used in error positions.
    fn name(&self) -> String;
}

/// A source file on disk. Each pass opens its own handle, closed when the pass ends.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(BufReader::new(File::open(&self.path)?))
    }

    fn name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// In-memory source text.
#[derive(Debug, Clone, Copy)]
pub struct StrSource<'a> {
    text: &'a str,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrSource { text }
    }
}

impl<'a> LineSource for StrSource<'a> {
    type Reader = &'a [u8];

    fn open(&self) -> io::Result<Self::Reader> {
        Ok(self.text.as_bytes())
    }

    fn name(&self) -> String {
        String::from("<source>")
    }
}

/// A trimmed line that survived filtering, with its 1-based physical line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Iterates the meaningful lines of a reader.
///
/// Empty lines, whitespace-only lines and lines whose raw text starts with the comment
/// marker are skipped; every other line is trimmed.
pub struct SourceLines<R: BufRead> {
    reader: R,
    comment_marker: String,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> SourceLines<R> {
    pub fn new(reader: R, comment_marker: &str) -> Self {
        SourceLines {
            reader,
            comment_marker: comment_marker.to_string(),
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Physical number of the last line read, skipped or not.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn is_ignored(&self, raw: &str) -> bool {
        raw.trim().is_empty() || raw.starts_with(&self.comment_marker)
    }
}

impl<R: BufRead> Iterator for SourceLines<R> {
    type Item = io::Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let raw = self.buffer.trim_end_matches(['\n', '\r']);
                    if self.is_ignored(raw) {
                        continue;
                    }
                    return Some(Ok(SourceLine {
                        number: self.line_number,
                        text: raw.trim().to_string(),
                    }));
                }
                Err(error) => return Some(Err(error)),
            }
        }
    }
}
