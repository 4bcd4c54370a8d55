//! Byte-for-byte streaming copy through a fixed-size buffer.
//!
//! The output file is created or truncated. On a read or write failure the
//! partial output is left where it is.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use tracing::trace;

/// Copies `input` to `output` using a buffer of `buffer_size` bytes.
///
/// Both handles are owned by this call and closed on every return path.
/// Returns the number of bytes copied.
///
/// # Errors
///
/// - [`Error::Open`] if either file cannot be opened
/// - [`Error::Read`] if reading the input fails
/// - [`Error::Write`] if a buffer cannot be written out completely
pub fn copy_file(input: &Path, output: &Path, buffer_size: usize) -> Result<u64> {
    let mut reader = File::open(input).map_err(|e| Error::open(input, e))?;
    let mut writer = File::create(output).map_err(|e| Error::open(output, e))?;

    let copied = copy_stream(&mut reader, &mut writer, buffer_size, input, output)?;
    writer.flush().map_err(|e| Error::write(output, e))?;

    trace!(
        "Copied {} bytes: {} -> {}",
        copied,
        input.display(),
        output.display()
    );
    Ok(copied)
}

/// Pumps bytes from `reader` to `writer` until end of input.
///
/// `input` and `output` only label errors.
pub(crate) fn copy_stream<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer_size: usize,
    input: &Path,
    output: &Path,
) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut total: u64 = 0;

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::read(input, e)),
        };

        // write_all reports a short write as WriteZero
        writer
            .write_all(&buffer[..read])
            .map_err(|e| Error::write(output, e))?;

        total += read as u64;
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::io::{self, Cursor};

    /// Accepts `limit` bytes, then refuses further writes.
    struct ShortWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let room = self.limit - self.written.len();
            let n = buf.len().min(room);
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Yields `Interrupted` once before delegating.
    struct FlakyReader<R> {
        inner: R,
        interrupted: bool,
    }

    impl<R: Read> Read for FlakyReader<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::new(ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device gone"))
        }
    }

    fn labels() -> (&'static Path, &'static Path) {
        (Path::new("in.cpp"), Path::new("out.cpp.txt"))
    }

    #[test]
    fn test_copy_file_is_byte_identical() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("big.cpp");
        // Spans several buffers and ends mid-buffer.
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        input.write_binary(&content).unwrap();
        let output = temp.child("big.cpp.txt");

        let copied = copy_file(input.path(), output.path(), 4096).unwrap();

        assert_eq!(copied, content.len() as u64);
        assert_eq!(std::fs::read(output.path()).unwrap(), content);
    }

    #[test]
    fn test_copy_empty_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("empty.h");
        input.touch().unwrap();
        let output = temp.child("empty.h.txt");

        assert_eq!(copy_file(input.path(), output.path(), 4096).unwrap(), 0);
        output.assert("");
    }

    #[test]
    fn test_copy_overwrites_existing_output() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("a.c");
        input.write_str("int a;").unwrap();
        let output = temp.child("a.c.txt");
        output.write_str("stale content that is longer").unwrap();

        copy_file(input.path(), output.path(), 4096).unwrap();
        output.assert("int a;");
    }

    #[test]
    fn test_missing_input_is_open_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("missing.cpp");
        let output = temp.child("missing.cpp.txt");

        let err = copy_file(input.path(), output.path(), 4096).unwrap_err();

        assert!(err.is_open());
        assert_eq!(err.path(), Some(input.path()));
        output.assert(predicates::path::missing());
    }

    #[test]
    fn test_unopenable_output_is_open_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("a.cpp");
        input.write_str("int main() {}").unwrap();
        // A directory in the way of the output file.
        let output = temp.child("a.cpp.txt");
        output.create_dir_all().unwrap();

        let err = copy_file(input.path(), output.path(), 4096).unwrap_err();

        assert!(err.is_open());
        assert_eq!(err.path(), Some(output.path()));
    }

    #[test]
    fn test_short_write_is_write_error_and_keeps_partial_output() {
        let (input, output) = labels();
        let mut reader = Cursor::new(vec![7u8; 100]);
        let mut writer = ShortWriter {
            written: Vec::new(),
            limit: 40,
        };

        let err = copy_stream(&mut reader, &mut writer, 16, input, output).unwrap_err();

        assert!(err.is_write());
        assert_eq!(err.path(), Some(output));
        assert_eq!(writer.written.len(), 40);
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let (input, output) = labels();
        let mut reader = FlakyReader {
            inner: Cursor::new(b"retry me".to_vec()),
            interrupted: false,
        };
        let mut writer = Vec::new();

        let copied = copy_stream(&mut reader, &mut writer, 4, input, output).unwrap();

        assert_eq!(copied, 8);
        assert_eq!(writer, b"retry me");
    }

    #[test]
    fn test_read_failure_is_read_error() {
        let (input, output) = labels();
        let mut writer = Vec::new();

        let err = copy_stream(&mut FailingReader, &mut writer, 4096, input, output).unwrap_err();

        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.path(), Some(input));
    }
}
