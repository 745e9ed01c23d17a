//! Traits for reading and writing the flat text files a project is made of.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufRead, BufWriter, Cursor, Read, Write},
    path::Path,
};

use crate::error::Error;

/// A trait for parsing and writing one file.
///
/// # Example
///
/// ```rust,no_run
/// use polyglot::traits::Parser;
/// let format = polyglot::formats::PropertiesFormat::read_from("strings.en.properties")?;
/// format.write_to("strings.en.copy.properties")?;
/// Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Parser {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Parse from file path.
    ///
    /// A UTF-8 or UTF-16 byte order mark is honoured; files without one are
    /// read as UTF-8.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Write to file path, replacing any previous content atomically.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_atomic(path.as_ref(), |writer| self.to_writer(writer))
    }

    /// Parse from a string.
    fn from_str(s: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(s))
    }

    /// Parse from bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(bytes))
    }
}

/// Writes a file through a sibling `<name>.tmp` file that is renamed over
/// `path` once fully flushed.
///
/// Parent directories are created. On failure the temporary file is removed
/// and `path` keeps its previous content.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), Error>,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().map(OsString::from).ok_or_else(|| {
        Error::DataMismatch(format!("not a file path: {}", path.display()))
    })?;
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = File::create(&tmp_path)
        .map_err(Error::Io)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            let file = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
            file.sync_all()?;
            Ok(())
        })
        .and_then(|()| fs::rename(&tmp_path, path).map_err(Error::Io));

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}
