use std::{io::Read, path::PathBuf, str::FromStr};

use tracing::info;

use crate::{Config, Error, Table};

/// A delimited text file on disk, optionally gzip compressed.
#[derive(Clone, Debug, PartialEq)]
pub struct File {
    path: PathBuf,
    file_type: FileType,
    gz: bool,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, file_type: FileType, gz: bool) -> Self {
        Self {
            path: path.into(),
            file_type,
            gz,
        }
    }

    #[inline(always)]
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    #[inline(always)]
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    #[inline(always)]
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub fn gz(&self) -> bool {
        self.gz
    }

    pub fn read(&self, config: Config) -> Result<Table, Error> {
        info!("Reading {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        if self.gz {
            let decoder = flate2::read::GzDecoder::new(file);
            self.read_from_reader(decoder, config)
        } else {
            self.read_from_reader(file, config)
        }
    }

    pub fn read_from_reader(&self, reader: impl Read, config: Config) -> Result<Table, Error> {
        Table::from_reader(reader, self.file_type.separator(), config)
    }

    /// Infer the file type from the extension; a trailing `.gz` enables decompression.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let name = path
            .file_name()
            .ok_or(Error::NoFileName)?
            .to_string_lossy()
            .to_string();
        let extension = name
            .split('.')
            .filter(|x| !x.is_empty())
            .collect::<Vec<&str>>();
        if extension.len() < 2 {
            return Err(Error::NoFileExtension);
        }
        let gz = extension[extension.len() - 1].eq_ignore_ascii_case("gz");
        if gz && extension.len() < 3 {
            return Err(Error::NoFileExtension);
        }
        let extension = extension[extension.len() - if gz { 2 } else { 1 }];
        let file_type = FileType::from_str(extension)?;
        Ok(Self {
            path,
            file_type,
            gz,
        })
    }
}

impl FromStr for File {
    type Err = Error;

    #[cfg_attr(coverage_nightly, coverage(off))]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Comma-separated values, row major.
    /// Expects the first row to be the column names.
    Csv,
    /// Tab-separated values, row major.
    /// Expects the first row to be the column names.
    Tsv,
    /// Whitespace-separated values, row major.
    /// Expects the first row to be the column names.
    Txt,
}

impl FileType {
    pub fn separator(&self) -> u8 {
        match self {
            FileType::Csv => b',',
            FileType::Tsv => b'\t',
            FileType::Txt => b' ',
        }
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "csv" => Self::Csv,
            "tsv" => Self::Tsv,
            "txt" => Self::Txt,
            _ => return Err(Error::UnsupportedFileType(s.to_string())),
        })
    }
}
