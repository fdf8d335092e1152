use crate::config::WordSource;
use crate::error::{DrillError, Result};
use include_dir::{include_dir, Dir};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// The fixed practice vocabulary.
///
/// Order is the order of the source and duplicates are kept: every occurrence
/// is its own sampling slot.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    words: Vec<String>,
    members: HashSet<String>,
}

impl Corpus {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let members = words.iter().cloned().collect();
        Self { words, members }
    }

    /// Read a whitespace separated word file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let resource_error = |source| DrillError::Resource {
            path: path.to_path_buf(),
            source,
        };

        let mut contents = String::new();
        {
            let mut file = File::open(path).map_err(resource_error)?;
            file.read_to_string(&mut contents).map_err(resource_error)?;
        }

        Ok(Self::parse(&contents))
    }

    /// Load one of the word lists compiled into the binary.
    pub fn bundled(name: &str) -> Result<Self> {
        let unknown = || DrillError::UnknownWordList {
            name: name.to_string(),
            available: Self::bundled_names().join(", "),
        };
        let contents = WORDS_DIR
            .get_file(format!("{name}.txt"))
            .and_then(|file| file.contents_utf8())
            .ok_or_else(unknown)?;
        Ok(Self::parse(contents))
    }

    pub fn from_source(source: &WordSource) -> Result<Self> {
        match source {
            WordSource::Bundled(name) => Self::bundled(name),
            WordSource::File(path) => Self::load(path),
        }
    }

    /// Names of the bundled word lists
    pub fn bundled_names() -> Vec<String> {
        let mut names: Vec<String> = WORDS_DIR
            .files()
            .filter_map(|f| f.path().file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn parse(contents: &str) -> Self {
        Self::from_words(contents.split_whitespace())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.members.contains(word)
    }
}
