//! Shared fixtures for lyrica-nlp integration tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary corpus directory with stopwords and a few documents
pub struct CorpusFixture {
    pub dir: TempDir,
}

impl CorpusFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();

        // Stopword file mixes newlines and spaces
        fs::write(dir.path().join("stopwords.txt"), "the\non a\nand\n\nto  i\n").unwrap();

        fs::write(
            dir.path().join("ballads.txt"),
            "love and rain\nthe rain falls to the ground\nlove love",
        )
        .unwrap();

        fs::write(
            dir.path().join("artist.csv"),
            ",Title,Album,Year,Date,Lyric\n\
             0,Song One,Album,2020,2020-01-01,\"Hello, World! It's great.\"\n\
             1,Song Two,Album,2020,2020-02-01,\n\
             2,Song Three,Album,2021,2021-03-01,\"The world is GREAT, and I know it's true\"\n",
        )
        .unwrap();

        Self { dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write an extra file into the fixture directory
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, contents).unwrap();
        path
    }
}
