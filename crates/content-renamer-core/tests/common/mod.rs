#![allow(dead_code)]

use content_renamer_core::collaborators::{
    CollaboratorError, Collaborators, ImageDescriber, TextDescriber, TextExtractor,
    WhitespaceTokenEstimator,
};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Create a file with the given content, creating parent directories
pub fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();

    let file_path = dir.join(name);
    let mut file = File::create(&file_path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file_path
}

/// Sorted file names directly inside `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Captions keyed by image file name; unknown files fail
#[derive(Default)]
pub struct StubImages {
    captions: HashMap<String, String>,
}

impl StubImages {
    pub fn with(mut self, file: &str, caption: &str) -> Self {
        self.captions.insert(file.to_string(), caption.to_string());
        self
    }
}

impl ImageDescriber for StubImages {
    fn describe_image(&self, path: &Path) -> Result<String, CollaboratorError> {
        self.captions
            .get(&file_name(path))
            .cloned()
            .ok_or_else(|| CollaboratorError::Other(format!("no caption for {}", path.display())))
    }
}

/// Reads the real file content, except for files listed as broken
#[derive(Default)]
pub struct StubExtractor {
    broken: Vec<String>,
}

impl StubExtractor {
    pub fn broken(mut self, file: &str) -> Self {
        self.broken.push(file.to_string());
        self
    }
}

impl TextExtractor for StubExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, CollaboratorError> {
        if self.broken.contains(&file_name(path)) {
            return Err(CollaboratorError::Parse(format!("{} is corrupt", path.display())));
        }
        Ok(fs::read_to_string(path)?)
    }
}

/// Descriptions keyed by the text they describe, with an optional default
#[derive(Default)]
pub struct StubDescriptions {
    answers: HashMap<String, String>,
    default: Option<String>,
}

impl StubDescriptions {
    pub fn with(mut self, text: &str, description: &str) -> Self {
        self.answers.insert(text.to_string(), description.to_string());
        self
    }

    pub fn otherwise(mut self, description: &str) -> Self {
        self.default = Some(description.to_string());
        self
    }
}

impl TextDescriber for StubDescriptions {
    fn describe_text(&self, text: &str) -> Result<String, CollaboratorError> {
        self.answers
            .get(text)
            .or(self.default.as_ref())
            .cloned()
            .ok_or(CollaboratorError::EmptyResponse)
    }
}

/// Assemble stub collaborators with a whitespace token estimator
pub fn stub_collaborators(
    images: StubImages,
    extractor: StubExtractor,
    descriptions: StubDescriptions,
) -> Collaborators {
    Collaborators::new(images, extractor, descriptions, WhitespaceTokenEstimator)
}
