//! JSON loaders for the three input snapshots.
//!
//! Manifest and collected documents may be wrapped (`{"routes": {...}}`) or
//! bare route maps.

use crate::error::LoadError;
use crate::node::Node;
use crate::snapshot::{CollectedData, Manifest, SourceUsageInfo};
use crate::type_name::TypeName;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestDocument {
    Wrapped { routes: BTreeMap<String, Vec<TypeName>> },
    Bare(BTreeMap<String, Vec<TypeName>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CollectedDocument {
    Wrapped { routes: BTreeMap<String, Vec<Node>> },
    Bare(BTreeMap<String, Vec<Node>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceUsageDocument {
    Wrapped { routes: Vec<SourceUsageInfo> },
    Bare(Vec<SourceUsageInfo>),
}

pub fn parse_manifest(text: &str) -> Result<Manifest, LoadError> {
    let routes = match parse_str::<ManifestDocument>(text, "manifest")? {
        ManifestDocument::Wrapped { routes } | ManifestDocument::Bare(routes) => routes,
    };
    Ok(Manifest { routes })
}

pub fn parse_collected(text: &str) -> Result<CollectedData, LoadError> {
    let routes = match parse_str::<CollectedDocument>(text, "collected data")? {
        CollectedDocument::Wrapped { routes } | CollectedDocument::Bare(routes) => routes,
    };
    Ok(CollectedData { routes })
}

pub fn parse_source_usage(text: &str) -> Result<Vec<SourceUsageInfo>, LoadError> {
    Ok(
        match parse_str::<SourceUsageDocument>(text, "source usage")? {
            SourceUsageDocument::Wrapped { routes } | SourceUsageDocument::Bare(routes) => routes,
        },
    )
}

pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, LoadError> {
    let path = path.as_ref();
    parse_manifest(&read(path)?).map_err(|e| e.at(path))
}

pub fn load_collected(path: impl AsRef<Path>) -> Result<CollectedData, LoadError> {
    let path = path.as_ref();
    parse_collected(&read(path)?).map_err(|e| e.at(path))
}

pub fn load_source_usage(path: impl AsRef<Path>) -> Result<Vec<SourceUsageInfo>, LoadError> {
    let path = path.as_ref();
    parse_source_usage(&read(path)?).map_err(|e| e.at(path))
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_str<T: DeserializeOwned>(text: &str, what: &'static str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::ParseStr { what, source })
}

impl LoadError {
    fn at(self, path: &Path) -> Self {
        match self {
            LoadError::ParseStr { what, source } => LoadError::Parse {
                what,
                path: path.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}
