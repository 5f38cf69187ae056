//! Table of contents: which page each section identifier lives on.
//!
//! Built once per site from the sections every page declares plus the
//! `[[sections]]` entries in config, then shared read-only by all renders.

use crate::config::SectionEntry;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TocError {
    #[error("section {id:?} is declared on both {first:?} and {second:?}")]
    DuplicateSection {
        id: String,
        first: String,
        second: String,
    },
}

/// Section id → page slug.
#[derive(Debug, Clone, Default)]
pub struct Toc {
    sections: BTreeMap<String, String>,
}

impl Toc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(page slug, section ids)` pairs followed by config entries.
    pub fn build<'a, I>(pages: I, extra: &[SectionEntry]) -> Result<Self, TocError>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let mut toc = Self::new();
        for (page, ids) in pages {
            for id in ids {
                toc.register(id, page)?;
            }
        }
        for entry in extra {
            toc.register(&entry.id, &entry.page)?;
        }
        Ok(toc)
    }

    /// Register `id` as living on `page`.
    ///
    /// Registering the same id twice is an error, even for the same page.
    pub fn register(&mut self, id: &str, page: &str) -> Result<(), TocError> {
        if let Some(first) = self.sections.get(id) {
            return Err(TocError::DuplicateSection {
                id: id.to_string(),
                first: first.clone(),
                second: page.to_string(),
            });
        }
        self.sections.insert(id.to_string(), page.to_string());
        Ok(())
    }

    /// The page a section lives on, if known.
    pub fn page_of(&self, id: &str) -> Option<&str> {
        self.sections.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.contains_key(id)
    }

    /// Sections in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(id, page)| (id.as_str(), page.as_str()))
    }

    /// Section ids declared for one page, in id order.
    pub fn sections_on<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter()
            .filter(move |(_, p)| *p == page)
            .map(|(id, _)| id)
    }

    /// Sections whose page is not among `built`, in id order.
    pub fn outside<'a>(
        &'a self,
        built: &'a [&'a str],
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter(move |(_, page)| !built.contains(page))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
