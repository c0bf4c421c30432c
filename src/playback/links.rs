//! Repeat/jump links and the iteration-ordered table that holds them.

use log::debug;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::EditError;

/// A pass-conditional jump from one beat to another.
///
/// When playback reaches `location` during pass `iteration` (0 = the first time), it
/// resumes from `target` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    location: i32,
    target: i32,
    iteration: i32,
}

impl Link {
    /// # Errors
    /// `InvalidArgument` if any field is negative.
    pub fn new(location: i32, target: i32, iteration: i32) -> Result<Self, EditError> {
        if location < 0 {
            return Err(EditError::invalid(format!(
                "link location beat must not be negative, got {}",
                location
            )));
        }
        if target < 0 {
            return Err(EditError::invalid(format!(
                "link target beat must not be negative, got {}",
                target
            )));
        }
        check_iteration(iteration)?;
        Ok(Self {
            location,
            target,
            iteration,
        })
    }

    /// Beat where playback checks for this jump.
    pub fn location(&self) -> i32 {
        self.location
    }

    /// Beat where playback resumes when the jump fires.
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Pass during which the jump fires.
    pub fn iteration(&self) -> i32 {
        self.iteration
    }

    pub fn set_iteration(&mut self, iteration: i32) -> Result<&mut Self, EditError> {
        check_iteration(iteration)?;
        self.iteration = iteration;
        Ok(self)
    }

    pub(crate) fn describe(&self) -> String {
        format!(
            "link at beat {} -> {} (iteration {})",
            self.location, self.target, self.iteration
        )
    }
}

fn check_iteration(iteration: i32) -> Result<(), EditError> {
    if iteration < 0 {
        return Err(EditError::invalid(format!(
            "link iteration must not be negative, got {}",
            iteration
        )));
    }
    Ok(())
}

/// All links of a piece, kept sorted by ascending iteration.
///
/// Links sharing an iteration keep their insertion order. A per-beat index makes
/// [`LinkTable::links_at`] a map lookup rather than a scan.
#[derive(Debug, Clone, Default)]
pub struct LinkTable {
    links: Vec<Link>,
    by_location: HashMap<i32, Vec<usize>>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link, pushing every existing link at the same or a later iteration one
    /// pass later so that no existing repeat is skipped or fired twice.
    pub fn add(&mut self, link: Link) {
        for existing in self
            .links
            .iter_mut()
            .filter(|existing| existing.iteration >= link.iteration)
        {
            existing.iteration += 1;
        }
        debug!("adding {}", link.describe());
        self.links.push(link);
        self.links.sort_by_key(|link| link.iteration);
        self.reindex();
    }

    /// Remove the first link equal to `link`. Remaining iterations are not renumbered.
    ///
    /// # Errors
    /// `NotFound` if no equal link is stored.
    pub fn remove(&mut self, link: &Link) -> Result<Link, EditError> {
        let pos = self
            .links
            .iter()
            .position(|existing| existing == link)
            .ok_or_else(|| EditError::NotFound(link.describe()))?;
        let removed = self.links.remove(pos);
        self.reindex();
        debug!("removed {}", removed.describe());
        Ok(removed)
    }

    /// Links located at `beat`, in table order.
    pub fn links_at(&self, beat: i32) -> impl Iterator<Item = &Link> + '_ {
        self.by_location
            .get(&beat)
            .into_iter()
            .flatten()
            .map(move |&index| &self.links[index])
    }

    /// Every link in table order.
    pub fn all(&self) -> &[Link] {
        &self.links
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn reindex(&mut self) {
        self.by_location.clear();
        for (index, link) in self.links.iter().enumerate() {
            self.by_location.entry(link.location).or_default().push(index);
        }
    }
}
