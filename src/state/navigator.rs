//! Folder traversal with a per-file modified flag.
//!
//! Plain `advance` throws away in-memory edits; only `save_and_advance`
//! writes them first.

use std::path::{Path, PathBuf};

use image::RgbImage;

use super::error::{StateError, StateResult};
use super::{Direction, NavigationCursor, NavigationEvent, NavigationState, StateMachine};
use crate::editor;
use crate::geometry::{ImageBounds, SelectionRect};
use crate::storage::{self, FileList, ImageStore};

#[derive(Debug)]
struct OpenImage {
    path: PathBuf,
    buffer: RgbImage,
}

#[derive(Debug)]
pub struct Navigator<S> {
    store: S,
    machine: StateMachine,
    files: Option<FileList>,
    cursor: Option<NavigationCursor>,
    current: Option<OpenImage>,
    dirty: bool,
}

impl<S: ImageStore> Navigator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            machine: StateMachine::new(),
            files: None,
            cursor: None,
            current: None,
            dirty: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> NavigationState {
        self.machine.state()
    }

    /// Number of state transitions since the navigator was created.
    pub fn transition_count(&self) -> usize {
        self.machine.history().len()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.map(|cursor| cursor.index())
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|open| open.path.as_path())
    }

    pub fn file_name(&self) -> Option<String> {
        self.current_path()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.current.as_ref().map(|open| &open.buffer)
    }

    pub fn bounds(&self) -> Option<ImageBounds> {
        self.image().map(ImageBounds::of)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Discovers eligible files in `folder` and shows the first readable one.
    pub fn open_folder(&mut self, folder: &Path) -> StateResult<()> {
        let files = storage::discover_images(folder)?;
        self.open(files)
    }

    pub fn open(&mut self, files: FileList) -> StateResult<()> {
        self.machine.transition(NavigationEvent::Open)?;
        let Some(start) = NavigationCursor::first(files.len()) else {
            self.machine.transition(NavigationEvent::LoadFailed)?;
            let folder = files.folder().to_path_buf();
            return Err(storage::StorageError::NoEligibleImages(folder).into());
        };
        self.files = Some(files);
        match self.load_from(start, Direction::Next) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.files = None;
                self.machine.transition(NavigationEvent::LoadFailed)?;
                Err(err)
            }
        }
    }

    /// Moves the cursor with wraparound and loads that file, discarding unsaved edits.
    ///
    /// `Direction::Current` reloads the current file from disk. Unreadable files
    /// are skipped when moving; a failed reload keeps the current buffer.
    pub fn advance(&mut self, direction: Direction) -> StateResult<()> {
        let cursor = self.cursor.ok_or(StateError::NoImageLoaded)?;
        self.machine.transition(NavigationEvent::Advance(direction))?;
        if self.dirty && direction != Direction::Current {
            tracing::info!(
                path = ?self.current_path(),
                "leaving image with unsaved changes; edits discarded"
            );
        }

        match self.load_from(cursor.step(direction), direction) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.machine.transition(NavigationEvent::LoadFailed)?;
                Err(err)
            }
        }
    }

    /// Writes the buffer back to its file when it has unsaved changes.
    ///
    /// Returns whether a write happened. A clean buffer never touches the store,
    /// and a failed write leaves the modified flag set.
    pub fn save(&mut self) -> StateResult<bool> {
        self.machine.transition(NavigationEvent::Save)?;
        if !self.dirty {
            return Ok(false);
        }
        let open = self.current.as_ref().ok_or(StateError::NoImageLoaded)?;
        if let Err(err) = self.store.save(&open.path, &open.buffer) {
            tracing::error!(path = %open.path.display(), ?err, "save failed; keeping edits");
            return Err(err.into());
        }
        self.dirty = false;
        Ok(true)
    }

    /// Saves first, then moves to the next file. Nothing moves if the save fails.
    pub fn save_and_advance(&mut self) -> StateResult<()> {
        self.save()?;
        self.advance(Direction::Next)
    }

    /// Blurs `region` of the current image and marks it modified.
    pub fn apply_blur(&mut self, region: SelectionRect) -> StateResult<()> {
        self.machine.transition(NavigationEvent::Blur)?;
        let open = self.current.as_mut().ok_or(StateError::NoImageLoaded)?;
        editor::blur_region(&mut open.buffer, region)?;
        self.dirty = true;
        Ok(())
    }

    fn path_at(&self, cursor: NavigationCursor) -> StateResult<PathBuf> {
        self.files
            .as_ref()
            .and_then(|files| files.get(cursor.index()))
            .map(Path::to_path_buf)
            .ok_or(StateError::NoImageLoaded)
    }

    fn load_from(&mut self, start: NavigationCursor, direction: Direction) -> StateResult<()> {
        let attempts = match direction {
            Direction::Current => 1,
            Direction::Previous | Direction::Next => start.len(),
        };
        let mut cursor = start;
        for _ in 0..attempts {
            let path = self.path_at(cursor)?;
            match self.store.load(&path) {
                Ok(buffer) => {
                    tracing::info!(
                        path = %path.display(),
                        index = cursor.index(),
                        width = buffer.width(),
                        height = buffer.height(),
                        "loaded image"
                    );
                    self.cursor = Some(cursor);
                    self.current = Some(OpenImage { path, buffer });
                    self.dirty = false;
                    self.machine.transition(NavigationEvent::Loaded)?;
                    return Ok(());
                }
                Err(err) if direction == Direction::Current => {
                    tracing::warn!(path = %path.display(), ?err, "reload failed");
                    return Err(err.into());
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), ?err, "skipping unreadable image");
                    cursor = cursor.step(direction);
                }
            }
        }
        Err(StateError::NoReadableImages { count: start.len() })
    }
}
