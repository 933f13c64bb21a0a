//! Event dispatch for one open folder.
//!
//! The GTK shell translates raw input into [`SessionEvent`]s and performs the
//! returned [`SessionEffect`]s; everything in between is plain state.

use std::path::Path;

use image::RgbImage;

use crate::editor::DragSelection;
use crate::geometry::{ImageBounds, ViewPoint, ViewportGeometry};
use crate::input::ShortcutAction;
use crate::state::{Direction, NavigationState, Navigator, StateResult};
use crate::storage::{FileList, ImageStore};

const TITLE_PREFIX: &str = "Blurry";
const NO_FILE_TITLE: &str = "No file selected";
const DIRTY_MARKER: &str = "*";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    PointerPressed(ViewPoint),
    PointerMoved(ViewPoint),
    PointerReleased(ViewPoint),
    Command(ShortcutAction),
    ViewportResized { width: i32, height: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Image pixels changed; rebuild the displayed bitmap and redraw.
    ImageChanged,
    /// Only the selection marker changed.
    Redraw,
    TitleChanged(String),
    Quit,
}

#[derive(Debug)]
pub struct Session<S> {
    navigator: Navigator<S>,
    viewport_width: i32,
    viewport_height: i32,
    viewport: ViewportGeometry,
    drag: Option<DragSelection>,
}

impl<S: ImageStore> Session<S> {
    pub fn new(store: S, viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            navigator: Navigator::new(store),
            viewport_width,
            viewport_height,
            viewport: ViewportGeometry::centered(
                viewport_width,
                viewport_height,
                ImageBounds::new(0, 0),
            ),
            drag: None,
        }
    }

    pub fn navigator(&self) -> &Navigator<S> {
        &self.navigator
    }

    pub fn viewport(&self) -> ViewportGeometry {
        self.viewport
    }

    pub fn image(&self) -> Option<&RgbImage> {
        self.navigator.image()
    }

    pub fn is_selecting(&self) -> bool {
        self.drag.is_some()
    }

    pub fn title(&self) -> String {
        let name = self
            .navigator
            .file_name()
            .unwrap_or_else(|| NO_FILE_TITLE.to_string());
        let marker = if self.navigator.is_dirty() {
            DIRTY_MARKER
        } else {
            ""
        };
        format!("{TITLE_PREFIX} - {name}{marker}")
    }

    /// Live selection rectangle in view space: origin, width, height.
    pub fn selection_overlay(&self) -> Option<(ViewPoint, u32, u32)> {
        let drag = self.drag?;
        let bounds = self.navigator.bounds()?;
        Some(drag.preview(bounds).to_view(self.viewport))
    }

    pub fn open_folder(&mut self, folder: &Path) -> StateResult<Vec<SessionEffect>> {
        self.navigator.open_folder(folder)?;
        Ok(self.after_load())
    }

    pub fn open(&mut self, files: FileList) -> StateResult<Vec<SessionEffect>> {
        self.navigator.open(files)?;
        Ok(self.after_load())
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        match event {
            SessionEvent::PointerPressed(point) => self.pointer_pressed(point),
            SessionEvent::PointerMoved(point) => self.pointer_moved(point),
            SessionEvent::PointerReleased(point) => self.pointer_released(point),
            SessionEvent::Command(action) => self.command(action),
            SessionEvent::ViewportResized { width, height } => self.resize(width, height),
        }
    }

    fn pointer_pressed(&mut self, point: ViewPoint) -> Vec<SessionEffect> {
        if self.navigator.state() != NavigationState::Viewing {
            return Vec::new();
        }
        let drag = DragSelection::begin(point, self.viewport);
        tracing::debug!(start = ?drag.start(), "selection armed");
        self.drag = Some(drag);
        vec![SessionEffect::Redraw]
    }

    fn pointer_moved(&mut self, point: ViewPoint) -> Vec<SessionEffect> {
        let viewport = self.viewport;
        match self.drag.as_mut() {
            Some(drag) => {
                drag.update(point, viewport);
                vec![SessionEffect::Redraw]
            }
            None => Vec::new(),
        }
    }

    fn pointer_released(&mut self, point: ViewPoint) -> Vec<SessionEffect> {
        let Some(drag) = self.drag.take() else {
            return Vec::new();
        };
        let Some(bounds) = self.navigator.bounds() else {
            return vec![SessionEffect::Redraw];
        };
        let Some(region) = drag.finish(point, self.viewport, bounds) else {
            tracing::debug!("selection without area ignored");
            return vec![SessionEffect::Redraw];
        };

        match self.navigator.apply_blur(region) {
            Ok(()) => vec![
                SessionEffect::ImageChanged,
                SessionEffect::TitleChanged(self.title()),
            ],
            Err(err) => {
                tracing::warn!(?region, ?err, "blur rejected");
                vec![SessionEffect::Redraw]
            }
        }
    }

    fn command(&mut self, action: ShortcutAction) -> Vec<SessionEffect> {
        tracing::debug!(action = action.label(), "command");
        let result = match action {
            ShortcutAction::Quit => {
                if self.navigator.is_dirty() {
                    tracing::warn!(
                        path = ?self.navigator.current_path(),
                        "quitting with unsaved changes"
                    );
                }
                tracing::debug!(
                    transitions = self.navigator.transition_count(),
                    "session ending"
                );
                return vec![SessionEffect::Quit];
            }
            ShortcutAction::Save => {
                return match self.navigator.save() {
                    Ok(true) => vec![SessionEffect::TitleChanged(self.title())],
                    Ok(false) => Vec::new(),
                    Err(err) => {
                        tracing::error!(?err, "save failed");
                        Vec::new()
                    }
                };
            }
            ShortcutAction::SaveAndNext => self.navigator.save_and_advance(),
            ShortcutAction::ReloadCurrent => self.navigator.advance(Direction::Current),
            ShortcutAction::Next => self.navigator.advance(Direction::Next),
            ShortcutAction::Previous => self.navigator.advance(Direction::Previous),
        };

        match result {
            Ok(()) => self.after_load(),
            Err(err) => {
                tracing::error!(action = action.label(), ?err, "navigation failed");
                self.drag = None;
                vec![SessionEffect::Redraw, SessionEffect::TitleChanged(self.title())]
            }
        }
    }

    fn resize(&mut self, width: i32, height: i32) -> Vec<SessionEffect> {
        if (width, height) == (self.viewport_width, self.viewport_height) {
            return Vec::new();
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.place_image();
        vec![SessionEffect::Redraw]
    }

    fn place_image(&mut self) {
        let bounds = self.navigator.bounds().unwrap_or(ImageBounds::new(0, 0));
        self.viewport =
            ViewportGeometry::centered(self.viewport_width, self.viewport_height, bounds);
    }

    fn after_load(&mut self) -> Vec<SessionEffect> {
        self.drag = None;
        self.place_image();
        vec![
            SessionEffect::ImageChanged,
            SessionEffect::TitleChanged(self.title()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::editor::blur_region;
    use crate::geometry::SelectionRect;
    use crate::storage::testing::MemoryImageStore;
    use image::Rgb;

    fn path(name: &str) -> PathBuf {
        PathBuf::from("/photos").join(name)
    }

    fn striped(seed: u8) -> RgbImage {
        RgbImage::from_fn(200, 200, |x, y| {
            let value = if (x / 3 + y / 5) % 2 == 0 { 240 } else { seed };
            Rgb([value, value / 2, seed])
        })
    }

    fn session(viewport: (i32, i32)) -> Session<MemoryImageStore> {
        let store = MemoryImageStore::with_images([
            (path("a.jpg"), striped(10)),
            (path("b.jpg"), striped(90)),
        ]);
        let files =
            FileList::new("/photos", vec![path("a.jpg"), path("b.jpg")]).expect("non-empty");
        let mut session = Session::new(store, viewport.0, viewport.1);
        let effects = session.open(files).expect("open");
        assert_eq!(
            effects,
            vec![
                SessionEffect::ImageChanged,
                SessionEffect::TitleChanged("Blurry - a.jpg".to_string())
            ]
        );
        session
    }

    fn drag(
        session: &mut Session<MemoryImageStore>,
        from: ViewPoint,
        to: ViewPoint,
    ) -> Vec<SessionEffect> {
        session.dispatch(SessionEvent::PointerPressed(from));
        session.dispatch(SessionEvent::PointerMoved(to));
        session.dispatch(SessionEvent::PointerReleased(to))
    }

    #[test]
    fn end_to_end_blur_save_and_wrap() {
        let mut session = session((200, 200));
        let original = session.image().cloned().expect("loaded");
        assert_eq!(session.navigator().cursor(), Some(0));

        let effects = drag(&mut session, ViewPoint::new(10, 10), ViewPoint::new(50, 60));
        assert_eq!(
            effects,
            vec![
                SessionEffect::ImageChanged,
                SessionEffect::TitleChanged("Blurry - a.jpg*".to_string())
            ]
        );
        let mut expected = original.clone();
        blur_region(&mut expected, SelectionRect::new(10, 10, 40, 50)).expect("reference blur");
        assert_eq!(session.image(), Some(&expected));
        assert!(session.navigator().is_dirty());

        session.dispatch(SessionEvent::Command(ShortcutAction::SaveAndNext));
        let store = session.navigator().store();
        assert_eq!(store.writes(), 1);
        assert_eq!(store.image(&path("a.jpg")), Some(expected.clone()));
        assert_eq!(session.navigator().cursor(), Some(1));
        assert_eq!(session.title(), "Blurry - b.jpg");

        session.dispatch(SessionEvent::Command(ShortcutAction::Next));
        assert_eq!(session.navigator().cursor(), Some(0));
        assert_eq!(session.image(), Some(&expected));
        assert!(!session.navigator().is_dirty());
    }

    #[test]
    fn pointer_is_mapped_through_centered_offset() {
        let mut session = session((400, 300));
        assert_eq!(session.viewport().offset_x, 100);
        assert_eq!(session.viewport().offset_y, 50);
        let original = session.image().cloned().expect("loaded");

        drag(&mut session, ViewPoint::new(110, 60), ViewPoint::new(150, 110));

        let mut expected = original;
        blur_region(&mut expected, SelectionRect::new(10, 10, 40, 50)).expect("reference blur");
        assert_eq!(session.image(), Some(&expected));
    }

    #[test]
    fn drag_outside_image_is_clamped_to_edges() {
        let mut session = session((400, 300));
        let original = session.image().cloned().expect("loaded");

        drag(&mut session, ViewPoint::new(0, 0), ViewPoint::new(130, 400));

        let mut expected = original;
        blur_region(&mut expected, SelectionRect::new(0, 0, 30, 200)).expect("reference blur");
        assert_eq!(session.image(), Some(&expected));
    }

    #[test]
    fn click_without_drag_changes_nothing() {
        let mut session = session((200, 200));
        let original = session.image().cloned();
        let point = ViewPoint::new(42, 42);

        session.dispatch(SessionEvent::PointerPressed(point));
        assert!(session.is_selecting());
        let effects = session.dispatch(SessionEvent::PointerReleased(point));

        assert_eq!(effects, vec![SessionEffect::Redraw]);
        assert!(!session.is_selecting());
        assert_eq!(session.image().cloned(), original);
        assert!(!session.navigator().is_dirty());
    }

    #[test]
    fn selection_overlay_follows_the_pointer_in_view_space() {
        let mut session = session((400, 300));
        assert_eq!(session.selection_overlay(), None);

        session.dispatch(SessionEvent::PointerPressed(ViewPoint::new(150, 110)));
        assert_eq!(
            session.selection_overlay(),
            Some((ViewPoint::new(150, 110), 0, 0))
        );
        session.dispatch(SessionEvent::PointerMoved(ViewPoint::new(110, 60)));
        assert_eq!(
            session.selection_overlay(),
            Some((ViewPoint::new(110, 60), 40, 50))
        );
        session.dispatch(SessionEvent::PointerMoved(ViewPoint::new(-20, 500)));
        assert_eq!(
            session.selection_overlay(),
            Some((ViewPoint::new(100, 110), 50, 140))
        );
    }

    #[test]
    fn move_and_release_without_press_are_ignored() {
        let mut session = session((200, 200));
        assert!(session
            .dispatch(SessionEvent::PointerMoved(ViewPoint::new(5, 5)))
            .is_empty());
        assert!(session
            .dispatch(SessionEvent::PointerReleased(ViewPoint::new(50, 50)))
            .is_empty());
        assert!(!session.navigator().is_dirty());
    }

    #[test]
    fn navigation_disarms_in_progress_selection() {
        let mut session = session((200, 200));
        session.dispatch(SessionEvent::PointerPressed(ViewPoint::new(10, 10)));
        session.dispatch(SessionEvent::Command(ShortcutAction::Next));
        assert!(!session.is_selecting());
        assert!(session
            .dispatch(SessionEvent::PointerReleased(ViewPoint::new(80, 80)))
            .is_empty());
        assert!(!session.navigator().is_dirty());
    }

    #[test]
    fn failed_save_and_next_disarms_selection_and_stays_put() {
        let mut session = session((200, 200));
        drag(&mut session, ViewPoint::new(10, 10), ViewPoint::new(50, 60));
        session.navigator().store().set_fail_saves(true);

        session.dispatch(SessionEvent::PointerPressed(ViewPoint::new(5, 5)));
        assert!(session.is_selecting());
        let effects = session.dispatch(SessionEvent::Command(ShortcutAction::SaveAndNext));

        assert_eq!(
            effects,
            vec![
                SessionEffect::Redraw,
                SessionEffect::TitleChanged("Blurry - a.jpg*".to_string())
            ]
        );
        assert!(!session.is_selecting());
        assert_eq!(session.selection_overlay(), None);
        assert_eq!(session.navigator().cursor(), Some(0));
        assert!(session
            .dispatch(SessionEvent::PointerReleased(ViewPoint::new(90, 90)))
            .is_empty());
    }

    #[test]
    fn next_without_save_discards_edits() {
        let mut session = session((200, 200));
        drag(&mut session, ViewPoint::new(10, 10), ViewPoint::new(50, 60));
        session.dispatch(SessionEvent::Command(ShortcutAction::Next));
        session.dispatch(SessionEvent::Command(ShortcutAction::Previous));

        assert_eq!(session.navigator().store().writes(), 0);
        assert_eq!(session.image().cloned(), Some(striped(10)));
        assert_eq!(session.title(), "Blurry - a.jpg");
    }

    #[test]
    fn save_command_updates_title_only_when_something_was_written() {
        let mut session = session((200, 200));
        assert!(session
            .dispatch(SessionEvent::Command(ShortcutAction::Save))
            .is_empty());
        assert_eq!(session.navigator().store().writes(), 0);

        drag(&mut session, ViewPoint::new(10, 10), ViewPoint::new(50, 60));
        assert_eq!(
            session.dispatch(SessionEvent::Command(ShortcutAction::Save)),
            vec![SessionEffect::TitleChanged("Blurry - a.jpg".to_string())]
        );
        assert_eq!(session.navigator().store().writes(), 1);
    }

    #[test]
    fn reload_restores_the_file_from_disk() {
        let mut session = session((200, 200));
        drag(&mut session, ViewPoint::new(0, 0), ViewPoint::new(100, 100));
        session.dispatch(SessionEvent::Command(ShortcutAction::ReloadCurrent));
        assert_eq!(session.image().cloned(), Some(striped(10)));
        assert_eq!(session.navigator().cursor(), Some(0));
        assert_eq!(session.title(), "Blurry - a.jpg");
    }

    #[test]
    fn quit_is_reported_as_an_effect() {
        let mut session = session((200, 200));
        // open, loaded
        assert_eq!(session.navigator().transition_count(), 2);
        assert_eq!(
            session.dispatch(SessionEvent::Command(ShortcutAction::Quit)),
            vec![SessionEffect::Quit]
        );
    }

    #[test]
    fn resize_recenters_the_current_image() {
        let mut session = session((200, 200));
        assert_eq!(
            session.dispatch(SessionEvent::ViewportResized {
                width: 600,
                height: 400
            }),
            vec![SessionEffect::Redraw]
        );
        assert_eq!(session.viewport().offset_x, 200);
        assert_eq!(session.viewport().offset_y, 100);
        assert!(session
            .dispatch(SessionEvent::ViewportResized {
                width: 600,
                height: 400
            })
            .is_empty());
    }

    #[test]
    fn title_without_a_loaded_file() {
        let session = Session::new(MemoryImageStore::default(), 100, 100);
        assert_eq!(session.title(), "Blurry - No file selected");
        assert_eq!(session.selection_overlay(), None);
    }

    #[test]
    fn pointer_before_open_does_not_arm() {
        let mut session = Session::new(MemoryImageStore::default(), 100, 100);
        assert!(session
            .dispatch(SessionEvent::PointerPressed(ViewPoint::new(1, 1)))
            .is_empty());
        assert!(!session.is_selecting());
    }
}
