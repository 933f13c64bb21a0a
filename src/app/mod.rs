use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use gtk4::gdk_pixbuf::Pixbuf;
use gtk4::prelude::*;
use gtk4::{Application, ApplicationWindow, DrawingArea};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::input::resolve_shortcut;
use crate::session::{Session, SessionEffect, SessionEvent};
use crate::storage::FsImageStore;

mod bootstrap;
mod input_bridge;
mod render;

use self::bootstrap::*;
use self::input_bridge::*;
use self::render::*;

const APP_ID: &str = "io.github.blurry.Blurry";
const INITIAL_WINDOW_WIDTH: i32 = 1280;
const INITIAL_WINDOW_HEIGHT: i32 = 800;

type StartupErrorSlot = Rc<RefCell<Option<AppError>>>;

pub struct App {
    config: AppConfig,
    folder: Option<PathBuf>,
}

impl App {
    pub fn new(config: AppConfig, folder: Option<PathBuf>) -> Self {
        Self { config, folder }
    }

    /// Runs the GTK main loop until the window closes.
    ///
    /// Fails when no folder is chosen or the folder has no readable JPEG.
    pub fn run(self) -> AppResult<()> {
        let Self { config, folder } = self;
        let application = Application::builder().application_id(APP_ID).build();
        let startup_error: StartupErrorSlot = Rc::default();

        let startup_error_for_activate = startup_error.clone();
        application.connect_activate(move |application| {
            if let Some(window) = application.active_window() {
                window.present();
                return;
            }

            let runtime =
                SessionRuntime::build(application, FsImageStore::new(config.jpeg_quality()));
            runtime.window.present();

            let startup_error = startup_error_for_activate.clone();
            match folder.clone() {
                Some(folder) => runtime.open_folder_or_close(&folder, &startup_error),
                None => {
                    let runtime_for_dialog = runtime.clone();
                    choose_folder(
                        &runtime.window,
                        config.start_folder.as_deref(),
                        move |choice| match choice {
                            Some(folder) => {
                                runtime_for_dialog.open_folder_or_close(&folder, &startup_error)
                            }
                            None => {
                                *startup_error.borrow_mut() = Some(AppError::StartupCancelled);
                                runtime_for_dialog.window.close();
                            }
                        },
                    );
                }
            }
        });

        // Arguments were already consumed by clap.
        let status = application.run_with_args::<&str>(&[]);

        if let Some(err) = startup_error.borrow_mut().take() {
            tracing::error!(%err, "startup failed");
            return Err(err);
        }
        if status != gtk4::glib::ExitCode::SUCCESS {
            return Err(AppError::Gtk(format!("{status:?}")));
        }
        Ok(())
    }
}

#[derive(Clone)]
struct SessionRuntime {
    session: Rc<RefCell<Session<FsImageStore>>>,
    displayed: Rc<RefCell<Option<Pixbuf>>>,
    window: ApplicationWindow,
    canvas: DrawingArea,
}

impl SessionRuntime {
    fn build(application: &Application, store: FsImageStore) -> Self {
        let session = Session::new(store, 0, 0);
        let window = ApplicationWindow::builder()
            .application(application)
            .title(session.title())
            .default_width(INITIAL_WINDOW_WIDTH)
            .default_height(INITIAL_WINDOW_HEIGHT)
            .build();
        let canvas = DrawingArea::new();
        canvas.set_hexpand(true);
        canvas.set_vexpand(true);
        window.set_child(Some(&canvas));
        window.maximize();

        let runtime = Self {
            session: Rc::new(RefCell::new(session)),
            displayed: Rc::new(RefCell::new(None)),
            window,
            canvas,
        };
        runtime.connect_draw();
        runtime.connect_resize();
        runtime.connect_pointer();
        runtime.connect_shortcuts();
        runtime
    }

    fn open_folder_or_close(&self, folder: &Path, startup_error: &StartupErrorSlot) {
        let result = self.session.borrow_mut().open_folder(folder);
        match result {
            Ok(effects) => {
                tracing::info!(folder = %folder.display(), "folder opened");
                self.apply(effects);
            }
            Err(err) => {
                *startup_error.borrow_mut() = Some(err.into());
                self.window.close();
            }
        }
    }

    fn dispatch(&self, event: SessionEvent) {
        let effects = self.session.borrow_mut().dispatch(event);
        self.apply(effects);
    }

    fn apply(&self, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::ImageChanged => {
                    let pixbuf = self.session.borrow().image().and_then(rgb_image_to_pixbuf);
                    *self.displayed.borrow_mut() = pixbuf;
                    self.canvas.queue_draw();
                }
                SessionEffect::Redraw => self.canvas.queue_draw(),
                SessionEffect::TitleChanged(title) => self.window.set_title(Some(&title)),
                SessionEffect::Quit => self.window.close(),
            }
        }
    }

    fn connect_draw(&self) {
        let session = self.session.clone();
        let displayed = self.displayed.clone();
        self.canvas.set_draw_func(move |_, context, _, _| {
            let session = session.borrow();
            draw_viewport(
                context,
                displayed.borrow().as_ref(),
                session.viewport(),
                session.selection_overlay(),
            );
        });
    }

    fn connect_resize(&self) {
        let runtime = self.clone();
        self.canvas.connect_resize(move |_, width, height| {
            runtime.dispatch(SessionEvent::ViewportResized { width, height });
        });
    }

    fn connect_pointer(&self) {
        let drag = gtk4::GestureDrag::new();
        drag.set_button(gtk4::gdk::BUTTON_PRIMARY);

        let runtime = self.clone();
        drag.connect_drag_begin(move |_, x, y| {
            runtime.dispatch(SessionEvent::PointerPressed(view_point(x, y)));
        });

        let runtime = self.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                runtime.dispatch(SessionEvent::PointerMoved(view_point(
                    start_x + offset_x,
                    start_y + offset_y,
                )));
            }
        });

        let runtime = self.clone();
        drag.connect_drag_end(move |gesture, offset_x, offset_y| {
            if let Some((start_x, start_y)) = gesture.start_point() {
                runtime.dispatch(SessionEvent::PointerReleased(view_point(
                    start_x + offset_x,
                    start_y + offset_y,
                )));
            }
        });

        self.canvas.add_controller(drag);
    }

    fn connect_shortcuts(&self) {
        let runtime = self.clone();
        let keys = gtk4::EventControllerKey::new();
        keys.connect_key_pressed(move |_, key, keycode, modifier| {
            let Some(shortcut_key) = normalize_shortcut_key(key, keycode) else {
                return gtk4::glib::Propagation::Proceed;
            };
            let Some(action) = resolve_shortcut(shortcut_key, shortcut_modifiers(modifier)) else {
                return gtk4::glib::Propagation::Proceed;
            };
            runtime.dispatch(SessionEvent::Command(action));
            gtk4::glib::Propagation::Stop
        });
        self.window.add_controller(keys);
    }
}
