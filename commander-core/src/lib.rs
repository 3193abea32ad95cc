pub mod error;

pub mod config;

pub mod controller {
    pub mod actions;
    pub use actions::{Action, Effect, KeyCommand};

    pub mod dispatcher;
    pub use dispatcher::{Dispatch, OperationKind, OperationRequest, OperationResult};

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};

    pub mod keymap;
}

pub mod model {
    pub mod app_state;

    pub mod entry_filter;

    pub mod fs_state;
    pub use fs_state::{FSState, PaneState, VisibleLines};

    pub mod viewport;
}

pub mod view {
    pub mod icons;

    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod error_overlay;
        pub use error_overlay::ErrorOverlay;
        pub mod pane_view;
        pub use pane_view::PaneView;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub mod fs {
    pub mod dir_scanner;

    pub mod entry;
    pub use entry::Entry;

    pub mod file_system;
    pub use file_system::{FileSystem, LocalFileSystem};
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, fs_state::FSState};
