//! Big Text Now: show any text as large as the screen allows
//!
//! This crate provides the whole single-page app as WebAssembly:
//! - Auto-fit font sizing with a headless measuring surface
//! - A client-side router with static sub-path hosting support
//! - A history of texts persisted to local storage as JSON
//! - A modal dialog for adding and editing entries
//!
//! Everything except the `wasm` module is platform-independent and runs
//! natively against the in-memory backends in [`platform`].

pub mod app;
pub mod config;
pub mod error;
pub mod fit;
pub mod list;
pub mod modal;
pub mod platform;
pub mod router;
pub mod store;
pub mod view;
pub mod wasm;

pub use app::App;
pub use config::AppConfig;
pub use error::{Error, Result};
pub use fit::{fit_font_size, AutoFit, FitBounds, FitSurface, GlyphMetrics, HeadlessSurface, Size};
pub use list::{TextEntry, TextList};
pub use modal::{DialogOutcome, DialogTarget, EditDialog, KeyPress, KeyResponse};
pub use platform::{Device, FullscreenApi, HistoryBackend, KeyValueStore, MemoryHistory, MemoryStore};
pub use router::{Location, QueryParams, Router};
pub use store::ListStore;
pub use view::{Action, Page};
