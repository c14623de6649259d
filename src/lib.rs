//! Moodboard canvas engine.
//!
//! An embeddable, headless core for an infinite-canvas image moodboard:
//! camera pan/zoom, multi-selection, a pointer gesture state machine,
//! asynchronous image loading and key-value persistence for boards and
//! the image library. A host shell supplies the window, raw input events
//! and rendering; this crate owns all the interaction semantics.

pub mod background;
pub mod board;
pub mod camera;
pub mod canvas;
pub mod constants;
pub mod files;
pub mod image_cache;
pub mod input;
pub mod library;
pub mod logging;
pub mod selection;
pub mod spatial_index;
pub mod store;
pub mod tags;
pub mod types;

pub use background::BackgroundExecutor;
pub use board::{Board, BoardStore};
pub use camera::Camera;
pub use canvas::MoodboardCanvas;
pub use files::{FileService, LocalFiles};
pub use image_cache::{BoardImageCache, LoadedImage};
pub use input::{GestureState, Modifiers, PointerButton, PointerEvent};
pub use library::Library;
pub use selection::SelectionModel;
pub use store::{JsonFileStore, KvBoardStore, KvStore, MemoryStore};
pub use types::{BoardItem, Collection, ItemId, ItemPatch, Moodboard, Rect, Tag};
