//! hex-patterns: a Hex player built on a catalog of edge templates.
//!
//! Instead of searching, the engine recognises local tactical shapes
//! (bridges, ziggurats and a handful of larger edge templates) around its
//! own stones and answers any intrusion into one of them with the cell that
//! keeps the connection alive.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and engine defaults
//! - [`board`] - Occupancy, labels and rendering
//! - [`cell`] - Per-cell neighbours, bridges and templates
//! - [`catalog`] - The template shapes and their orientations
//! - [`patterns`] - Matching templates against the board
//! - [`engine`] - Reply rules, decomposition and fallback play
//! - [`win`] - Edge-to-edge connection detection
//! - [`session`] - A game driver around the engine
//! - [`protocol`] - Text protocol for other programs
//!
//! ## Example
//!
//! ```
//! use hex_patterns::board::{Board, Color, label_to_coord, coord_to_label};
//! use hex_patterns::engine::{compute_reply, prune};
//!
//! let mut board = Board::new(8).unwrap();
//! board.place(1, 6, Color::Black).unwrap();
//! prune(&mut board);
//!
//! // White steps into the edge bridge below b7.
//! let (x, y) = label_to_coord("a8").unwrap();
//! board.place(x, y, Color::White).unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let reply = compute_reply(&mut board, (x, y), &mut rng).unwrap();
//! assert_eq!(coord_to_label(reply), "b8");
//! ```

pub mod board;
pub mod catalog;
pub mod cell;
pub mod constants;
pub mod engine;
pub mod patterns;
pub mod protocol;
pub mod session;
pub mod win;
