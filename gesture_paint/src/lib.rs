//! # gesture_paint
//!
//! Paint voxels on a projected grid with bare-hand gestures, tracked from a
//! stream of 21-point hand skeletons.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Hands | Action |
//! |---|---|---|
//! | Pinch (thumb+index tips together) | Primary | Place a voxel at the index tip, rate-gated at 35 ms |
//! | Fist | Primary | Drag the whole drawing; offset bakes in when the fist opens |
//! | Left fist + right point | Both | Erase the cell under the pointing finger, rate-gated at 50 ms |
//! | OK sign (pinch + three fingers up) | Primary | Clear the drawing, rate-gated at 900 ms (one-hand mode) |
//!
//! The two UI variants are one state machine parameterized by a capability
//! [`Mode`](controller::Mode): `two_hand()` carries drag + erase,
//! `one_hand()` carries clear.
//!
//! ## Feature flags
//!
//! * (default) — **Simulation mode**: mouse + keyboard drive synthetic
//!   skeletons through the real classifier.
//! * `leap` — **Hardware mode**: polls a LeapMotion controller via LeapC.
//!
//! ### Simulation controls
//!
//! | Input | Hand shape |
//! |---|---|
//! | Mouse move | Hand position |
//! | `Space` / left button, hold | Pinch (draw) |
//! | `F`, hold | Fist (drag) |
//! | `D`, hold | Point |
//! | `E`, hold | Left fist + right point (erase) |
//! | `C`, hold | OK sign (clear, one-hand mode) |
//! | `H`, hold | Hide the hand (lost tracking) |
//! | `Q` | Quit |

pub mod app;
pub mod controller;
pub mod gesture;
pub mod rate;
pub mod visualizer;
