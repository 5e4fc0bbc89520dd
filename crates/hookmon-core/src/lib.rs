//! # hookmon-core
//!
//! Shared library for hookmon containing the raw hook payload types, the
//! payload decoders, decoded event types, and the character translation seam.
//!
//! This crate is used by the Windows infrastructure crate (`hookmon-win`) and
//! by any host application that feeds its own message-hook data into the
//! decoders. It has zero dependencies on OS APIs, UI frameworks, or threads.
//!
//! # Architecture overview (for beginners)
//!
//! hookmon turns raw Windows keyboard/mouse hook notifications into typed
//! input events. A hook callback hands the OS-provided parameters to this
//! crate in one of two shapes – an application-hook form with bit-packed
//! flags, or a global low-level hook form with a structured record – and the
//! decoders classify them into events a host application can subscribe to.
//!
//! This crate is the OS-independent foundation. It defines:
//!
//! - **`payload`** – The two raw shapes hook data arrives in, expressed as
//!   tagged variants, plus the boundary constructors that narrow the
//!   pointer-sized message parameters exactly once.
//!
//! - **`decode`** – Pure classification logic: key-press character decoding,
//!   key-stroke (down/up) decoding, and mouse message decoding. Stateless
//!   per call; all transient keyboard state lives in the OS behind the
//!   [`CharacterTranslator`] seam.
//!
//! - **`event`** – The decoded event value types handed to subscribers.
//!
//! - **`translate`** – The [`CharacterTranslator`] capability trait and a
//!   deterministic static-layout implementation for tests and benches.

pub mod decode;
pub mod event;
pub mod payload;
pub mod translate;

// Re-export the most-used types at the crate root so callers can write
// `hookmon_core::KeyPressEvent` instead of `hookmon_core::event::KeyPressEvent`.
pub use decode::{decode_key_press, decode_key_stroke, decode_mouse};
pub use event::{
    KeyAction, KeyPressEvent, KeyStrokeEvent, MouseButton, MouseEvent, MouseEventKind,
};
pub use payload::{KeyboardPayload, MousePayload};
pub use translate::CharacterTranslator;
