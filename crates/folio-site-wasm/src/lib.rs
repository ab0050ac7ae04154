#![forbid(unsafe_code)]

//! WASM runner for the Folio portfolio site.
//!
//! This crate provides [`SiteRunner`], a `wasm-bindgen`-exported struct that
//! wraps [`site_core::SiteCore`] and exposes it to JavaScript for
//! host-driven execution: the page pushes DOM notifications, calls `frame`
//! from `requestAnimationFrame`, then applies the returned view state and
//! the queued host commands.

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::SiteRunner;

pub mod site_core;
