//! Pipeline stages for image-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping the
//! stages separate makes each independently testable and keeps the layout
//! math free of I/O.
//!
//! ## Data Flow
//!
//! ```text
//! normalize ──▶ layout ──▶ writer
//! (decode, EXIF, (geometry,  (printpdf page
//!  flatten alpha)  placement)  append + save)
//! ```
//!
//! 1. [`normalize`] — decode one image, apply its EXIF orientation, resolve
//!    transparency onto an opaque white background
//! 2. [`layout`]    — pick portrait/landscape Letter geometry from the
//!    corrected dimensions and compute the centered scale-to-fit placement
//! 3. [`writer`]    — own the output document across the run; append one
//!    page per image in call order, finalize exactly once
//!
//! The stages run strictly sequentially, one image at a time: the writer's
//! page order must match input order, and holding at most one decoded
//! bitmap bounds peak memory to a single image regardless of run length.

pub mod layout;
pub mod normalize;
pub mod writer;
