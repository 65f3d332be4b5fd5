//! Output generation and housekeeping for the report directory.
//!
//! # Submodules
//!
//! - [`html`]: Renders a `RunReport` as the static HTML report
//! - [`json`]: Writes the same `RunReport` as a JSON snapshot
//! - [`retention`]: Deletes reports older than the retention window
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── titulares_20250618_100000.html   # removed once older than two days
//! ├── titulares_20250620_100509.html
//! └── titulares_20250620_100509.json   # only with --json
//! ```

pub mod html;
pub mod json;
pub mod retention;
