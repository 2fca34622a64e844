//! Main entry point for MonocleCli

#![deny(warnings, missing_docs, trivial_casts, unused_qualifications)]
#![forbid(unsafe_code)]

use monocle_cli::application::APP;

/// Boot MonocleCli
fn main() {
    abscissa_core::boot(&APP);
}
