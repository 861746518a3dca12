//! Progress reporting (§10.5): an `indicatif` bar layered over the library's
//! own `log::debug!` percentage counters in the estimator and weakly-
//! connected-components sweeps.

use indicatif::{ProgressBar, ProgressStyle};

pub fn sweep_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
