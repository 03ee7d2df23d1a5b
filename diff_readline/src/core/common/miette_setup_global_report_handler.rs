// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Install a [miette](https://docs.rs/miette/latest/miette/index.html) report handler
//! whose width follows the terminal. Binaries that return `miette::Result<_>` from
//! `main()` call this once at startup.
//!
//! The hook is lazy: the terminal width is only measured when a report is actually
//! printed, which is after the prompt has released the terminal.

use miette::MietteHandlerOpts;

const FALLBACK_REPORT_WIDTH: usize = 80;

pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    let result = miette::set_hook(Box::new(move |_report| {
        let terminal_width = crossterm::terminal::size()
            .map_or(FALLBACK_REPORT_WIDTH, |(columns, _rows)| usize::from(columns));
        tracing::debug!(message = "miette report width", terminal_width);
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }));

    if let Err(err) = result {
        tracing::warn!(message = "miette hook already installed", error = %err);
    }
}
