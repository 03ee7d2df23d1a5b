// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive prompt drawn with [`DiffRenderer`] and gated by [`InputGate`].
//!
//! ```text
//! cargo run --example prompt_demo -- --valid '[0-9]' --filter $'\t' --max 6
//! cargo run --example prompt_demo -- --ignore up --ignore down --min 4 --log-file /tmp/demo.log
//! cargo run --example prompt_demo -- --log-stderr 2>/tmp/demo.log
//! ```

use clap::Parser;
use diff_readline::{DiffRenderer, DisplayPreference, GateEvent, GateOutcome, InputDevice, InputGate,
                    InputGateConfig, KeyMatcher, OutputDevice, PrintRule,
                    SafeDiffRenderer, TracingConfig, lock_poisoned_error,
                    setup_default_miette_global_report_handler,
                    try_initialize_logging_global};
use miette::IntoDiagnostic;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new/choose";

#[derive(Parser, Debug)]
#[command(author, version, about = "Multi-line prompt with gated keypresses")]
struct Cli {
    /// Only printable characters matching this regex are accepted
    #[arg(long = "valid", short = 'v')]
    valid: Option<String>,
    /// Keys rejected with a bell. A printable string names a key (eg: `tab`), anything
    /// else is a raw sequence
    #[arg(long = "filter", short = 'f')]
    filter: Vec<String>,
    /// Keys reported but never applied to the input
    #[arg(long = "ignore", short = 'i')]
    ignore: Vec<String>,
    /// Submit as soon as the input reaches this many characters
    #[arg(long = "min")]
    min: Option<usize>,
    /// Refuse to grow the input past this many characters
    #[arg(long = "max")]
    max: Option<usize>,
    /// Write debug logs to this file
    #[arg(long = "log-file")]
    log_file: Option<String>,
    /// Write debug logs to stderr. Redirect it, stdout is where the prompt is drawn
    #[arg(long = "log-stderr")]
    log_stderr: bool,
}

impl Cli {
    fn to_gate_config(&self) -> miette::Result<InputGateConfig> {
        let mut config = InputGateConfig::default()
            .filter_keys(self.filter.iter().map(|it| KeyMatcher::from_key_str(it)))
            .ignore_keys(self.ignore.iter().map(|it| KeyMatcher::from_key_str(it)))
            .input_len(self.min, self.max);
        if let Some(pattern) = &self.valid {
            config = config.valid_inputs([PrintRule::pattern(pattern)?]);
        }
        Ok(config)
    }
}

fn render_frame(renderer: &SafeDiffRenderer, value: &str, status: &str) -> miette::Result<()> {
    let frame = format!(
        "\x1b[1mWhat should we call this build?\x1b[0m\n\x1b[36m❯\x1b[0m \x1b7{value}\n\x1b[2m{status}\x1b[0m"
    );
    let mut it = renderer.lock().map_err(lock_poisoned_error).into_diagnostic()?;
    it.print(&frame, None).into_diagnostic()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);

    let cli = Cli::parse();
    let tracing_config = match (&cli.log_file, cli.log_stderr) {
        (Some(path), true) => {
            TracingConfig::new_file_and_display(Some(path.clone()), DisplayPreference::Stderr)
        }
        (Some(path), false) => TracingConfig::new_file(Some(path.clone())),
        (None, true) => TracingConfig::new_display(DisplayPreference::Stderr),
        (None, false) => TracingConfig::disabled(),
    };
    try_initialize_logging_global(&tracing_config)?;

    let output_device = OutputDevice::new_stdout();
    let renderer = DiffRenderer::new_shared(output_device.clone());
    let mut gate = InputGate::try_new(
        cli.to_gate_config()?,
        InputDevice::new_event_stream(),
        output_device,
    )?;
    gate.register_renderer(renderer.clone())?;
    let mut events = gate.subscribe();

    render_frame(&renderer, "", "type away, Enter submits, Ctrl+C quits")?;

    let outcome = {
        let read_line = gate.read_line();
        tokio::pin!(read_line);
        let mut value = String::new();
        loop {
            tokio::select! {
                outcome = &mut read_line => break outcome?,
                Some(event) = events.recv() => match event {
                    GateEvent::Change(new_value) => {
                        value = new_value;
                        let status = format!("{} characters", value.chars().count());
                        render_frame(&renderer, &value, &status)?;
                    }
                    GateEvent::Keypress { key, .. } => {
                        tracing::debug!(message = "keypress", ?key);
                    }
                    GateEvent::Cursor(_) | GateEvent::Submit(_) | GateEvent::Close => {}
                },
            }
        }
    };

    gate.close()?;

    let status = match &outcome {
        GateOutcome::Submitted(name) => format!("submitted: {name}"),
        GateOutcome::Closed => "cancelled".to_string(),
    };
    let value = match &outcome {
        GateOutcome::Submitted(name) => name.as_str(),
        GateOutcome::Closed => "",
    };
    render_frame(&renderer, value, &status)?;
    println!();

    Ok(())
}
