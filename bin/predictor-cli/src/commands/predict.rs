// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `predictor predict`: one request through the same controller as `run`.

use session::{init_engine, LineEvent, Session, SessionConfig, SessionError};

pub async fn execute(mut config: SessionConfig, values: &str) -> anyhow::Result<()> {
    // The values are already on the command line.
    config.echo = false;
    let terminator = config.terminator.byte();
    let capacity = config.line_capacity;

    let mut session = Session::boot(config, std::io::stdout(), init_engine)?;
    if !session.is_ready() {
        anyhow::bail!(SessionError::NotReady);
    }

    let mut outcome = None;
    for &b in values.as_bytes().iter().chain(std::iter::once(&terminator)) {
        match session.feed_char(b)? {
            LineEvent::Pending => {}
            LineEvent::Overflow => anyhow::bail!(SessionError::LineOverflow { capacity }),
            LineEvent::Predicted(p) => outcome = Some(Ok(p)),
            LineEvent::Rejected(e) => outcome = Some(Err(e)),
        }
    }
    session.flush()?;

    match outcome {
        Some(Ok(p)) => {
            tracing::info!(
                "predicted {} in {} us",
                p.predicted,
                p.timing.inference_us()
            );
            Ok(())
        }
        Some(Err(e)) => Err(e.into()),
        None => anyhow::bail!("no complete line in {values:?}"),
    }
}
