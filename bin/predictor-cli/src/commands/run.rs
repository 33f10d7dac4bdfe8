// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `predictor run`: the polling loop over stdin and stdout.
//!
//! ```text
//! stdin ─► reader task ─► mpsc channel ─► Session::poll (one byte per tick) ─► stdout
//! ```

use session::{init_engine, Session, SessionConfig, Tick};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc::{self, UnboundedSender};

pub async fn execute(config: SessionConfig) -> anyhow::Result<()> {
    if config.startup_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(config.startup_delay_ms)).await;
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(forward_stdin(tx));

    let idle = Duration::from_millis(config.poll_interval_ms);
    let mut session = Session::boot(config, std::io::stdout(), init_engine)?;

    loop {
        match session.poll(&mut rx)? {
            Tick::Consumed(_) => {}
            Tick::Idle => {
                session.flush()?;
                tokio::time::sleep(idle).await;
            }
            Tick::Closed => break,
        }
    }
    session.flush()?;
    reader.await??;

    tracing::info!("input closed: {}", session.stats().summary());
    Ok(())
}

/// Forwards stdin byte by byte until EOF or until the session goes away.
async fn forward_stdin(tx: UnboundedSender<u8>) -> std::io::Result<()> {
    let mut stdin = tokio::io::stdin();
    let mut buf = [0u8; 256];
    loop {
        let n = stdin.read(&mut buf).await?;
        if n == 0 {
            tracing::debug!("stdin reached EOF");
            return Ok(());
        }
        for &b in &buf[..n] {
            if tx.send(b).is_err() {
                return Ok(());
            }
        }
    }
}
