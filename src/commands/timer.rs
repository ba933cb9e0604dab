//! Interactive pomodoro timer.
//!
//! A one-second ticker drives the shared [`Pomodoro`] while a stdin reader
//! task handles the controls. Each completed focus interval is recorded as a
//! study session for the active profile, which feeds the study streak.

use super::announce_achievements;
use crate::{
    db::sessions::Sessions,
    libs::{
        messages::Message,
        pomodoro::{Pomodoro, TickEvent},
        session::Session,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tokio::time::{self, Duration};

#[derive(Debug, Args)]
pub struct TimerArgs {
    /// Focus minutes, overriding the configured value
    #[arg(short, long)]
    focus: Option<u32>,
    /// Break minutes, overriding the configured value
    #[arg(short, long = "break")]
    break_minutes: Option<u32>,
}

pub async fn cmd(args: TimerArgs) -> Result<()> {
    let session = Session::current()?;

    let mut config = session.config.pomodoro();
    if let Some(focus) = args.focus {
        config.focus_minutes = focus;
    }
    if let Some(break_minutes) = args.break_minutes {
        config.break_minutes = break_minutes;
    }
    config.validate()?;

    let timer = Arc::new(Mutex::new(Pomodoro::from_config(&config)));
    timer.lock().start();
    msg_print!(Message::TimerStarted(config.focus_minutes, config.break_minutes));
    msg_print!(Message::TimerControls);

    let (quit_tx, mut quit_rx) = oneshot::channel();
    let controls = Arc::clone(&timer);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match line.trim().to_lowercase().as_str() {
                "p" => {
                    let mut timer = controls.lock();
                    timer.toggle();
                    if timer.is_running() {
                        msg_info!(Message::TimerResumed);
                    } else {
                        msg_info!(Message::TimerPaused);
                    }
                }
                "r" => {
                    controls.lock().reset();
                    msg_info!(Message::TimerReset);
                }
                "q" => break,
                _ => {}
            }
        }
        // Closed stdin stops the timer as well.
        let _ = quit_tx.send(());
    });

    let mut ticker = time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let (event, line) = {
                    let mut timer = timer.lock();
                    let event = timer.tick();
                    (event, format!("{} {}", timer.phase(), timer.display()))
                };

                match event {
                    TickEvent::Paused => continue,
                    TickEvent::Counting => {}
                    TickEvent::FocusCompleted => {
                        println!();
                        Sessions::new(&session.db.conn).record(Local::now().date_naive(), config.focus_minutes)?;
                        msg_success!(Message::FocusCompleted(timer.lock().completed_focus()));
                        announce_achievements(&session)?;
                    }
                    TickEvent::BreakCompleted => {
                        println!();
                        msg_info!(Message::BreakCompleted);
                    }
                }

                print!("\r{}", line);
                std::io::stdout().flush()?;
            }
            _ = &mut quit_rx => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    println!();
    msg_print!(Message::TimerStopped(timer.lock().completed_focus()));
    Ok(())
}
