//! Domain logic and shared infrastructure.
//!
//! - Planning: [`planner`], [`settings`], [`task`], [`curriculum`]
//! - Tracking: [`checklist`], [`score`], [`analytics`], [`mistake`], [`achievements`]
//! - Timing: [`pomodoro`], [`countdown`]
//! - Infrastructure: [`config`], [`data_storage`], [`session`], [`error`], [`messages`]
//! - Output: [`view`], [`export`]

pub mod achievements;
pub mod analytics;
pub mod checklist;
pub mod config;
pub mod countdown;
pub mod curriculum;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod messages;
pub mod mistake;
pub mod planner;
pub mod pomodoro;
pub mod score;
pub mod session;
pub mod settings;
pub mod task;
pub mod view;
