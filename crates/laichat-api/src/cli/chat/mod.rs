//! Interactive terminal chat client.
//!
//! This module implements the full chat loop: streaming responses over
//! the gateway, thinking spinners, welcome banners, slash commands, file
//! attachments, and conversation persistence. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
