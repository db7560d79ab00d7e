//! Lokachakra Library
//!
//! Chat state, settings and the terminal front end for the Lokachakra
//! community-trained SLM.

pub mod chat;
pub mod config;
pub mod runner;
pub mod tui;
