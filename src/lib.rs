//! Mail Triage: email classification with suggested replies.

pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod nlp;
pub mod pipeline;
pub mod reply;
pub mod web;
