//! Metro network server.
//!
//! Keeps an in-memory topology of stations and sections, and answers
//! "what is the shortest way from A to B, and what does it cost?"

pub mod config;
pub mod domain;
pub mod fare;
pub mod graph;
pub mod network;
pub mod path;
pub mod web;
