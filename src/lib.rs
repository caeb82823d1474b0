//! # truthverify: claim and article fact-checking
//!
//! Sends a claim (or an article URL) to a search-grounded Gemini model,
//! extracts the structured verdict from its reply and renders it as a
//! confidence gauge, a sub-claim breakdown, source credibility tags and a
//! bias/tone landscape.
//!
//! ## Architecture
//!
//! - **[`config`]**: Configuration loading, validation and defaults
//! - **[`error`]**: Error types and user-facing messages
//! - **[`models`]**: Verdict payload and grounding metadata records
//! - **[`labels`]**: Bias, tone, sentiment and verdict classification
//! - **[`extract`]**: Fenced-JSON extraction from model text
//! - **[`gemini`]**: Prompt templates and the `generateContent` client
//! - **[`geo`]**: Geolocation toggle and location providers
//! - **[`progress`]**: Time-driven five-step progress stepper
//! - **[`verifier`]**: One verification round trip
//! - **[`render`]**: HTML cards, truth meter, landscape chart, terminal summary
//! - **[`web`]**: Browser front-end (axum)
//! - **[`mcp`]**: MCP server exposing `verify_claim` and `verify_url` (stdio transport via rmcp)

pub mod config;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod geo;
pub mod labels;
pub mod mcp;
pub mod models;
pub mod progress;
pub mod render;
pub mod verifier;
pub mod web;
