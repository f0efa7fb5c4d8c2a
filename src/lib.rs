//! # Memory Harness
//!
//! A personal-data question-answering assistant: it pulls text from mail,
//! notes, and calendar providers, indexes it in memory for semantic
//! retrieval, and answers natural-language questions through a
//! conversational loop backed by a local Ollama model.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────┐   ┌───────────┐
//! │   Connectors    │──▶│   Pipeline   │──▶│ In-memory │
//! │ Gmail/Notion/   │   │ Chunk+Embed  │   │ vector    │
//! │ Calendar        │   │              │   │ index     │
//! └─────────────────┘   └──────────────┘   └────┬──────┘
//!                                               │
//!                                        ┌──────▼──────┐
//!                                        │  Answerer   │◀─ chat loop
//!                                        │ (RAG+Ollama)│
//!                                        └─────────────┘
//! ```
//!
//! Connectors fail soft: a provider with missing credentials contributes
//! an empty list and a warning, never an error. The index is built once
//! per run, after every connector has reported, and is read-only for the
//! life of the process — there is no persistence and no incremental
//! update path.
//!
//! ## Quick Start
//!
//! ```bash
//! mema sources                  # check connector configuration
//! mema                          # run the pipeline, then chat
//! mema ask "what meetings do I have this week?"
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration with a one-time env overlay |
//! | [`models`] | Core data types |
//! | [`connector_gmail`] | Mail loader (7-day window) |
//! | [`connector_notion`] | Notes-database loader |
//! | [`connector_calendar`] | Upcoming-events loader |
//! | [`google_auth`] | OAuth token cache read/refresh |
//! | [`corpus`] | Loader orchestration and aggregation |
//! | [`chunk`] | Text chunking |
//! | [`embedding`] | Embedding provider abstraction |
//! | [`index`] | In-memory similarity index |
//! | [`ollama`] | Ollama generate/embeddings client |
//! | [`answer`] | Retrieval-augmented answerer |
//! | [`agent`] | Direct-vs-memory turn dispatch |
//! | [`chat`] | Interactive terminal loop |

pub mod agent;
pub mod answer;
pub mod chat;
pub mod chunk;
pub mod config;
pub mod connector_calendar;
pub mod connector_gmail;
pub mod connector_notion;
pub mod corpus;
pub mod embedding;
pub mod google_auth;
pub mod index;
pub mod ingest;
pub mod models;
pub mod ollama;
pub mod sources;
