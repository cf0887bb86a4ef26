/*!
# Leadsheet

A lead-capture service backed by a spreadsheet-style grid, built in Rust.

## Overview

Leads (name, email, phone, message) arrive over HTTP, are stamped with the
server's current time and appended as rows to a persistent grid whose first
row is the header. The same endpoint serves the full list back as JSON, and
a client-side normalizer reconciles whatever shape the endpoint answers with
into canonical records, newest first.

## Architecture

The crate follows a client-server split:

### Server side
- **Grid** - the append-only row/column store, header row first
- **Sheet Store** - file-backed store adapter, gzip-compressed bincode on disk
- **Ingress Handler** - axum endpoint for create/list/preflight with CORS
  headers on every response path

### Client side
- **Lead Client** - reqwest wrapper with timeout and transport
  classification
- **Normalizer** - shape detection (array, wrapper object, reported failure,
  HTML error page) and canonicalization of heterogeneous responses

## Modules

- **grid**: the grid structure and its row invariants
- **saving**: grid persistence with compression
- **store**: the record store trait and the file-backed sheet store
- **app**: routing, CORS policy and response shaping
- **normalize**: response shape detection and canonical records
- **client**: the HTTP client around the normalizer
- **error**: store and fetch error kinds
- **config**: environment-based server settings

## REST API

- `OPTIONS /` - CORS preflight, cacheable for a day
- `POST /` - append one lead, answers `{"success":true,...}`
- `GET /` - the full lead list as a JSON array, blanks filtered out
*/

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod saving;
pub mod store;

/// Re-export the core types to make the crate easier to use
pub use client::*;
pub use error::*;
pub use grid::*;
pub use normalize::*;
pub use store::*;
