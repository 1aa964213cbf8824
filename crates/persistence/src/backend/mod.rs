// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Raw SQL is confined here: connection PRAGMAs and `last_insert_rowid()`.
//! Queries and mutations use Diesel DSL.

pub mod sqlite;
