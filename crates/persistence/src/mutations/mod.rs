// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.

pub mod business;
pub mod operators;

pub use business::{delete_all_rows, format_timestamp, insert_record};
pub use operators::{
    create_operator, create_session, delete_session, update_last_login, update_session_activity,
};
